use geojson::{Feature, GeoJson, Geometry, Value};
use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::region::{BoundaryFeature, Polygon, Ring};

/// Property keys tried, in order, for a feature's display name.
const NAME_KEYS: [&str; 3] = ["NAME", "name", "ADMIN"];

/// Load boundary features from a GeoJSON file
pub fn load_boundaries(path: &Path) -> Result<Vec<BoundaryFeature>, LoadError> {
    let mut bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let features = parse_boundaries(&mut bytes)?;
    info!("loaded {} boundary features from {}", features.len(), path.display());
    Ok(features)
}

/// Parse GeoJSON bytes in place. The buffer is used as scratch space.
pub fn parse_boundaries(bytes: &mut [u8]) -> Result<Vec<BoundaryFeature>, LoadError> {
    let geojson: GeoJson = simd_json::serde::from_slice(bytes)?;
    Ok(features_from_geojson(&geojson))
}

/// One [`BoundaryFeature`] per GeoJSON feature, in input order. Features
/// without polygonal geometry come through with no polygons; the prefilter
/// drops them.
pub fn features_from_geojson(geojson: &GeoJson) -> Vec<BoundaryFeature> {
    match geojson {
        GeoJson::FeatureCollection(fc) => fc.features.iter().map(feature_to_boundary).collect(),
        GeoJson::Feature(f) => vec![feature_to_boundary(f)],
        GeoJson::Geometry(geometry) => {
            let mut polygons = Vec::new();
            collect_polygons(geometry, &mut polygons);
            vec![BoundaryFeature::new(None, polygons)]
        }
    }
}

fn feature_to_boundary(feature: &Feature) -> BoundaryFeature {
    let name = feature.properties.as_ref().and_then(|props| {
        NAME_KEYS
            .iter()
            .find_map(|key| props.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
    });

    let mut polygons = Vec::new();
    if let Some(ref geometry) = feature.geometry {
        collect_polygons(geometry, &mut polygons);
    }
    if polygons.is_empty() {
        debug!("feature {:?} has no polygonal geometry", name);
    }

    BoundaryFeature::new(name, polygons)
}

fn collect_polygons(geometry: &Geometry, out: &mut Vec<Polygon>) {
    match &geometry.value {
        Value::Polygon(rings) => out.push(to_polygon(rings)),
        Value::MultiPolygon(polygons) => out.extend(polygons.iter().map(|rings| to_polygon(rings))),
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_polygons(g, out);
            }
        }
        _ => {}
    }
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Polygon {
    Polygon::new(
        rings
            .iter()
            .map(|ring| {
                ring.iter()
                    .filter(|c| c.len() >= 2)
                    .map(|c| (c[0], c[1]))
                    .collect::<Ring>()
            })
            .collect(),
    )
}

/// Coarse continent outlines for when no boundary file is available
pub fn sample_world() -> Vec<BoundaryFeature> {
    let named = |name: &str, ring: Ring| BoundaryFeature::new(Some(name.to_string()), vec![Polygon::from_exterior(ring)]);

    vec![
        named(
            "North America",
            vec![
                (-168.0, 65.0), (-166.0, 60.0), (-141.0, 60.0), (-130.0, 55.0),
                (-125.0, 48.0), (-124.0, 40.0), (-117.0, 32.0), (-110.0, 25.0),
                (-97.0, 25.0), (-97.0, 28.0), (-82.0, 24.0), (-80.0, 25.0),
                (-81.0, 31.0), (-75.0, 35.0), (-70.0, 41.0), (-67.0, 45.0),
                (-65.0, 47.0), (-55.0, 47.0), (-52.0, 47.0), (-55.0, 52.0),
                (-58.0, 55.0), (-64.0, 60.0), (-73.0, 62.0), (-80.0, 63.0),
                (-95.0, 62.0), (-110.0, 68.0), (-130.0, 70.0), (-145.0, 70.0),
                (-168.0, 65.0),
            ],
        ),
        named(
            "South America",
            vec![
                (-80.0, 10.0), (-75.0, 5.0), (-70.0, 5.0), (-60.0, 5.0),
                (-50.0, 0.0), (-35.0, -5.0), (-35.0, -10.0), (-38.0, -15.0),
                (-40.0, -22.0), (-48.0, -25.0), (-55.0, -34.0), (-58.0, -38.0),
                (-65.0, -42.0), (-68.0, -50.0), (-75.0, -52.0), (-75.0, -45.0),
                (-72.0, -40.0), (-72.0, -30.0), (-70.0, -20.0), (-70.0, -15.0),
                (-80.0, -5.0), (-80.0, 0.0), (-80.0, 10.0),
            ],
        ),
        named(
            "Europe",
            vec![
                (-10.0, 36.0), (-5.0, 36.0), (0.0, 38.0), (5.0, 43.0),
                (10.0, 44.0), (15.0, 45.0), (20.0, 40.0), (25.0, 37.0),
                (30.0, 40.0), (35.0, 42.0), (40.0, 43.0), (40.0, 55.0),
                (30.0, 60.0), (25.0, 65.0), (20.0, 70.0), (10.0, 71.0),
                (5.0, 62.0), (5.0, 58.0), (-5.0, 58.0), (-10.0, 52.0),
                (-5.0, 48.0), (-5.0, 43.0), (-10.0, 36.0),
            ],
        ),
        named(
            "Africa",
            vec![
                (-17.0, 15.0), (-17.0, 20.0), (-15.0, 28.0), (-5.0, 35.0),
                (10.0, 37.0), (20.0, 33.0), (25.0, 32.0), (35.0, 30.0),
                (35.0, 20.0), (42.0, 12.0), (50.0, 12.0), (45.0, 5.0),
                (40.0, -5.0), (40.0, -15.0), (35.0, -25.0), (30.0, -30.0),
                (20.0, -35.0), (18.0, -35.0), (15.0, -30.0), (10.0, -15.0),
                (10.0, 0.0), (5.0, 5.0), (-5.0, 5.0), (-10.0, 10.0),
                (-17.0, 15.0),
            ],
        ),
        named(
            "Asia",
            vec![
                (40.0, 43.0), (50.0, 40.0), (55.0, 37.0), (60.0, 25.0),
                (65.0, 25.0), (70.0, 20.0), (75.0, 15.0), (80.0, 8.0),
                (80.0, 15.0), (88.0, 22.0), (92.0, 22.0), (95.0, 16.0),
                (100.0, 14.0), (105.0, 10.0), (110.0, 20.0), (115.0, 22.0),
                (120.0, 22.0), (122.0, 25.0), (125.0, 30.0), (130.0, 35.0),
                (135.0, 35.0), (140.0, 40.0), (145.0, 45.0), (145.0, 50.0),
                (140.0, 55.0), (135.0, 55.0), (130.0, 52.0), (130.0, 43.0),
                (120.0, 40.0), (110.0, 45.0), (90.0, 50.0), (70.0, 55.0),
                (60.0, 55.0), (50.0, 50.0), (40.0, 55.0), (40.0, 43.0),
            ],
        ),
        named(
            "Australia",
            vec![
                (115.0, -20.0), (120.0, -18.0), (130.0, -12.0), (140.0, -12.0),
                (145.0, -15.0), (150.0, -25.0), (153.0, -30.0), (150.0, -35.0),
                (145.0, -38.0), (140.0, -38.0), (135.0, -35.0), (130.0, -32.0),
                (125.0, -32.0), (115.0, -35.0), (115.0, -25.0), (115.0, -20.0),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "NAME": "Squareland" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[10, 10], [20, 10], [20, 20], [10, 20], [10, 10]],
                        [[12, 12], [14, 12], [14, 14], [12, 12]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Twin Isles" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0, 0], [2, 0], [2, 2], [0, 0]]],
                        [[[5, 5], [7, 5], [7, 7], [5, 5]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [1, 2] }
            }
        ]
    }"#;

    #[test]
    fn test_parse_collection() {
        let mut bytes = COLLECTION.as_bytes().to_vec();
        let features = parse_boundaries(&mut bytes).expect("valid geojson");
        assert_eq!(features.len(), 3);

        assert_eq!(features[0].name.as_deref(), Some("Squareland"));
        assert_eq!(features[0].polygons.len(), 1);
        assert_eq!(features[0].polygons[0].exterior().len(), 5);
        assert_eq!(features[0].polygons[0].holes().len(), 1);
        assert_eq!(features[0].polygons[0].exterior()[1], (20.0, 10.0));

        assert_eq!(features[1].name.as_deref(), Some("Twin Isles"));
        assert_eq!(features[1].polygons.len(), 2);

        assert!(features[2].name.is_none());
        assert!(features[2].polygons.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let mut bytes = b"{ \"type\": ".to_vec();
        assert!(matches!(parse_boundaries(&mut bytes), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_boundaries(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_sample_world_survives_prefilter() {
        let set = crate::region::RegionPrefilter::default().build(sample_world());
        assert_eq!(set.len(), 6);
        assert_eq!(set.get(6).and_then(|r| r.name.as_deref()), Some("Australia"));
    }
}
