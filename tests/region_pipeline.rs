//! End-to-end: boundary features through the prefilter, both raster passes,
//! CPU membership and screen picking.

use std::sync::Arc;

use globe_picker::data::sample_world;
use globe_picker::region::rect_ring;
use globe_picker::{
    BoundaryFeature, Camera, PickingService, PointMembershipTester, Polygon, RegionConfig, RegionId,
    RegionPrefilter, RegionRasterizer, RegionSet, NO_REGION,
};

/// Brute-force reference: classify every pixel centre with the membership
/// tester. Only sensible for small grids.
fn classify_by_membership(regions: &RegionSet, width: usize, height: usize) -> Vec<RegionId> {
    let tester = PointMembershipTester::new(regions);
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let lat = 90.0 - (y as f64 + 0.5) * 180.0 / height as f64;
        for x in 0..width {
            let lon = (x as f64 + 0.5) * 360.0 / width as f64 - 180.0;
            out.push(tester.region_at(lat, lon).unwrap_or(NO_REGION));
        }
    }
    out
}

/// Disjoint shapes whose edges never pass through a 1-degree pixel centre.
fn disjoint_features() -> Vec<BoundaryFeature> {
    vec![
        BoundaryFeature::from_ring(rect_ring(-170.0, 50.0, -120.0, 80.0)),
        BoundaryFeature::from_ring(vec![(0.25, 0.25), (30.25, 0.25), (0.25, 20.25)]),
        BoundaryFeature::new(
            Some("islands".to_string()),
            vec![
                Polygon::from_exterior(rect_ring(100.0, -40.0, 110.0, -30.0)),
                Polygon::from_exterior(rect_ring(120.0, -20.0, 135.0, -5.0)),
            ],
        ),
        // U shape: the notch between the arms is outside.
        BoundaryFeature::from_ring(vec![
            (-60.0, -60.0),
            (-30.0, -60.0),
            (-30.0, -30.0),
            (-40.0, -30.0),
            (-40.0, -50.0),
            (-50.0, -50.0),
            (-50.0, -30.0),
            (-60.0, -30.0),
        ]),
        // Too small to survive the prefilter.
        BoundaryFeature::from_ring(rect_ring(60.0, 60.0, 60.5, 60.5)),
    ]
}

#[test]
fn test_every_region_round_trips_through_fill() {
    let regions = RegionPrefilter::default().build(disjoint_features());
    assert_eq!(regions.len(), 4);

    let fill = RegionRasterizer::new(&regions, 360, 180).rasterize_fill();
    for region in &regions {
        let painted = fill.surface().count(region.id as u8);
        assert!(painted > 0, "region {} left no pixels", region.id);
    }

    assert_eq!(fill.region_at(-145.0, 65.0), 1);
    assert_eq!(fill.region_at(5.0, 5.0), 2);
    assert_eq!(fill.region_at(105.0, -35.0), 3);
    assert_eq!(fill.region_at(127.0, -12.0), 3);
    assert_eq!(fill.region_at(-55.0, -40.0), 4);
    assert_eq!(fill.region_at(-45.0, -40.0), NO_REGION);
    assert_eq!(fill.region_at(60.25, 60.25), NO_REGION);
}

#[test]
fn test_scanline_fill_matches_membership() {
    let regions = RegionPrefilter::default().build(disjoint_features());
    let fill = RegionRasterizer::new(&regions, 360, 180).rasterize_fill();

    let expected = classify_by_membership(&regions, 360, 180);
    let mismatches = (0..180)
        .flat_map(|y| (0..360).map(move |x| (x, y)))
        .filter(|&(x, y)| fill.region_at_pixel(x, y) != expected[y * 360 + x])
        .count();
    assert_eq!(mismatches, 0);
}

#[test]
fn test_sample_world_fill_agrees_with_membership_at_centres() {
    let regions = RegionPrefilter::default().build(sample_world());
    let fill = RegionRasterizer::new(&regions, 720, 360).rasterize_fill();
    let tester = PointMembershipTester::new(&regions);

    for (name, lon, lat) in [
        ("North America", -100.0, 45.0),
        ("South America", -60.0, -15.0),
        ("Africa", 20.0, 5.0),
        ("Australia", 135.0, -25.0),
    ] {
        let id = tester.region_at(lat, lon).expect(name);
        assert_eq!(regions.get(id).map(|r| r.label()), Some(name.to_string()));
        assert_eq!(fill.region_at(lon, lat), id, "{name}");
    }

    // Mid-Pacific
    assert!(!tester.test_membership(0.0, -150.0));
    assert_eq!(fill.region_at(-150.0, 0.0), NO_REGION);
}

#[test]
fn test_outline_is_cosmetic() {
    let regions = RegionPrefilter::default().build(disjoint_features());
    let output = RegionRasterizer::new(&regions, 360, 180)
        .with_outline_width(1.0)
        .rasterize();

    assert!(output.outline.is_stroke_at(-170.0, 65.0));
    assert!(!output.outline.is_stroke_at(-145.0, 65.0));
    // The fill under a stroke still decodes to the region.
    assert_eq!(output.fill.region_at(-169.5, 65.0), 1);
}

#[test]
fn test_pick_hits_and_misses() {
    let regions = RegionPrefilter::default().build([
        BoundaryFeature::from_ring(rect_ring(-30.0, -30.0, 30.0, 30.0)),
        BoundaryFeature::from_ring(rect_ring(150.0, -10.0, 170.0, 10.0)),
    ]);
    let config = RegionConfig {
        raster_width: 360,
        raster_height: 180,
        ..RegionConfig::default()
    };
    let output = RegionRasterizer::from_config(&regions, &config).rasterize();

    let mut primary = Camera::from_config(&config, 1.0);
    let mut picker = PickingService::new(Arc::new(output.fill), config.globe_radius, &primary, 80, 80);

    // Centre of the view is lon 0 / lat 0.
    assert_eq!(picker.pick(40.0, 40.0), 1);
    // Corner is empty space.
    assert_eq!(picker.pick(0.0, 0.0), NO_REGION);
    // Out of range coordinates clamp instead of failing.
    assert_eq!(picker.pick(-500.0, 10_000.0), NO_REGION);
    assert_eq!(picker.pick(f64::INFINITY, f64::NEG_INFINITY), NO_REGION);

    // Turn to the second region; the picker only sees it after a sync.
    primary.orbit(160.0, 0.0, config.camera_distance);
    assert_eq!(picker.pick(40.0, 40.0), 1);
    picker.sync_camera(&primary);
    assert_eq!(picker.pick(40.0, 40.0), 2);
}

#[test]
#[should_panic(expected = "fill encoding overflow")]
fn test_too_many_regions_is_rejected() {
    let features: Vec<_> = (0..256)
        .map(|i| {
            let lon = -180.0 + (i % 32) as f64 * 11.0;
            let lat = -80.0 + (i / 32) as f64 * 20.0;
            BoundaryFeature::from_ring(rect_ring(lon, lat, lon + 5.0, lat + 5.0))
        })
        .collect();
    let regions = RegionPrefilter::default().build(features);
    assert_eq!(regions.len(), 256);
    RegionRasterizer::new(&regions, 360, 180);
}
