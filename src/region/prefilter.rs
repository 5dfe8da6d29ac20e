use log::{debug, info, warn};

use super::{BoundaryFeature, BoundingBox, Polygon};
use crate::config::RegionConfig;

/// 1-based region identifier. `0` is reserved for "no region".
pub type RegionId = u32;

/// Background / no region.
pub const NO_REGION: RegionId = 0;

/// A boundary feature that survived prefiltering.
#[derive(Clone, Debug)]
pub struct Region {
    pub id: RegionId,
    pub name: Option<String>,
    pub polygons: Vec<Polygon>,
    /// Aggregate bounds over every polygon's exterior ring.
    pub bounding_box: BoundingBox,
    /// Per-polygon bounds, aligned with `polygons`.
    pub sub_bounding_boxes: Vec<BoundingBox>,
}

impl Region {
    pub fn is_multi_part(&self) -> bool {
        self.polygons.len() > 1
    }

    /// Exterior ring of every polygon, in order.
    pub fn exteriors(&self) -> impl Iterator<Item = &[(f64, f64)]> + '_ {
        self.polygons.iter().map(Polygon::exterior)
    }

    /// Display label, falling back to the id.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("region #{}", self.id),
        }
    }
}

/// Immutable, id-ordered set of surviving regions.
#[derive(Clone, Debug, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    /// Region for `id`, or `None` for [`NO_REGION`] and unknown ids.
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        if id == NO_REGION {
            return None;
        }
        self.regions.get(id as usize - 1)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn as_slice(&self) -> &[Region] {
        &self.regions
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

/// Drops regions too small to matter at raster resolution and assigns
/// dense ids to the rest.
#[derive(Clone, Copy, Debug)]
pub struct RegionPrefilter {
    min_span: f64,
}

impl RegionPrefilter {
    pub const DEFAULT_MIN_SPAN: f64 = 1.0;

    pub fn new(min_span: f64) -> Self {
        Self { min_span }
    }

    pub fn from_config(config: &RegionConfig) -> Self {
        Self::new(config.min_span)
    }

    pub fn min_span(&self) -> f64 {
        self.min_span
    }

    /// Bounds for a feature: the sole polygon's exterior, or the union of
    /// every polygon's exterior bounds alongside the per-polygon list.
    pub fn feature_bounds(polygons: &[Polygon]) -> (BoundingBox, Vec<BoundingBox>) {
        if let [only] = polygons {
            let bounds = BoundingBox::from_ring(only.exterior());
            return (bounds, vec![bounds]);
        }

        let subs: Vec<BoundingBox> = polygons
            .iter()
            .map(|p| BoundingBox::from_ring(p.exterior()))
            .collect();
        let aggregate = subs.iter().fold(BoundingBox::EMPTY, |acc, b| acc.union(b));
        (aggregate, subs)
    }

    /// Filter features in input order; survivors get ids `1..=N`.
    pub fn build<I>(&self, features: I) -> RegionSet
    where
        I: IntoIterator<Item = BoundaryFeature>,
    {
        let mut regions = Vec::new();
        let mut dropped = 0usize;

        for (index, feature) in features.into_iter().enumerate() {
            let (bounding_box, sub_bounding_boxes) = Self::feature_bounds(&feature.polygons);

            if !bounding_box.meets_span(self.min_span) {
                debug!(
                    "dropping feature {} ({:?}): span {:.3}x{:.3} below {}",
                    index,
                    feature.name,
                    bounding_box.width(),
                    bounding_box.height(),
                    self.min_span
                );
                dropped += 1;
                continue;
            }

            let id = regions.len() as RegionId + 1;
            for (part, polygon) in feature.polygons.iter().enumerate() {
                let vertices = polygon.exterior().len();
                if vertices < 3 {
                    warn!(
                        "region {} ({:?}) part {} has a degenerate exterior ring ({} vertices); it will never match",
                        id, feature.name, part, vertices
                    );
                }
            }

            regions.push(Region {
                id,
                name: feature.name,
                polygons: feature.polygons,
                bounding_box,
                sub_bounding_boxes,
            });
        }

        info!(
            "prefilter kept {} regions, dropped {} (min span {})",
            regions.len(),
            dropped,
            self.min_span
        );

        RegionSet { regions }
    }
}

impl Default for RegionPrefilter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_SPAN)
    }
}
