use log::info;
use rayon::prelude::*;
use std::time::Instant;

use super::draw::draw_stroke;
use super::surface::{encode_slot, FillSurface, OutlineSurface, RasterSurface, MAX_REGIONS};
use crate::config::RegionConfig;
use crate::geo::EquirectProjection;
use crate::region::RegionSet;

/// Both rasters plus the projection needed to map pixels back to lon/lat.
#[derive(Clone, Debug)]
pub struct RasterOutput {
    pub fill: FillSurface,
    pub outline: OutlineSurface,
    pub projection: EquirectProjection,
}

/// An exterior ring in pixel space, tagged with its fill value.
struct PixelRing {
    points: Vec<(f64, f64)>,
    min_y: f64,
    max_y: f64,
    value: u8,
}

impl PixelRing {
    /// Append x coordinates where the horizontal line at `y` crosses an edge.
    #[inline(always)]
    fn crossings(&self, y: f64, out: &mut Vec<f64>) {
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let (x1, y1) = self.points[i];
            let (x2, y2) = self.points[j];
            if (y1 > y) != (y2 > y) {
                out.push(x1 + (y - y1) * (x2 - x1) / (y2 - y1));
            }
            j = i;
        }
    }
}

/// Turns a [`RegionSet`] into an id-encoded fill raster and a cosmetic
/// outline raster over the equirectangular domain.
pub struct RegionRasterizer<'a> {
    regions: &'a RegionSet,
    projection: EquirectProjection,
    outline_width: f64,
}

impl<'a> RegionRasterizer<'a> {
    pub const DEFAULT_OUTLINE_WIDTH: f64 = 8.0;

    /// Panics if the set holds more regions than the fill channel can encode.
    pub fn new(regions: &'a RegionSet, width: usize, height: usize) -> Self {
        assert!(
            regions.len() <= MAX_REGIONS,
            "fill encoding overflow: {} regions exceed the {} a u8 channel can hold",
            regions.len(),
            MAX_REGIONS
        );
        assert!(width > 0 && height > 0, "raster resolution must be non-zero");

        Self {
            regions,
            projection: EquirectProjection::new(width, height),
            outline_width: Self::DEFAULT_OUTLINE_WIDTH,
        }
    }

    pub fn from_config(regions: &'a RegionSet, config: &RegionConfig) -> Self {
        Self::new(regions, config.raster_width, config.raster_height)
            .with_outline_width(config.outline_width)
    }

    pub fn with_outline_width(mut self, width: f64) -> Self {
        self.outline_width = width;
        self
    }

    pub fn projection(&self) -> EquirectProjection {
        self.projection
    }

    /// Run both passes.
    pub fn rasterize(&self) -> RasterOutput {
        RasterOutput {
            fill: self.rasterize_fill(),
            outline: self.rasterize_outline(self.outline_width),
            projection: self.projection,
        }
    }

    fn pixel_rings(&self) -> Vec<PixelRing> {
        let mut rings = Vec::new();
        for (slot, region) in self.regions.iter().enumerate() {
            let value = encode_slot(slot);
            for exterior in region.exteriors() {
                if exterior.is_empty() {
                    continue;
                }
                let points: Vec<(f64, f64)> = exterior
                    .iter()
                    .map(|&(lon, lat)| self.projection.project(lon, lat))
                    .collect();
                let (min_y, max_y) = points
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
                        (lo.min(y), hi.max(y))
                    });
                rings.push(PixelRing {
                    points,
                    min_y,
                    max_y,
                    value,
                });
            }
        }
        rings
    }

    /// Even-odd scanline fill sampled at pixel centres. Rows run in
    /// parallel; within a row regions are painted in id order, so the
    /// highest id wins any overlap.
    pub fn rasterize_fill(&self) -> FillSurface {
        let started = Instant::now();
        let rings = self.pixel_rings();
        let width = self.projection.width;
        let mut surface = RasterSurface::new(width, self.projection.height, 0);

        surface
            .as_bytes_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each_init(Vec::new, |crossings, (py, row)| {
                let y = py as f64 + 0.5;
                for ring in &rings {
                    if y < ring.min_y || y > ring.max_y {
                        continue;
                    }
                    crossings.clear();
                    ring.crossings(y, crossings);
                    crossings.sort_unstable_by(f64::total_cmp);

                    for span in crossings.chunks_exact(2) {
                        let start = ((span[0] - 0.5).ceil().max(0.0) as usize).min(width);
                        let end = ((span[1] - 0.5).ceil().max(0.0) as usize).min(width);
                        if start < end {
                            row[start..end].fill(ring.value);
                        }
                    }
                }
            });

        info!(
            "rasterized fill for {} regions ({} rings) at {}x{} in {:?}",
            self.regions.len(),
            rings.len(),
            width,
            self.projection.height,
            started.elapsed()
        );
        FillSurface::new(surface)
    }

    /// White surface with every exterior ring stroked in black.
    pub fn rasterize_outline(&self, line_width: f64) -> OutlineSurface {
        let started = Instant::now();
        let mut surface = RasterSurface::new(
            self.projection.width,
            self.projection.height,
            OutlineSurface::BACKGROUND,
        );

        for region in self.regions {
            for exterior in region.exteriors() {
                let Some(&last) = exterior.last() else {
                    continue;
                };
                let mut prev = self.pixel(last);
                for &vertex in exterior {
                    let next = self.pixel(vertex);
                    draw_stroke(&mut surface, prev, next, line_width, OutlineSurface::STROKE);
                    prev = next;
                }
            }
        }

        info!(
            "rasterized outline (width {}) in {:?}",
            line_width,
            started.elapsed()
        );
        OutlineSurface::new(surface)
    }

    /// Stroke endpoint in pixels, clamped to one raster size beyond each
    /// edge so absurd coordinates cannot produce an unbounded walk.
    #[inline(always)]
    fn pixel(&self, (lon, lat): (f64, f64)) -> (i64, i64) {
        let (x, y) = self.projection.project(lon, lat);
        let w = self.projection.width as f64;
        let h = self.projection.height as f64;
        (
            x.floor().clamp(-w, 2.0 * w) as i64,
            y.floor().clamp(-h, 2.0 * h) as i64,
        )
    }
}
