use crate::geo::EquirectProjection;
use crate::region::{RegionId, NO_REGION};

/// Most regions a single `u8` fill channel can encode (value 0 is background).
pub const MAX_REGIONS: usize = u8::MAX as usize;

/// Fill channel value for the region in `slot` (0-based position in the set).
#[inline(always)]
pub fn encode_slot(slot: usize) -> u8 {
    debug_assert!(slot < MAX_REGIONS);
    (slot + 1) as u8
}

/// Region id for a fill channel value. `value - 1` is the slot; ids are
/// numbered from 1 in slot order. Zero decodes to [`NO_REGION`].
#[inline(always)]
pub fn decode_value(value: u8) -> RegionId {
    match value.checked_sub(1) {
        Some(slot) => slot as RegionId + 1,
        None => NO_REGION,
    }
}

/// Single-channel, row-major raster with a top-left origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterSurface {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RasterSurface {
    pub fn new(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn projection(&self) -> EquirectProjection {
        EquirectProjection::new(self.width, self.height)
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// Set a pixel using signed coordinates (ignores anything off the grid)
    #[inline(always)]
    pub fn set_signed(&mut self, x: i64, y: i64, value: u8) {
        if x >= 0 && y >= 0 {
            self.set(x as usize, y as usize, value);
        }
    }

    /// Nearest-filtered value at a lon/lat pair.
    #[inline(always)]
    pub fn sample(&self, lon: f64, lat: f64) -> u8 {
        let (x, y) = self.projection().pixel_at(lon, lat);
        self.data[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Count of pixels holding `value`.
    pub fn count(&self, value: u8) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }
}

/// Id-encoded fill raster: each pixel holds `slot + 1` for the region
/// covering it, 0 for background. This is the only surface that may be
/// decoded back to a region id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillSurface(RasterSurface);

impl FillSurface {
    pub(crate) fn new(surface: RasterSurface) -> Self {
        Self(surface)
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.0
    }

    pub fn projection(&self) -> EquirectProjection {
        self.0.projection()
    }

    /// Raw channel value at a lon/lat pair.
    #[inline(always)]
    pub fn sample(&self, lon: f64, lat: f64) -> u8 {
        self.0.sample(lon, lat)
    }

    /// Region id covering a lon/lat pair.
    pub fn region_at(&self, lon: f64, lat: f64) -> RegionId {
        decode_value(self.sample(lon, lat))
    }

    /// Region id stored at pixel `(x, y)`; off-grid pixels are background.
    pub fn region_at_pixel(&self, x: usize, y: usize) -> RegionId {
        self.0.get(x, y).map(decode_value).unwrap_or(NO_REGION)
    }
}

/// Cosmetic boundary mask: 0 (black) on strokes, 255 (white) elsewhere.
/// Carries no id information.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineSurface(RasterSurface);

impl OutlineSurface {
    pub const STROKE: u8 = 0;
    pub const BACKGROUND: u8 = u8::MAX;

    pub(crate) fn new(surface: RasterSurface) -> Self {
        Self(surface)
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.0
    }

    /// Whether the stroke covers a lon/lat pair.
    #[inline(always)]
    pub fn is_stroke_at(&self, lon: f64, lat: f64) -> bool {
        self.0.sample(lon, lat) == Self::STROKE
    }
}
