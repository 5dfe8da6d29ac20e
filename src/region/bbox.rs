/// Axis-aligned lon/lat bounds in degrees.
///
/// Built as the min/max over every vertex considered, so `min_x <= max_x`
/// and `min_y <= max_y` hold whenever at least one vertex was seen.
/// [`BoundingBox::EMPTY`] is the identity for [`BoundingBox::union`]; it
/// contains nothing and has negative infinite span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Bounds of a ring of (lon, lat) vertices.
    pub fn from_ring(ring: &[(f64, f64)]) -> Self {
        ring.iter().fold(Self::EMPTY, |mut acc, &(lon, lat)| {
            acc.extend(lon, lat);
            acc
        })
    }

    #[inline(always)]
    pub fn extend(&mut self, lon: f64, lat: f64) {
        self.min_x = self.min_x.min(lon);
        self.max_x = self.max_x.max(lon);
        self.min_y = self.min_y.min(lat);
        self.max_y = self.max_y.max(lat);
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    #[inline(always)]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline(always)]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Inclusive containment test; boundary points count as inside the box.
    #[inline(always)]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        !(lat > self.max_y || lat < self.min_y || lon > self.max_x || lon < self.min_x)
    }

    /// Both spans must reach `min_span` degrees.
    pub fn meets_span(&self, min_span: f64) -> bool {
        !(self.width() < min_span || self.height() < min_span)
    }
}
