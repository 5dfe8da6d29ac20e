mod bbox;
mod membership;
mod prefilter;

pub use bbox::BoundingBox;
pub use membership::{MembershipProbe, PointMembershipTester};
pub use prefilter::{Region, RegionId, RegionPrefilter, RegionSet, NO_REGION};

/// Ordered (lon, lat) vertices in degrees, implicitly closed.
pub type Ring = Vec<(f64, f64)>;

/// An exterior ring optionally followed by hole rings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// Polygon made of a single exterior ring.
    pub fn from_exterior(exterior: Ring) -> Self {
        Self {
            rings: vec![exterior],
        }
    }

    /// Ring 0, or an empty slice for a polygon without rings.
    #[inline(always)]
    pub fn exterior(&self) -> &[(f64, f64)] {
        self.rings.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Hole rings. Carried through from the input but not consumed by
    /// rasterization or membership yet.
    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }
}

/// One raw boundary feature as read from the input collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundaryFeature {
    pub name: Option<String>,
    pub polygons: Vec<Polygon>,
}

impl BoundaryFeature {
    pub fn new(name: Option<String>, polygons: Vec<Polygon>) -> Self {
        Self { name, polygons }
    }

    /// Unnamed single-polygon feature with no holes.
    pub fn from_ring(exterior: Ring) -> Self {
        Self {
            name: None,
            polygons: vec![Polygon::from_exterior(exterior)],
        }
    }
}

/// Closed axis-aligned rectangle ring, handy for synthetic regions.
pub fn rect_ring(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Ring {
    vec![
        (min_lon, min_lat),
        (max_lon, min_lat),
        (max_lon, max_lat),
        (min_lon, max_lat),
        (min_lon, min_lat),
    ]
}
