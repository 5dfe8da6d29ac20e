//! Region identification for an interactive globe.
//!
//! Startup runs one way: boundary features go through [`RegionPrefilter`]
//! to become an immutable [`RegionSet`]; [`RegionRasterizer`] turns that
//! into an id-encoded fill raster and a cosmetic outline raster. Queries
//! then come from two directions:
//!
//! - [`PointMembershipTester`] answers "is this lat/lon inside a region?"
//!   with bbox pruning and an even-odd ray cast.
//! - [`PickingService`] answers "which region is under this screen pixel?"
//!   by rendering the fill raster on the globe through a mirror of the
//!   live camera and reading back one pixel.
//!
//! Neither query type can be built before its input exists: the tester
//! borrows a finished `RegionSet`, the picker owns a finished
//! [`FillSurface`].

pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod logging;
pub mod picking;
pub mod raster;
pub mod region;

pub use config::RegionConfig;
pub use picking::{Camera, PickingService};
pub use raster::{FillSurface, OutlineSurface, RasterOutput, RegionRasterizer};
pub use region::{
    BoundaryFeature, BoundingBox, PointMembershipTester, Polygon, Region, RegionId, RegionPrefilter,
    RegionSet, NO_REGION,
};
