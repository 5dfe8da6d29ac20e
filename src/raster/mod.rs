mod draw;
mod rasterizer;
mod surface;

pub use rasterizer::{RasterOutput, RegionRasterizer};
pub use surface::{decode_value, encode_slot, FillSurface, OutlineSurface, RasterSurface, MAX_REGIONS};
