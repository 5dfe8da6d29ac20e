use glam::DVec3;

/// Equirectangular mapping between lon/lat degrees and raster pixels.
///
/// `x = (lon + 180) / 360 * W`, `y = (lat - 90) / -180 * H`. Row 0 is the
/// northern edge, matching a top-left-origin, row-major raster. Every
/// consumer that maps raster coordinates to or from lon/lat goes through
/// this type so the rasterizer and the picking material agree exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquirectProjection {
    pub width: usize,
    pub height: usize,
}

impl EquirectProjection {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Continuous pixel coordinates for a lon/lat pair.
    #[inline(always)]
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = (lon + 180.0) / 360.0 * self.width as f64;
        let y = (lat - 90.0) / -180.0 * self.height as f64;
        (x, y)
    }

    /// Lon/lat of a continuous pixel coordinate (inverse of `project`).
    #[inline(always)]
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = x / self.width as f64 * 360.0 - 180.0;
        let lat = y / self.height as f64 * -180.0 + 90.0;
        (lon, lat)
    }

    /// Lon/lat at the centre of pixel `(px, py)`.
    #[inline(always)]
    pub fn pixel_center(&self, px: usize, py: usize) -> (f64, f64) {
        self.unproject(px as f64 + 0.5, py as f64 + 0.5)
    }

    /// Nearest-filtered pixel holding a lon/lat pair, clamped to the grid.
    #[inline(always)]
    pub fn pixel_at(&self, lon: f64, lat: f64) -> (usize, usize) {
        let (x, y) = self.project(lon, lat);
        let px = (x.floor().max(0.0) as usize).min(self.width.saturating_sub(1));
        let py = (y.floor().max(0.0) as usize).min(self.height.saturating_sub(1));
        (px, py)
    }
}

/// World-space position of a lon/lat point on a y-up globe of `radius`.
/// Longitude 0 faces +Z, longitude 90 faces +X.
#[inline(always)]
pub fn globe_to_world(lon: f64, lat: f64, radius: f64) -> DVec3 {
    let lon_rad = lon.to_radians();
    let lat_rad = lat.to_radians();
    DVec3::new(
        radius * lat_rad.cos() * lon_rad.sin(),
        radius * lat_rad.sin(),
        radius * lat_rad.cos() * lon_rad.cos(),
    )
}

/// Inverse of [`globe_to_world`]: returns `(lon, lat, radius)`.
#[inline(always)]
pub fn world_to_globe(position: DVec3) -> (f64, f64, f64) {
    let r = position.length();
    if r == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let lon = position.x.atan2(position.z).to_degrees();
    let lat = (position.y / r).clamp(-1.0, 1.0).asin().to_degrees();
    (lon, lat, r)
}
