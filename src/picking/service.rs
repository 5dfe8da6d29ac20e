use log::debug;
use std::sync::Arc;
use std::time::Instant;

use super::camera::Camera;
use super::scene::{Globe, ShadowScene};
use super::target::OffscreenTarget;
use crate::raster::{decode_value, FillSurface};
use crate::region::RegionId;

/// Screen-click picking: renders the fill surface on the globe through a
/// mirror of the live camera and reads back a single pixel.
///
/// Call [`PickingService::sync_camera`] once per frame tick before input
/// handling, so the shadow camera is at most one frame stale when a click
/// arrives. [`PickingService::pick`] renders the whole offscreen target and
/// blocks until the read-back is done; call it from input handlers only,
/// never every frame. One pick at a time.
pub struct PickingService {
    scene: ShadowScene,
    camera: Camera,
    target: OffscreenTarget,
    viewport: (usize, usize),
    /// Target size relative to the viewport.
    target_scale: f64,
}

impl PickingService {
    /// Target is sized to the viewport; the shadow camera starts as a copy
    /// of `primary`.
    pub fn new(
        fill: Arc<FillSurface>,
        globe_radius: f64,
        primary: &Camera,
        viewport_width: usize,
        viewport_height: usize,
    ) -> Self {
        let viewport = (viewport_width.max(1), viewport_height.max(1));
        Self {
            scene: ShadowScene::new(Globe::new(globe_radius), fill),
            camera: primary.clone(),
            target: OffscreenTarget::new(viewport.0, viewport.1),
            viewport,
            target_scale: 1.0,
        }
    }

    /// Render picks at `scale` times the viewport resolution. Smaller
    /// targets make each pick cheaper at the cost of precision near borders.
    pub fn with_target_scale(mut self, scale: f64) -> Self {
        self.target_scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        let (width, height) = self.target_size();
        self.target.resize(width, height);
        self
    }

    /// Mirror the primary camera's pose and aspect.
    pub fn sync_camera(&mut self, primary: &Camera) {
        self.camera.copy_pose_from(primary);
    }

    /// Match a new viewport size.
    pub fn resize(&mut self, viewport_width: usize, viewport_height: usize) {
        self.viewport = (viewport_width.max(1), viewport_height.max(1));
        let (width, height) = self.target_size();
        if (self.target.width(), self.target.height()) != (width, height) {
            self.target.resize(width, height);
        }
    }

    fn target_size(&self) -> (usize, usize) {
        let scaled = |n: usize| ((n as f64 * self.target_scale).round() as usize).max(1);
        (scaled(self.viewport.0), scaled(self.viewport.1))
    }

    pub fn viewport(&self) -> (usize, usize) {
        self.viewport
    }

    pub fn target_size_px(&self) -> (usize, usize) {
        (self.target.width(), self.target.height())
    }

    pub fn shadow_camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &ShadowScene {
        &self.scene
    }

    /// Target pixel `(x, row)` for a top-left-origin viewport coordinate:
    /// scaled to the target size, the row flipped into the target's
    /// bottom-up order, both axes clamped. Clamping happens before any
    /// integer conversion, so infinite or huge inputs land on the edges.
    pub fn to_target_pixel(&self, screen_x: f64, screen_y: f64) -> (usize, usize) {
        let max_x = (self.target.width() - 1) as f64;
        let max_row = self.target.height() - 1;
        let sx = self.target.width() as f64 / self.viewport.0 as f64;
        let sy = self.target.height() as f64 / self.viewport.1 as f64;

        let x = (screen_x * sx).floor().clamp(0.0, max_x) as usize;
        let y = (screen_y * sy).floor().clamp(0.0, max_row as f64) as usize;
        (x, max_row - y)
    }

    /// Region id under a screen pixel, [`crate::region::NO_REGION`] when
    /// the click misses the globe or lands on background.
    pub fn pick(&mut self, screen_x: f64, screen_y: f64) -> RegionId {
        let started = Instant::now();
        self.target.render(&self.scene, &self.camera);

        let (x, row) = self.to_target_pixel(screen_x, screen_y);
        let value = self.target.read_pixel(x, row);
        let id = decode_value(value);

        debug!(
            "pick ({:.1}, {:.1}) -> target ({}, {}) value {} id {} in {:?}",
            screen_x,
            screen_y,
            x,
            row,
            value,
            id,
            started.elapsed()
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RegionRasterizer;
    use crate::region::{rect_ring, BoundaryFeature, RegionPrefilter, NO_REGION};

    fn service(width: usize, height: usize) -> PickingService {
        let set = RegionPrefilter::default().build([
            BoundaryFeature::from_ring(rect_ring(-20.0, 10.0, 20.0, 40.0)),
            BoundaryFeature::from_ring(rect_ring(-20.0, -40.0, 20.0, -10.0)),
        ]);
        let fill = RegionRasterizer::new(&set, 360, 180).rasterize_fill();
        let camera = Camera::from_config(&Default::default(), width as f64 / height as f64);
        PickingService::new(Arc::new(fill), 1.0, &camera, width, height)
    }

    #[test]
    fn test_row_flip_and_clamp() {
        let service = service(100, 50);
        assert_eq!(service.to_target_pixel(0.0, 0.0), (0, 49));
        assert_eq!(service.to_target_pixel(99.9, 49.9), (99, 0));
        assert_eq!(service.to_target_pixel(-5.0, -5.0), (0, 49));
        assert_eq!(service.to_target_pixel(500.0, 500.0), (99, 0));
    }

    #[test]
    fn test_extreme_coordinates_clamp() {
        let service = service(80, 80);
        assert_eq!(service.to_target_pixel(10.0, -1e19), (10, 79));
        assert_eq!(service.to_target_pixel(10.0, 1e19), (10, 0));
        assert_eq!(service.to_target_pixel(f64::NEG_INFINITY, f64::NEG_INFINITY), (0, 79));
        assert_eq!(service.to_target_pixel(f64::INFINITY, f64::INFINITY), (79, 0));
        assert_eq!(service.to_target_pixel(-1e19, 1e19), (0, 0));
        assert_eq!(service.to_target_pixel(f64::NAN, f64::NAN), (0, 79));
    }

    #[test]
    fn test_viewport_scales_to_target() {
        let service = service(100, 100).with_target_scale(0.5);
        assert_eq!(service.viewport(), (100, 100));
        assert_eq!(service.target_size_px(), (50, 50));
        assert_eq!(service.to_target_pixel(99.0, 0.0), (49, 49));
        assert_eq!(service.to_target_pixel(50.0, 50.0), (25, 24));
    }

    #[test]
    fn test_scaled_target_picks_like_full_size() {
        let mut service = service(100, 100).with_target_scale(0.5);
        assert_eq!(service.pick(50.0, 29.0), 1);
        assert_eq!(service.pick(50.0, 71.0), 2);
        assert_eq!(service.pick(0.0, 0.0), NO_REGION);

        service.resize(200, 200);
        assert_eq!(service.target_size_px(), (100, 100));
        assert_eq!(service.pick(100.0, 58.0), 1);
    }

    #[test]
    fn test_pick_north_and_south() {
        let mut service = service(100, 100);
        // Upper half of the screen is the northern hemisphere.
        assert_eq!(service.pick(50.0, 29.0), 1);
        assert_eq!(service.pick(50.0, 71.0), 2);
        // Equator band between the two regions.
        assert_eq!(service.pick(50.0, 50.0), NO_REGION);
        // Corner misses the globe.
        assert_eq!(service.pick(0.0, 0.0), NO_REGION);
    }

    #[test]
    fn test_sync_camera_follows_primary() {
        let mut service = service(100, 100);
        let mut primary = service.shadow_camera().clone();
        primary.orbit(180.0, 0.0, 2.0);
        service.sync_camera(&primary);
        // Far side of the globe has no regions.
        assert_eq!(service.pick(50.0, 29.0), NO_REGION);

        primary.orbit(0.0, 0.0, 2.0);
        service.sync_camera(&primary);
        assert_eq!(service.pick(50.0, 29.0), 1);
    }

    #[test]
    fn test_resize_keeps_picking() {
        let mut service = service(100, 100);
        service.resize(200, 200);
        assert_eq!(service.pick(100.0, 58.0), 1);
        assert_eq!(service.pick(0.0, 199.0), NO_REGION);
    }
}
