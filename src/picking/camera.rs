use glam::DVec3;

use crate::config::RegionConfig;
use crate::geo::{globe_to_world, world_to_globe};

/// A ray with a unit-length direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

/// Perspective camera. Orientation is kept as an orthonormal basis
/// (forward, right, up) rather than a quaternion; forward is the viewing
/// direction and screen +x/+y map to right/up.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    forward: DVec3,
    right: DVec3,
    up: DVec3,
    /// Vertical field of view in degrees.
    pub fov: f64,
    /// Viewport width / height.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    /// Latitude limit for orbiting, keeps the basis away from the poles.
    const MAX_ORBIT_LAT: f64 = 89.0;

    /// Camera at the origin looking down -Z with +Y up.
    pub fn new(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            position: DVec3::ZERO,
            forward: DVec3::NEG_Z,
            right: DVec3::X,
            up: DVec3::Y,
            fov,
            aspect,
            near,
            far,
        }
    }

    /// Camera from config defaults, orbiting above lon 0 / lat 0.
    pub fn from_config(config: &RegionConfig, aspect: f64) -> Self {
        let mut camera = Self::new(config.camera_fov, aspect, config.camera_near, config.camera_far);
        camera.orbit(0.0, 0.0, config.camera_distance);
        camera
    }

    /// Place the camera at `position` looking towards `target`.
    pub fn look_at(&mut self, position: DVec3, target: DVec3) {
        let forward = (target - position).normalize_or_zero();
        if forward == DVec3::ZERO {
            return;
        }
        // Fall back to +Z as reference when looking straight up or down.
        let reference = if forward.cross(DVec3::Y).length_squared() < 1e-12 {
            DVec3::Z
        } else {
            DVec3::Y
        };
        let right = forward.cross(reference).normalize();
        let up = right.cross(forward).normalize();

        self.position = position;
        self.forward = forward;
        self.right = right;
        self.up = up;
    }

    /// Orbit around the globe centre: sit `distance` above (lon, lat) and
    /// look at the origin.
    pub fn orbit(&mut self, lon: f64, lat: f64, distance: f64) {
        let lat = lat.clamp(-Self::MAX_ORBIT_LAT, Self::MAX_ORBIT_LAT);
        self.look_at(globe_to_world(lon, lat, distance), DVec3::ZERO);
    }

    /// Current (lon, lat, distance) relative to the globe centre.
    pub fn orbit_position(&self) -> (f64, f64, f64) {
        world_to_globe(self.position)
    }

    /// Shift the orbit by degrees of longitude and latitude.
    pub fn rotate_orbit(&mut self, d_lon: f64, d_lat: f64) {
        let (lon, lat, distance) = self.orbit_position();
        let mut lon = lon + d_lon;
        if lon > 180.0 {
            lon -= 360.0;
        } else if lon < -180.0 {
            lon += 360.0;
        }
        self.orbit(lon, lat + d_lat, distance);
    }

    /// Scale the orbit distance, clamped to `[min, max]`.
    pub fn zoom(&mut self, factor: f64, min: f64, max: f64) {
        let (lon, lat, distance) = self.orbit_position();
        self.orbit(lon, lat, (distance * factor).clamp(min, max));
    }

    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect;
    }

    pub fn forward(&self) -> DVec3 {
        self.forward
    }

    pub fn right(&self) -> DVec3 {
        self.right
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Copy position, orientation and aspect from another camera. Lens
    /// parameters (fov, clip planes) are left alone.
    pub fn copy_pose_from(&mut self, other: &Camera) {
        self.position = other.position;
        self.forward = other.forward;
        self.right = other.right;
        self.up = other.up;
        self.aspect = other.aspect;
    }

    /// Primary ray through normalized device coordinates (-1..1, +y up).
    #[inline(always)]
    pub fn ray(&self, ndc_x: f64, ndc_y: f64) -> Ray {
        let half = (self.fov.to_radians() / 2.0).tan();
        let direction = (self.forward
            + self.right * (ndc_x * half * self.aspect)
            + self.up * (ndc_y * half))
            .normalize();
        Ray {
            origin: self.position,
            direction,
        }
    }

    /// Distance of `point` along the viewing axis.
    #[inline(always)]
    pub fn view_depth(&self, point: DVec3) -> f64 {
        (point - self.position).dot(self.forward)
    }

    /// Normalized device coordinates of a world point, or `None` when it is
    /// outside the clip range.
    pub fn project(&self, point: DVec3) -> Option<(f64, f64)> {
        let depth = self.view_depth(point);
        if depth < self.near || depth > self.far {
            return None;
        }
        let half = (self.fov.to_radians() / 2.0).tan();
        let rel = point - self.position;
        let ndc_x = rel.dot(self.right) / (depth * half * self.aspect);
        let ndc_y = rel.dot(self.up) / (depth * half);
        Some((ndc_x, ndc_y))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&RegionConfig::default(), 2.0)
    }
}
