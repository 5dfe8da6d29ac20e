use glam::DVec3;
use std::sync::Arc;

use super::camera::{Camera, Ray};
use crate::geo::world_to_globe;
use crate::raster::FillSurface;

/// Sphere centred at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Globe {
    pub radius: f64,
}

impl Globe {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Nearest front-facing intersection in front of the ray origin.
    #[inline(always)]
    pub fn intersect(&self, ray: &Ray) -> Option<DVec3> {
        let b = ray.origin.dot(ray.direction);
        let c = ray.origin.length_squared() - self.radius * self.radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b - disc.sqrt();
        if t < 0.0 {
            return None;
        }
        Some(ray.origin + ray.direction * t)
    }

    /// Globe surface point seen through `camera` at the given NDC, honouring
    /// the camera's clip planes. Returns `(lon, lat)`.
    #[inline(always)]
    pub fn surface_at(&self, camera: &Camera, ndc_x: f64, ndc_y: f64) -> Option<(f64, f64)> {
        let hit = self.intersect(&camera.ray(ndc_x, ndc_y))?;
        let depth = camera.view_depth(hit);
        if depth < camera.near || depth > camera.far {
            return None;
        }
        let (lon, lat, _) = world_to_globe(hit);
        Some((lon, lat))
    }
}

/// Offscreen duplicate of the visible globe. Its material samples the fill
/// surface and writes the channel value through untouched, with no
/// lighting or blending, so a rendered pixel decodes straight to an id.
pub struct ShadowScene {
    globe: Globe,
    fill: Arc<FillSurface>,
}

impl ShadowScene {
    pub fn new(globe: Globe, fill: Arc<FillSurface>) -> Self {
        Self { globe, fill }
    }

    pub fn globe(&self) -> Globe {
        self.globe
    }

    pub fn fill(&self) -> &FillSurface {
        &self.fill
    }

    /// Encoded channel value for one fragment; 0 where the globe is missed.
    #[inline(always)]
    pub fn shade(&self, camera: &Camera, ndc_x: f64, ndc_y: f64) -> u8 {
        match self.globe.surface_at(camera, ndc_x, ndc_y) {
            Some((lon, lat)) => self.fill.sample(lon, lat),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_front_face() {
        let globe = Globe::new(1.0);
        let ray = Ray {
            origin: DVec3::new(0.0, 0.0, 2.0),
            direction: DVec3::NEG_Z,
        };
        let hit = globe.intersect(&ray).expect("hit");
        assert!((hit - DVec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_intersect_miss_and_behind() {
        let globe = Globe::new(1.0);
        let miss = Ray {
            origin: DVec3::new(0.0, 2.0, 2.0),
            direction: DVec3::NEG_Z,
        };
        assert!(globe.intersect(&miss).is_none());

        let away = Ray {
            origin: DVec3::new(0.0, 0.0, 2.0),
            direction: DVec3::Z,
        };
        assert!(globe.intersect(&away).is_none());
    }

    #[test]
    fn test_surface_at_centre_is_null_island() {
        let camera = Camera::default();
        let (lon, lat) = Globe::new(1.0).surface_at(&camera, 0.0, 0.0).expect("hit");
        assert!(lon.abs() < 1e-9);
        assert!(lat.abs() < 1e-9);
    }

    #[test]
    fn test_far_plane_clips() {
        let mut camera = Camera::default();
        camera.far = 0.5;
        assert!(Globe::new(1.0).surface_at(&camera, 0.0, 0.0).is_none());
    }
}
