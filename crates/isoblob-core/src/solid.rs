//! The solid trait consumed by a host renderer.
//!
//! A [`Solid`] is any object a ray tracer can intersect: it reports every surface
//! crossing along a ray and a bounding box for spatial acceleration.

use glam::{DVec2, DVec3};

use crate::crossing::SurfaceCrossing;
use crate::ray::Ray;

/// An intersectable solid.
///
/// Implementations must be safe to query from many threads at once once the scene has
/// been built.
pub trait Solid: Send + Sync {
    /// Returns every surface crossing along the ray, ordered by increasing `t`.
    fn intersect(&self, ray: &Ray) -> Vec<SurfaceCrossing>;

    /// Returns the axis-aligned bounding box `(min, max)` in local coordinates.
    fn bounding_box(&self) -> (DVec3, DVec3);

    /// Returns the 2D texture coordinates of a crossing.
    fn texture_coord(&self, crossing: &SurfaceCrossing) -> DVec2 {
        crossing.texture_coord()
    }

    /// Returns the nearest crossing with `t >= t_min`.
    fn first_hit(&self, ray: &Ray, t_min: f64) -> Option<SurfaceCrossing> {
        self.intersect(ray).into_iter().find(|c| c.t >= t_min)
    }
}
