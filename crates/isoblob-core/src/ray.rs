//! Rays and the ray/sphere root solver.

use glam::DVec3;

/// A ray `origin + t * direction`.
///
/// The direction is not required to be normalized; ray parameters are always
/// expressed in units of `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point of the ray.
    pub origin: DVec3,
    /// Direction of travel.
    pub direction: DVec3,
}

impl Ray {
    /// Creates a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Returns the point at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Roots of a ray against a sphere surface, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SphereRoots {
    /// The ray line does not touch the sphere.
    Miss,
    /// The ray line grazes the sphere at a single parameter.
    Tangent(f64),
    /// The ray line enters at the first parameter and leaves at the second.
    Secant(f64, f64),
}

impl SphereRoots {
    /// Returns the number of roots.
    pub fn len(&self) -> usize {
        match self {
            Self::Miss => 0,
            Self::Tangent(_) => 1,
            Self::Secant(..) => 2,
        }
    }

    /// Returns true if there are no roots.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Miss)
    }
}

/// Solves `|origin + t * direction|² = 1` for `t`.
///
/// Roots are reported over the whole line, including negative parameters. A zero or
/// non-finite direction yields [`SphereRoots::Miss`].
pub fn intersect_unit_sphere(origin: DVec3, direction: DVec3) -> SphereRoots {
    let a = direction.length_squared();
    let b = 2.0 * origin.dot(direction);
    let c = origin.length_squared() - 1.0;
    if a <= 0.0 || !a.is_finite() || !b.is_finite() || !c.is_finite() {
        return SphereRoots::Miss;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return SphereRoots::Miss;
    }
    if discriminant == 0.0 {
        return SphereRoots::Tangent(-b / (2.0 * a));
    }

    // Numerically stable form: avoids cancellation when b² >> 4ac.
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let t0 = q / a;
    let t1 = c / q;
    if t0 <= t1 {
        SphereRoots::Secant(t0, t1)
    } else {
        SphereRoots::Secant(t1, t0)
    }
}

/// Intersects a ray with a sphere of the given centre and radius.
///
/// The ray is moved into the sphere's unit-radius frame (translated by `-center`,
/// scaled by `1 / radius`), which leaves ray parameters unchanged.
pub fn intersect_sphere(ray: &Ray, center: DVec3, radius: f64) -> SphereRoots {
    let inv_radius = radius.recip();
    intersect_unit_sphere(
        (ray.origin - center) * inv_radius,
        ray.direction * inv_radius,
    )
}
