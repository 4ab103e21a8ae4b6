//! Surface crossings returned by ray queries.

use glam::{DVec2, DVec3};

/// One detected crossing of the iso-surface along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCrossing {
    /// Ray parameter of the crossing.
    pub t: f64,

    /// Whether the ray enters the solid here (field rises to the threshold).
    pub is_entering: bool,

    /// World-space position of the crossing, `ray.at(t)`.
    pub position: DVec3,

    /// Sum of the active blobs' gradients at `position`. Not normalized.
    pub normal: DVec3,

    /// Summed field value at `position`.
    pub value: f64,
}

impl SurfaceCrossing {
    /// Creates a new crossing.
    pub fn new(t: f64, is_entering: bool, position: DVec3, normal: DVec3, value: f64) -> Self {
        Self {
            t,
            is_entering,
            position,
            normal,
            value,
        }
    }

    /// Whether the crossing faces the ray. Entering crossings are front faces.
    pub fn is_front(&self) -> bool {
        self.is_entering
    }

    /// Texture lookup coordinates at the crossing: the local X and Z components.
    pub fn texture_coord(&self) -> DVec2 {
        DVec2::new(self.position.x, self.position.z)
    }

    /// Returns the normal pointing out of the solid, normalized.
    ///
    /// The field grows towards blob centres, so the outward normal is the negated
    /// gradient. Returns `None` when the gradient vanishes.
    pub fn outward_normal(&self) -> Option<DVec3> {
        (-self.normal).try_normalize()
    }
}
