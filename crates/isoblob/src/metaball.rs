//! A single placed blob and its bounding sphere.

use glam::DVec3;
use isoblob_core::{intersect_sphere, IsoblobError, Ray, Result, ScalarField, SphereRoots};

/// An enter or exit event of a ray against one metaball's bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingEvent {
    /// Index of the metaball within its set.
    pub metaball: usize,
    /// Ray parameter of the event.
    pub t: f64,
    /// Whether the ray enters the bounding sphere here.
    pub is_entering: bool,
}

/// One blob: a scalar field placed at `translation`, culled outside `max_radius`.
///
/// The field is treated as non-contributing outside the bounding sphere. For kernels
/// with infinite support this is an approximation chosen by the scene author.
pub struct Metaball {
    field: Box<dyn ScalarField>,
    max_radius: f64,
    translation: DVec3,
}

impl Metaball {
    /// Creates a metaball. The radius must be finite and positive.
    pub fn new(
        field: impl ScalarField + 'static,
        max_radius: f64,
        translation: DVec3,
    ) -> Result<Self> {
        Self::from_boxed(Box::new(field), max_radius, translation)
    }

    /// Creates a metaball from an already boxed field.
    pub fn from_boxed(
        field: Box<dyn ScalarField>,
        max_radius: f64,
        translation: DVec3,
    ) -> Result<Self> {
        if !max_radius.is_finite() || max_radius <= 0.0 {
            return Err(IsoblobError::InvalidRadius(max_radius));
        }
        Ok(Self {
            field,
            max_radius,
            translation,
        })
    }

    /// Returns the bounding sphere radius.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Returns the blob centre.
    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    /// Returns the blob's scalar field.
    pub fn field(&self) -> &dyn ScalarField {
        self.field.as_ref()
    }

    /// Returns the axis-aligned box around the bounding sphere.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let extent = DVec3::splat(self.max_radius);
        (self.translation - extent, self.translation + extent)
    }

    /// Field value at a world position.
    #[inline]
    pub fn value_at(&self, position: DVec3) -> f64 {
        self.field.value(position - self.translation)
    }

    /// Field gradient at a world position.
    #[inline]
    pub fn gradient_at(&self, position: DVec3) -> DVec3 {
        self.field.gradient(position - self.translation)
    }

    /// Intersects the ray with the bounding sphere, tagging events with `index`.
    ///
    /// Yields nothing on a miss, a single non-entering event on a tangent contact, and
    /// an entering event followed by an exiting event otherwise.
    pub fn intersect_bounding_sphere(
        &self,
        index: usize,
        ray: &Ray,
    ) -> impl Iterator<Item = BoundingEvent> {
        let event = |t, is_entering| BoundingEvent {
            metaball: index,
            t,
            is_entering,
        };
        let events = match intersect_sphere(ray, self.translation, self.max_radius) {
            SphereRoots::Miss => [None, None],
            SphereRoots::Tangent(t) => [Some(event(t, false)), None],
            SphereRoots::Secant(t0, t1) => [Some(event(t0, true)), Some(event(t1, false))],
        };
        events.into_iter().flatten()
    }
}

impl std::fmt::Debug for Metaball {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metaball")
            .field("max_radius", &self.max_radius)
            .field("translation", &self.translation)
            .finish_non_exhaustive()
    }
}
