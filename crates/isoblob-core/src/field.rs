//! Scalar field primitives.
//!
//! A [`ScalarField`] is one blob's potential contribution, evaluated in the blob's
//! local frame (the blob centre is the origin). Shapes are plugged in as a value and
//! gradient pair, either by implementing the trait or by wrapping two closures in an
//! [`FnField`].

use glam::DVec3;

/// A value and gradient pair describing one blob's potential.
///
/// `gradient` is assumed to be the derivative of `value`. A mismatch is not detected
/// and only degrades the normals reported at crossings.
pub trait ScalarField: Send + Sync {
    /// Field value at a position in the blob's local frame.
    fn value(&self, local: DVec3) -> f64;

    /// Field gradient at a position in the blob's local frame.
    fn gradient(&self, local: DVec3) -> DVec3;
}

impl<F: ScalarField + ?Sized> ScalarField for Box<F> {
    fn value(&self, local: DVec3) -> f64 {
        (**self).value(local)
    }

    fn gradient(&self, local: DVec3) -> DVec3 {
        (**self).gradient(local)
    }
}

/// A scalar field made of two closures.
#[derive(Clone)]
pub struct FnField<V, G> {
    value: V,
    gradient: G,
}

impl<V, G> FnField<V, G>
where
    V: Fn(DVec3) -> f64 + Send + Sync,
    G: Fn(DVec3) -> DVec3 + Send + Sync,
{
    /// Wraps a value function and its gradient.
    pub fn new(value: V, gradient: G) -> Self {
        Self { value, gradient }
    }
}

impl<V, G> ScalarField for FnField<V, G>
where
    V: Fn(DVec3) -> f64 + Send + Sync,
    G: Fn(DVec3) -> DVec3 + Send + Sync,
{
    fn value(&self, local: DVec3) -> f64 {
        (self.value)(local)
    }

    fn gradient(&self, local: DVec3) -> DVec3 {
        (self.gradient)(local)
    }
}

impl<V, G> std::fmt::Debug for FnField<V, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnField").finish_non_exhaustive()
    }
}
