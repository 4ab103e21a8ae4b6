//! Stock blob falloff kernels.
//!
//! Both kernels are radial: their value depends only on the squared distance from the
//! blob centre, and their gradient points towards the centre.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::field::ScalarField;

/// Wyvill "soft object" kernel: `strength * (1 - r²/R²)³` inside `R`, zero outside.
///
/// The support is compact, so `radius` is an exact bounding radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WyvillKernel {
    /// Peak value at the centre.
    pub strength: f64,
    /// Radius of influence.
    pub radius: f64,
}

impl WyvillKernel {
    /// Creates a kernel with the given peak strength and radius of influence.
    pub fn new(strength: f64, radius: f64) -> Self {
        Self { strength, radius }
    }

    /// Distance from the centre at which this kernel alone equals `threshold`.
    ///
    /// Returns `None` when the peak never reaches `threshold`.
    pub fn iso_radius(&self, threshold: f64) -> Option<f64> {
        if threshold > self.strength || threshold <= 0.0 {
            return None;
        }
        Some(self.radius * (1.0 - (threshold / self.strength).cbrt()).sqrt())
    }

    fn falloff(&self, local: DVec3) -> f64 {
        1.0 - local.length_squared() / (self.radius * self.radius)
    }
}

impl ScalarField for WyvillKernel {
    fn value(&self, local: DVec3) -> f64 {
        let q = self.falloff(local);
        if q <= 0.0 {
            return 0.0;
        }
        self.strength * q * q * q
    }

    fn gradient(&self, local: DVec3) -> DVec3 {
        let q = self.falloff(local);
        if q <= 0.0 {
            return DVec3::ZERO;
        }
        local * (-6.0 * self.strength * q * q / (self.radius * self.radius))
    }
}

/// Blinn "blobby" kernel: `strength * exp(-sharpness * r²)`.
///
/// The support is infinite; use [`GaussianKernel::cutoff_radius`] to pick a bounding
/// radius beyond which the contribution is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianKernel {
    /// Peak value at the centre.
    pub strength: f64,
    /// Exponential decay rate.
    pub sharpness: f64,
}

impl GaussianKernel {
    /// Creates a kernel with the given peak strength and decay rate.
    pub fn new(strength: f64, sharpness: f64) -> Self {
        Self {
            strength,
            sharpness,
        }
    }

    /// Distance at which the kernel decays to `cutoff`.
    ///
    /// Returns zero when the peak is already below `cutoff`.
    pub fn cutoff_radius(&self, cutoff: f64) -> f64 {
        if cutoff <= 0.0 {
            return f64::INFINITY;
        }
        if self.strength <= cutoff {
            return 0.0;
        }
        ((self.strength / cutoff).ln() / self.sharpness).sqrt()
    }
}

impl ScalarField for GaussianKernel {
    fn value(&self, local: DVec3) -> f64 {
        self.strength * (-self.sharpness * local.length_squared()).exp()
    }

    fn gradient(&self, local: DVec3) -> DVec3 {
        local * (-2.0 * self.sharpness * self.value(local))
    }
}
