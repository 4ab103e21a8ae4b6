//! Configuration options for a metaball set.

use serde::{Deserialize, Serialize};

use crate::error::{IsoblobError, Result};

/// Default distance between coarse field samples along a ray.
pub const DEFAULT_COARSE_STEP: f64 = 0.01;

/// Default precision the crossing refiner narrows a crossing down to.
pub const DEFAULT_REFINEMENT_TOLERANCE: f64 = 0.0001;

/// Sampling and surface options of a metaball set.
///
/// `coarse_step` and `refinement_tolerance` trade accuracy against cost. A surface
/// feature thinner than `coarse_step` along the ray may be missed entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Summed field value defining the surface.
    pub threshold: f64,

    /// Ray parameter increment between coarse samples.
    #[serde(default = "default_coarse_step")]
    pub coarse_step: f64,

    /// Refinement stops once the search step falls below this value.
    #[serde(default = "default_refinement_tolerance")]
    pub refinement_tolerance: f64,
}

fn default_coarse_step() -> f64 {
    DEFAULT_COARSE_STEP
}

fn default_refinement_tolerance() -> f64 {
    DEFAULT_REFINEMENT_TOLERANCE
}

impl Options {
    /// Creates options for the given threshold with default sampling steps.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            coarse_step: DEFAULT_COARSE_STEP,
            refinement_tolerance: DEFAULT_REFINEMENT_TOLERANCE,
        }
    }

    /// Sets the coarse marching step.
    #[must_use]
    pub fn with_coarse_step(mut self, coarse_step: f64) -> Self {
        self.coarse_step = coarse_step;
        self
    }

    /// Sets the refinement tolerance.
    #[must_use]
    pub fn with_refinement_tolerance(mut self, refinement_tolerance: f64) -> Self {
        self.refinement_tolerance = refinement_tolerance;
        self
    }

    /// Checks `threshold > 0`, `coarse_step > 0` and
    /// `0 < refinement_tolerance < coarse_step`.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(IsoblobError::InvalidThreshold(self.threshold));
        }
        if !self.coarse_step.is_finite() || self.coarse_step <= 0.0 {
            return Err(IsoblobError::InvalidCoarseStep(self.coarse_step));
        }
        if !self.refinement_tolerance.is_finite()
            || self.refinement_tolerance <= 0.0
            || self.refinement_tolerance >= self.coarse_step
        {
            return Err(IsoblobError::InvalidTolerance {
                tolerance: self.refinement_tolerance,
                coarse_step: self.coarse_step,
            });
        }
        Ok(())
    }

    /// Parses options from JSON and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        log::debug!("loaded options from JSON: {options:?}");
        Ok(options)
    }

    /// Upper bound on the halving iterations a single refinement performs.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn max_refinement_iterations(&self) -> usize {
        let ratio = self.coarse_step / self.refinement_tolerance;
        ratio.log2().ceil().max(0.0) as usize
    }
}
