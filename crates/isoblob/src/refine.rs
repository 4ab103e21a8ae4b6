//! Directed step-halving search that pins down a detected threshold crossing.
//!
//! The search is seeded from the coarse sample that first landed on the far side of
//! the threshold. It starts half a coarse step back towards the previous sample and
//! halves the step each iteration, moving back while the evaluation is still past the
//! surface and forward otherwise. It converges when the field is monotonic within the
//! coarse step; nothing else is guaranteed.

use isoblob_core::Options;

/// Result of refining one crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refinement {
    /// Refined ray parameter.
    pub t: f64,
    /// Field value at `t`.
    pub value: f64,
    /// Number of halving iterations performed.
    pub iterations: usize,
}

/// Narrows a crossing located by coarse sampling down to a tolerance.
#[derive(Debug, Clone, Copy)]
pub struct CrossingRefiner {
    threshold: f64,
    coarse_step: f64,
    tolerance: f64,
}

impl CrossingRefiner {
    /// Creates a refiner for a threshold, coarse step and tolerance.
    pub fn new(threshold: f64, coarse_step: f64, tolerance: f64) -> Self {
        Self {
            threshold,
            coarse_step,
            tolerance,
        }
    }

    /// Creates a refiner from set options.
    pub fn from_options(options: &Options) -> Self {
        Self::new(
            options.threshold,
            options.coarse_step,
            options.refinement_tolerance,
        )
    }

    /// Refines a crossing detected at the coarse sample `t_sample`.
    ///
    /// `entering` tells which side of the threshold counts as "past the surface":
    /// at-or-above for an entering crossing, below for an exiting one. `eval` returns
    /// the summed field at a ray parameter. The returned `t` is the centre of the final
    /// search bracket, within `tolerance` of the root for monotonic fields.
    pub fn refine(&self, t_sample: f64, entering: bool, eval: impl Fn(f64) -> f64) -> Refinement {
        let mut step = self.coarse_step / 2.0;
        let mut offset = -step;
        let mut iterations = 0;

        while step >= self.tolerance {
            let value = eval(t_sample + offset);
            iterations += 1;
            step /= 2.0;
            if self.is_inside(value) == entering {
                offset -= step;
            } else {
                offset += step;
            }
        }

        let t = t_sample + offset;
        Refinement {
            t,
            value: eval(t),
            iterations,
        }
    }

    #[inline]
    fn is_inside(&self, value: f64) -> bool {
        value >= self.threshold
    }
}
