//! Active-set sweep along a ray.
//!
//! Bounding events are walked in order. Between consecutive events the summed field of
//! the active metaballs is sampled every coarse step; a change of side relative to the
//! threshold is a crossing, handed to the refiner. The previous sample survives across
//! sub-intervals so that a crossing straddling an event is still caught.

use glam::DVec3;
use isoblob_core::{Options, Ray, SurfaceCrossing};

use crate::active_set::ActiveSet;
use crate::metaball::{BoundingEvent, Metaball};
use crate::refine::CrossingRefiner;

/// Sweeps one ray through a sorted bounding event stream.
pub(crate) struct Sweeper<'a> {
    metaballs: &'a [Metaball],
    ray: Ray,
    threshold: f64,
    coarse_step: f64,
    refiner: CrossingRefiner,
}

impl<'a> Sweeper<'a> {
    pub(crate) fn new(metaballs: &'a [Metaball], options: &Options, ray: Ray) -> Self {
        Self {
            metaballs,
            ray,
            threshold: options.threshold,
            coarse_step: options.coarse_step,
            refiner: CrossingRefiner::from_options(options),
        }
    }

    /// Returns every crossing along the ray. `events` must be sorted by `t`.
    pub(crate) fn sweep(&self, events: &[BoundingEvent]) -> Vec<SurfaceCrossing> {
        let mut active = ActiveSet::new();
        let mut crossings = Vec::new();
        let mut previous = None;

        for pair in events.windows(2) {
            let (event, next) = (&pair[0], &pair[1]);
            active.apply(event);
            if active.is_empty() {
                continue;
            }
            previous = self.march(&active, event.t, next.t, previous, &mut crossings);
        }

        crossings
    }

    /// Samples `[start, end)` and returns the last sample value.
    ///
    /// Sampling never starts before `t = coarse_step`, so a ray starting on or inside
    /// the surface does not report a crossing at its own origin.
    #[allow(clippy::cast_precision_loss)]
    fn march(
        &self,
        active: &ActiveSet,
        start: f64,
        end: f64,
        mut previous: Option<f64>,
        crossings: &mut Vec<SurfaceCrossing>,
    ) -> Option<f64> {
        let start = start.max(self.coarse_step);
        let mut step_index: u64 = 0;

        loop {
            let t = start + step_index as f64 * self.coarse_step;
            if t >= end {
                break;
            }
            step_index += 1;

            let value = active.value_at(self.metaballs, self.ray.at(t));
            if let Some(prev) = previous {
                let was_inside = prev >= self.threshold;
                let is_inside = value >= self.threshold;
                if was_inside != is_inside {
                    crossings.push(self.crossing(active, t, is_inside));
                }
            }
            previous = Some(value);
        }

        previous
    }

    fn crossing(&self, active: &ActiveSet, t_sample: f64, entering: bool) -> SurfaceCrossing {
        let refined = self.refiner.refine(t_sample, entering, |t| {
            active.value_at(self.metaballs, self.ray.at(t))
        });
        let position = self.ray.at(refined.t);
        let normal: DVec3 = active.gradient_at(self.metaballs, position);

        log::trace!(
            "{} crossing at t={:.6} after {} refinement steps",
            if entering { "entering" } else { "exiting" },
            refined.t,
            refined.iterations
        );

        SurfaceCrossing::new(refined.t, entering, position, normal, refined.value)
    }
}
