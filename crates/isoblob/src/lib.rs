//! isoblob: ray intersection for metaball implicit surfaces.
//!
//! A metaball surface is the level set where a sum of blob potentials equals a
//! threshold. It has no closed-form ray intersection, so queries go through four
//! stages:
//!
//! 1. a broad phase against each metaball's bounding sphere,
//! 2. a sweep over the sorted enter/exit events that keeps an active set of
//!    metaballs and samples their summed field at a fixed coarse step,
//! 3. a refiner that narrows each detected threshold crossing, and
//! 4. a normal from the active metaballs' summed gradients.
//!
//! # Quick Start
//!
//! ```
//! use isoblob::*;
//!
//! fn main() -> Result<()> {
//!     let mut set = MetaballSet::new(0.5)?;
//!     set.add_field(WyvillKernel::new(1.0, 1.0), 1.0, DVec3::new(-0.4, 0.0, 0.0))?;
//!     set.add_field(WyvillKernel::new(1.0, 1.0), 1.0, DVec3::new(0.4, 0.0, 0.0))?;
//!
//!     let crossings = set.intersect(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
//!     assert_eq!(crossings.len(), 2);
//!     assert!(crossings[0].is_entering);
//!     Ok(())
//! }
//! ```
//!
//! Features thinner than the coarse step along a ray may be missed; lower
//! [`Options::coarse_step`] to trade speed for accuracy.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod active_set;
pub mod metaball;
pub mod refine;
pub mod set;
mod sweep;

// Re-export core types
pub use isoblob_core::{
    error::{IsoblobError, Result},
    falloff::{GaussianKernel, WyvillKernel},
    field::{FnField, ScalarField},
    options::{Options, DEFAULT_COARSE_STEP, DEFAULT_REFINEMENT_TOLERANCE},
    ray::{intersect_sphere, intersect_unit_sphere, Ray, SphereRoots},
    solid::Solid,
    DVec2, DVec3, SurfaceCrossing,
};

pub use metaball::{BoundingEvent, Metaball};
pub use refine::{CrossingRefiner, Refinement};
pub use set::MetaballSet;
