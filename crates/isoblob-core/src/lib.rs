//! Core abstractions for isoblob.
//!
//! This crate provides the fundamental traits and types used throughout isoblob:
//! - [`ScalarField`] trait for blob potentials, with stock falloff kernels
//! - [`Ray`] and the ray/sphere root solver used for broad-phase culling
//! - [`SurfaceCrossing`] results and the [`Solid`] trait seen by a host renderer
//! - Configuration options and errors

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod crossing;
pub mod error;
pub mod falloff;
pub mod field;
pub mod options;
pub mod ray;
pub mod solid;

pub use crossing::SurfaceCrossing;
pub use error::{IsoblobError, Result};
pub use falloff::{GaussianKernel, WyvillKernel};
pub use field::{FnField, ScalarField};
pub use options::{Options, DEFAULT_COARSE_STEP, DEFAULT_REFINEMENT_TOLERANCE};
pub use ray::{intersect_sphere, intersect_unit_sphere, Ray, SphereRoots};
pub use solid::Solid;

// Re-export glam types for convenience
pub use glam::{DVec2, DVec3};
