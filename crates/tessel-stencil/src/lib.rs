//! Discrete velocity stencils for the Tessel domain builder.
//!
//! A [`Stencil`] is the full set of discrete velocities a scheme streams
//! along, deduplicated across elementary schemes. The domain builder
//! consumes two things from it: the list of unique velocities (one
//! distance/flag plane per velocity) and the per-axis maximum velocity
//! magnitude [`Stencil::vmax`], which fixes the halo width so that every
//! one-step ray stays inside the allocated arrays.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod stencil;
pub mod velocity;

pub use stencil::Stencil;
pub use velocity::Velocity;
