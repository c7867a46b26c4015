//! Core types for the Tessel lattice-Boltzmann domain builder.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the node classification and boundary-label types shared by the whole
//! workspace, the [`IndexBox`] multi-index iteration helpers that all
//! sub-array work is expressed through, and the shared error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod index;
pub mod label;

pub use cell::Cell;
pub use error::CoreError;
pub use index::{shifted, IndexBox, IndexIter, NodeIndex, Point};
pub use label::{FaceLabel, Flag, Label, NO_BOUNDARY};
