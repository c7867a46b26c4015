//! Distributed structured-grid domain construction for lattice-Boltzmann
//! solvers.
//!
//! A [`Domain`] records, for every lattice node and every discrete
//! velocity, whether the node lies in the fluid or the solid region and
//! the exact sub-cell distance and boundary label of the first interface
//! reached by travelling one time step along that velocity. The triple
//! `(in_or_out, distance, flag)` is the boundary-condition table the
//! streaming/collision solver reads every iteration.
//!
//! Construction is SPMD-friendly: each process builds its own
//! halo-inclusive local grid from the same global geometry and its own
//! [`Partitioner`] region, with no cross-process coordination.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod layout;
pub mod partition;

pub use domain::{Domain, DomainConfig};
pub use layout::GridLayout;
pub use partition::{BlockPartition, Partitioner, SingleProcess};
