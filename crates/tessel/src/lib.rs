//! Tessel: structured-grid domain construction for lattice-Boltzmann
//! solvers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Tessel sub-crates. For most users, adding `tessel` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessel::prelude::*;
//!
//! // A unit square with a solid disc in the middle.
//! let mut geometry = Geometry::new(&[(0.0, 1.0), (0.0, 1.0)]).unwrap();
//! geometry
//!     .push(Box::new(
//!         Ball::new(&[0.5, 0.5], 0.2, Label(1), ElementKind::Solid).unwrap(),
//!     ))
//!     .unwrap();
//!
//! // Rasterize it for the D2Q9 velocity set at dx = 1/4.
//! let domain = Domain::build(DomainConfig::new(geometry, Stencil::d2q9(), 0.25)).unwrap();
//! assert_eq!(domain.shape_in().as_slice(), &[4, 4]);
//! assert_eq!(domain.shape_halo().as_slice(), &[6, 6]);
//!
//! // Box faces default to label 0; the disc contributes label 1.
//! let labels: Vec<Label> = domain.list_of_labels().into_iter().collect();
//! assert_eq!(labels, vec![Label(0), Label(1)]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessel-core` | Cells, labels, flags, index boxes, shared errors |
//! | [`stencil`] | `tessel-stencil` | Discrete velocity sets and named schemes |
//! | [`geom`] | `tessel-geom` | Geometric elements and the geometry description |
//! | [`domain`] | `tessel-domain` | Partitioners, grid layout, the domain builder |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cells, labels, flags, and index iteration (`tessel-core`).
///
/// The [`types::IndexBox`] helpers are here for downstream code that
/// walks sub-grids the way the builder does.
pub use tessel_core as types;

/// Discrete velocity sets (`tessel-stencil`).
///
/// [`stencil::Stencil`] carries the unique velocities and the per-axis
/// `vmax` that fixes the halo width.
pub use tessel_stencil as stencil;

/// Geometric elements and the geometry description (`tessel-geom`).
///
/// Implement [`geom::Element`] to rasterize your own shapes; [`geom::Ball`]
/// and [`geom::Cuboid`] cover the common cases.
pub use tessel_geom as geom;

/// Partitioners, grid layout, and the domain builder (`tessel-domain`).
///
/// [`domain::Domain::build`] produces the `(in_or_out, distance, flag)`
/// boundary tables a solver streams against.
pub use tessel_domain as domain;

/// Common imports for typical Tessel usage.
///
/// ```rust
/// use tessel::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tessel_core::{Cell, FaceLabel, Flag, Label, NO_BOUNDARY};

    // Errors
    pub use tessel_core::CoreError;
    pub use tessel_geom::GeomError;

    // Velocity sets
    pub use tessel_stencil::{Stencil, Velocity};

    // Geometry
    pub use tessel_geom::{Ball, Crossing, Cuboid, Element, ElementKind, Geometry};

    // Domain construction
    pub use tessel_domain::{
        BlockPartition, Domain, DomainConfig, GridLayout, Partitioner, SingleProcess,
    };
}
