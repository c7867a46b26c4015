//! Geometric elements and box geometry for the Tessel domain builder.
//!
//! A [`Geometry`] describes the computational region: a primary
//! axis-aligned box with one label per face, plus an ordered list of
//! [`Element`]s (obstacles or fluid inclusions) folded into the domain
//! in list order. Elements answer three queries: axis-aligned bounding
//! box, point containment, and the exact fraction of a one-step ray at
//! which the element boundary is crossed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ball;
pub mod cuboid;
pub mod element;
pub mod geometry;

pub use ball::Ball;
pub use cuboid::Cuboid;
pub use element::{Crossing, Element, ElementKind, GeomError};
pub use geometry::Geometry;
