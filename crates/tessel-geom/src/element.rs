//! The element contract: what the domain builder asks of an obstacle.

use smallvec::SmallVec;
use std::error::Error;
use std::fmt;
use tessel_core::{Label, Point};

/// Whether an element carves solid out of fluid or fluid out of solid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// The element's interior becomes solid (an obstacle).
    Solid,
    /// The element's interior becomes fluid (an inclusion punched into
    /// otherwise-solid space, e.g. an inlet bubble).
    Fluid,
}

/// A boundary crossing found along a one-step ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    /// Fraction of the step at which the boundary is met, in `(0, 1]`.
    pub alpha: f64,
    /// Label of the crossed boundary piece.
    pub label: Label,
}

/// A geometric element of the domain: a closed region in 1–3D that the
/// builder rasterizes into the fluid/solid mask and queries for exact
/// sub-cell boundary distances.
///
/// Implementations must keep the three queries mutually consistent: a
/// segment whose endpoints are classified differently by [`contains`]
/// must report a crossing, and every reported `alpha` lies in
/// `(0, max_fraction]`.
///
/// [`contains`]: Element::contains
pub trait Element: fmt::Debug {
    /// Spatial dimension the element lives in.
    fn dim(&self) -> usize;

    /// Whether the element adds fluid or solid.
    fn kind(&self) -> ElementKind;

    /// All labels the element's boundary pieces carry, in face order.
    fn labels(&self) -> SmallVec<[Label; 6]>;

    /// Axis-aligned bounding box `(lo, hi)` in physical coordinates.
    fn bounding_box(&self) -> (Point, Point);

    /// Point-inside test (boundary counts as inside).
    fn contains(&self, point: &[f64]) -> bool;

    /// First boundary crossing along `origin + t * step` for
    /// `t ∈ (0, max_fraction]`, or `None` when the segment never meets
    /// the boundary within range.
    fn ray_to_boundary(&self, origin: &[f64], step: &[f64], max_fraction: f64)
        -> Option<Crossing>;

    /// Convenience: `true` for [`ElementKind::Fluid`].
    fn is_fluid(&self) -> bool {
        self.kind() == ElementKind::Fluid
    }
}

/// Errors from element or geometry construction.
#[derive(Clone, Debug, PartialEq)]
pub enum GeomError {
    /// A ball was given a non-positive or non-finite radius.
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },
    /// A box extent is empty or inverted on some axis.
    EmptyExtent {
        /// Axis with the degenerate extent.
        axis: usize,
        /// Lower bound supplied.
        lo: f64,
        /// Upper bound supplied.
        hi: f64,
    },
    /// The spatial dimension is outside the supported `1..=3` range.
    UnsupportedDimension {
        /// The rejected dimension.
        dim: usize,
    },
    /// A label list has the wrong length (must be 1 or one per face).
    LabelCount {
        /// Number of labels required for per-face labeling.
        expected: usize,
        /// Number of labels supplied.
        actual: usize,
    },
    /// An element's dimension disagrees with the geometry's box.
    DimensionMismatch {
        /// Box dimension.
        expected: usize,
        /// Element dimension.
        actual: usize,
    },
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius { radius } => {
                write!(f, "radius must be finite and positive, got {radius}")
            }
            Self::EmptyExtent { axis, lo, hi } => {
                write!(f, "empty extent on axis {axis}: [{lo}, {hi}]")
            }
            Self::UnsupportedDimension { dim } => {
                write!(f, "unsupported spatial dimension {dim} (must be 1, 2 or 3)")
            }
            Self::LabelCount { expected, actual } => {
                write!(f, "expected 1 or {expected} labels, got {actual}")
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "element dimension {actual} does not match box dimension {expected}")
            }
        }
    }
}

impl Error for GeomError {}
