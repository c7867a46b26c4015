//! Shared validation errors for domain construction.

use std::error::Error;
use std::fmt;

/// Errors detected while validating a domain description.
///
/// All of these are fatal: construction aborts before any array is
/// allocated, so no partially-built domain is ever observable.
#[derive(Clone, Debug, PartialEq)]
pub enum CoreError {
    /// The box length on some axis is not an integer multiple of the
    /// space step, so the box cannot be tiled exactly by grid cells.
    SpaceStepMismatch {
        /// Axis on which the tiling fails.
        axis: usize,
        /// Physical length of the box on that axis.
        length: f64,
        /// The configured space step.
        space_step: f64,
    },
    /// Two collaborating descriptions disagree on the number of axes
    /// (box vs. stencil, box vs. element, box vs. partition range).
    DimensionMismatch {
        /// Dimension demanded by the reference description.
        expected: usize,
        /// Dimension actually supplied.
        actual: usize,
    },
    /// The spatial dimension is outside the supported `1..=3` range.
    UnsupportedDimension {
        /// The rejected dimension.
        dim: usize,
    },
    /// Some axis of the local grid has zero cells.
    EmptyDomain,
    /// A partitioner description is malformed.
    InvalidPartition {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpaceStepMismatch {
                axis,
                length,
                space_step,
            } => write!(
                f,
                "box length {length} on axis {axis} is not a multiple of the space step {space_step}"
            ),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            Self::UnsupportedDimension { dim } => {
                write!(f, "unsupported spatial dimension {dim} (must be 1, 2 or 3)")
            }
            Self::EmptyDomain => write!(f, "local grid has zero cells on some axis"),
            Self::InvalidPartition { reason } => write!(f, "invalid partition: {reason}"),
        }
    }
}

impl Error for CoreError {}
