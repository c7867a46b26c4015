//! Fluid/solid node classification.

use std::fmt;

/// Classification of a single lattice node.
///
/// Replaces the numeric in/out sentinels of array-based codes with a
/// tagged value: a node is either in the fluid region (where populations
/// stream) or in the solid region (obstacle or exterior).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// The node lies in the fluid region.
    Fluid,
    /// The node lies in the solid region.
    Solid,
}

impl Cell {
    /// Returns `true` for [`Cell::Fluid`].
    pub fn is_fluid(self) -> bool {
        self == Self::Fluid
    }

    /// Returns `true` for [`Cell::Solid`].
    pub fn is_solid(self) -> bool {
        self == Self::Solid
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fluid => write!(f, "fluid"),
            Self::Solid => write!(f, "solid"),
        }
    }
}
