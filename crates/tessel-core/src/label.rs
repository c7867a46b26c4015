//! Boundary labels and per-velocity boundary flags.

use std::fmt;

/// Value stored in the distance array where no boundary is reached:
/// the node travels one full step along the velocity without leaving
/// the fluid region.
///
/// Infinity cannot collide with a crossing fraction in `(0, 1]`, and it
/// makes the "closer boundary wins" comparison (`alpha < stored`) hold
/// against an unwritten entry with no special case.
pub const NO_BOUNDARY: f64 = f64::INFINITY;

/// A physical boundary-condition label.
///
/// Labels identify which boundary condition the solver applies where a
/// velocity ray crosses a boundary. They are opaque integers chosen by
/// the user; distinct boundaries may share a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub i32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Label {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Label of one face of the primary box.
///
/// A face carries a physical label unless the domain partitioner splits
/// the box across that face, in which case the face is an inter-process
/// interface: populations there are resolved by halo exchange, not by a
/// boundary condition, and the face is skipped during stamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceLabel {
    /// A physical boundary with the given label.
    Physical(Label),
    /// The face is split across processes and resolved by halo exchange.
    Interface,
}

impl FaceLabel {
    /// The physical label, or `None` for an interface face.
    pub fn physical(self) -> Option<Label> {
        match self {
            Self::Physical(label) => Some(label),
            Self::Interface => None,
        }
    }

    /// Returns `true` for [`FaceLabel::Interface`].
    pub fn is_interface(self) -> bool {
        self == Self::Interface
    }
}

impl fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physical(label) => write!(f, "{label}"),
            Self::Interface => write!(f, "interface"),
        }
    }
}

/// Per-(velocity, node) boundary flag, aligned 1:1 with the distance
/// array: [`Flag::Boundary`] exactly where the stored distance is a real
/// crossing fraction, [`Flag::None`] where it is [`NO_BOUNDARY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flag {
    /// No recorded boundary along this velocity.
    None,
    /// The ray crosses a boundary carrying this label.
    Boundary(Label),
}

impl Flag {
    /// The crossed boundary's label, or `None` when no boundary is recorded.
    pub fn label(self) -> Option<Label> {
        match self {
            Self::Boundary(label) => Some(label),
            Self::None => None,
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boundary(label) => write!(f, "{label}"),
            Self::None => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_boundary_is_above_any_fraction() {
        assert!(NO_BOUNDARY > 1.0);
        assert!(0.5 < NO_BOUNDARY);
    }

    #[test]
    fn face_label_physical_roundtrip() {
        assert_eq!(FaceLabel::Physical(Label(3)).physical(), Some(Label(3)));
        assert_eq!(FaceLabel::Interface.physical(), None);
        assert!(FaceLabel::Interface.is_interface());
    }

    #[test]
    fn flag_label_roundtrip() {
        assert_eq!(Flag::Boundary(Label(7)).label(), Some(Label(7)));
        assert_eq!(Flag::None.label(), None);
    }
}
