//! A single discrete lattice velocity.

use smallvec::SmallVec;
use std::fmt;

/// One discrete displacement vector, in grid cells per time step.
///
/// Components are integers: a population moving with velocity `v` hops
/// from node `x` to node `x + v` in one step.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Velocity {
    components: SmallVec<[i32; 3]>,
}

impl Velocity {
    /// Create a velocity from its integer components (one per axis).
    pub fn new(components: &[i32]) -> Self {
        Self {
            components: SmallVec::from_slice(components),
        }
    }

    /// Number of axes.
    pub fn dim(&self) -> usize {
        self.components.len()
    }

    /// The component on one axis.
    pub fn component(&self, axis: usize) -> i32 {
        self.components[axis]
    }

    /// All components.
    pub fn components(&self) -> &[i32] {
        &self.components
    }

    /// `true` for the rest velocity (all components zero).
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&c| c == 0)
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_detection() {
        assert!(Velocity::new(&[0, 0]).is_zero());
        assert!(!Velocity::new(&[0, 1]).is_zero());
    }

    #[test]
    fn display_is_tuple_like() {
        assert_eq!(Velocity::new(&[1, -1]).to_string(), "(1, -1)");
    }
}
