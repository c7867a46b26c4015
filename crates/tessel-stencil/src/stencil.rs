//! The full velocity set of a lattice-Boltzmann scheme.

use crate::velocity::Velocity;
use smallvec::SmallVec;
use std::fmt;
use tessel_core::CoreError;

/// The set of unique discrete velocities used by a scheme.
///
/// Velocities are deduplicated in first-seen order (composite schemes
/// list the same velocity more than once; the domain needs each only
/// once). `vmax[k]` is the largest absolute component on axis `k` and is
/// used as the halo width on that axis, which guarantees that every
/// one-step ray from an interior node lands inside the allocated arrays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stencil {
    dim: usize,
    velocities: Vec<Velocity>,
    vmax: SmallVec<[usize; 3]>,
}

impl Stencil {
    /// Build a stencil from a velocity list.
    ///
    /// Duplicates are dropped, keeping the first occurrence. Fails with
    /// [`CoreError::UnsupportedDimension`] for `dim` outside `1..=3` and
    /// [`CoreError::DimensionMismatch`] when any velocity has the wrong
    /// number of components.
    pub fn new(
        dim: usize,
        velocities: impl IntoIterator<Item = Velocity>,
    ) -> Result<Self, CoreError> {
        if !(1..=3).contains(&dim) {
            return Err(CoreError::UnsupportedDimension { dim });
        }
        let mut unique: Vec<Velocity> = Vec::new();
        for v in velocities {
            if v.dim() != dim {
                return Err(CoreError::DimensionMismatch {
                    expected: dim,
                    actual: v.dim(),
                });
            }
            if !unique.contains(&v) {
                unique.push(v);
            }
        }
        let mut vmax: SmallVec<[usize; 3]> = SmallVec::from_elem(0, dim);
        for v in &unique {
            for (k, m) in vmax.iter_mut().enumerate() {
                *m = (*m).max(v.component(k).unsigned_abs() as usize);
            }
        }
        Ok(Self {
            dim,
            velocities: unique,
            vmax,
        })
    }

    /// Spatial dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The unique velocities, in first-seen order.
    pub fn unique_velocities(&self) -> &[Velocity] {
        &self.velocities
    }

    /// Number of unique velocities — the leading dimension of the
    /// per-velocity distance and flag arrays.
    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    /// `true` when the stencil holds no velocities.
    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }

    /// Per-axis maximum absolute velocity component (the halo width).
    pub fn vmax(&self) -> &[usize] {
        &self.vmax
    }

    /// The D1Q3 stencil: rest velocity plus ±1.
    pub fn d1q3() -> Self {
        Self::from_components(1, &[&[0][..], &[1], &[-1]])
    }

    /// The two-speed 1D stencil: rest velocity plus ±1 and ±2.
    pub fn d1q5() -> Self {
        Self::from_components(1, &[&[0][..], &[1], &[-1], &[2], &[-2]])
    }

    /// The D2Q9 stencil: rest, the four axis directions, and the four
    /// diagonals.
    pub fn d2q9() -> Self {
        Self::from_components(
            2,
            &[
                &[0, 0][..],
                &[1, 0],
                &[0, 1],
                &[-1, 0],
                &[0, -1],
                &[1, 1],
                &[-1, 1],
                &[-1, -1],
                &[1, -1],
            ],
        )
    }

    /// The D3Q19 stencil: rest, the six axis directions, and the twelve
    /// edge diagonals.
    pub fn d3q19() -> Self {
        Self::from_components(
            3,
            &[
                &[0, 0, 0][..],
                &[1, 0, 0],
                &[-1, 0, 0],
                &[0, 1, 0],
                &[0, -1, 0],
                &[0, 0, 1],
                &[0, 0, -1],
                &[1, 1, 0],
                &[-1, -1, 0],
                &[1, -1, 0],
                &[-1, 1, 0],
                &[1, 0, 1],
                &[-1, 0, -1],
                &[1, 0, -1],
                &[-1, 0, 1],
                &[0, 1, 1],
                &[0, -1, -1],
                &[0, 1, -1],
                &[0, -1, 1],
            ],
        )
    }

    fn from_components(dim: usize, components: &[&[i32]]) -> Self {
        let velocities = components.iter().map(|c| Velocity::new(c));
        Self::new(dim, velocities).expect("named stencil is well-formed")
    }
}

impl fmt::Display for Stencil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stencil: dim {}, {} unique velocities, vmax {:?}",
            self.dim,
            self.velocities.len(),
            self.vmax
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn d1q3_shape() {
        let s = Stencil::d1q3();
        assert_eq!(s.dim(), 1);
        assert_eq!(s.len(), 3);
        assert_eq!(s.vmax(), &[1]);
    }

    #[test]
    fn d1q5_shape() {
        let s = Stencil::d1q5();
        assert_eq!(s.len(), 5);
        assert_eq!(s.vmax(), &[2]);
    }

    #[test]
    fn d2q9_shape() {
        let s = Stencil::d2q9();
        assert_eq!(s.dim(), 2);
        assert_eq!(s.len(), 9);
        assert_eq!(s.vmax(), &[1, 1]);
    }

    #[test]
    fn d3q19_shape() {
        let s = Stencil::d3q19();
        assert_eq!(s.dim(), 3);
        assert_eq!(s.len(), 19);
        assert_eq!(s.vmax(), &[1, 1, 1]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let s = Stencil::new(
            1,
            [
                Velocity::new(&[1]),
                Velocity::new(&[0]),
                Velocity::new(&[1]),
                Velocity::new(&[-1]),
            ],
        )
        .unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.unique_velocities()[0], Velocity::new(&[1]));
    }

    #[test]
    fn wrong_component_count_rejected() {
        let result = Stencil::new(2, [Velocity::new(&[1])]);
        assert!(matches!(
            result,
            Err(CoreError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn dim_zero_and_four_rejected() {
        assert!(matches!(
            Stencil::new(0, []),
            Err(CoreError::UnsupportedDimension { dim: 0 })
        ));
        assert!(matches!(
            Stencil::new(4, []),
            Err(CoreError::UnsupportedDimension { dim: 4 })
        ));
    }

    #[test]
    fn zero_velocity_only_gives_zero_vmax() {
        let s = Stencil::new(2, [Velocity::new(&[0, 0])]).unwrap();
        assert_eq!(s.vmax(), &[0, 0]);
    }

    proptest! {
        #[test]
        fn vmax_bounds_every_component(
            comps in prop::collection::vec(
                prop::collection::vec(-3i32..=3, 2),
                1..12,
            )
        ) {
            let s = Stencil::new(2, comps.iter().map(|c| Velocity::new(c))).unwrap();
            for v in s.unique_velocities() {
                for k in 0..2 {
                    prop_assert!(v.component(k).unsigned_abs() as usize <= s.vmax()[k]);
                }
            }
        }

        #[test]
        fn unique_velocities_are_distinct(
            comps in prop::collection::vec(
                prop::collection::vec(-2i32..=2, 1),
                1..12,
            )
        ) {
            let s = Stencil::new(1, comps.iter().map(|c| Velocity::new(c))).unwrap();
            let vs = s.unique_velocities();
            for (i, a) in vs.iter().enumerate() {
                for b in &vs[i + 1..] {
                    prop_assert_ne!(a, b);
                }
            }
        }
    }
}
