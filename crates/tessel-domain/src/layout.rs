//! Halo-aware coordinate layout of the local grid.

use smallvec::SmallVec;
use std::ops::Range;
use tessel_core::{CoreError, IndexBox, NodeIndex, Point};

/// Relative tolerance for the exact-tiling check: the rounded cell count
/// must reproduce the box length to within this fraction.
const TILING_EPS: f64 = 1e-9;

/// Number of grid cells per axis of the global box.
///
/// Fails with [`CoreError::SpaceStepMismatch`] when the box length on
/// some axis is not an integer multiple of `space_step` — the box must
/// tile exactly.
pub fn global_size(
    bounds: &[(f64, f64)],
    space_step: f64,
) -> Result<SmallVec<[usize; 3]>, CoreError> {
    let mut sizes = SmallVec::new();
    for (axis, &(lo, hi)) in bounds.iter().enumerate() {
        let length = hi - lo;
        if !(space_step.is_finite() && space_step > 0.0) {
            return Err(CoreError::SpaceStepMismatch {
                axis,
                length,
                space_step,
            });
        }
        let ratio = length / space_step;
        let steps = ratio.round();
        if steps < 1.0 || (ratio - steps).abs() > TILING_EPS * ratio.max(1.0) {
            return Err(CoreError::SpaceStepMismatch {
                axis,
                length,
                space_step,
            });
        }
        sizes.push(steps as usize);
    }
    Ok(sizes)
}

/// The local grid's coordinate layout: the partition-assigned interior
/// block extended by a halo of `halo[k]` cells per side on axis `k`.
///
/// Node coordinates are cell-centered at uniform spacing `space_step`;
/// halo node `i` on axis `k` sits at
/// `lo[k] + dx * (region[k].start - halo[k] + i + 1/2)`.
#[derive(Clone, Debug)]
pub struct GridLayout {
    space_step: f64,
    global_size: SmallVec<[usize; 3]>,
    region: SmallVec<[Range<usize>; 3]>,
    halo: SmallVec<[usize; 3]>,
    coords_halo: SmallVec<[Vec<f64>; 3]>,
}

impl GridLayout {
    /// Build the layout for one process.
    ///
    /// `region` is the partitioner-assigned interior block, `halo` the
    /// per-axis halo width (the stencil's `vmax`). Fails when the box
    /// does not tile exactly, when dimensions disagree, or when the
    /// local block is empty on some axis.
    pub fn build(
        bounds: &[(f64, f64)],
        space_step: f64,
        region: &[Range<usize>],
        halo: &[usize],
    ) -> Result<Self, CoreError> {
        let dim = bounds.len();
        if region.len() != dim {
            return Err(CoreError::DimensionMismatch {
                expected: dim,
                actual: region.len(),
            });
        }
        if halo.len() != dim {
            return Err(CoreError::DimensionMismatch {
                expected: dim,
                actual: halo.len(),
            });
        }
        let global = global_size(bounds, space_step)?;
        for k in 0..dim {
            if region[k].start >= region[k].end || region[k].end > global[k] {
                return Err(CoreError::EmptyDomain);
            }
        }

        let mut coords_halo: SmallVec<[Vec<f64>; 3]> = SmallVec::new();
        for k in 0..dim {
            let n = region[k].len() + 2 * halo[k];
            let first = region[k].start as f64 - halo[k] as f64 + 0.5;
            coords_halo.push(
                (0..n)
                    .map(|i| bounds[k].0 + space_step * (first + i as f64))
                    .collect(),
            );
        }

        Ok(Self {
            space_step,
            global_size: global,
            region: region.iter().cloned().collect(),
            halo: SmallVec::from_slice(halo),
            coords_halo,
        })
    }

    /// Spatial dimension.
    pub fn dim(&self) -> usize {
        self.region.len()
    }

    /// The space step.
    pub fn space_step(&self) -> f64 {
        self.space_step
    }

    /// Global cell count per axis.
    pub fn global_size(&self) -> &[usize] {
        &self.global_size
    }

    /// The interior block in global indices.
    pub fn region(&self) -> &[Range<usize>] {
        &self.region
    }

    /// Halo width per axis.
    pub fn halo(&self) -> &[usize] {
        &self.halo
    }

    /// Shape of the local grid including halo nodes.
    pub fn shape_halo(&self) -> SmallVec<[usize; 3]> {
        self.coords_halo.iter().map(Vec::len).collect()
    }

    /// Shape of the interior (halo excluded).
    pub fn shape_in(&self) -> SmallVec<[usize; 3]> {
        self.region.iter().map(Range::len).collect()
    }

    /// Interior nodes as an [`IndexBox`] in halo-array indices.
    pub fn interior_box(&self) -> IndexBox {
        IndexBox::new(
            self.halo
                .iter()
                .zip(&self.region)
                .map(|(&h, r)| h..h + r.len()),
        )
    }

    /// Node coordinates on one axis, halo included.
    pub fn coords_halo(&self, axis: usize) -> &[f64] {
        &self.coords_halo[axis]
    }

    /// Node coordinates on one axis, halo trimmed.
    pub fn coords_in(&self, axis: usize) -> &[f64] {
        let h = self.halo[axis];
        let n = self.coords_halo[axis].len();
        &self.coords_halo[axis][h..n - h]
    }

    /// Physical coordinates of a halo-array node index.
    pub fn node_coord(&self, index: &NodeIndex) -> Point {
        index
            .iter()
            .enumerate()
            .map(|(k, &i)| self.coords_halo[k][i])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_box_quarter_step_coordinates() {
        // [0, 1] with dx = 0.25 and halo 1: six cell-centered nodes from
        // -0.125 to 1.125.
        let l = GridLayout::build(&[(0.0, 1.0)], 0.25, &[0..4], &[1]).unwrap();
        assert_eq!(l.global_size(), &[4]);
        assert_eq!(l.shape_halo().as_slice(), &[6]);
        assert_eq!(l.shape_in().as_slice(), &[4]);
        let x = l.coords_halo(0);
        let expected = [-0.125, 0.125, 0.375, 0.625, 0.875, 1.125];
        for (a, b) in x.iter().zip(expected) {
            assert_relative_eq!(*a, b);
        }
        assert_relative_eq!(l.coords_in(0)[0], 0.125);
        assert_relative_eq!(l.coords_in(0)[3], 0.875);
    }

    #[test]
    fn non_integer_tiling_is_fatal() {
        let result = GridLayout::build(&[(0.0, 1.0)], 0.3, &[0..3], &[1]);
        assert!(matches!(
            result,
            Err(CoreError::SpaceStepMismatch { axis: 0, .. })
        ));
    }

    #[test]
    fn tenth_step_survives_float_artifacts() {
        // 1.0 / 0.1 is not exactly 10.0 in floating point; the rounded
        // check must still accept it.
        let l = GridLayout::build(&[(0.0, 1.0)], 0.1, &[0..10], &[1]).unwrap();
        assert_eq!(l.global_size(), &[10]);
    }

    #[test]
    fn rejects_zero_and_negative_steps() {
        assert!(global_size(&[(0.0, 1.0)], 0.0).is_err());
        assert!(global_size(&[(0.0, 1.0)], -0.25).is_err());
    }

    #[test]
    fn partitioned_region_offsets_coordinates() {
        // Right half of [0, 1] at dx 0.25, halo 1: interior nodes 0.625
        // and 0.875, halo extends one node each side.
        let l = GridLayout::build(&[(0.0, 1.0)], 0.25, &[2..4], &[1]).unwrap();
        assert_eq!(l.shape_halo().as_slice(), &[4]);
        let x = l.coords_halo(0);
        let expected = [0.375, 0.625, 0.875, 1.125];
        for (a, b) in x.iter().zip(expected) {
            assert_relative_eq!(*a, b);
        }
    }

    #[test]
    fn interior_box_is_halo_offset() {
        let l = GridLayout::build(&[(0.0, 1.0), (0.0, 0.5)], 0.25, &[0..4, 0..2], &[2, 1])
            .unwrap();
        assert_eq!(l.interior_box(), IndexBox::new([2..6, 1..3]));
        assert_eq!(l.shape_halo().as_slice(), &[8, 4]);
    }

    #[test]
    fn empty_region_is_rejected() {
        assert!(matches!(
            GridLayout::build(&[(0.0, 1.0)], 0.25, &[2..2], &[1]),
            Err(CoreError::EmptyDomain)
        ));
    }

    #[test]
    fn zero_halo_axis_has_no_padding() {
        let l = GridLayout::build(&[(0.0, 1.0)], 0.25, &[0..4], &[0]).unwrap();
        assert_eq!(l.shape_halo().as_slice(), &[4]);
        assert_eq!(l.coords_halo(0), l.coords_in(0));
    }
}
