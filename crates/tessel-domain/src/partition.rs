//! Partitioning of the global index space across processes.

use smallvec::SmallVec;
use std::fmt;
use std::ops::Range;
use tessel_core::CoreError;

/// Assigns this process its contiguous block of the global index space.
///
/// The contract is a true partition: over all processes, the returned
/// interior ranges tile `[0, global_size)` on every axis with no gaps
/// and no overlaps. Halo overlaps between neighbouring blocks are
/// resolved later by the communication layer, not here.
pub trait Partitioner: fmt::Debug {
    /// Per-axis `[begin, end)` interior index range of this process.
    fn region(&self, global_size: &[usize]) -> Vec<Range<usize>>;
}

/// The trivial partitioner: one process owns the whole grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleProcess;

impl Partitioner for SingleProcess {
    fn region(&self, global_size: &[usize]) -> Vec<Range<usize>> {
        global_size.iter().map(|&n| 0..n).collect()
    }
}

/// Block decomposition over a Cartesian process grid.
///
/// `dims[k]` processes along axis `k`, this process at Cartesian
/// coordinate `coords[k]`. Axis `k` of a grid with `n` cells is split
/// into the blocks `[floor(n·i/p), floor(n·(i+1)/p))`, which tile
/// `[0, n)` exactly for every `n` and `p` and differ in size by at most
/// one cell.
#[derive(Clone, Debug)]
pub struct BlockPartition {
    dims: SmallVec<[usize; 3]>,
    coords: SmallVec<[usize; 3]>,
}

impl BlockPartition {
    /// Create a block partitioner for the process at `coords` in a
    /// process grid of shape `dims`.
    ///
    /// Fails when the two slices disagree in length, a grid axis has
    /// zero processes, or a coordinate is out of range.
    pub fn new(dims: &[usize], coords: &[usize]) -> Result<Self, CoreError> {
        if dims.len() != coords.len() {
            return Err(CoreError::DimensionMismatch {
                expected: dims.len(),
                actual: coords.len(),
            });
        }
        if !(1..=3).contains(&dims.len()) {
            return Err(CoreError::UnsupportedDimension { dim: dims.len() });
        }
        if let Some(axis) = dims.iter().position(|&p| p == 0) {
            return Err(CoreError::InvalidPartition {
                reason: format!("zero processes on axis {axis}"),
            });
        }
        if let Some(axis) = dims.iter().zip(coords).position(|(&p, &c)| c >= p) {
            return Err(CoreError::InvalidPartition {
                reason: format!(
                    "coordinate {} out of range 0..{} on axis {axis}",
                    coords[axis], dims[axis]
                ),
            });
        }
        Ok(Self {
            dims: SmallVec::from_slice(dims),
            coords: SmallVec::from_slice(coords),
        })
    }

    /// The block assigned to process `i` of `p` on an axis of `n` cells.
    pub fn axis_block(n: usize, p: usize, i: usize) -> Range<usize> {
        (n * i / p)..(n * (i + 1) / p)
    }
}

impl Partitioner for BlockPartition {
    fn region(&self, global_size: &[usize]) -> Vec<Range<usize>> {
        global_size
            .iter()
            .zip(self.dims.iter().zip(&self.coords))
            .map(|(&n, (&p, &i))| Self::axis_block(n, p, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_process_owns_everything() {
        assert_eq!(SingleProcess.region(&[4, 6]), vec![0..4, 0..6]);
    }

    #[test]
    fn blocks_are_contiguous_and_ordered() {
        // 10 cells over 3 processes: 3 + 3 + 4.
        assert_eq!(BlockPartition::axis_block(10, 3, 0), 0..3);
        assert_eq!(BlockPartition::axis_block(10, 3, 1), 3..6);
        assert_eq!(BlockPartition::axis_block(10, 3, 2), 6..10);
    }

    #[test]
    fn more_processes_than_cells_leaves_empty_blocks() {
        let blocks: Vec<_> = (0..4).map(|i| BlockPartition::axis_block(2, 4, i)).collect();
        assert_eq!(blocks, vec![0..0, 0..1, 1..1, 1..2]);
    }

    #[test]
    fn new_rejects_out_of_range_coords() {
        assert!(matches!(
            BlockPartition::new(&[2, 2], &[2, 0]),
            Err(CoreError::InvalidPartition { .. })
        ));
        assert!(matches!(
            BlockPartition::new(&[2], &[0, 0]),
            Err(CoreError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            BlockPartition::new(&[0], &[0]),
            Err(CoreError::InvalidPartition { .. })
        ));
    }

    #[test]
    fn region_matches_axis_blocks() {
        let p = BlockPartition::new(&[2, 3], &[1, 2]).unwrap();
        assert_eq!(p.region(&[8, 9]), vec![4..8, 6..9]);
    }

    proptest! {
        /// Over all processes, axis blocks tile [0, n) with no gaps and
        /// no overlaps, in order.
        #[test]
        fn axis_blocks_tile_exactly(n in 0usize..200, p in 1usize..17) {
            let mut cursor = 0;
            for i in 0..p {
                let block = BlockPartition::axis_block(n, p, i);
                prop_assert_eq!(block.start, cursor);
                prop_assert!(block.end >= block.start);
                cursor = block.end;
            }
            prop_assert_eq!(cursor, n);
        }

        /// Block sizes differ by at most one cell.
        #[test]
        fn axis_blocks_are_balanced(n in 0usize..200, p in 1usize..17) {
            let sizes: Vec<usize> = (0..p)
                .map(|i| BlockPartition::axis_block(n, p, i).len())
                .collect();
            let min = sizes.iter().min().copied().unwrap_or(0);
            let max = sizes.iter().max().copied().unwrap_or(0);
            prop_assert!(max - min <= 1);
        }
    }
}
