//! Multi-index boxes and row-major iteration over structured sub-grids.
//!
//! The domain builder restricts every per-obstacle pass to an axis-aligned
//! box of grid indices. [`IndexBox`] is that box: a product of per-axis
//! half-open ranges with intersection, containment, and row-major
//! iteration ([`IndexIter`], odometer order — last axis fastest).

use smallvec::SmallVec;
use std::ops::Range;

/// A multi-index into a structured grid (one `usize` per axis).
pub type NodeIndex = SmallVec<[usize; 3]>;

/// A physical-space point (one coordinate per axis).
pub type Point = SmallVec<[f64; 3]>;

/// Translate a node index by an integer displacement per axis.
///
/// The caller guarantees the result stays in range (in the domain builder
/// this holds because shifted windows stay within the halo, whose width
/// is at least the largest velocity component on each axis).
pub fn shifted(index: &[usize], delta: &[i32]) -> NodeIndex {
    index
        .iter()
        .zip(delta)
        .map(|(&i, &d)| {
            let j = i as i64 + d as i64;
            debug_assert!(j >= 0, "shifted index underflow: {i} + {d}");
            j as usize
        })
        .collect()
}

/// An axis-aligned box of grid indices: the product of one half-open
/// `start..end` range per axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexBox {
    ranges: SmallVec<[Range<usize>; 3]>,
}

impl IndexBox {
    /// Create a box from per-axis ranges.
    pub fn new(ranges: impl IntoIterator<Item = Range<usize>>) -> Self {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.ranges.len()
    }

    /// Per-axis ranges.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Range on one axis.
    pub fn range(&self, axis: usize) -> Range<usize> {
        self.ranges[axis].clone()
    }

    /// Extent per axis (`end - start`, saturating at zero).
    pub fn shape(&self) -> SmallVec<[usize; 3]> {
        self.ranges
            .iter()
            .map(|r| r.end.saturating_sub(r.start))
            .collect()
    }

    /// Total number of indices in the box.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// `true` when any axis range is empty.
    pub fn is_empty(&self) -> bool {
        self.ranges.iter().any(|r| r.end <= r.start)
    }

    /// Intersection with another box of the same dimension.
    pub fn intersect(&self, other: &Self) -> Self {
        debug_assert_eq!(self.ndim(), other.ndim());
        Self {
            ranges: self
                .ranges
                .iter()
                .zip(&other.ranges)
                .map(|(a, b)| a.start.max(b.start)..a.end.min(b.end))
                .collect(),
        }
    }

    /// Whether the index lies inside the box on every axis.
    pub fn contains(&self, index: &[usize]) -> bool {
        index.len() == self.ndim()
            && self
                .ranges
                .iter()
                .zip(index)
                .all(|(r, &i)| r.start <= i && i < r.end)
    }

    /// A copy of the box with one axis restricted to a different range.
    pub fn with_range(&self, axis: usize, range: Range<usize>) -> Self {
        let mut ranges = self.ranges.clone();
        ranges[axis] = range;
        Self { ranges }
    }

    /// Row-major iterator over all indices in the box (last axis fastest).
    pub fn iter(&self) -> IndexIter {
        IndexIter {
            ranges: self.ranges.clone(),
            next: if self.is_empty() {
                None
            } else {
                Some(self.ranges.iter().map(|r| r.start).collect())
            },
        }
    }
}

impl<'a> IntoIterator for &'a IndexBox {
    type Item = NodeIndex;
    type IntoIter = IndexIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major (odometer) iterator over the indices of an [`IndexBox`].
#[derive(Clone, Debug)]
pub struct IndexIter {
    ranges: SmallVec<[Range<usize>; 3]>,
    next: Option<NodeIndex>,
}

impl Iterator for IndexIter {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.clone()?;
        // Advance the odometer, last axis fastest.
        let mut idx = current.clone();
        let mut axis = self.ranges.len();
        loop {
            if axis == 0 {
                self.next = None;
                break;
            }
            axis -= 1;
            idx[axis] += 1;
            if idx[axis] < self.ranges[axis].end {
                self.next = Some(idx);
                break;
            }
            idx[axis] = self.ranges[axis].start;
        }
        Some(current)
    }
}
