//! Axis-aligned box element with per-face labels.

use crate::element::{Crossing, Element, ElementKind, GeomError};
use smallvec::SmallVec;
use tessel_core::{Label, Point};

/// Tolerance for the within-face extent check in the ray query. The hit
/// point is computed from a division, so an exact-edge hit can land a few
/// ulps outside the face.
const FACE_EPS: f64 = 1e-12;

/// An axis-aligned box (segment in 1D, rectangle in 2D, cuboid in 3D).
///
/// Faces carry individual labels in the order
/// `[x_lo, x_hi, y_lo, y_hi, z_lo, z_hi]`, the same face ordering the
/// primary box uses.
#[derive(Clone, Debug)]
pub struct Cuboid {
    lo: Point,
    hi: Point,
    labels: SmallVec<[Label; 6]>,
    kind: ElementKind,
}

impl Cuboid {
    /// Create a box from its corner points.
    ///
    /// `labels` must hold either a single label (applied to every face)
    /// or exactly `2 * dim` labels in face order.
    pub fn new(
        lo: &[f64],
        hi: &[f64],
        labels: &[Label],
        kind: ElementKind,
    ) -> Result<Self, GeomError> {
        let dim = lo.len();
        if !(1..=3).contains(&dim) {
            return Err(GeomError::UnsupportedDimension { dim });
        }
        if hi.len() != dim {
            return Err(GeomError::DimensionMismatch {
                expected: dim,
                actual: hi.len(),
            });
        }
        for axis in 0..dim {
            if !(lo[axis] < hi[axis]) {
                return Err(GeomError::EmptyExtent {
                    axis,
                    lo: lo[axis],
                    hi: hi[axis],
                });
            }
        }
        let labels = expand_labels(labels, dim)?;
        Ok(Self {
            lo: Point::from_slice(lo),
            hi: Point::from_slice(hi),
            labels,
            kind,
        })
    }

    /// Lower corner.
    pub fn lo(&self) -> &[f64] {
        &self.lo
    }

    /// Upper corner.
    pub fn hi(&self) -> &[f64] {
        &self.hi
    }
}

/// Expand a 1-or-`2*dim` label list to per-face labels.
pub(crate) fn expand_labels(
    labels: &[Label],
    dim: usize,
) -> Result<SmallVec<[Label; 6]>, GeomError> {
    match labels.len() {
        1 => Ok(SmallVec::from_elem(labels[0], 2 * dim)),
        n if n == 2 * dim => Ok(SmallVec::from_slice(labels)),
        n => Err(GeomError::LabelCount {
            expected: 2 * dim,
            actual: n,
        }),
    }
}

impl Element for Cuboid {
    fn dim(&self) -> usize {
        self.lo.len()
    }

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn labels(&self) -> SmallVec<[Label; 6]> {
        self.labels.clone()
    }

    fn bounding_box(&self) -> (Point, Point) {
        (self.lo.clone(), self.hi.clone())
    }

    fn contains(&self, point: &[f64]) -> bool {
        point
            .iter()
            .enumerate()
            .all(|(k, &p)| self.lo[k] <= p && p <= self.hi[k])
    }

    fn ray_to_boundary(
        &self,
        origin: &[f64],
        step: &[f64],
        max_fraction: f64,
    ) -> Option<Crossing> {
        let mut best: Option<Crossing> = None;
        for axis in 0..self.dim() {
            if step[axis] == 0.0 {
                continue;
            }
            for (side, plane) in [(0, self.lo[axis]), (1, self.hi[axis])] {
                let t = (plane - origin[axis]) / step[axis];
                if !(t > 0.0 && t <= max_fraction) {
                    continue;
                }
                // The hit point must lie within the face's extent on the
                // remaining axes.
                let on_face = (0..self.dim()).all(|k| {
                    k == axis || {
                        let p = origin[k] + t * step[k];
                        self.lo[k] - FACE_EPS <= p && p <= self.hi[k] + FACE_EPS
                    }
                });
                if !on_face {
                    continue;
                }
                if best.as_ref().map_or(true, |b| t < b.alpha) {
                    best = Some(Crossing {
                        alpha: t,
                        label: self.labels[2 * axis + side],
                    });
                }
            }
        }
        best
    }
}
