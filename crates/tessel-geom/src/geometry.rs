//! The geometry description: primary box, face labels, element list.

use crate::cuboid::expand_labels;
use crate::element::{Element, GeomError};
use smallvec::SmallVec;
use tessel_core::{FaceLabel, Label};

/// The computational region handed to the domain builder: an
/// axis-aligned primary box with one label per face, plus an ordered
/// list of elements.
///
/// Element order is semantic — elements folded later may override
/// earlier ones where they overlap — so the list is append-only.
#[derive(Debug)]
pub struct Geometry {
    bounds: SmallVec<[(f64, f64); 3]>,
    box_labels: SmallVec<[FaceLabel; 6]>,
    elements: Vec<Box<dyn Element>>,
}

impl Geometry {
    /// Create a geometry with all box faces carrying `Label(0)`.
    pub fn new(bounds: &[(f64, f64)]) -> Result<Self, GeomError> {
        Self::with_labels(bounds, &[Label(0)])
    }

    /// Create a geometry with explicit box-face labels.
    ///
    /// `labels` holds either a single label for every face or `2 * dim`
    /// labels in the face order `[x_lo, x_hi, y_lo, y_hi, z_lo, z_hi]`.
    pub fn with_labels(bounds: &[(f64, f64)], labels: &[Label]) -> Result<Self, GeomError> {
        let dim = bounds.len();
        if !(1..=3).contains(&dim) {
            return Err(GeomError::UnsupportedDimension { dim });
        }
        for (axis, &(lo, hi)) in bounds.iter().enumerate() {
            if !(lo < hi) {
                return Err(GeomError::EmptyExtent { axis, lo, hi });
            }
        }
        let box_labels = expand_labels(labels, dim)?
            .into_iter()
            .map(FaceLabel::Physical)
            .collect();
        Ok(Self {
            bounds: SmallVec::from_slice(bounds),
            box_labels,
            elements: Vec::new(),
        })
    }

    /// Append an element. Fails when its dimension disagrees with the box.
    pub fn push(&mut self, element: Box<dyn Element>) -> Result<(), GeomError> {
        if element.dim() != self.dim() {
            return Err(GeomError::DimensionMismatch {
                expected: self.dim(),
                actual: element.dim(),
            });
        }
        self.elements.push(element);
        Ok(())
    }

    /// Spatial dimension.
    pub fn dim(&self) -> usize {
        self.bounds.len()
    }

    /// Per-axis physical bounds of the primary box.
    pub fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    /// Box-face labels, `2 * dim` entries in face order.
    pub fn box_labels(&self) -> &[FaceLabel] {
        &self.box_labels
    }

    /// The elements, in fold order.
    pub fn elements(&self) -> &[Box<dyn Element>] {
        &self.elements
    }

    /// All labels of all elements, in element order.
    pub fn element_labels(&self) -> Vec<Label> {
        self.elements
            .iter()
            .flat_map(|e| e.labels())
            .collect()
    }
}
