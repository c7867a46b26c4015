//! The domain builder: rasterizes a [`Geometry`] onto the local grid and
//! computes the per-velocity boundary tables.

use crate::layout::{self, GridLayout};
use crate::partition::{Partitioner, SingleProcess};
use indexmap::IndexSet;
use log::{debug, info};
use ndarray::{ArrayD, IxDyn};
use smallvec::SmallVec;
use std::fmt;
use tessel_core::{
    shifted, Cell, CoreError, FaceLabel, Flag, IndexBox, Label, NodeIndex, NO_BOUNDARY,
};
use tessel_geom::{Element, Geometry};
use tessel_stencil::Stencil;

/// Everything needed to build a [`Domain`].
///
/// The partitioner defaults to [`SingleProcess`]; SPMD runs swap in a
/// [`BlockPartition`](crate::BlockPartition) built from their process
/// grid coordinates.
#[derive(Debug)]
pub struct DomainConfig {
    /// The geometry: primary box, face labels, ordered element list.
    pub geometry: Geometry,
    /// The velocity set; its `vmax` fixes the halo width.
    pub stencil: Stencil,
    /// Uniform grid spacing.
    pub space_step: f64,
    /// Assigns this process its block of the global index space.
    pub partitioner: Box<dyn Partitioner>,
}

impl DomainConfig {
    /// Single-process configuration.
    pub fn new(geometry: Geometry, stencil: Stencil, space_step: f64) -> Self {
        Self {
            geometry,
            stencil,
            space_step,
            partitioner: Box::new(SingleProcess),
        }
    }

    /// Replace the partitioner.
    pub fn with_partitioner(mut self, partitioner: Box<dyn Partitioner>) -> Self {
        self.partitioner = partitioner;
        self
    }

    /// Check cross-field consistency before any allocation.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.stencil.dim() != self.geometry.dim() {
            return Err(CoreError::DimensionMismatch {
                expected: self.geometry.dim(),
                actual: self.stencil.dim(),
            });
        }
        Ok(())
    }
}

/// The built domain: the fluid/solid mask plus, for every unique velocity
/// and node, the sub-cell distance to and label of the first boundary met
/// along one streaming step.
///
/// `in_or_out` has the halo shape; `distance` and `flag` prepend the
/// velocity axis (`[unvtot] + halo shape`). A stored distance is a
/// crossing fraction in `(0, 1]` exactly where the flag carries a label,
/// and [`NO_BOUNDARY`] exactly where the flag is [`Flag::None`].
///
/// The struct is immutable after [`build`](Domain::build); accessors hand
/// out views only.
pub struct Domain {
    geometry: Geometry,
    stencil: Stencil,
    layout: GridLayout,
    face_labels: SmallVec<[FaceLabel; 6]>,
    in_or_out: ArrayD<Cell>,
    distance: ArrayD<f64>,
    flag: ArrayD<Flag>,
}

impl Domain {
    /// Build the local domain.
    ///
    /// Validates the configuration, lays out the halo grid, stamps the
    /// primary-box faces, then folds the elements in list order. Any
    /// validation failure aborts before the arrays are allocated.
    pub fn build(config: DomainConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let DomainConfig {
            geometry,
            stencil,
            space_step,
            partitioner,
        } = config;

        let global = layout::global_size(geometry.bounds(), space_step)?;
        let region = partitioner.region(&global);
        let layout = GridLayout::build(geometry.bounds(), space_step, &region, stencil.vmax())?;
        let face_labels = resolve_face_labels(&geometry, &layout);

        let shape_halo = layout.shape_halo().to_vec();
        let mut qshape = Vec::with_capacity(shape_halo.len() + 1);
        qshape.push(stencil.len());
        qshape.extend_from_slice(&shape_halo);

        let mut in_or_out = ArrayD::from_elem(IxDyn(&shape_halo), Cell::Solid);
        for node in &layout.interior_box() {
            in_or_out[node.as_slice()] = Cell::Fluid;
        }
        let mut distance = ArrayD::from_elem(IxDyn(&qshape), NO_BOUNDARY);
        let mut flag = ArrayD::from_elem(IxDyn(&qshape), Flag::None);

        stamp_box(&stencil, &face_labels, &layout, &mut distance, &mut flag);
        for element in geometry.elements() {
            fold_element(
                element.as_ref(),
                &layout,
                &stencil,
                &mut in_or_out,
                &mut distance,
                &mut flag,
            );
        }

        info!(
            "built domain: dim {}, dx {}, halo shape {:?}, {} elements",
            layout.dim(),
            space_step,
            shape_halo,
            geometry.elements().len()
        );
        Ok(Self {
            geometry,
            stencil,
            layout,
            face_labels,
            in_or_out,
            distance,
            flag,
        })
    }

    /// Spatial dimension.
    pub fn dim(&self) -> usize {
        self.layout.dim()
    }

    /// The space step.
    pub fn space_step(&self) -> f64 {
        self.layout.space_step()
    }

    /// The coordinate layout of the local grid.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// The geometry the domain was built from.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The velocity set the domain was built for.
    pub fn stencil(&self) -> &Stencil {
        &self.stencil
    }

    /// Per-face labels after interface resolution: a face is
    /// [`FaceLabel::Interface`] exactly when the local region does not
    /// touch the global boundary on that side.
    pub fn face_labels(&self) -> &[FaceLabel] {
        &self.face_labels
    }

    /// The fluid/solid mask, halo shape.
    pub fn in_or_out(&self) -> &ArrayD<Cell> {
        &self.in_or_out
    }

    /// Crossing fractions, shape `[unvtot] + halo shape`.
    pub fn distance(&self) -> &ArrayD<f64> {
        &self.distance
    }

    /// Boundary flags, aligned 1:1 with [`distance`](Domain::distance).
    pub fn flag(&self) -> &ArrayD<Flag> {
        &self.flag
    }

    /// Shape of the local grid including halo nodes.
    pub fn shape_halo(&self) -> SmallVec<[usize; 3]> {
        self.layout.shape_halo()
    }

    /// Shape of the interior (halo excluded).
    pub fn shape_in(&self) -> SmallVec<[usize; 3]> {
        self.layout.shape_in()
    }

    /// Node coordinates on one axis, halo included.
    pub fn coords_halo(&self, axis: usize) -> &[f64] {
        self.layout.coords_halo(axis)
    }

    /// Node coordinates on one axis, halo trimmed.
    pub fn coords_in(&self, axis: usize) -> &[f64] {
        self.layout.coords_in(axis)
    }

    /// Cell classification of a halo-array node.
    pub fn cell_at(&self, index: &[usize]) -> Cell {
        self.in_or_out[index]
    }

    /// Stored crossing fraction for velocity `q` at a halo-array node.
    pub fn distance_at(&self, q: usize, index: &[usize]) -> f64 {
        self.distance[velocity_index(q, index).as_slice()]
    }

    /// Stored boundary flag for velocity `q` at a halo-array node.
    pub fn flag_at(&self, q: usize, index: &[usize]) -> Flag {
        self.flag[velocity_index(q, index).as_slice()]
    }

    /// Every label a boundary condition can be attached to on this
    /// process: physical labels of the resolved box faces first, then
    /// element labels in element order. A face split across processes is
    /// an interface and contributes nothing.
    pub fn list_of_labels(&self) -> IndexSet<Label> {
        let mut labels = IndexSet::new();
        for face in &self.face_labels {
            if let Some(label) = face.physical() {
                labels.insert(label);
            }
        }
        for label in self.geometry.element_labels() {
            labels.insert(label);
        }
        labels
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "domain: dim {}, dx {}, interior shape {:?}, halo {:?}, {} elements, labels {:?}",
            self.dim(),
            self.space_step(),
            self.shape_in(),
            self.layout.halo(),
            self.geometry.elements().len(),
            self.list_of_labels()
        )
    }
}

/// Prepend the velocity index to a node index.
fn velocity_index(q: usize, index: &[usize]) -> SmallVec<[usize; 4]> {
    let mut qi = SmallVec::with_capacity(index.len() + 1);
    qi.push(q);
    qi.extend_from_slice(index);
    qi
}

/// A box face is physical only where the local region reaches the global
/// boundary; everywhere else a neighbouring process continues the grid
/// and the face is resolved by halo exchange.
fn resolve_face_labels(geometry: &Geometry, layout: &GridLayout) -> SmallVec<[FaceLabel; 6]> {
    let mut labels = SmallVec::new();
    for (axis, range) in layout.region().iter().enumerate() {
        labels.push(if range.start == 0 {
            geometry.box_labels()[2 * axis]
        } else {
            FaceLabel::Interface
        });
        labels.push(if range.end == layout.global_size()[axis] {
            geometry.box_labels()[2 * axis + 1]
        } else {
            FaceLabel::Interface
        });
    }
    labels
}

/// Write the primary-box face crossings.
///
/// A velocity with component `v ≠ 0` on axis `a` points at the lower face
/// for `v < 0` and the upper face for `v > 0`; the interior row at depth
/// `i ∈ 0..|v|` from that face meets it at fraction `(i + ½)/|v|` of one
/// step. The closest face wins where several stamp the same entry, and an
/// exact tie keeps the incumbent. Interface faces are skipped.
fn stamp_box(
    stencil: &Stencil,
    face_labels: &[FaceLabel],
    layout: &GridLayout,
    distance: &mut ArrayD<f64>,
    flag: &mut ArrayD<Flag>,
) {
    let interior = layout.interior_box();
    for (q, velocity) in stencil.unique_velocities().iter().enumerate() {
        for axis in 0..stencil.dim() {
            let v = velocity.component(axis);
            if v == 0 {
                continue;
            }
            let face = 2 * axis + usize::from(v > 0);
            let FaceLabel::Physical(label) = face_labels[face] else {
                continue;
            };
            let speed = v.unsigned_abs() as usize;
            let range = interior.range(axis);
            for i in 0..speed.min(range.len()) {
                let row = if v < 0 {
                    range.start + i
                } else {
                    range.end - 1 - i
                };
                let alpha = (i as f64 + 0.5) / speed as f64;
                for node in &interior.with_range(axis, row..row + 1) {
                    let qi = velocity_index(q, &node);
                    if alpha < distance[qi.as_slice()] {
                        distance[qi.as_slice()] = alpha;
                        flag[qi.as_slice()] = Flag::Boundary(label);
                    }
                }
            }
        }
    }
}

/// The window of interior nodes an element can influence: its bounding
/// box in grid indices, inflated by the halo width per axis, clamped to
/// the interior box.
fn element_window(element: &dyn Element, layout: &GridLayout) -> IndexBox {
    let (lo, hi) = element.bounding_box();
    let interior = layout.interior_box();
    let dx = layout.space_step();
    let mut ranges: SmallVec<[std::ops::Range<usize>; 3]> = SmallVec::new();
    for axis in 0..layout.dim() {
        let origin = layout.coords_halo(axis)[0];
        let pad = layout.halo()[axis] as i64;
        let first = ((lo[axis] - origin) / dx).floor() as i64 - pad;
        let last = ((hi[axis] - origin) / dx).floor() as i64 + pad + 1;
        let range = interior.range(axis);
        let start = first.max(range.start as i64) as usize;
        let end = last.min(range.end as i64).max(start as i64) as usize;
        ranges.push(start..end);
    }
    IndexBox::new(ranges)
}

/// Fold one element into the mask and boundary tables.
///
/// The element first reclassifies the nodes it contains, then for every
/// nonzero velocity each window node is either reset (its one-step path
/// no longer meets a boundary) or offered as a merge candidate: a node on
/// the element's fluid side whose post-move node is solid and whose ray
/// crosses the element boundary within one step. Solid elements keep the
/// closer of candidate and stored crossing; fluid elements keep the
/// farther, since the stored one lies inside the newly fluid region.
/// Exact ties keep the stored entry under both rules.
fn fold_element(
    element: &dyn Element,
    layout: &GridLayout,
    stencil: &Stencil,
    in_or_out: &mut ArrayD<Cell>,
    distance: &mut ArrayD<f64>,
    flag: &mut ArrayD<Flag>,
) {
    let window = element_window(element, layout);
    if window.is_empty() {
        debug!("element outside local region, skipped: {element:?}");
        return;
    }
    let nodes: Vec<NodeIndex> = window.iter().collect();
    let coords: Vec<_> = nodes.iter().map(|n| layout.node_coord(n)).collect();
    let inside: Vec<bool> = coords.iter().map(|c| element.contains(c)).collect();
    let fluid_element = element.is_fluid();

    let stamp = if fluid_element { Cell::Fluid } else { Cell::Solid };
    for (node, &is_in) in nodes.iter().zip(&inside) {
        if is_in {
            in_or_out[node.as_slice()] = stamp;
        }
    }

    let dx = layout.space_step();
    for (q, velocity) in stencil.unique_velocities().iter().enumerate() {
        if velocity.is_zero() {
            continue;
        }
        let step: SmallVec<[f64; 3]> = velocity
            .components()
            .iter()
            .map(|&c| dx * f64::from(c))
            .collect();
        for ((node, coord), &is_in) in nodes.iter().zip(&coords).zip(&inside) {
            let moved = shifted(node, velocity.components());
            let lands_on_solid = in_or_out[moved.as_slice()].is_solid();
            let qi = velocity_index(q, node);

            // Stale entries first: a solid element swallows its inside
            // nodes as sources; a fluid element opens paths that now end
            // on fluid.
            let reset = if fluid_element {
                !lands_on_solid && in_or_out[node.as_slice()].is_fluid()
            } else {
                is_in
            };
            if reset {
                distance[qi.as_slice()] = NO_BOUNDARY;
                flag[qi.as_slice()] = Flag::None;
                continue;
            }

            let fluid_side = if fluid_element { is_in } else { !is_in };
            if !fluid_side || !lands_on_solid {
                continue;
            }
            let Some(crossing) = element.ray_to_boundary(coord, &step, 1.0) else {
                continue;
            };
            let stored = distance[qi.as_slice()];
            let replace = if fluid_element {
                stored == NO_BOUNDARY || crossing.alpha > stored
            } else {
                crossing.alpha < stored
            };
            if replace {
                distance[qi.as_slice()] = crossing.alpha;
                flag[qi.as_slice()] = Flag::Boundary(crossing.label);
            }
        }
    }
    debug!(
        "folded element over {} window nodes: {element:?}",
        nodes.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_geom::{Ball, ElementKind};

    fn unit_geometry() -> Geometry {
        Geometry::new(&[(0.0, 1.0)]).unwrap()
    }

    #[test]
    fn validate_rejects_dimension_mismatch() {
        let config = DomainConfig::new(unit_geometry(), Stencil::d2q9(), 0.25);
        assert!(matches!(
            config.validate(),
            Err(CoreError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn build_propagates_space_step_mismatch() {
        let config = DomainConfig::new(unit_geometry(), Stencil::d1q3(), 0.3);
        assert!(matches!(
            Domain::build(config),
            Err(CoreError::SpaceStepMismatch { axis: 0, .. })
        ));
    }

    #[test]
    fn whole_domain_faces_stay_physical() {
        let geometry = Geometry::with_labels(&[(0.0, 1.0)], &[Label(1), Label(2)]).unwrap();
        let layout = GridLayout::build(&[(0.0, 1.0)], 0.25, &[0..4], &[1]).unwrap();
        assert_eq!(
            resolve_face_labels(&geometry, &layout).as_slice(),
            &[FaceLabel::Physical(Label(1)), FaceLabel::Physical(Label(2))]
        );
    }

    #[test]
    fn split_region_marks_inner_faces_interface() {
        let geometry = Geometry::with_labels(&[(0.0, 1.0)], &[Label(1), Label(2)]).unwrap();
        let layout = GridLayout::build(&[(0.0, 1.0)], 0.25, &[2..4], &[1]).unwrap();
        assert_eq!(
            resolve_face_labels(&geometry, &layout).as_slice(),
            &[FaceLabel::Interface, FaceLabel::Physical(Label(2))]
        );
    }

    #[test]
    fn element_window_clamps_to_interior() {
        let layout =
            GridLayout::build(&[(0.0, 1.0), (0.0, 1.0)], 0.25, &[0..4, 0..4], &[1, 1]).unwrap();
        // A ball hugging the lower-left corner: the inflated window must
        // not escape the interior box.
        let ball = Ball::new(&[0.1, 0.1], 0.15, Label(1), ElementKind::Solid).unwrap();
        let window = element_window(&ball, &layout);
        assert_eq!(window, layout.interior_box().intersect(&window));
        assert!(!window.is_empty());
    }

    #[test]
    fn element_window_misses_far_region() {
        let layout = GridLayout::build(&[(0.0, 10.0)], 0.5, &[0..5], &[1]).unwrap();
        let ball = Ball::new(&[9.0], 0.2, Label(1), ElementKind::Solid).unwrap();
        assert!(element_window(&ball, &layout).is_empty());
    }
}
