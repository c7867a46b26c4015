//! Ball element: segment in 1D, disc in 2D, sphere in 3D.

use crate::element::{Crossing, Element, ElementKind, GeomError};
use smallvec::SmallVec;
use tessel_core::{Label, Point};

/// A ball of given center and radius, with a single label for the whole
/// boundary.
#[derive(Clone, Debug)]
pub struct Ball {
    center: Point,
    radius: f64,
    label: Label,
    kind: ElementKind,
}

impl Ball {
    /// Create a ball.
    ///
    /// Fails with [`GeomError::InvalidRadius`] unless `radius` is finite
    /// and positive, and [`GeomError::UnsupportedDimension`] for a center
    /// outside 1–3 components.
    pub fn new(
        center: &[f64],
        radius: f64,
        label: Label,
        kind: ElementKind,
    ) -> Result<Self, GeomError> {
        if !(1..=3).contains(&center.len()) {
            return Err(GeomError::UnsupportedDimension { dim: center.len() });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeomError::InvalidRadius { radius });
        }
        Ok(Self {
            center: Point::from_slice(center),
            radius,
            label,
            kind,
        })
    }

    /// Ball center.
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Ball radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Element for Ball {
    fn dim(&self) -> usize {
        self.center.len()
    }

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn labels(&self) -> SmallVec<[Label; 6]> {
        SmallVec::from_slice(&[self.label])
    }

    fn bounding_box(&self) -> (Point, Point) {
        let lo = self.center.iter().map(|c| c - self.radius).collect();
        let hi = self.center.iter().map(|c| c + self.radius).collect();
        (lo, hi)
    }

    fn contains(&self, point: &[f64]) -> bool {
        let d2: f64 = point
            .iter()
            .zip(&self.center)
            .map(|(p, c)| (p - c) * (p - c))
            .sum();
        d2 <= self.radius * self.radius
    }

    fn ray_to_boundary(
        &self,
        origin: &[f64],
        step: &[f64],
        max_fraction: f64,
    ) -> Option<Crossing> {
        // Smallest t in (0, max_fraction] with |origin + t*step - center| = r.
        let a: f64 = step.iter().map(|s| s * s).sum();
        if a == 0.0 {
            return None;
        }
        let b: f64 = step
            .iter()
            .zip(origin.iter().zip(&self.center))
            .map(|(s, (o, c))| 2.0 * s * (o - c))
            .sum();
        let c: f64 = origin
            .iter()
            .zip(&self.center)
            .map(|(o, cc)| (o - cc) * (o - cc))
            .sum::<f64>()
            - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);
        for t in [t1, t2] {
            if t > 0.0 && t <= max_fraction {
                return Some(Crossing {
                    alpha: t,
                    label: self.label,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn disc() -> Ball {
        Ball::new(&[0.0, 0.0], 1.0, Label(5), ElementKind::Solid).unwrap()
    }

    #[test]
    fn rejects_bad_radius() {
        assert!(matches!(
            Ball::new(&[0.0], 0.0, Label(0), ElementKind::Solid),
            Err(GeomError::InvalidRadius { .. })
        ));
        assert!(matches!(
            Ball::new(&[0.0], f64::NAN, Label(0), ElementKind::Solid),
            Err(GeomError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn rejects_bad_dimension() {
        assert!(matches!(
            Ball::new(&[0.0; 4], 1.0, Label(0), ElementKind::Solid),
            Err(GeomError::UnsupportedDimension { dim: 4 })
        ));
    }

    #[test]
    fn contains_includes_boundary() {
        let b = disc();
        assert!(b.contains(&[0.0, 0.0]));
        assert!(b.contains(&[1.0, 0.0]));
        assert!(!b.contains(&[1.0 + 1e-9, 0.0]));
    }

    #[test]
    fn bounding_box_is_center_plus_minus_radius() {
        let (lo, hi) = disc().bounding_box();
        assert_eq!(lo.as_slice(), &[-1.0, -1.0]);
        assert_eq!(hi.as_slice(), &[1.0, 1.0]);
    }

    #[test]
    fn ray_hits_boundary_from_outside() {
        // From (-2, 0) stepping (+2, 0): boundary at x = -1, t = 0.5.
        let hit = disc()
            .ray_to_boundary(&[-2.0, 0.0], &[2.0, 0.0], 1.0)
            .unwrap();
        assert_relative_eq!(hit.alpha, 0.5);
        assert_eq!(hit.label, Label(5));
    }

    #[test]
    fn ray_misses_out_of_range() {
        // Boundary is at t = 1.5, beyond max_fraction.
        assert!(disc()
            .ray_to_boundary(&[-4.0, 0.0], &[2.0, 0.0], 1.0)
            .is_none());
    }

    #[test]
    fn ray_misses_sideways() {
        assert!(disc()
            .ray_to_boundary(&[-2.0, 3.0], &[2.0, 0.0], 1.0)
            .is_none());
    }

    #[test]
    fn ray_from_inside_reports_exit() {
        let hit = disc()
            .ray_to_boundary(&[0.0, 0.0], &[2.0, 0.0], 1.0)
            .unwrap();
        assert_relative_eq!(hit.alpha, 0.5);
    }

    #[test]
    fn zero_step_has_no_crossing() {
        assert!(disc()
            .ray_to_boundary(&[-2.0, 0.0], &[0.0, 0.0], 1.0)
            .is_none());
    }

    proptest! {
        /// If the two endpoints of the step are classified differently,
        /// a crossing must be reported within the step.
        #[test]
        fn classification_change_implies_crossing(
            ox in -3.0f64..3.0, oy in -3.0f64..3.0,
            sx in -2.0f64..2.0, sy in -2.0f64..2.0,
        ) {
            let b = disc();
            let o = [ox, oy];
            let e = [ox + sx, oy + sy];
            // Keep away from tangency and the boundary itself.
            let r = |p: &[f64; 2]| (p[0] * p[0] + p[1] * p[1]).sqrt();
            prop_assume!((r(&o) - 1.0).abs() > 1e-6);
            prop_assume!((r(&e) - 1.0).abs() > 1e-6);
            if b.contains(&o) != b.contains(&e) {
                let hit = b.ray_to_boundary(&o, &[sx, sy], 1.0);
                prop_assert!(hit.is_some());
                let hit = hit.unwrap();
                prop_assert!(hit.alpha > 0.0 && hit.alpha <= 1.0);
            }
        }

        /// Every reported crossing lies on the ball boundary.
        #[test]
        fn crossing_point_is_on_boundary(
            ox in -3.0f64..3.0, oy in -3.0f64..3.0,
            sx in -2.0f64..2.0, sy in -2.0f64..2.0,
        ) {
            let b = disc();
            if let Some(hit) = b.ray_to_boundary(&[ox, oy], &[sx, sy], 1.0) {
                let px = ox + hit.alpha * sx;
                let py = oy + hit.alpha * sy;
                let r = (px * px + py * py).sqrt();
                prop_assert!((r - 1.0).abs() < 1e-9, "crossing at radius {r}");
            }
        }
    }
}
