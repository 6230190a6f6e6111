use crate::error::{GeometryError, Result};
use crate::math::transform::transform_point;
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};

use super::{segment_at, Curve, CurveDomain};

/// A polyline spline: straight segments between control points.
#[derive(Debug, Clone, PartialEq)]
pub struct PolySpline {
    points: Vec<Point3>,
    cyclic: bool,
}

impl PolySpline {
    /// Creates a polyline from its points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points are given.
    pub fn new(points: Vec<Point3>, cyclic: bool) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::InvalidInput(format!(
                "a polyline needs at least 2 points, got {}",
                points.len()
            ))
            .into());
        }
        Ok(Self { points, cyclic })
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Whether the polyline is closed.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Number of straight segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        if self.cyclic {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Returns a copy with every point transformed by `matrix`.
    #[must_use]
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        Self {
            points: self.points.iter().map(|p| transform_point(matrix, p)).collect(),
            cyclic: self.cyclic,
        }
    }

    fn segment(&self, index: usize) -> (Point3, Point3) {
        let n = self.points.len();
        (self.points[index % n], self.points[(index + 1) % n])
    }
}

impl Curve for PolySpline {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        let (index, local) = segment_at(t, self.segment_count());
        let (a, b) = self.segment(index);
        Ok(a + (b - a) * local)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        self.domain().check(t)?;
        let (index, _) = segment_at(t, self.segment_count());
        let (a, b) = self.segment(index);
        let d = b - a;
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate("zero-length polyline segment".into()).into());
        }
        Ok(d / len)
    }

    fn domain(&self) -> CurveDomain {
        #[allow(clippy::cast_precision_loss)]
        CurveDomain::new(0.0, self.segment_count() as f64)
    }

    fn is_closed(&self) -> bool {
        self.cyclic
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn evaluates_along_segments() {
        let s = PolySpline::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 2.0, 0.0),
            ],
            false,
        )
        .unwrap();
        assert_relative_eq!(s.evaluate(1.5).unwrap(), Point3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(s.tangent(1.5).unwrap(), Vector3::y());
        assert_relative_eq!(s.evaluate(2.0).unwrap(), Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn rejects_single_point() {
        assert!(PolySpline::new(vec![Point3::origin()], false).is_err());
    }
}
