use crate::error::{GeometryError, Result};
use crate::math::bezier::{cubic_derivative, cubic_point};
use crate::math::transform::{rotation_z, transform_point};
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};

use super::{segment_at, Curve, CurveDomain};

/// A Bezier control point with its incoming and outgoing handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierPoint {
    /// Position of the control point.
    pub co: Point3,
    /// Incoming handle (towards the previous point).
    pub handle_left: Point3,
    /// Outgoing handle (towards the next point).
    pub handle_right: Point3,
}

impl BezierPoint {
    /// Creates a control point with explicit handles.
    #[must_use]
    pub fn new(co: Point3, handle_left: Point3, handle_right: Point3) -> Self {
        Self {
            co,
            handle_left,
            handle_right,
        }
    }

    /// Creates a sharp corner: both handles collapse onto the point.
    #[must_use]
    pub fn corner(co: Point3) -> Self {
        Self::new(co, co, co)
    }

    /// Returns the point with position and handles transformed by `matrix`.
    #[must_use]
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        Self {
            co: transform_point(matrix, &self.co),
            handle_left: transform_point(matrix, &self.handle_left),
            handle_right: transform_point(matrix, &self.handle_right),
        }
    }
}

/// A cubic Bezier spline.
///
/// Segment `i` runs from `points[i].co` through `points[i].handle_right`
/// and `points[i + 1].handle_left` to `points[i + 1].co`. A cyclic spline
/// has an extra segment closing the last point back onto the first.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierSpline {
    points: Vec<BezierPoint>,
    cyclic: bool,
}

impl BezierSpline {
    /// Creates a spline from its control points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points are given.
    pub fn new(points: Vec<BezierPoint>, cyclic: bool) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::InvalidInput(format!(
                "a Bezier spline needs at least 2 points, got {}",
                points.len()
            ))
            .into());
        }
        Ok(Self { points, cyclic })
    }

    /// Returns the control points.
    #[must_use]
    pub fn points(&self) -> &[BezierPoint] {
        &self.points
    }

    /// Whether the spline is closed.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Number of cubic segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        if self.cyclic {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Returns the four control polygon points of segment `index`.
    #[must_use]
    pub fn segment(&self, index: usize) -> [Point3; 4] {
        let a = &self.points[index % self.points.len()];
        let b = &self.points[(index + 1) % self.points.len()];
        [a.co, a.handle_right, b.handle_left, b.co]
    }

    /// Returns a copy with every point transformed by `matrix`.
    #[must_use]
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        Self {
            points: self.points.iter().map(|p| p.transformed(matrix)).collect(),
            cyclic: self.cyclic,
        }
    }

    /// Returns a copy rotated about the Z axis by `angle` radians.
    #[must_use]
    pub fn rotated_z(&self, angle: f64) -> Self {
        self.transformed(&rotation_z(angle))
    }

    /// Returns a copy with every X coordinate negated.
    #[must_use]
    pub fn mirrored_x(&self) -> Self {
        let flip = |p: &Point3| Point3::new(-p.x, p.y, p.z);
        Self {
            points: self
                .points
                .iter()
                .map(|p| BezierPoint::new(flip(&p.co), flip(&p.handle_left), flip(&p.handle_right)))
                .collect(),
            cyclic: self.cyclic,
        }
    }
}

impl Curve for BezierSpline {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        let (index, local) = segment_at(t, self.segment_count());
        let [p0, p1, p2, p3] = self.segment(index);
        Ok(cubic_point(&p0, &p1, &p2, &p3, local))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        self.domain().check(t)?;
        let (index, local) = segment_at(t, self.segment_count());
        let [p0, p1, p2, p3] = self.segment(index);
        let mut d = cubic_derivative(&p0, &p1, &p2, &p3, local);
        if d.norm() < TOLERANCE {
            // Collapsed handles at a corner; fall back to the chord.
            d = p3 - p0;
        }
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate("zero-length Bezier segment".into()).into());
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
