use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain, PolySpline};

/// Default polyline density for straight guide curves, in points per unit length.
pub const LINE_POINTS_PER_UNIT: f64 = 200.0;

/// A straight segment between two distinct points.
///
/// The parametric form is: `P(t) = start + t * (end - start)`, `t` in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct LineSegment {
    start: Point3,
    end: Point3,
}

impl LineSegment {
    /// Creates a new segment.
    ///
    /// # Errors
    ///
    /// Returns an error if both points coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::InvalidInput("no distance between points".into()).into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Converts the segment into a polyline of `n_points` evenly spaced
    /// points (two points when `n_points <= 2`).
    ///
    /// # Errors
    ///
    /// Returns an error if `n_points` is zero.
    pub fn to_poly(&self, n_points: usize) -> Result<PolySpline> {
        if n_points == 0 {
            return Err(GeometryError::InvalidInput("no subdivisions set".into()).into());
        }
        if n_points <= 2 {
            return PolySpline::new(vec![self.start, self.end], false);
        }
        #[allow(clippy::cast_precision_loss)]
        let steps = (n_points - 1) as f64;
        let delta = (self.end - self.start) / steps;
        let points = (0..n_points)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let i = i as f64;
                self.start + delta * i
            })
            .collect();
        PolySpline::new(points, false)
    }
}

impl Curve for LineSegment {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        Ok(self.start + (self.end - self.start) * t)
    }

    fn tangent(&self, _t: f64) -> Result<Vector3> {
        Ok((self.end - self.start) / self.length())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

/// Builds a straight polyline from `p1` to `p2` with `n_subdivisions` points.
///
/// # Errors
///
/// Returns an error if `n_subdivisions` is zero or the points coincide.
pub fn make_line(p1: Point3, p2: Point3, n_subdivisions: usize) -> Result<PolySpline> {
    if n_subdivisions == 0 {
        return Err(GeometryError::InvalidInput("no subdivisions set".into()).into());
    }
    LineSegment::new(p1, p2)?.to_poly(n_subdivisions)
}

/// Number of polyline points for a straight guide of `length` at `density`
/// points per unit length.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn line_point_count(length: f64, density: f64) -> usize {
    (length * density).floor().max(0.0) as usize
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn subdivides_evenly() {
        let line = make_line(p(0.0, 0.0, 0.0), p(0.0, 0.0, 4.0), 5).unwrap();
        assert_eq!(line.points().len(), 5);
        for (i, pt) in line.points().iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let z = i as f64;
            assert_relative_eq!(*pt, p(0.0, 0.0, z), epsilon = 1e-12);
        }
    }

    #[test]
    fn small_counts_give_two_points() {
        let line = make_line(p(0.0, 0.0, 10.0), p(0.0, 0.0, 0.0), 1).unwrap();
        assert_eq!(line.points(), &[p(0.0, 0.0, 10.0), p(0.0, 0.0, 0.0)]);
    }

    #[test]
    fn zero_subdivisions_is_error() {
        let err = make_line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), 0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn coincident_points_is_error() {
        let err = make_line(p(1.0, 2.0, 3.0), p(1.0, 2.0, 3.0), 4).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn segment_tangent_is_unit() {
        let seg = LineSegment::new(p(0.0, 0.0, 0.0), p(3.0, 4.0, 0.0)).unwrap();
        assert_relative_eq!(seg.length(), 5.0);
        assert_relative_eq!(seg.tangent(0.3).unwrap(), Vector3::new(0.6, 0.8, 0.0));
    }

    #[test]
    fn point_count_from_density() {
        assert_eq!(line_point_count(0.25, LINE_POINTS_PER_UNIT), 50);
    }
}
