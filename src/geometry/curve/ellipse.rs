use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{GeometryError, Result};
use crate::math::bezier::arc_handle_length;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{BezierPoint, BezierSpline, Curve, CurveDomain};

/// A full ellipse in 3D space.
///
/// `P(t) = center + a * cos(t) * major_dir + b * sin(t) * minor_dir`
/// where `minor_dir = normal x major_dir`.
#[derive(Debug, Clone)]
pub struct Ellipse {
    center: Point3,
    semi_major: f64,
    semi_minor: f64,
    normal: Vector3,
    major_dir: Vector3,
}

impl Ellipse {
    /// Creates a new ellipse.
    ///
    /// # Errors
    ///
    /// Returns an error if either axis length is non-positive, the normal is
    /// zero-length, or the major direction is not perpendicular to the normal.
    pub fn new(
        center: Point3,
        semi_major: f64,
        semi_minor: f64,
        normal: Vector3,
        major_dir: Vector3,
    ) -> Result<Self> {
        if semi_major < TOLERANCE || semi_minor < TOLERANCE {
            return Err(GeometryError::InvalidInput(format!(
                "ellipse axes must be positive, got {semi_major} and {semi_minor}"
            ))
            .into());
        }

        let normal_len = normal.norm();
        let major_len = major_dir.norm();
        if normal_len < TOLERANCE || major_len < TOLERANCE {
            return Err(GeometryError::Degenerate("zero-length ellipse axis".into()).into());
        }
        let normal = normal / normal_len;
        let major_dir = major_dir / major_len;

        if normal.dot(&major_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "major direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            semi_major,
            semi_minor,
            normal,
            major_dir,
        })
    }

    /// Returns the center of the ellipse.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the semi-major axis length.
    #[must_use]
    pub fn semi_major(&self) -> f64 {
        self.semi_major
    }

    /// Returns the semi-minor axis length.
    #[must_use]
    pub fn semi_minor(&self) -> f64 {
        self.semi_minor
    }

    fn minor_dir(&self) -> Vector3 {
        self.normal.cross(&self.major_dir)
    }

    fn derivative(&self, t: f64) -> Vector3 {
        self.major_dir * (-self.semi_major * t.sin()) + self.minor_dir() * (self.semi_minor * t.cos())
    }

    /// Approximates the ellipse with a closed 4-point cubic Bezier.
    ///
    /// Points sit on the axes and run clockwise around the normal
    /// (`0, -pi/2, -pi, -3pi/2`). Each handle is the quarter-arc constant
    /// `(4/3) tan(pi/8)` times the curve derivative, which is exact for the
    /// affine image of a Bezier circle.
    ///
    /// # Errors
    ///
    /// Never fails for a validly constructed ellipse; the `Result` carries
    /// spline construction errors.
    pub fn to_bezier(&self) -> Result<BezierSpline> {
        let kappa = arc_handle_length(FRAC_PI_2, 1.0);
        let points = (0..4)
            .map(|i| {
                let t = -FRAC_PI_2 * f64::from(i);
                let co = self.point_at(t);
                let handle = self.derivative(t) * kappa;
                BezierPoint::new(co, co + handle, co - handle)
            })
            .collect();
        BezierSpline::new(points, true)
    }

    fn point_at(&self, t: f64) -> Point3 {
        self.center
            + self.major_dir * (self.semi_major * t.cos())
            + self.minor_dir() * (self.semi_minor * t.sin())
    }
}

impl Curve for Ellipse {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let tangent = self.derivative(t);
        let len = tangent.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate("zero-length ellipse tangent".into()).into());
        }
        Ok(tangent / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn xy_ellipse(a: f64, b: f64) -> Ellipse {
        Ellipse::new(Point3::origin(), a, b, Vector3::z(), Vector3::x()).unwrap()
    }

    #[test]
    fn evaluate_at_pi_over_2() {
        let e = xy_ellipse(3.0, 2.0);
        let p = e.evaluate(FRAC_PI_2).unwrap();
        assert_relative_eq!(p, Point3::new(0.0, 2.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn bezier_points_on_axes() {
        let bezier = xy_ellipse(3.0, 2.0).to_bezier().unwrap();
        let expected = [(3.0, 0.0), (0.0, -2.0), (-3.0, 0.0), (0.0, 2.0)];
        for (p, (x, y)) in bezier.points().iter().zip(expected) {
            assert_relative_eq!(p.co, Point3::new(x, y, 0.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn bezier_midpoints_stay_close() {
        let e = xy_ellipse(3.0, 2.0);
        let bezier = e.to_bezier().unwrap();
        for seg in 0..4 {
            #[allow(clippy::cast_precision_loss)]
            let p = bezier.evaluate(seg as f64 + 0.5).unwrap();
            // Implicit equation of the ellipse.
            let value = (p.x / 3.0).powi(2) + (p.y / 2.0).powi(2);
            assert!((value - 1.0).abs() < 1e-3, "segment {seg}: {value}");
        }
    }

    #[test]
    fn invalid_axes() {
        assert!(Ellipse::new(Point3::origin(), 0.0, 1.0, Vector3::z(), Vector3::x()).is_err());
        assert!(Ellipse::new(Point3::origin(), 1.0, -1.0, Vector3::z(), Vector3::x()).is_err());
    }

    #[test]
    fn non_perpendicular_major_dir() {
        let r = Ellipse::new(
            Point3::origin(),
            2.0,
            1.0,
            Vector3::z(),
            Vector3::new(1.0, 0.0, 1.0),
        );
        assert!(r.is_err());
    }
}
