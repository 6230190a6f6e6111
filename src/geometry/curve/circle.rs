use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{BezierSpline, Curve, CurveDomain, Ellipse};

/// A full circle in 3D space.
///
/// Defined by a center, radius, normal axis, and a reference direction
/// for the zero-angle. The parametric domain is `[0, 2*pi)` and the
/// curve is always closed.
///
/// `P(t) = center + radius * cos(t) * ref_dir + radius * sin(t) * binormal`
/// where `binormal = normal x ref_dir`.
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal is zero-length,
    /// or the reference direction is not perpendicular to the normal.
    pub fn new(center: Point3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::InvalidInput(format!("invalid circle radius {radius}")).into(),
            );
        }

        let normal_len = normal.norm();
        let ref_len = ref_dir.norm();
        if normal_len < TOLERANCE || ref_len < TOLERANCE {
            return Err(GeometryError::Degenerate("zero-length circle axis".into()).into());
        }
        let normal = normal / normal_len;
        let ref_dir = ref_dir / ref_len;

        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
        })
    }

    /// A circle of `radius` around the origin in the XY plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn xy(radius: f64) -> Result<Self> {
        Self::new(Point3::origin(), radius, Vector3::z(), Vector3::x())
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Computes the binormal direction (`normal x ref_dir`).
    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }

    /// Approximates the circle with a closed 4-point cubic Bezier whose
    /// handles are `(4/3) tan(pi/8) * radius` long.
    ///
    /// # Errors
    ///
    /// Propagates spline construction errors.
    pub fn to_bezier(&self) -> Result<BezierSpline> {
        Ellipse::new(self.center, self.radius, self.radius, self.normal, self.ref_dir)?.to_bezier()
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let binormal = self.binormal();
        let x = self.radius * t.cos();
        let y = self.radius * t.sin();
        Ok(self.center + self.ref_dir * x + binormal * y)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let binormal = self.binormal();
        Ok(self.ref_dir * -t.sin() + binormal * t.cos())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, std::f64::consts::TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

/// Builds a closed 4-point Bezier circle of `radius` in the XY plane.
///
/// # Errors
///
/// Returns an error if `radius <= 0`.
pub fn make_bezier_circle(radius: f64) -> Result<BezierSpline> {
    Circle::xy(radius)?.to_bezier()
}
