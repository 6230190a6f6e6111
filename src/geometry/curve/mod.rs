mod bezier;
mod circle;
mod ellipse;
mod helix;
mod line;
mod poly;

pub use bezier::{BezierPoint, BezierSpline};
pub use circle::{make_bezier_circle, Circle};
pub use ellipse::Ellipse;
pub use helix::{make_bezier_helix, Helix};
pub use line::{make_line, LineSegment, LINE_POINTS_PER_UNIT};
pub(crate) use line::line_point_count;
pub use poly::PolySpline;

use crate::error::{GeometryError, Result};
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns an error if `t` lies outside the domain.
    pub(crate) fn check(&self, t: f64) -> Result<()> {
        if t < self.t_min - TOLERANCE || t > self.t_max + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into());
        }
        Ok(())
    }
}

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the unit tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or the tangent is degenerate.
    fn tangent(&self, t: f64) -> Result<Vector3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}

/// One spline of curve data: either a cubic Bezier or a polyline.
///
/// A curve object may hold several splines (a tube section is an outer and
/// an inner circle in one curve).
#[derive(Debug, Clone, PartialEq)]
pub enum Spline {
    Bezier(BezierSpline),
    Poly(PolySpline),
}

impl Spline {
    /// Number of control points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match self {
            Self::Bezier(s) => s.points().len(),
            Self::Poly(s) => s.points().len(),
        }
    }

    /// Control point positions, without handles.
    #[must_use]
    pub fn control_points(&self) -> Vec<Point3> {
        match self {
            Self::Bezier(s) => s.points().iter().map(|p| p.co).collect(),
            Self::Poly(s) => s.points().to_vec(),
        }
    }

    /// Whether the spline wraps around from its last point to its first.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        match self {
            Self::Bezier(s) => s.is_cyclic(),
            Self::Poly(s) => s.is_cyclic(),
        }
    }

    /// Returns a copy with every point and handle transformed by `matrix`.
    #[must_use]
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        match self {
            Self::Bezier(s) => Self::Bezier(s.transformed(matrix)),
            Self::Poly(s) => Self::Poly(s.transformed(matrix)),
        }
    }

    /// Returns the Bezier form, if this is a Bezier spline.
    #[must_use]
    pub fn as_bezier(&self) -> Option<&BezierSpline> {
        match self {
            Self::Bezier(s) => Some(s),
            Self::Poly(_) => None,
        }
    }

    /// Returns the polyline form, if this is a polyline.
    #[must_use]
    pub fn as_poly(&self) -> Option<&PolySpline> {
        match self {
            Self::Bezier(_) => None,
            Self::Poly(s) => Some(s),
        }
    }
}

impl From<BezierSpline> for Spline {
    fn from(spline: BezierSpline) -> Self {
        Self::Bezier(spline)
    }
}

impl From<PolySpline> for Spline {
    fn from(spline: PolySpline) -> Self {
        Self::Poly(spline)
    }
}

impl Curve for Spline {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        match self {
            Self::Bezier(s) => s.evaluate(t),
            Self::Poly(s) => s.evaluate(t),
        }
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        match self {
            Self::Bezier(s) => s.tangent(t),
            Self::Poly(s) => s.tangent(t),
        }
    }

    fn domain(&self) -> CurveDomain {
        match self {
            Self::Bezier(s) => s.domain(),
            Self::Poly(s) => s.domain(),
        }
    }

    fn is_closed(&self) -> bool {
        self.is_cyclic()
    }
}

/// Splits a spline parameter into a segment index and a local `[0, 1]` fraction.
pub(crate) fn segment_at(t: f64, segment_count: usize) -> (usize, f64) {
    if segment_count == 0 {
        return (0, 0.0);
    }
    #[allow(clippy::cast_precision_loss)]
    let last = segment_count as f64;
    let t = t.clamp(0.0, last);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (t.floor() as usize).min(segment_count - 1);
    #[allow(clippy::cast_precision_loss)]
    let local = t - index as f64;
    (index, local)
}
