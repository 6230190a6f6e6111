use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::bezier::{polar, ArcHandle};
use crate::math::{about_eq, check_length, Point3, Vector3, TOLERANCE};

use super::line::line_point_count;
use super::{make_line, BezierPoint, BezierSpline, Curve, CurveDomain, Spline, LINE_POINTS_PER_UNIT};

/// A circular helix around the Z axis.
///
/// The helix starts at `(radius, 0, length)` and winds down to `z = 0`,
/// making `pitch` revolutions per unit of axial length. Clockwise helices
/// turn towards negative angles as `t` grows.
///
/// `P(t) = (r cos(w t), r sin(w t), length (1 - t))` with
/// `w = +/- 2 pi pitch length`, `t` in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Helix {
    radius: f64,
    pitch: f64,
    length: f64,
    clockwise: bool,
}

impl Helix {
    /// Creates a new helix.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is zero or the radius is negative.
    pub fn new(radius: f64, pitch: f64, length: f64, clockwise: bool) -> Result<Self> {
        check_length(length)?;
        if radius < 0.0 {
            return Err(
                GeometryError::InvalidInput(format!("invalid helix radius {radius}")).into(),
            );
        }
        Ok(Self {
            radius,
            pitch,
            length,
            clockwise,
        })
    }

    /// Returns the helix radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the revolutions per unit length.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Returns the axial length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns whether the helix turns clockwise when viewed from +Z.
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    /// Total angle swept over the full helix, signed by the turn direction.
    fn total_angle(&self) -> f64 {
        let angle = TAU * self.pitch * self.length;
        if self.clockwise {
            -angle
        } else {
            angle
        }
    }

    /// Converts the helix to a Bezier spline with `subdivisions` points
    /// per quarter turn, or to a straight polyline when the pitch is zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `subdivisions` is zero or the helix is too short
    /// to hold a single segment.
    pub fn to_spline(&self, subdivisions: usize) -> Result<Spline> {
        make_bezier_helix(
            self.length,
            self.pitch,
            self.radius,
            self.clockwise,
            subdivisions,
        )
    }
}

impl Curve for Helix {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        Ok(polar(
            self.radius,
            self.total_angle() * t,
            self.length * (1.0 - t),
        ))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        self.domain().check(t)?;
        let w = self.total_angle();
        let angle = w * t;
        let d = Vector3::new(
            -self.radius * w * angle.sin(),
            self.radius * w * angle.cos(),
            -self.length,
        );
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate("zero-length helix tangent".into()).into());
        }
        Ok(d / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

/// Builds a cubic Bezier helix around the Z axis.
///
/// The spline runs from `z = length` down to `z = 0` with
/// `4 * subdivisions` points per revolution and
/// `floor(length * pitch * 4 * subdivisions)` segments. Each handle lies on
/// the tangent of the circular arc between neighbouring points, lifted by
/// the helix rise over its angular offset. A zero pitch yields a straight
/// polyline from the origin to `(0, 0, length)` instead.
///
/// # Errors
///
/// Returns an error if the length is zero, `subdivisions` is zero, or the
/// helix is too short to hold a single segment.
pub fn make_bezier_helix(
    length: f64,
    pitch: f64,
    radius: f64,
    clockwise: bool,
    subdivisions: usize,
) -> Result<Spline> {
    check_length(length)?;
    if radius < 0.0 {
        return Err(GeometryError::InvalidInput(format!("invalid helix radius {radius}")).into());
    }
    if about_eq(pitch, 0.0) {
        let n = line_point_count(length, LINE_POINTS_PER_UNIT);
        return Ok(make_line(Point3::origin(), Point3::new(0.0, 0.0, length), n)?.into());
    }
    if subdivisions < 1 {
        return Err(GeometryError::InvalidInput("no subdivisions set".into()).into());
    }

    #[allow(clippy::cast_precision_loss)]
    let points_per_rev = 4.0 * subdivisions as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_points = (length * pitch.abs() * points_per_rev).floor() as usize;
    if n_points == 0 {
        return Err(GeometryError::InvalidInput(format!(
            "helix of length {length} and pitch {pitch} is shorter than one segment"
        ))
        .into());
    }

    let mut dtheta = TAU / points_per_rev;
    if clockwise {
        dtheta = -dtheta;
    }
    let handle = ArcHandle::for_arc(dtheta.abs(), radius);
    let dz = handle.angle / (TAU * pitch);

    let points = (0..=n_points)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let (i, n) = (i as f64, n_points as f64);
            let angle = dtheta * i;
            let z = length - length * (i / n);
            let co = polar(radius, angle, z);
            let behind = polar(handle.radius, angle - handle.angle, 0.0);
            let ahead = polar(handle.radius, angle + handle.angle, 0.0);
            let (left, right) = if clockwise {
                (Point3::new(ahead.x, ahead.y, z + dz), Point3::new(behind.x, behind.y, z - dz))
            } else {
                (Point3::new(behind.x, behind.y, z + dz), Point3::new(ahead.x, ahead.y, z - dz))
            };
            BezierPoint::new(co, left, right)
        })
        .collect();
    Ok(BezierSpline::new(points, false)?.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bezier(spline: &Spline) -> &BezierSpline {
        spline.as_bezier().unwrap()
    }

    #[test]
    fn point_count_follows_pitch_and_subdivisions() {
        let s = make_bezier_helix(2.0, 1.5, 1.0, false, 2).unwrap();
        // floor(2 * 1.5 * 8) segments.
        assert_eq!(s.point_count(), 25);
    }

    #[test]
    fn runs_from_top_to_bottom() {
        let s = make_bezier_helix(3.0, 1.0, 0.5, true, 1).unwrap();
        let pts = bezier(&s).points();
        assert_relative_eq!(pts[0].co, Point3::new(0.5, 0.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(pts[pts.len() - 1].co.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn control_points_lie_on_cylinder() {
        let radius = 1.25;
        let s = make_bezier_helix(1.0, 2.0, radius, false, 1).unwrap();
        for p in bezier(&s).points() {
            assert_relative_eq!(p.co.x.hypot(p.co.y), radius, epsilon = 1e-12);
        }
    }

    #[test]
    fn clockwise_is_mirror_of_counter_clockwise() {
        let cw = make_bezier_helix(2.0, 1.0, 1.0, true, 2).unwrap();
        let ccw = make_bezier_helix(2.0, 1.0, 1.0, false, 2).unwrap();
        let mirror = |p: &Point3| Point3::new(p.x, -p.y, p.z);
        for (a, b) in bezier(&cw).points().iter().zip(bezier(&ccw).points()) {
            assert_relative_eq!(a.co, mirror(&b.co), epsilon = 1e-12);
            assert_relative_eq!(a.handle_left, mirror(&b.handle_left), epsilon = 1e-12);
            assert_relative_eq!(a.handle_right, mirror(&b.handle_right), epsilon = 1e-12);
        }
    }

    #[test]
    fn spline_follows_analytic_helix() {
        let helix = Helix::new(1.0, 1.0, 2.0, false).unwrap();
        let spline = helix.to_spline(2).unwrap();
        let segments = spline.point_count() - 1;
        for step in 0..=20 {
            let t = f64::from(step) / 20.0;
            #[allow(clippy::cast_precision_loss)]
            let on_spline = spline.evaluate(t * segments as f64).unwrap();
            let exact = helix.evaluate(t).unwrap();
            assert!((on_spline - exact).norm() < 1e-3, "t = {t}");
        }
    }

    #[test]
    fn outgoing_handle_follows_tangent() {
        let helix = Helix::new(1.0, 0.5, 4.0, true).unwrap();
        let spline = helix.to_spline(1).unwrap();
        let p = &bezier(&spline).points()[0];
        let dir = (p.handle_right - p.co).normalize();
        let tangent = helix.tangent(0.0).unwrap();
        assert!(dir.dot(&tangent) > 0.999, "{dir} vs {tangent}");
    }

    #[test]
    fn zero_pitch_is_straight_line() {
        let s = make_bezier_helix(0.5, 0.0, 2.0, false, 1).unwrap();
        let poly = s.as_poly().unwrap();
        assert_eq!(poly.points().len(), 100);
        assert_relative_eq!(poly.points()[0], Point3::origin());
        assert_relative_eq!(poly.points()[99], Point3::new(0.0, 0.0, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn invalid_parameters() {
        assert!(make_bezier_helix(0.0, 1.0, 1.0, false, 1).unwrap_err().is_invalid_input());
        assert!(make_bezier_helix(1.0, 1.0, 1.0, false, 0).unwrap_err().is_invalid_input());
        // Less than a quarter turn at one point per quarter.
        assert!(make_bezier_helix(0.1, 1.0, 1.0, false, 1).is_err());
    }

    #[test]
    fn negative_length_or_radius_is_rejected() {
        assert!(make_bezier_helix(-2.0, 1.0, 1.0, false, 1).unwrap_err().is_invalid_input());
        assert!(make_bezier_helix(-2.0, 0.0, 1.0, false, 1).unwrap_err().is_invalid_input());
        assert!(make_bezier_helix(2.0, 1.0, -1.0, false, 1).unwrap_err().is_invalid_input());
        assert!(Helix::new(1.0, 1.0, -2.0, true).unwrap_err().is_invalid_input());
    }
}
