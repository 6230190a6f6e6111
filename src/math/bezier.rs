use super::{Point3, Vector3};

/// Handle length of a cubic Bezier segment approximating a circular arc
/// of `sweep` radians on a circle of `radius`.
///
/// `(4/3) * tan(sweep / 4) * radius`; for a quarter circle this is the
/// familiar `0.5523 * radius`.
#[must_use]
pub fn arc_handle_length(sweep: f64, radius: f64) -> f64 {
    (4.0 / 3.0) * (sweep / 4.0).tan() * radius
}

/// Polar placement of a handle tip relative to the arc centre.
///
/// A handle tangent to a circle of radius `r` at angle `a` with length `h`
/// ends at distance `sqrt(r^2 + h^2)` from the centre, at angle
/// `a +/- acos(r / sqrt(r^2 + h^2))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcHandle {
    /// Distance of the handle tip from the arc centre.
    pub radius: f64,
    /// Angular offset of the handle tip from its control point.
    pub angle: f64,
}

impl ArcHandle {
    /// Computes the handle placement for an arc of `sweep` radians per
    /// segment on a circle of `radius`.
    #[must_use]
    pub fn for_arc(sweep: f64, radius: f64) -> Self {
        let length = arc_handle_length(sweep, radius);
        let handle_radius = radius.hypot(length);
        let angle = if handle_radius > 0.0 {
            (radius / handle_radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };
        Self {
            radius: handle_radius,
            angle,
        }
    }
}

/// Point at `radius`, `angle` in the XY plane, lifted to height `z`.
#[must_use]
pub fn polar(radius: f64, angle: f64, z: f64) -> Point3 {
    Point3::new(radius * angle.cos(), radius * angle.sin(), z)
}

/// Evaluates a cubic Bezier segment at `t` in `[0, 1]`.
#[must_use]
pub fn cubic_point(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, t: f64) -> Point3 {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point3::from(p0.coords * b0 + p1.coords * b1 + p2.coords * b2 + p3.coords * b3)
}

/// First derivative of a cubic Bezier segment at `t`.
#[must_use]
pub fn cubic_derivative(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, t: f64) -> Vector3 {
    let u = 1.0 - t;
    (p1 - p0) * (3.0 * u * u) + (p2 - p1) * (6.0 * u * t) + (p3 - p2) * (3.0 * t * t)
}
