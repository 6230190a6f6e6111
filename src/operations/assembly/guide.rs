use crate::config::BuildSettings;
use crate::error::Result;
use crate::geometry::curve::{line_point_count, make_bezier_helix, make_line, Spline};
use crate::math::{about_eq, check_length, Point3};

/// Shared guide of an array: a helix of `radius` from `z = length` down to
/// `z = 0`, or a straight line at `(radius, 0)` when there is no twist.
pub(super) fn array_guide(
    length: f64,
    pitch: f64,
    radius: f64,
    clockwise: bool,
    settings: &BuildSettings,
) -> Result<Spline> {
    check_length(length)?;
    if about_eq(pitch, 0.0) {
        let n = line_point_count(length, settings.line_points_per_unit).max(2);
        let line = make_line(
            Point3::new(radius, 0.0, length),
            Point3::new(radius, 0.0, 0.0),
            n,
        )?;
        return Ok(line.into());
    }
    make_bezier_helix(length, pitch, radius, clockwise, settings.helix_subdivisions)
}

/// Angle of slot `index` out of `count` equal slots.
pub(super) fn slot_angle(index: usize, count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let angle = std::f64::consts::TAU * index as f64 / count as f64;
    angle
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn untwisted_guide_is_offset_from_the_axis() {
        let guide = array_guide(2.0, 0.0, 0.5, true, &BuildSettings::default()).unwrap();
        let points = guide.control_points();
        assert_relative_eq!(points[0], Point3::new(0.5, 0.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(points[points.len() - 1], Point3::new(0.5, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn twisted_guide_is_a_helix() {
        let guide = array_guide(1.0, 2.0, 0.5, false, &BuildSettings::default()).unwrap();
        assert!(guide.as_bezier().is_some());
        for point in guide.control_points() {
            assert_relative_eq!(point.x.hypot(point.y), 0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn slots_split_the_circle() {
        assert_relative_eq!(slot_angle(0, 3), 0.0);
        assert_relative_eq!(slot_angle(2, 4), std::f64::consts::PI);
    }
}
