pub mod bezier;
pub mod polygon;
pub mod transform;

use crate::error::{GeometryError, Result};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for comparing user parameters (pitch, strand radius, length)
/// against zero or each other.
pub const PARAM_TOLERANCE: f64 = 1e-6;

/// Returns `true` if `a` and `b` are within [`PARAM_TOLERANCE`] of each other.
#[must_use]
pub fn about_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < PARAM_TOLERANCE
}

/// Rejects lengths that are negative or within [`PARAM_TOLERANCE`] of zero.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidInput`] for a non-positive length.
pub fn check_length(length: f64) -> Result<()> {
    if length < PARAM_TOLERANCE {
        return Err(
            GeometryError::InvalidInput(format!("length must be positive, got {length}")).into(),
        );
    }
    Ok(())
}

/// Length of a helix of `radius` with `pitch` revolutions per unit length,
/// spanning `length` along its axis.
#[must_use]
pub fn helical_length(radius: f64, pitch: f64, length: f64) -> f64 {
    let circumference = std::f64::consts::TAU * radius * length * pitch;
    circumference.hypot(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn about_eq_uses_parameter_tolerance() {
        assert!(about_eq(0.0, 5e-7));
        assert!(!about_eq(0.0, 2e-6));
    }

    #[test]
    fn check_length_rejects_non_positive_lengths() {
        assert!(check_length(0.5).is_ok());
        for length in [0.0, 5e-7, -1.0] {
            assert!(check_length(length).unwrap_err().is_invalid_input(), "{length}");
        }
    }

    #[test]
    fn helical_length_without_twist_is_axial_length() {
        assert_relative_eq!(helical_length(3.0, 0.0, 2.5), 2.5);
    }

    #[test]
    fn helical_length_one_turn() {
        // One revolution around radius 1 over unit length unrolls to a
        // right triangle with legs 2*pi and 1.
        let expected = (std::f64::consts::TAU.powi(2) + 1.0).sqrt();
        assert_relative_eq!(helical_length(1.0, 1.0, 1.0), expected, epsilon = 1e-12);
    }
}
