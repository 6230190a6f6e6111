use super::{Matrix4, Point3, Vector3};

/// Builds a 4x4 rotation matrix around a unit axis by an angle (Rodrigues).
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn rotation_matrix(axis: &Vector3, angle: f64) -> Matrix4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    #[allow(clippy::suspicious_operation_groupings)]
    Matrix4::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    )
}

/// Rotation about the cable axis (Z).
#[must_use]
pub fn rotation_z(angle: f64) -> Matrix4 {
    rotation_matrix(&Vector3::z(), angle)
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    matrix.transform_point(point)
}

/// Transforms a direction by the linear part of a 4x4 matrix.
#[must_use]
pub fn transform_vector(matrix: &Matrix4, vector: &Vector3) -> Vector3 {
    matrix.transform_vector(vector)
}
