use std::f64::consts::TAU;

use crate::config::BuildSettings;
use crate::error::{GeometryError, Result};
use crate::math::bezier::polar;
use crate::math::transform::transform_point;
use crate::math::{about_eq, check_length, Matrix4, Point3, Vector3};

/// A polygon: ordered vertex indices with a smooth-shading flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Vertex indices, counter-clockwise seen from outside.
    pub indices: Vec<usize>,
    /// Whether the face is shaded smooth.
    pub smooth: bool,
}

impl Face {
    /// Creates a flat-shaded face.
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            smooth: false,
        }
    }
}

/// A polygon mesh: quads along the sides, n-gon caps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Faces indexing into `vertices`.
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the mesh has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, point: Point3) -> usize {
        self.vertices.push(point);
        self.vertices.len() - 1
    }

    /// Adds a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face has fewer than 3 vertices or an index is
    /// out of range.
    pub fn add_face(&mut self, indices: Vec<usize>) -> Result<()> {
        if indices.len() < 3 {
            return Err(GeometryError::InvalidInput(format!(
                "a face needs at least 3 vertices, got {}",
                indices.len()
            ))
            .into());
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.vertices.len()) {
            return Err(GeometryError::InvalidInput(format!(
                "vertex index {bad} out of range ({} vertices)",
                self.vertices.len()
            ))
            .into());
        }
        self.faces.push(Face::new(indices));
        Ok(())
    }

    /// Sets the smooth-shading flag on every face.
    pub fn set_smooth(&mut self, smooth: bool) {
        for face in &mut self.faces {
            face.smooth = smooth;
        }
    }

    /// Appends the vertices and faces of `other`, re-indexing its faces.
    pub fn append(&mut self, other: &Self) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(other.faces.iter().map(|f| Face {
            indices: f.indices.iter().map(|i| i + offset).collect(),
            smooth: f.smooth,
        }));
    }

    /// Returns a copy with every vertex transformed by `matrix`.
    #[must_use]
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|p| transform_point(matrix, p))
                .collect(),
            faces: self.faces.clone(),
        }
    }

    /// Builds a capped or open sweep from equally sized vertex rings.
    ///
    /// Consecutive rings are joined with quads. Each ring must run
    /// counter-clockwise around the sweep direction so that the side faces
    /// point outwards.
    fn from_rings(rings: &[Vec<Point3>], capped: bool) -> Self {
        let mut mesh = Self::new();
        let Some(ring_size) = rings.first().map(Vec::len) else {
            return mesh;
        };
        for ring in rings {
            mesh.vertices.extend_from_slice(ring);
        }
        for r in 1..rings.len() {
            let prev = (r - 1) * ring_size;
            let cur = r * ring_size;
            for j in 0..ring_size {
                let next = (j + 1) % ring_size;
                mesh.faces.push(Face::new(vec![
                    prev + j,
                    prev + next,
                    cur + next,
                    cur + j,
                ]));
            }
        }
        if capped && ring_size >= 3 {
            mesh.faces.push(Face::new((0..ring_size).rev().collect()));
            let last = (rings.len() - 1) * ring_size;
            mesh.faces.push(Face::new((last..last + ring_size).collect()));
        }
        mesh
    }
}

/// Points per revolution of a [`mesh_tube`] of the given outer radius.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn tube_points_per_revolution(outer_radius: f64) -> usize {
    let ppr = (3.7 * outer_radius.ln() + 32.0).floor();
    if ppr < 4.0 {
        4
    } else {
        ppr as usize
    }
}

/// Builds a thick-walled tube along +Z from `z = 0` to `z = length`.
///
/// The resolution grows logarithmically with the outer radius. All faces
/// are smooth.
///
/// # Errors
///
/// Returns an error if `inner_radius >= outer_radius` or `outer_radius <= 0`.
pub fn mesh_tube(outer_radius: f64, inner_radius: f64, length: f64) -> Result<Mesh> {
    check_length(length)?;
    if inner_radius >= outer_radius {
        return Err(GeometryError::InvalidInput("inner radius too big".into()).into());
    }
    if outer_radius <= 0.0 {
        return Err(GeometryError::InvalidInput("outer radius too small".into()).into());
    }

    let ppr = tube_points_per_revolution(outer_radius);
    #[allow(clippy::cast_precision_loss)]
    let dtheta = TAU / ppr as f64;

    // Four vertices per step: outer bottom, outer top, inner bottom, inner top.
    let mut mesh = Mesh::new();
    for i in 0..ppr {
        #[allow(clippy::cast_precision_loss)]
        let angle = dtheta * i as f64;
        mesh.vertices.push(polar(outer_radius, angle, 0.0));
        mesh.vertices.push(polar(outer_radius, angle, length));
        mesh.vertices.push(polar(inner_radius, angle, 0.0));
        mesh.vertices.push(polar(inner_radius, angle, length));
    }
    for i in 0..ppr {
        let a = i * 4;
        let b = ((i + 1) % ppr) * 4;
        // Outer wall faces out, inner wall faces the axis.
        mesh.faces.push(Face::new(vec![a, b, b + 1, a + 1]));
        mesh.faces.push(Face::new(vec![a + 2, a + 3, b + 3, b + 2]));
        // Bottom and top rims.
        mesh.faces.push(Face::new(vec![a, a + 2, b + 2, b]));
        mesh.faces.push(Face::new(vec![a + 1, b + 1, b + 3, a + 3]));
    }
    mesh.set_smooth(true);
    Ok(mesh)
}

/// Builds a zero-thickness open tube with `points` vertices around.
///
/// # Errors
///
/// Returns an error if `radius <= 0` or `points < 3`.
pub fn mesh_shell_tube(length: f64, radius: f64, points: usize) -> Result<Mesh> {
    check_length(length)?;
    if radius <= 0.0 {
        return Err(GeometryError::InvalidInput(format!("invalid radius {radius}")).into());
    }
    if points < 3 {
        return Err(
            GeometryError::InvalidInput(format!("a tube needs 3 points, got {points}")).into(),
        );
    }
    let ring = |z: f64| -> Vec<Point3> {
        (0..points)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = TAU * i as f64 / points as f64;
                polar(radius, angle, z)
            })
            .collect()
    };
    let mut mesh = Mesh::from_rings(&[ring(0.0), ring(length)], false);
    mesh.set_smooth(true);
    Ok(mesh)
}

fn circle_ring(center: Point3, u: Vector3, w: Vector3, radius: f64, points: usize) -> Vec<Point3> {
    (0..points)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let phi = TAU * i as f64 / points as f64;
            center + (u * phi.cos() + w * phi.sin()) * radius
        })
        .collect()
}

fn check_strand(length: f64, radius: f64, settings: &BuildSettings) -> Result<()> {
    check_length(length)?;
    if radius <= 0.0 {
        return Err(GeometryError::InvalidInput(format!("invalid strand radius {radius}")).into());
    }
    if settings.mesh_points_per_ring < 3 {
        return Err(GeometryError::InvalidInput(format!(
            "a strand ring needs 3 points, got {}",
            settings.mesh_points_per_ring
        ))
        .into());
    }
    Ok(())
}

/// Builds a capped cylinder of `radius` along +Z.
///
/// # Errors
///
/// Returns an error if the length is zero, the radius is not positive, or
/// the settings ask for fewer than 3 points per ring.
pub fn mesh_straight_strand(length: f64, radius: f64, settings: &BuildSettings) -> Result<Mesh> {
    check_strand(length, radius, settings)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_rings = ((settings.mesh_rings_per_unit * length).floor() as usize).max(1);
    #[allow(clippy::cast_precision_loss)]
    let dz = length / n_rings as f64;
    let rings: Vec<Vec<Point3>> = (0..=n_rings)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let z = dz * i as f64;
            circle_ring(
                Point3::new(0.0, 0.0, z),
                Vector3::x(),
                Vector3::y(),
                radius,
                settings.mesh_points_per_ring,
            )
        })
        .collect();
    Ok(Mesh::from_rings(&rings, true))
}

/// Builds a capped strand of `strand_radius` twisted around the Z axis.
///
/// The strand centre follows a helix of `radius` starting at `start_angle`
/// and turning `pitch` revolutions per unit length as `z` rises. Each ring
/// is a circle perpendicular to the helix tangent. A zero pitch gives a
/// straight strand parallel to the axis.
///
/// # Errors
///
/// Returns an error if the length is zero, the strand radius is not
/// positive, or the settings ask for fewer than 3 points per ring.
pub fn mesh_twisted_strand(
    length: f64,
    radius: f64,
    pitch: f64,
    strand_radius: f64,
    start_angle: f64,
    settings: &BuildSettings,
) -> Result<Mesh> {
    check_strand(length, strand_radius, settings)?;
    if about_eq(pitch, 0.0) {
        let offset = polar(radius, start_angle, 0.0).coords;
        return Ok(mesh_straight_strand(length, strand_radius, settings)?
            .transformed(&Matrix4::new_translation(&offset)));
    }

    #[allow(clippy::cast_precision_loss)]
    let rings_per_rev = settings.mesh_rings_per_revolution as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_rings = ((rings_per_rev * length * pitch.abs()).floor() as usize).max(1);
    let omega = TAU * pitch;

    let rings: Vec<Vec<Point3>> = (0..=n_rings)
        .map(|j| {
            #[allow(clippy::cast_precision_loss)]
            let z = length * j as f64 / n_rings as f64;
            let angle = start_angle + omega * z;
            let center = polar(radius, angle, z);
            let radial = Vector3::new(angle.cos(), angle.sin(), 0.0);
            let tangent =
                Vector3::new(-radius * omega * angle.sin(), radius * omega * angle.cos(), 1.0)
                    .normalize();
            let binormal = tangent.cross(&radial);
            circle_ring(
                center,
                radial,
                binormal,
                strand_radius,
                settings.mesh_points_per_ring,
            )
        })
        .collect();
    Ok(Mesh::from_rings(&rings, true))
}
