use crate::error::{GeometryError, Result};
use crate::scene::{CurveId, MeshId, Scene};
use crate::tessellation::{sweep_frame, tessellate_spline, TessellationParams};

/// Bends a mesh along a guide curve ("follow curve").
///
/// The mesh's +Z axis is the deform axis: a vertex at height `z` moves to
/// arc length `z` along the guide, and its X and Y offsets are laid out in
/// the guide's Z-up sweep frame there. Vertices past either end of the guide
/// continue along its end tangents.
pub struct CurveDeform {
    mesh: MeshId,
    guide: CurveId,
    params: TessellationParams,
}

impl CurveDeform {
    /// Creates a new `CurveDeform` operation.
    #[must_use]
    pub fn new(mesh: MeshId, guide: CurveId, params: TessellationParams) -> Self {
        Self {
            mesh,
            guide,
            params,
        }
    }

    /// Executes the deformation, modifying the mesh in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh or guide is missing, or the guide does
    /// not hold exactly one spline of at least two points.
    pub fn execute(&self, scene: &mut Scene) -> Result<()> {
        let guide = match scene.curve(self.guide)?.splines.as_slice() {
            [spline] => tessellate_spline(spline, self.params.bezier_resolution),
            splines => {
                return Err(GeometryError::InvalidInput(format!(
                    "a deform guide needs exactly one spline, got {}",
                    splines.len()
                ))
                .into())
            }
        };
        let Some(sampler) = guide.sampler() else {
            return Err(GeometryError::Degenerate("deform guide has a single point".into()).into());
        };

        let mesh = scene.mesh_mut(self.mesh)?;
        for vertex in &mut mesh.vertices {
            let Some((origin, tangent)) = sampler.sample(vertex.z) else {
                continue;
            };
            let (side, up) = sweep_frame(&tangent);
            *vertex = origin + side * vertex.x + up * vertex.y;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::BuildSettings;
    use crate::geometry::curve::{make_bezier_helix, make_line};
    use crate::geometry::mesh::mesh_straight_strand;
    use crate::math::{helical_length, Point3};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn straight_guide_moves_the_mesh() {
        let mut scene = Scene::new();
        let settings = BuildSettings::default();
        let mesh = scene.add_mesh(mesh_straight_strand(1.0, 0.1, &settings).unwrap());
        let guide = scene.add_curve(vec![make_line(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), 2)
            .unwrap()
            .into()]);
        CurveDeform::new(mesh, guide, TessellationParams::default())
            .execute(&mut scene)
            .unwrap();

        let mesh = scene.mesh(mesh).unwrap();
        // Along +X the side direction is +Y and up stays +Z.
        assert_relative_eq!(mesh.vertices[0], p(0.0, 0.1, 0.0), epsilon = 1e-12);
        for v in &mesh.vertices {
            assert!(v.x >= -1e-12 && v.x <= 1.0 + 1e-12);
            assert_relative_eq!(v.y.hypot(v.z), 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn helical_guide_keeps_the_strand_on_the_helix() {
        let mut scene = Scene::new();
        let settings = BuildSettings::default();
        let (length, pitch, radius) = (1.0, 0.5, 2.0);
        let strand = mesh_straight_strand(helical_length(radius, pitch, length), 0.05, &settings)
            .unwrap();
        let mesh = scene.add_mesh(strand);
        let guide = scene.add_curve(vec![make_bezier_helix(length, pitch, radius, true, 1).unwrap()]);
        CurveDeform::new(mesh, guide, TessellationParams::default())
            .execute(&mut scene)
            .unwrap();

        for v in &scene.mesh(mesh).unwrap().vertices {
            let r = v.x.hypot(v.y);
            assert!((r - radius).abs() < 0.05 + 1e-2, "radius {r}");
            assert!(v.z > -0.1 && v.z < length + 0.1, "height {}", v.z);
        }
    }

    #[test]
    fn rejects_multi_spline_guides() {
        let mut scene = Scene::new();
        let settings = BuildSettings::default();
        let mesh = scene.add_mesh(mesh_straight_strand(1.0, 0.1, &settings).unwrap());
        let line = make_line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), 2).unwrap();
        let guide = scene.add_curve(vec![line.clone().into(), line.into()]);
        assert!(CurveDeform::new(mesh, guide, TessellationParams::default())
            .execute(&mut scene)
            .unwrap_err()
            .is_invalid_input());
    }
}
