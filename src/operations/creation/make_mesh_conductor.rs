use tracing::{debug, trace};

use crate::error::Result;
use crate::geometry::mesh::{mesh_straight_strand, mesh_twisted_strand, Mesh};
use crate::layout::pack_strands;
use crate::material::{ConductorMaterial, MaterialRequest};
use crate::math::transform::rotation_z;
use crate::math::{about_eq, check_length, TOLERANCE};
use crate::operations::BuildContext;
use crate::scene::{ObjectId, ObjectKind};

/// Creates a conductor as a single polygon mesh along +Z, from `z = 0` to
/// `z = length`.
///
/// Solid conductors are one capped cylinder. Stranded conductors use the
/// same ring packing as [`MakeConductor`](super::MakeConductor), with one
/// twisted strand per slot and a straight centre strand. All faces are
/// smooth.
pub struct MakeMeshConductor {
    length: f64,
    conductor_radius: f64,
    strand_radius: f64,
    strand_pitch: f64,
    material: ConductorMaterial,
}

impl MakeMeshConductor {
    /// Creates a new `MakeMeshConductor` operation.
    #[must_use]
    pub fn new(
        length: f64,
        conductor_radius: f64,
        strand_radius: f64,
        strand_pitch: f64,
        material: ConductorMaterial,
    ) -> Self {
        Self {
            length,
            conductor_radius,
            strand_radius,
            strand_pitch,
            material,
        }
    }

    /// Builds the conductor mesh without adding it to a scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is zero or the radii are invalid.
    pub fn mesh(&self, ctx: &BuildContext<'_>) -> Result<Mesh> {
        check_length(self.length)?;
        let solid = about_eq(self.strand_radius, 0.0)
            || (self.conductor_radius - self.strand_radius).abs() < TOLERANCE;

        let mut mesh = if solid {
            mesh_straight_strand(self.length, self.conductor_radius, &ctx.settings)?
        } else {
            let rings = pack_strands(self.conductor_radius - self.strand_radius, self.strand_radius)?;
            let mut mesh = Mesh::new();
            for ring in &rings {
                trace!(radius = ring.radius, strands = ring.len(), "mesh strand ring");
                if ring.is_centre() {
                    mesh.append(&mesh_straight_strand(
                        self.length,
                        self.strand_radius,
                        &ctx.settings,
                    )?);
                    continue;
                }
                // Every slot in a ring is the first strand turned about Z.
                let strand = mesh_twisted_strand(
                    self.length,
                    ring.radius,
                    self.strand_pitch,
                    self.strand_radius,
                    0.0,
                    &ctx.settings,
                )?;
                mesh.append(&strand);
                for i in 1..ring.len() {
                    #[allow(clippy::cast_precision_loss)]
                    let angle = ring.angular_step() * i as f64;
                    mesh.append(&strand.transformed(&rotation_z(angle)));
                }
            }
            mesh
        };
        mesh.set_smooth(true);
        Ok(mesh)
    }

    /// Executes the operation, returning the `"Conductor"` mesh object.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh cannot be built or the material cannot
    /// be resolved.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(
            length = self.length,
            conductor_radius = self.conductor_radius,
            strand_radius = self.strand_radius,
            strand_pitch = self.strand_pitch,
            "mesh conductor"
        );
        let mesh = self.mesh(ctx)?;
        let mesh = ctx.scene.add_mesh(mesh);
        let conductor = ctx.scene.add_object("Conductor", ObjectKind::Mesh(mesh))?;
        ctx.assign_material(conductor, &MaterialRequest::Conductor(self.material))?;
        Ok(conductor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::material::MaterialLibrary;
    use crate::math::transform::transform_point;
    use crate::scene::Scene;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    #[test]
    fn solid_mesh_conductor() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut ctx = BuildContext::new(&mut scene, &mut materials);
        let id = MakeMeshConductor::new(0.1, 0.5, 0.0, 2.0, ConductorMaterial::Copper)
            .execute(&mut ctx)
            .unwrap();
        let object = ctx.scene.object(id).unwrap();
        assert_eq!(object.name, "Conductor");
        let mesh = ctx.scene.mesh(object.mesh().unwrap()).unwrap();
        // floor(100 * 0.1) segments of 8-point rings.
        assert_eq!(mesh.vertices.len(), 11 * 8);
        assert!(mesh.faces.iter().all(|f| f.smooth));
    }

    #[test]
    fn stranded_mesh_conductor_packs_strands() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let ctx = BuildContext::new(&mut scene, &mut materials);
        // pack(2.5, 1.0): seven twisted strands and a straight centre one.
        let mesh = MakeMeshConductor::new(1.0, 3.5, 1.0, 1.0, ConductorMaterial::Copper)
            .mesh(&ctx)
            .unwrap();
        let ring = ctx.settings.mesh_points_per_ring;
        let twisted = 11 * ring;
        let straight = 101 * ring;
        assert_eq!(mesh.vertices.len(), 7 * twisted + straight);
        assert!(mesh.faces.iter().all(|f| f.smooth));
        for v in &mesh.vertices {
            assert!(v.x.hypot(v.y) <= 3.5 + 1e-9);
            assert!(v.z > -1.0 && v.z < 2.0);
        }
    }

    #[test]
    fn strand_slots_are_rotated_copies() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let ctx = BuildContext::new(&mut scene, &mut materials);
        let mesh = MakeMeshConductor::new(1.0, 3.5, 1.0, 1.0, ConductorMaterial::Copper)
            .mesh(&ctx)
            .unwrap();
        // The outer ring comes first: seven strands of eleven rings each.
        let per_strand = 11 * ctx.settings.mesh_points_per_ring;
        let step = TAU / 7.0;
        let first = &mesh.vertices[..per_strand];
        for i in 1..7_u32 {
            let rotation = rotation_z(step * f64::from(i));
            let start = i as usize * per_strand;
            let slot = &mesh.vertices[start..start + per_strand];
            for (a, b) in first.iter().zip(slot) {
                let expected = transform_point(&rotation, a);
                assert_relative_eq!(expected, *b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn rejects_zero_length() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let ctx = BuildContext::new(&mut scene, &mut materials);
        assert!(MakeMeshConductor::new(0.0, 1.0, 0.0, 1.0, ConductorMaterial::Copper)
            .mesh(&ctx)
            .unwrap_err()
            .is_invalid_input());
    }
}
