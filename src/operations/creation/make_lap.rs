use tracing::debug;

use crate::error::Result;
use crate::geometry::mesh::mesh_shell_tube;
use crate::material::{LapMaterial, MaterialRequest};
use crate::math::check_length;
use crate::operations::BuildContext;
use crate::scene::{ObjectId, ObjectKind};

/// Creates a lap: a zero-thickness tape tube wrapped around the core.
pub struct MakeLap {
    length: f64,
    radius: f64,
    material: LapMaterial,
}

impl MakeLap {
    /// Creates a new `MakeLap` operation.
    #[must_use]
    pub fn new(length: f64, radius: f64, material: LapMaterial) -> Self {
        Self {
            length,
            radius,
            material,
        }
    }

    /// Executes the operation, returning the `"Lap"` mesh object.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is zero or the radius is not positive.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(length = self.length, radius = self.radius, "lap");
        check_length(self.length)?;
        let mesh = mesh_shell_tube(self.length, self.radius, ctx.settings.shell_tube_points)?;
        let mesh = ctx.scene.add_mesh(mesh);
        let lap = ctx.scene.add_object("Lap", ObjectKind::Mesh(mesh))?;
        ctx.assign_material(lap, &MaterialRequest::Lap(self.material))?;
        Ok(lap)
    }
}
