use tracing::debug;

use crate::error::{MaterialError, Result};
use crate::geometry::mesh::mesh_tube;
use crate::material::{insulator_color, InsulatorMaterial, MaterialRequest};
use crate::operations::BuildContext;
use crate::scene::{ObjectId, ObjectKind};

/// Creates a central filler: a plastic tube filling the space between the
/// cores of a multi-core cable, around an optional core of `core_radius`.
pub struct MakeCentralFiller {
    length: f64,
    radius: f64,
    core_radius: f64,
    material: InsulatorMaterial,
    color: String,
}

impl MakeCentralFiller {
    /// Creates a new `MakeCentralFiller` operation.
    #[must_use]
    pub fn new(
        length: f64,
        radius: f64,
        core_radius: f64,
        material: InsulatorMaterial,
        color: impl Into<String>,
    ) -> Self {
        Self {
            length,
            radius,
            core_radius,
            material,
            color: color.into(),
        }
    }

    /// Executes the operation, returning the `"CentralFiller"` mesh object.
    ///
    /// # Errors
    ///
    /// Returns an error if the colour is not a plain insulator colour or the
    /// radii do not describe a tube.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(
            length = self.length,
            radius = self.radius,
            core_radius = self.core_radius,
            color = %self.color,
            "central filler"
        );
        let color = insulator_color(&self.color)
            .ok_or_else(|| MaterialError::InvalidColor(self.color.clone()))?;
        let mesh = ctx
            .scene
            .add_mesh(mesh_tube(self.radius, self.core_radius, self.length)?);
        let filler = ctx.scene.add_object("CentralFiller", ObjectKind::Mesh(mesh))?;
        ctx.assign_material(
            filler,
            &MaterialRequest::Insulator {
                material: self.material,
                color,
            },
        )?;
        Ok(filler)
    }
}
