use tracing::{debug, info};

use crate::error::Result;
use crate::material::{ConductorMaterial, InsulatorMaterial};
use crate::operations::creation::{MakeInsulator, MakeMeshConductor};
use crate::operations::BuildContext;
use crate::scene::ObjectId;

/// Creates an insulated conductor: an insulator whose bore holds a mesh
/// conductor, parented under it.
pub struct MakePart {
    length: f64,
    insulator_radius: f64,
    insulator_color: String,
    insulator_material: InsulatorMaterial,
    peel_length: f64,
    conductor_radius: f64,
    conductor_material: ConductorMaterial,
    strand_radius: f64,
    strand_pitch: f64,
}

impl MakePart {
    /// Creates a new `MakePart` operation.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        length: f64,
        insulator_radius: f64,
        insulator_color: impl Into<String>,
        insulator_material: InsulatorMaterial,
        peel_length: f64,
        conductor_radius: f64,
        conductor_material: ConductorMaterial,
        strand_radius: f64,
        strand_pitch: f64,
    ) -> Self {
        Self {
            length,
            insulator_radius,
            insulator_color: insulator_color.into(),
            insulator_material,
            peel_length,
            conductor_radius,
            conductor_material,
            strand_radius,
            strand_pitch,
        }
    }

    /// Executes the operation, returning the `"Part"` object.
    ///
    /// # Errors
    ///
    /// Returns an error if the insulator or conductor cannot be built.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(
            length = self.length,
            insulator_radius = self.insulator_radius,
            conductor_radius = self.conductor_radius,
            color = %self.insulator_color,
            "part"
        );
        let insulator = MakeInsulator::new(
            self.conductor_radius,
            self.insulator_radius,
            self.length,
            self.peel_length,
            self.insulator_material,
            self.insulator_color.as_str(),
        )
        .execute(ctx)?;
        let conductor = MakeMeshConductor::new(
            self.length,
            self.conductor_radius,
            self.strand_radius,
            self.strand_pitch,
            self.conductor_material,
        )
        .execute(ctx)?;
        ctx.scene.set_parent(conductor, Some(insulator))?;
        ctx.scene.rename(insulator, "Part")?;
        info!(objects = ctx.scene.descendants(insulator)?.len() + 1, "part complete");
        Ok(insulator)
    }
}
