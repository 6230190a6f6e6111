use tracing::{debug, info};

use super::guide::{array_guide, slot_angle};
use crate::error::{GeometryError, Result};
use crate::material::ConductorMaterial;
use crate::math::helical_length;
use crate::operations::creation::MakeMeshConductor;
use crate::operations::transform::CurveDeform;
use crate::operations::BuildContext;
use crate::scene::ObjectId;

/// Conductor half of a part array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductorParams {
    pub radius: f64,
    pub strand_radius: f64,
    pub strand_pitch: f64,
    pub material: ConductorMaterial,
}

/// Creates `count` mesh conductors twisted around the Z axis.
///
/// One conductor mesh, long enough to cover the helical guide, is bent
/// along the guide and shared by every slot. The first conductor is the
/// `"ConductorArray"` root; the others are rotated copies parented under it.
pub struct MakeConductorArray {
    length: f64,
    pitch: f64,
    radius: f64,
    clockwise: bool,
    conductor: ConductorParams,
    count: usize,
}

impl MakeConductorArray {
    /// Creates a new `MakeConductorArray` operation.
    #[must_use]
    pub fn new(
        length: f64,
        pitch: f64,
        radius: f64,
        clockwise: bool,
        conductor: ConductorParams,
        count: usize,
    ) -> Self {
        Self {
            length,
            pitch,
            radius,
            clockwise,
            conductor,
            count,
        }
    }

    /// Executes the operation, returning the array root.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero or the guide or conductor cannot
    /// be built.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(
            length = self.length,
            pitch = self.pitch,
            radius = self.radius,
            count = self.count,
            "conductor array"
        );
        if self.count == 0 {
            return Err(GeometryError::InvalidInput("array needs at least one part".into()).into());
        }
        let guide = array_guide(self.length, self.pitch, self.radius, self.clockwise, &ctx.settings)?;

        let first = MakeMeshConductor::new(
            helical_length(self.radius, self.pitch, self.length),
            self.conductor.radius,
            self.conductor.strand_radius,
            self.conductor.strand_pitch,
            self.conductor.material,
        )
        .execute(ctx)?;
        let mesh = ctx
            .scene
            .object(first)?
            .mesh()
            .ok_or_else(|| GeometryError::InvalidInput("conductor has no mesh".into()))?;

        let guide = ctx.scene.add_curve(vec![guide]);
        let deformed = CurveDeform::new(mesh, guide, ctx.settings.tessellation).execute(ctx.scene);
        ctx.scene.remove_curve(guide)?;
        deformed?;

        ctx.progress_begin(self.count);
        let copied = self.copy_into_slots(ctx, first);
        ctx.progress_end();
        copied?;

        ctx.scene.rename(first, "ConductorArray")?;
        info!(count = self.count, "conductor array complete");
        Ok(first)
    }

    fn copy_into_slots(&self, ctx: &mut BuildContext<'_>, first: ObjectId) -> Result<()> {
        ctx.progress_update(1);
        for i in 1..self.count {
            let copy = ctx.scene.link_copy(first, false)?;
            ctx.scene.rotate_z(copy, slot_angle(i, self.count))?;
            ctx.scene.set_parent(copy, Some(first))?;
            ctx.progress_update(i + 1);
        }
        Ok(())
    }
}
