use tracing::{debug, info};

use super::{ConductorParams, InsulatorParams, MakeConductorArray, MakeInsulatorArray};
use crate::error::Result;
use crate::math::helical_length;
use crate::operations::creation::peel_factor;
use crate::operations::BuildContext;
use crate::scene::ObjectId;

/// Creates insulated conductors twisted around the Z axis, one per colour
/// in the insulator parameters.
///
/// The conductor array is parented under the insulator array, which
/// becomes the `"PartArray"` root. Both arrays put part `i` at angle
/// `2 * pi * i / n`, so every conductor runs inside its insulator.
pub struct MakePartArray {
    length: f64,
    pitch: f64,
    radius: f64,
    clockwise: bool,
    insulator: InsulatorParams,
    conductor: ConductorParams,
}

impl MakePartArray {
    /// Creates a new `MakePartArray` operation.
    #[must_use]
    pub fn new(
        length: f64,
        pitch: f64,
        radius: f64,
        clockwise: bool,
        insulator: InsulatorParams,
        conductor: ConductorParams,
    ) -> Self {
        Self {
            length,
            pitch,
            radius,
            clockwise,
            insulator,
            conductor,
        }
    }

    /// Executes the operation, returning the `"PartArray"` root.
    ///
    /// # Errors
    ///
    /// Returns an error if a colour is unknown or the peel is longer than
    /// the guide (both before anything is built), or either array cannot be
    /// built.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        let count = self.insulator.finishes()?.len();
        peel_factor(
            self.insulator.peel_length,
            helical_length(self.radius, self.pitch, self.length),
        )?;
        debug!(
            length = self.length,
            pitch = self.pitch,
            radius = self.radius,
            count,
            "part array"
        );

        let conductors = MakeConductorArray::new(
            self.length,
            self.pitch,
            self.radius,
            self.clockwise,
            self.conductor,
            count,
        )
        .execute(ctx)?;
        let insulators = MakeInsulatorArray::new(
            self.length,
            self.pitch,
            self.radius,
            self.clockwise,
            self.insulator.clone(),
        )
        .execute(ctx)?;

        ctx.scene.set_parent(conductors, Some(insulators))?;
        ctx.scene.rename(insulators, "PartArray")?;
        info!(count, "part array complete");
        Ok(insulators)
    }
}
