use tracing::{debug, info, trace};

use super::guide::{array_guide, slot_angle};
use crate::error::{GeometryError, Result};
use crate::material::{InsulatorFinish, InsulatorMaterial};
use crate::math::helical_length;
use crate::operations::creation::{peel_factor, InsulatorBody};
use crate::operations::BuildContext;
use crate::scene::{CurveId, ObjectId};

/// Insulator half of a part array. One part is made per colour name.
#[derive(Debug, Clone, PartialEq)]
pub struct InsulatorParams {
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub material: InsulatorMaterial,
    pub colors: Vec<String>,
    pub peel_length: f64,
}

impl InsulatorParams {
    /// Splits a whitespace-separated colour list such as `"brown black grey"`.
    #[must_use]
    pub fn with_color_list(mut self, colors: &str) -> Self {
        self.colors = colors.split_whitespace().map(str::to_string).collect();
        self
    }

    /// Resolves every colour name, in order.
    pub(crate) fn finishes(&self) -> Result<Vec<InsulatorFinish>> {
        if self.colors.is_empty() {
            return Err(GeometryError::InvalidInput("array needs at least one colour".into()).into());
        }
        self.colors.iter().map(|c| InsulatorFinish::resolve(c)).collect()
    }
}

/// Creates one insulator per colour, twisted around the Z axis on a shared
/// guide.
///
/// Every insulator bevels the same guide curve and is peeled back by
/// `peel_length` measured along the guide. The first insulator is the
/// `"InsulatorArray"` root; the others are rotated into their slots and
/// parented under it.
pub struct MakeInsulatorArray {
    length: f64,
    pitch: f64,
    radius: f64,
    clockwise: bool,
    insulator: InsulatorParams,
}

impl MakeInsulatorArray {
    /// Creates a new `MakeInsulatorArray` operation.
    #[must_use]
    pub fn new(
        length: f64,
        pitch: f64,
        radius: f64,
        clockwise: bool,
        insulator: InsulatorParams,
    ) -> Self {
        Self {
            length,
            pitch,
            radius,
            clockwise,
            insulator,
        }
    }

    /// Executes the operation, returning the array root.
    ///
    /// # Errors
    ///
    /// Returns an error if any colour is unknown or the list is empty, the
    /// peel is longer than the guide, or the guide or walls cannot be built.
    /// Colours are checked before the scene is touched.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(
            length = self.length,
            pitch = self.pitch,
            radius = self.radius,
            colors = ?self.insulator.colors,
            "insulator array"
        );
        let finishes = self.insulator.finishes()?;
        let factor_start = peel_factor(
            self.insulator.peel_length,
            helical_length(self.radius, self.pitch, self.length),
        )?;
        let guide = array_guide(self.length, self.pitch, self.radius, self.clockwise, &ctx.settings)?;
        let guide = ctx.scene.add_curve(vec![guide]);

        let count = finishes.len();
        ctx.progress_begin(count);
        let built = self.build(ctx, guide, finishes, factor_start);
        ctx.progress_end();
        let root = built?;

        ctx.scene.rename(root, "InsulatorArray")?;
        info!(count, "insulator array complete");
        Ok(root)
    }

    fn build(
        &self,
        ctx: &mut BuildContext<'_>,
        guide: CurveId,
        finishes: Vec<InsulatorFinish>,
        factor_start: f64,
    ) -> Result<ObjectId> {
        let count = finishes.len();
        let mut root = None;
        for (i, finish) in finishes.into_iter().enumerate() {
            trace!(slot = i, color = %self.insulator.colors[i], "insulator array slot");
            let body = InsulatorBody {
                outer_radius: self.insulator.outer_radius,
                inner_radius: self.insulator.inner_radius,
                material: self.insulator.material,
                finish,
            }
            .build(ctx, guide, factor_start)?;
            match root {
                None => root = Some(body),
                Some(first) => {
                    ctx.scene.rotate_z(body, slot_angle(i, count))?;
                    ctx.scene.set_parent(body, Some(first))?;
                }
            }
            ctx.progress_update(i + 1);
        }
        root.ok_or_else(|| GeometryError::InvalidInput("array is empty".into()).into())
    }
}
