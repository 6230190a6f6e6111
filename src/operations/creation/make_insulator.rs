use tracing::{debug, trace};

use crate::error::{GeometryError, Result};
use crate::geometry::curve::make_line;
use crate::geometry::profile::{make_striped_tube_section, make_tube_section};
use crate::material::{InsulatorFinish, InsulatorMaterial, MaterialRequest};
use crate::math::{check_length, Point3};
use crate::operations::BuildContext;
use crate::scene::{Bevel, CurveId, ObjectId, ObjectKind};

/// Wall radii and finish of an insulator body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InsulatorBody {
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub material: InsulatorMaterial,
    pub finish: InsulatorFinish,
}

impl InsulatorBody {
    /// Bevels `guide` with the insulator wall.
    ///
    /// A plain finish gives a single `"Insulator"` object. A striped finish
    /// bevels the guide with the base wedges and parents a `"Stripe"` object
    /// sharing the guide's curve data, beveled with the stripe wedges.
    pub(crate) fn build(
        &self,
        ctx: &mut BuildContext<'_>,
        guide: CurveId,
        factor_start: f64,
    ) -> Result<ObjectId> {
        let bevel_with = |profile| {
            let bevel = Bevel::new(profile).with_factor_start(factor_start);
            ObjectKind::Curve {
                curve: guide,
                bevel: Some(bevel),
            }
        };

        match self.finish {
            InsulatorFinish::Plain(color) => {
                let profile = ctx
                    .scene
                    .add_profile(make_tube_section(self.outer_radius, self.inner_radius)?);
                let insulator = ctx.scene.add_object("Insulator", bevel_with(profile))?;
                ctx.assign_material(
                    insulator,
                    &MaterialRequest::Insulator {
                        material: self.material,
                        color,
                    },
                )?;
                Ok(insulator)
            }
            InsulatorFinish::Striped {
                base,
                stripe,
                amount,
                double_sided,
            } => {
                trace!(amount, double_sided, "striped insulator");
                let section = make_striped_tube_section(
                    self.outer_radius,
                    self.inner_radius,
                    amount,
                    double_sided,
                )?;
                let base_profile = ctx.scene.add_profile(section.base);
                let stripe_profile = ctx.scene.add_profile(section.stripe);

                let insulator = ctx.scene.add_object("Insulator", bevel_with(base_profile))?;
                ctx.assign_material(
                    insulator,
                    &MaterialRequest::Insulator {
                        material: self.material,
                        color: base,
                    },
                )?;
                let stripe_object = ctx.scene.add_object("Stripe", bevel_with(stripe_profile))?;
                ctx.assign_material(
                    stripe_object,
                    &MaterialRequest::Insulator {
                        material: self.material,
                        color: stripe,
                    },
                )?;
                ctx.scene.set_parent(stripe_object, Some(insulator))?;
                Ok(insulator)
            }
        }
    }
}

/// Creates an insulator: a tube wall swept down a straight guide from
/// `z = length` to `z = 0`, with `peel_length` left bare at the top.
pub struct MakeInsulator {
    inner_radius: f64,
    outer_radius: f64,
    length: f64,
    peel_length: f64,
    material: InsulatorMaterial,
    color: String,
}

impl MakeInsulator {
    /// Creates a new `MakeInsulator` operation.
    ///
    /// `color` names a plain insulator colour or a stripe pattern.
    #[must_use]
    pub fn new(
        inner_radius: f64,
        outer_radius: f64,
        length: f64,
        peel_length: f64,
        material: InsulatorMaterial,
        color: impl Into<String>,
    ) -> Self {
        Self {
            inner_radius,
            outer_radius,
            length,
            peel_length,
            material,
            color: color.into(),
        }
    }

    /// Executes the operation, returning the `"Insulator"` object.
    ///
    /// # Errors
    ///
    /// Returns an error if the colour is unknown, the length is zero, the
    /// peel length is outside `[0, length]`, or the radii do not describe a
    /// tube wall.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(
            inner_radius = self.inner_radius,
            outer_radius = self.outer_radius,
            length = self.length,
            peel_length = self.peel_length,
            color = %self.color,
            "insulator"
        );
        let finish = InsulatorFinish::resolve(&self.color)?;
        check_length(self.length)?;
        let factor_start = peel_factor(self.peel_length, self.length)?;

        let line = make_line(Point3::new(0.0, 0.0, self.length), Point3::origin(), 1)?;
        let guide = ctx.scene.add_curve(vec![line.into()]);
        InsulatorBody {
            outer_radius: self.outer_radius,
            inner_radius: self.inner_radius,
            material: self.material,
            finish,
        }
        .build(ctx, guide, factor_start)
    }
}

/// Fraction of a guide of `guide_length` covered by `peel_length`.
pub(crate) fn peel_factor(peel_length: f64, guide_length: f64) -> Result<f64> {
    let factor = peel_length / guide_length;
    if !(0.0..=1.0).contains(&factor) {
        return Err(GeometryError::ParameterOutOfRange {
            parameter: "peel_length",
            value: peel_length,
            min: 0.0,
            max: guide_length,
        }
        .into());
    }
    Ok(factor)
}
