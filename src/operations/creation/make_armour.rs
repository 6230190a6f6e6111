use std::f64::consts::TAU;

use tracing::{debug, info, trace};

use crate::error::{GeometryError, Result};
use crate::geometry::curve::make_bezier_helix;
use crate::material::{ConductorMaterial, MaterialRequest};
use crate::operations::BuildContext;
use crate::scene::{Bevel, ObjectId, ObjectKind};

use super::make_conductor::circle_profile;

/// Creates an armour wrap: `n_strands` wires laid side by side along one
/// helix, touching the outside of a cylinder of `radius`.
pub struct MakeArmour {
    length: f64,
    radius: f64,
    strand_radius: f64,
    n_strands: usize,
    pitch: f64,
    clockwise: bool,
    material: ConductorMaterial,
}

impl MakeArmour {
    /// Creates a new `MakeArmour` operation.
    #[must_use]
    pub fn new(
        length: f64,
        radius: f64,
        strand_radius: f64,
        n_strands: usize,
        pitch: f64,
        clockwise: bool,
        material: ConductorMaterial,
    ) -> Self {
        Self {
            length,
            radius,
            strand_radius,
            n_strands,
            pitch,
            clockwise,
            material,
        }
    }

    /// Executes the operation, returning the `"Armour"` group.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no strands, the strands do not fit
    /// inside `radius`, or the helix cannot be built.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(
            length = self.length,
            radius = self.radius,
            strand_radius = self.strand_radius,
            n_strands = self.n_strands,
            pitch = self.pitch,
            clockwise = self.clockwise,
            "armour"
        );
        if self.n_strands == 0 {
            return Err(GeometryError::InvalidInput("armour needs at least one strand".into()).into());
        }
        if self.strand_radius <= 0.0 || self.strand_radius >= self.radius {
            return Err(GeometryError::InvalidInput(format!(
                "strand radius {} does not fit armour radius {}",
                self.strand_radius, self.radius
            ))
            .into());
        }

        let helix = make_bezier_helix(
            self.length,
            self.pitch,
            self.radius - self.strand_radius,
            self.clockwise,
            ctx.settings.helix_subdivisions,
        )?;
        let profile = circle_profile(ctx, self.strand_radius)?;
        let curve = ctx.scene.add_curve(vec![helix]);
        let first = ctx.scene.add_object(
            "ArmourStrand",
            ObjectKind::Curve {
                curve,
                bevel: Some(Bevel::new(profile)),
            },
        )?;

        let armour = ctx.scene.add_group("Armour");
        #[allow(clippy::cast_precision_loss)]
        let dtheta = TAU / self.n_strands as f64;
        for i in 0..self.n_strands {
            let strand = if i == 0 {
                first
            } else {
                ctx.scene.link_copy(first, false)?
            };
            #[allow(clippy::cast_precision_loss)]
            let angle = dtheta * i as f64;
            ctx.scene.rotate_z(strand, angle)?;
            ctx.scene.set_parent(strand, Some(armour))?;
            trace!(angle, "armour strand");
        }
        ctx.assign_material(armour, &MaterialRequest::Conductor(self.material))?;
        info!(strands = self.n_strands, "armour complete");
        Ok(armour)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::material::MaterialLibrary;
    use crate::scene::Scene;
    use approx::assert_relative_eq;

    #[test]
    fn strands_share_one_helix() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut ctx = BuildContext::new(&mut scene, &mut materials);
        let armour = MakeArmour::new(0.25, 0.005, 0.0004, 10, 3.5, false, ConductorMaterial::IronZinc)
            .execute(&mut ctx)
            .unwrap();

        assert_eq!(ctx.scene.object(armour).unwrap().name, "Armour");
        let strands = ctx.scene.children(armour).unwrap().to_vec();
        assert_eq!(strands.len(), 10);
        let curve = ctx.scene.object(strands[0]).unwrap().curve();
        assert!(strands
            .iter()
            .all(|s| ctx.scene.object(*s).unwrap().curve() == curve));

        let helix = ctx.scene.curve(curve.unwrap()).unwrap();
        for p in helix.splines[0].control_points() {
            assert_relative_eq!(p.x.hypot(p.y), 0.0046, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_oversized_strands() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut ctx = BuildContext::new(&mut scene, &mut materials);
        let err = MakeArmour::new(1.0, 0.5, 0.5, 4, 1.0, true, ConductorMaterial::Iron)
            .execute(&mut ctx)
            .unwrap_err();
        assert!(err.is_invalid_input());
        let err = MakeArmour::new(1.0, 1.0, 0.1, 0, 1.0, true, ConductorMaterial::Iron)
            .execute(&mut ctx)
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
