use tracing::{debug, info, trace};

use crate::error::Result;
use crate::geometry::curve::{line_point_count, make_bezier_circle, make_bezier_helix, make_line};
use crate::geometry::profile::Profile;
use crate::layout::{pack_strands, strand_count, StrandRing};
use crate::material::{ConductorMaterial, MaterialRequest};
use crate::math::{about_eq, check_length, Point3, TOLERANCE};
use crate::operations::BuildContext;
use crate::scene::{Bevel, ObjectId, ObjectKind, ProfileId};

/// Adds a straight strand along +Z beveled by `profile`.
pub(crate) fn straight_strand(
    ctx: &mut BuildContext<'_>,
    name: &str,
    length: f64,
    profile: ProfileId,
) -> Result<ObjectId> {
    let n = line_point_count(length, ctx.settings.line_points_per_unit).max(2);
    let line = make_line(Point3::origin(), Point3::new(0.0, 0.0, length), n)?;
    let curve = ctx.scene.add_curve(vec![line.into()]);
    Ok(ctx.scene.add_object(
        name,
        ObjectKind::Curve {
            curve,
            bevel: Some(Bevel::new(profile)),
        },
    )?)
}

/// Adds a round profile of `radius` to the scene.
pub(crate) fn circle_profile(ctx: &mut BuildContext<'_>, radius: f64) -> Result<ProfileId> {
    let profile = Profile::new(vec![make_bezier_circle(radius)?])?;
    Ok(ctx.scene.add_profile(profile))
}

/// Creates a solid conductor: a circle swept along the Z axis.
pub struct MakeSolidConductor {
    length: f64,
    radius: f64,
}

impl MakeSolidConductor {
    /// Creates a new `MakeSolidConductor` operation.
    #[must_use]
    pub fn new(length: f64, radius: f64) -> Self {
        Self { length, radius }
    }

    /// Executes the operation, returning the `"Conductor"` curve object.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is zero or the radius is not positive.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(length = self.length, radius = self.radius, "solid conductor");
        check_length(self.length)?;
        let profile = circle_profile(ctx, self.radius)?;
        straight_strand(ctx, "Conductor", self.length, profile)
    }
}

/// Creates a stranded conductor: rings of helical strands around the axis.
///
/// The first strand of every ring owns its helix; its siblings link the same
/// curve data and differ only by rotation about Z. All strands share one
/// circular bevel profile and hang under a `"Conductor"` group.
pub struct MakeStrandedConductor {
    length: f64,
    conductor_radius: f64,
    pitch: f64,
    strand_radius: f64,
}

impl MakeStrandedConductor {
    /// Creates a new `MakeStrandedConductor` operation.
    #[must_use]
    pub fn new(length: f64, conductor_radius: f64, pitch: f64, strand_radius: f64) -> Self {
        Self {
            length,
            conductor_radius,
            pitch,
            strand_radius,
        }
    }

    /// Executes the operation, returning the `"Conductor"` group.
    ///
    /// Reports one progress step per strand.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is zero, the radii leave no room for a
    /// strand, or a strand helix is shorter than one segment.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(
            length = self.length,
            conductor_radius = self.conductor_radius,
            pitch = self.pitch,
            strand_radius = self.strand_radius,
            "stranded conductor"
        );
        check_length(self.length)?;
        let rings = pack_strands(self.conductor_radius - self.strand_radius, self.strand_radius)?;

        ctx.progress_begin(strand_count(&rings));
        let result = self.build(ctx, &rings);
        ctx.progress_end();
        result
    }

    fn build(&self, ctx: &mut BuildContext<'_>, rings: &[StrandRing]) -> Result<ObjectId> {
        let profile = circle_profile(ctx, self.strand_radius)?;
        let group = ctx.scene.add_group("Conductor");
        let mut done = 0;

        for ring in rings {
            trace!(radius = ring.radius, strands = ring.len(), "strand ring");
            if ring.is_centre() {
                let strand = straight_strand(ctx, "Strand", self.length, profile)?;
                ctx.scene.set_parent(strand, Some(group))?;
                done += 1;
                ctx.progress_update(done);
                continue;
            }

            let spline = if about_eq(self.pitch, 0.0) {
                let n = line_point_count(self.length, ctx.settings.line_points_per_unit).max(2);
                make_line(
                    Point3::new(ring.radius, 0.0, 0.0),
                    Point3::new(ring.radius, 0.0, self.length),
                    n,
                )?
                .into()
            } else {
                make_bezier_helix(
                    self.length,
                    self.pitch,
                    ring.radius,
                    true,
                    ctx.settings.helix_subdivisions,
                )?
            };
            let curve = ctx.scene.add_curve(vec![spline]);
            let first = ctx.scene.add_object(
                "Strand",
                ObjectKind::Curve {
                    curve,
                    bevel: Some(Bevel::new(profile)),
                },
            )?;

            for i in 0..ring.len() {
                let strand = if i == 0 {
                    first
                } else {
                    ctx.scene.link_copy(first, false)?
                };
                #[allow(clippy::cast_precision_loss)]
                let angle = ring.angular_step() * i as f64;
                ctx.scene.rotate_z(strand, angle)?;
                ctx.scene.set_parent(strand, Some(group))?;
                trace!(angle, "strand");
                done += 1;
                ctx.progress_update(done);
            }
        }

        info!(strands = done, "stranded conductor complete");
        Ok(group)
    }
}

/// Creates a conductor of the given material, solid or stranded.
///
/// A strand radius of zero, or one equal to the conductor radius, gives a
/// solid conductor.
pub struct MakeConductor {
    length: f64,
    conductor_radius: f64,
    strand_radius: f64,
    strand_pitch: f64,
    material: ConductorMaterial,
}

impl MakeConductor {
    /// Creates a new `MakeConductor` operation.
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

    /// Whether the parameters describe a solid conductor.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        about_eq(self.strand_radius, 0.0)
            || (self.conductor_radius - self.strand_radius).abs() < TOLERANCE
    }

    /// Executes the operation, returning the conductor object.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or stranded builder fails, or the
    /// material cannot be resolved.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        let conductor = if self.is_solid() {
            MakeSolidConductor::new(self.length, self.conductor_radius).execute(ctx)?
        } else {
            MakeStrandedConductor::new(
                self.length,
                self.conductor_radius,
                self.strand_pitch,
                self.strand_radius,
            )
            .execute(ctx)?
        };
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
    use crate::progress::ProgressLog;
    use crate::scene::Scene;
    use crate::tessellation::TessellationParams;
    use approx::assert_relative_eq;

    #[test]
    fn solid_conductor_is_a_beveled_axis() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut ctx = BuildContext::new(&mut scene, &mut materials);
        let id = MakeSolidConductor::new(0.5, 0.1).execute(&mut ctx).unwrap();

        let object = ctx.scene.object(id).unwrap();
        assert_eq!(object.name, "Conductor");
        let curve = ctx.scene.curve(object.curve().unwrap()).unwrap();
        // floor(200 * 0.5) points.
        assert_eq!(curve.point_count(), 100);
        let bevel = object.bevel().unwrap();
        assert!(bevel.fill_caps);
        assert_eq!(ctx.scene.profile(bevel.profile).unwrap().splines().len(), 1);
    }

    #[test]
    fn equal_radii_build_a_solid_conductor() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut ctx = BuildContext::new(&mut scene, &mut materials);
        let solid = MakeSolidConductor::new(1.0, 0.4).execute(&mut ctx).unwrap();
        let via = MakeConductor::new(1.0, 0.4, 0.4, 5.0, ConductorMaterial::Copper)
            .execute(&mut ctx)
            .unwrap();

        let (a, b) = (ctx.scene.object(solid).unwrap(), ctx.scene.object(via).unwrap());
        assert_eq!(a.name, b.name);
        assert!(a.children().is_empty() && b.children().is_empty());
        assert_eq!(
            ctx.scene.curve(a.curve().unwrap()).unwrap(),
            ctx.scene.curve(b.curve().unwrap()).unwrap()
        );
        assert_eq!(
            ctx.scene.profile(a.bevel().unwrap().profile).unwrap(),
            ctx.scene.profile(b.bevel().unwrap().profile).unwrap()
        );
        assert!(ctx.scene.material_of(via).unwrap().is_some());
    }

    #[test]
    fn stranded_conductor_follows_the_packing() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut log = ProgressLog::default();
        let mut ctx = BuildContext::new(&mut scene, &mut materials).with_progress(&mut log);
        // pack(2.5, 1.0) gives a ring of 7 and a centre strand.
        let id = MakeConductor::new(1.0, 3.5, 1.0, 1.0, ConductorMaterial::Aluminium)
            .execute(&mut ctx)
            .unwrap();

        let strands = ctx.scene.children(id).unwrap().to_vec();
        assert_eq!(strands.len(), 8);
        let first_curve = ctx.scene.object(strands[0]).unwrap().curve().unwrap();
        for &strand in &strands[..7] {
            let object = ctx.scene.object(strand).unwrap();
            assert_eq!(object.curve(), Some(first_curve));
            assert_eq!(ctx.scene.material_of(strand).unwrap(), ctx.scene.material_of(id).unwrap());
        }
        // The seventh strand sits six steps around the ring.
        let world = ctx.scene.world_transform(strands[6]).unwrap();
        let top = transform_point(&world, &Point3::new(2.5, 0.0, 1.0));
        let angle = std::f64::consts::TAU * 6.0 / 7.0;
        assert_relative_eq!(top, Point3::new(2.5 * angle.cos(), 2.5 * angle.sin(), 1.0), epsilon = 1e-12);

        let centre = ctx.scene.object(strands[7]).unwrap();
        assert_ne!(centre.curve(), Some(first_curve));
        assert_eq!(log.total, 8);
        assert_eq!(log.updates, (1..=8).collect::<Vec<_>>());
        assert!(log.finished);
    }

    #[test]
    fn untwisted_strands_are_straight_lines() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut ctx = BuildContext::new(&mut scene, &mut materials);
        let id = MakeStrandedConductor::new(0.1, 3.5, 0.0, 1.0).execute(&mut ctx).unwrap();
        let first = ctx.scene.children(id).unwrap()[0];
        let curve = ctx.scene.curve(ctx.scene.object(first).unwrap().curve().unwrap()).unwrap();
        let points = curve.splines[0].control_points();
        assert_eq!(points.len(), 20);
        assert_relative_eq!(points[0], Point3::new(2.5, 0.0, 0.0));
        assert_relative_eq!(points[19], Point3::new(2.5, 0.0, 0.1), epsilon = 1e-12);
    }

    #[test]
    fn stranded_conductor_tessellates() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut ctx = BuildContext::new(&mut scene, &mut materials);
        let id = MakeStrandedConductor::new(1.0, 3.5, 0.5, 1.0).execute(&mut ctx).unwrap();
        let mesh = ctx.scene.to_mesh(id, TessellationParams::default()).unwrap();
        assert!(!mesh.is_empty());
        for v in &mesh.vertices {
            assert!(v.x.hypot(v.y) < 3.5 + 1e-2);
        }
    }

    #[test]
    fn rejects_bad_input() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut ctx = BuildContext::new(&mut scene, &mut materials);
        assert!(MakeSolidConductor::new(0.0, 1.0)
            .execute(&mut ctx)
            .unwrap_err()
            .is_invalid_input());
        assert!(MakeSolidConductor::new(1.0, 0.0)
            .execute(&mut ctx)
            .unwrap_err()
            .is_invalid_input());
        assert!(MakeStrandedConductor::new(1.0, 0.5, 1.0, 1.0)
            .execute(&mut ctx)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn rejects_negative_lengths() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut ctx = BuildContext::new(&mut scene, &mut materials);
        assert!(MakeSolidConductor::new(-1.0, 0.1)
            .execute(&mut ctx)
            .unwrap_err()
            .is_invalid_input());
        assert!(MakeStrandedConductor::new(-1.0, 3.5, 1.0, 1.0)
            .execute(&mut ctx)
            .unwrap_err()
            .is_invalid_input());
        assert!(MakeConductor::new(-1.0, 3.5, 1.0, 1.0, ConductorMaterial::Copper)
            .execute(&mut ctx)
            .unwrap_err()
            .is_invalid_input());
        assert_eq!(ctx.scene.object_count(), 0);
    }
}
