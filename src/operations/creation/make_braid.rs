use std::f64::consts::TAU;

use tracing::{debug, info, trace};

use crate::error::{GeometryError, Result};
use crate::geometry::curve::{BezierPoint, BezierSpline};
use crate::material::{ConductorMaterial, MaterialRequest};
use crate::math::bezier::{polar, ArcHandle};
use crate::math::{check_length, Point3};
use crate::operations::BuildContext;
use crate::scene::{Bevel, ObjectId, ObjectKind};

use super::make_conductor::circle_profile;

/// Radial excursion of a braid strand, in strand radii.
const WEAVE_OFFSET: f64 = 1.1;

/// Radial offset of a braid strand at weave `phase` (0..8).
///
/// Phases 0 to 2 lift the strand over its crossing neighbours, 4 to 6 push
/// it under them, 3 and 7 are the crossings themselves.
fn weave_offset(phase: usize, strand_radius: f64) -> f64 {
    match phase {
        0..=2 => strand_radius * WEAVE_OFFSET,
        4..=6 => -strand_radius * WEAVE_OFFSET,
        _ => 0.0,
    }
}

/// Builds one strand of a braid: a helix rising from `z = 0` to
/// `z = length` whose radius weaves in and out every eighth of a
/// crossing cycle.
///
/// # Errors
///
/// Returns an error if the length or radius is zero, `points_per_rev` is
/// zero, or the strand is shorter than one segment.
pub fn make_braid_strand(
    length: f64,
    radius: f64,
    pitch: f64,
    points_per_rev: usize,
    strand_radius: f64,
    clockwise: bool,
) -> Result<BezierSpline> {
    check_length(length)?;
    if radius <= 0.0 {
        return Err(GeometryError::InvalidInput(format!("invalid braid radius {radius}")).into());
    }
    if points_per_rev == 0 {
        return Err(GeometryError::InvalidInput("no points per revolution".into()).into());
    }

    #[allow(clippy::cast_precision_loss)]
    let ppr = points_per_rev as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_points = (ppr * pitch.abs() * length).floor() as usize;
    if n_points == 0 {
        return Err(GeometryError::InvalidInput(format!(
            "braid strand of length {length} and pitch {pitch} is shorter than one segment"
        ))
        .into());
    }

    let mut dtheta = TAU / ppr;
    if !clockwise {
        dtheta = -dtheta;
    }
    let handle = ArcHandle::for_arc(dtheta.abs(), radius);
    let dz = handle.angle / (TAU * pitch);

    let mut phase = if clockwise { 1 } else { 5 };
    let points = (0..=n_points)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let (i, n) = (i as f64, n_points as f64);
            let z = length * (i / n);
            let offset = weave_offset(phase, strand_radius);
            phase = (phase + 1) % 8;

            let angle = dtheta * i;
            let co = polar(radius + offset, angle, z);
            let behind = polar(handle.radius + offset, angle - handle.angle, 0.0);
            let ahead = polar(handle.radius + offset, angle + handle.angle, 0.0);
            let (left, right) = if clockwise {
                (Point3::new(behind.x, behind.y, z - dz), Point3::new(ahead.x, ahead.y, z + dz))
            } else {
                (Point3::new(ahead.x, ahead.y, z - dz), Point3::new(behind.x, behind.y, z + dz))
            };
            BezierPoint::new(co, left, right)
        })
        .collect();
    BezierSpline::new(points, false)
}

/// Creates a braided shield: `n_bundle_pairs` clockwise and as many
/// counter-clockwise bundles of `bundle_size` strands weaving over and
/// under each other around a tube of `radius`.
pub struct MakeBraid {
    length: f64,
    radius: f64,
    bundle_size: usize,
    n_bundle_pairs: usize,
    pitch: f64,
    strand_radius: f64,
    material: ConductorMaterial,
}

impl MakeBraid {
    /// Creates a new `MakeBraid` operation.
    #[must_use]
    pub fn new(
        length: f64,
        radius: f64,
        bundle_size: usize,
        n_bundle_pairs: usize,
        pitch: f64,
        strand_radius: f64,
        material: ConductorMaterial,
    ) -> Self {
        Self {
            length,
            radius,
            bundle_size,
            n_bundle_pairs,
            pitch,
            strand_radius,
            material,
        }
    }

    /// Executes the operation, returning the `"Braid"` group.
    ///
    /// The braid holds `bundle_size` layers, each a copy of the first layer
    /// rotated by one strand width. Reports one progress step per bundle
    /// direction pair and one per layer.
    ///
    /// # Errors
    ///
    /// Returns an error if a count is zero, a radius is not positive, or a
    /// strand is shorter than one segment.
    pub fn execute(&self, ctx: &mut BuildContext<'_>) -> Result<ObjectId> {
        debug!(
            length = self.length,
            radius = self.radius,
            bundle_size = self.bundle_size,
            n_bundle_pairs = self.n_bundle_pairs,
            pitch = self.pitch,
            strand_radius = self.strand_radius,
            "braid"
        );
        if self.bundle_size == 0 || self.n_bundle_pairs == 0 {
            return Err(GeometryError::InvalidInput(
                "a braid needs at least one bundle pair of one strand".into(),
            )
            .into());
        }

        let n_bundles = self.n_bundle_pairs * 2;
        ctx.progress_begin(n_bundles + self.bundle_size);
        let result = self.build(ctx, n_bundles);
        ctx.progress_end();
        result
    }

    fn build(&self, ctx: &mut BuildContext<'_>, n_bundles: usize) -> Result<ObjectId> {
        let points_per_rev = n_bundles * 4;
        let cw = make_braid_strand(
            self.length,
            self.radius,
            self.pitch,
            points_per_rev,
            self.strand_radius,
            true,
        )?;
        let ccw = make_braid_strand(
            self.length,
            self.radius,
            self.pitch,
            points_per_rev,
            self.strand_radius,
            false,
        )?;
        let profile = circle_profile(ctx, self.strand_radius)?;
        let strand_kind = |curve| ObjectKind::Curve {
            curve,
            bevel: Some(Bevel::new(profile)),
        };
        let cw_curve = ctx.scene.add_curve(vec![cw.into()]);
        let ccw_curve = ctx.scene.add_curve(vec![ccw.into()]);

        #[allow(clippy::cast_precision_loss)]
        let dtheta = TAU / n_bundles as f64;
        let strand_dtheta = 2.0 * self.strand_radius / self.radius;

        let braid = ctx.scene.add_group("Braid");
        let layer = ctx.scene.add_group("BraidLayer");
        let mut progress = 0;
        for i in 0..n_bundles {
            #[allow(clippy::cast_precision_loss)]
            let theta = dtheta * i as f64;
            let cw_strand = ctx.scene.add_object("BraidStrand", strand_kind(cw_curve))?;
            ctx.scene.rotate_z(cw_strand, theta)?;
            ctx.scene.set_parent(cw_strand, Some(layer))?;
            let ccw_strand = ctx.scene.add_object("BraidStrand", strand_kind(ccw_curve))?;
            ctx.scene.rotate_z(ccw_strand, theta + dtheta / 2.0)?;
            ctx.scene.set_parent(ccw_strand, Some(layer))?;
            trace!(theta, "braid bundle");
            progress += 1;
            ctx.progress_update(progress);
        }

        for i in 0..self.bundle_size {
            let copy = if i == 0 {
                layer
            } else {
                ctx.scene.link_copy(layer, true)?
            };
            #[allow(clippy::cast_precision_loss)]
            let angle = strand_dtheta * i as f64;
            ctx.scene.rotate_z(copy, angle)?;
            ctx.scene.set_parent(copy, Some(braid))?;
            trace!(angle, "braid layer");
            progress += 1;
            ctx.progress_update(progress);
        }

        ctx.assign_material(braid, &MaterialRequest::Conductor(self.material))?;
        info!(
            strands = n_bundles * 2 * self.bundle_size,
            "braid complete"
        );
        Ok(braid)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::material::MaterialLibrary;
    use crate::progress::ProgressLog;
    use crate::scene::Scene;
    use approx::assert_relative_eq;

    #[test]
    fn weave_cycle() {
        let offsets: Vec<f64> = (0..8).map(|phase| weave_offset(phase, 1.0)).collect();
        assert_eq!(offsets, vec![1.1, 1.1, 1.1, 0.0, -1.1, -1.1, -1.1, 0.0]);
    }

    #[test]
    fn strand_rises_and_weaves() {
        // 8 points per revolution over 2 revolutions.
        let strand = make_braid_strand(2.0, 1.0, 1.0, 8, 0.1, true).unwrap();
        let points = strand.points();
        assert_eq!(points.len(), 17);
        assert_relative_eq!(points[0].co.z, 0.0);
        assert_relative_eq!(points[16].co.z, 2.0);
        let radii: Vec<f64> = points.iter().map(|p| p.co.x.hypot(p.co.y)).collect();
        // Clockwise strands start one phase into the cycle.
        assert_relative_eq!(radii[0], 1.11, epsilon = 1e-12);
        assert_relative_eq!(radii[2], 1.0, epsilon = 1e-12);
        assert_relative_eq!(radii[3], 0.89, epsilon = 1e-12);
        assert_relative_eq!(radii[6], 1.0, epsilon = 1e-12);
        assert_relative_eq!(radii[7], 1.11, epsilon = 1e-12);
    }

    #[test]
    fn strand_directions_mirror() {
        let cw = make_braid_strand(1.0, 1.0, 1.0, 8, 0.1, true).unwrap();
        let ccw = make_braid_strand(1.0, 1.0, 1.0, 8, 0.1, false).unwrap();
        // Counter-clockwise starts four phases later: opposite radial offset.
        let (a, b) = (cw.points()[1].co, ccw.points()[1].co);
        assert_relative_eq!(a.x.hypot(a.y), 1.11, epsilon = 1e-12);
        assert_relative_eq!(b.x.hypot(b.y), 0.89, epsilon = 1e-12);
        assert!(a.y > 0.0 && b.y < 0.0);
    }

    #[test]
    fn handles_follow_the_strand() {
        let strand = make_braid_strand(1.0, 1.0, 1.0, 16, 0.05, false).unwrap();
        for p in strand.points() {
            assert!(p.handle_right.z > p.co.z && p.handle_left.z < p.co.z);
        }
    }

    #[test]
    fn braid_layers_and_progress() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut log = ProgressLog::default();
        let mut ctx = BuildContext::new(&mut scene, &mut materials).with_progress(&mut log);
        let braid = MakeBraid::new(0.5, 2.0, 3, 4, 1.0, 0.05, ConductorMaterial::TinnedCopper)
            .execute(&mut ctx)
            .unwrap();

        assert_eq!(ctx.scene.object(braid).unwrap().name, "Braid");
        let layers = ctx.scene.children(braid).unwrap().to_vec();
        assert_eq!(layers.len(), 3);
        for layer in &layers {
            assert_eq!(ctx.scene.children(*layer).unwrap().len(), 16);
        }
        // Layers are rotated by whole strand widths.
        let m = ctx.scene.object(layers[2]).unwrap().transform;
        assert_relative_eq!(m[(1, 0)].atan2(m[(0, 0)]), 2.0 * 0.05, epsilon = 1e-12);
        assert!(ctx.scene.material_of(ctx.scene.descendants(braid).unwrap()[5]).unwrap().is_some());

        assert_eq!(log.total, 8 + 3);
        assert_eq!(log.updates.len(), 11);
        assert!(log.finished);
    }

    #[test]
    fn rejects_empty_braids() {
        let mut scene = Scene::new();
        let mut materials = MaterialLibrary::new();
        let mut ctx = BuildContext::new(&mut scene, &mut materials);
        assert!(MakeBraid::new(1.0, 1.0, 0, 2, 1.0, 0.05, ConductorMaterial::Copper)
            .execute(&mut ctx)
            .unwrap_err()
            .is_invalid_input());
        assert!(MakeBraid::new(1.0, 1.0, 2, 2, 0.0, 0.05, ConductorMaterial::Copper)
            .execute(&mut ctx)
            .unwrap_err()
            .is_invalid_input());
        assert!(MakeBraid::new(-1.0, 1.0, 2, 2, 1.0, 0.05, ConductorMaterial::Copper)
            .execute(&mut ctx)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn braid_strand_rejects_negative_length() {
        assert!(make_braid_strand(-1.0, 1.0, 1.0, 8, 0.05, true)
            .unwrap_err()
            .is_invalid_input());
    }
}
