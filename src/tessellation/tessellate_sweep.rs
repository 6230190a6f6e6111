use crate::error::{GeometryError, Result};
use crate::geometry::curve::Spline;
use crate::geometry::mesh::{Face, Mesh};
use crate::geometry::profile::Profile;
use crate::math::polygon::{point_in_ring, signed_area};
use crate::math::Point2;

use super::{sweep_frame, tessellate_spline, Polyline, TessellationParams};

/// One tessellated boundary of a profile.
struct ProfileRing {
    points: Vec<Point2>,
    /// Counter-clockwise in the profile plane.
    ccw: bool,
    /// Lies inside another boundary of the same profile.
    hole: bool,
}

impl ProfileRing {
    /// Whether side quads built in ring order need their winding reversed
    /// to face away from the material.
    fn flip_sides(&self) -> bool {
        self.ccw == self.hole
    }
}

fn profile_rings(profile: &Profile, resolution: usize) -> Vec<ProfileRing> {
    let outlines: Vec<Vec<Point2>> = profile
        .splines()
        .iter()
        .map(|spline| {
            let mut points = tessellate_spline(&Spline::from(spline.clone()), resolution).points;
            // Cyclic splines repeat their first point.
            points.pop();
            points.into_iter().map(|p| Point2::new(p.x, p.y)).collect()
        })
        .collect();

    outlines
        .iter()
        .enumerate()
        .map(|(i, ring)| {
            let hole = ring.first().is_some_and(|first| {
                outlines
                    .iter()
                    .enumerate()
                    .any(|(j, other)| i != j && point_in_ring(first, other))
            });
            ProfileRing {
                points: ring.clone(),
                ccw: signed_area(ring) > 0.0,
                hole,
            }
        })
        .collect()
}

/// Sweeps a profile along a polyline, producing the body of a beveled curve.
///
/// The profile's X axis follows the sweep frame's side direction and its Y
/// axis the frame's up direction. Side faces point away from the material:
/// outwards on outer boundaries, towards the hole on inner ones.
pub struct TessellateSweep<'a> {
    path: &'a Polyline,
    profile: &'a Profile,
    params: TessellationParams,
    factor_start: f64,
    fill_caps: bool,
}

impl<'a> TessellateSweep<'a> {
    /// Creates a new `TessellateSweep` operation over the whole path,
    /// with capped ends.
    #[must_use]
    pub fn new(path: &'a Polyline, profile: &'a Profile, params: TessellationParams) -> Self {
        Self {
            path,
            profile,
            params,
            factor_start: 0.0,
            fill_caps: true,
        }
    }

    /// Leaves the first `factor_start` fraction of the path bare.
    #[must_use]
    pub fn with_factor_start(mut self, factor_start: f64) -> Self {
        self.factor_start = factor_start;
        self
    }

    /// Sets whether the ends of the sweep are closed.
    #[must_use]
    pub fn with_caps(mut self, fill_caps: bool) -> Self {
        self.fill_caps = fill_caps;
        self
    }

    /// Executes the sweep.
    ///
    /// A path trimmed away entirely gives an empty mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the path has fewer than 2 points or
    /// `factor_start` is negative.
    pub fn execute(&self) -> Result<Mesh> {
        if self.path.points.len() < 2 {
            return Err(GeometryError::InvalidInput(format!(
                "a sweep path needs 2 points, got {}",
                self.path.points.len()
            ))
            .into());
        }
        if self.factor_start < 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "factor_start",
                value: self.factor_start,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        if self.factor_start >= 1.0 {
            return Ok(Mesh::new());
        }

        let path = self.path.trim_start(self.factor_start);
        let tangents = path.tangents();
        let frames: Vec<_> = tangents.iter().map(sweep_frame).collect();
        let rings = profile_rings(self.profile, self.params.profile_resolution);

        let mut mesh = Mesh::new();
        // First vertex index of every profile ring at the start of the path.
        let mut starts = Vec::with_capacity(rings.len());
        for ring in &rings {
            let size = ring.points.len();
            let base = mesh.vertices.len();
            starts.push(base);
            for (point, (side, up)) in path.points.iter().zip(&frames) {
                mesh.vertices.extend(
                    ring.points
                        .iter()
                        .map(|q| *point + side * q.x + up * q.y),
                );
            }
            for step in 1..path.points.len() {
                let prev = base + (step - 1) * size;
                let cur = base + step * size;
                for j in 0..size {
                    let next = (j + 1) % size;
                    let quad = if ring.flip_sides() {
                        vec![prev + j, cur + j, cur + next, prev + next]
                    } else {
                        vec![prev + j, prev + next, cur + next, cur + j]
                    };
                    mesh.faces.push(Face::new(quad));
                }
            }
        }

        if self.fill_caps {
            let last_step = path.points.len() - 1;
            for (i, ring) in rings.iter().enumerate() {
                if ring.hole {
                    continue;
                }
                let holes: Vec<usize> = (0..rings.len())
                    .filter(|&j| {
                        j != i
                            && rings[j].hole
                            && rings[j]
                                .points
                                .first()
                                .is_some_and(|first| point_in_ring(first, &ring.points))
                    })
                    .collect();
                let size = ring.points.len();
                match holes.as_slice() {
                    [] => {
                        let start: Vec<usize> = (starts[i]..starts[i] + size).collect();
                        let end: Vec<usize> = start.iter().map(|v| v + last_step * size).collect();
                        push_cap(&mut mesh, start, end, ring.ccw);
                    }
                    [hole] if rings[*hole].points.len() == size => {
                        for j in 0..size {
                            let next = (j + 1) % size;
                            let start = vec![
                                starts[i] + j,
                                starts[i] + next,
                                starts[*hole] + next,
                                starts[*hole] + j,
                            ];
                            let end = start.iter().map(|v| v + last_step * size).collect();
                            push_cap(&mut mesh, start, end, ring.ccw);
                        }
                    }
                    // Caps between unmatched boundaries are left open.
                    _ => {}
                }
            }
        }
        Ok(mesh)
    }
}

/// Adds a cap polygon at both ends of the sweep. `ccw` tells whether the
/// given vertex order runs counter-clockwise around the sweep direction.
fn push_cap(mesh: &mut Mesh, mut start: Vec<usize>, mut end: Vec<usize>, ccw: bool) {
    if ccw {
        start.reverse();
    } else {
        end.reverse();
    }
    mesh.faces.push(Face::new(start));
    mesh.faces.push(Face::new(end));
}
