use crate::error::Result;
use crate::geometry::curve::Spline;
use crate::math::bezier::cubic_point;
use crate::scene::{CurveId, Scene};

use super::{Polyline, TessellationParams};

/// Samples a spline into a polyline.
///
/// Bezier segments get `resolution` samples each; polylines keep their
/// points. Cyclic splines repeat their first point at the end.
#[must_use]
pub fn tessellate_spline(spline: &Spline, resolution: usize) -> Polyline {
    let resolution = resolution.max(1);
    match spline {
        Spline::Bezier(bezier) => {
            let mut points = Vec::with_capacity(bezier.segment_count() * resolution + 1);
            for index in 0..bezier.segment_count() {
                let [p0, p1, p2, p3] = bezier.segment(index);
                for step in 0..resolution {
                    #[allow(clippy::cast_precision_loss)]
                    let t = step as f64 / resolution as f64;
                    points.push(cubic_point(&p0, &p1, &p2, &p3, t));
                }
            }
            let closing = if bezier.is_cyclic() {
                bezier.points()[0].co
            } else {
                bezier.points()[bezier.points().len() - 1].co
            };
            points.push(closing);
            Polyline::new(points)
        }
        Spline::Poly(poly) => {
            let mut points = poly.points().to_vec();
            if poly.is_cyclic() {
                points.push(poly.points()[0]);
            }
            Polyline::new(points)
        }
    }
}

/// Tessellates every spline of a curve into a polyline, in object space.
pub struct TessellateCurve {
    curve: CurveId,
    params: TessellationParams,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(curve: CurveId, params: TessellationParams) -> Self {
        Self { curve, params }
    }

    /// Executes the tessellation, returning one polyline per spline.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve is not in the scene.
    pub fn execute(&self, scene: &Scene) -> Result<Vec<Polyline>> {
        let data = scene.curve(self.curve)?;
        Ok(data
            .splines
            .iter()
            .map(|s| tessellate_spline(s, self.params.bezier_resolution))
            .collect())
    }
}
