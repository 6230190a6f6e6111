mod tessellate_curve;
mod tessellate_object;
mod tessellate_sweep;

pub use tessellate_curve::{tessellate_spline, TessellateCurve};
pub use tessellate_object::TessellateObject;
pub use tessellate_sweep::TessellateSweep;

use crate::math::{Point3, Vector3, TOLERANCE};

/// Up direction used to orient sweep cross-sections (Z+).
const UP: Vector3 = Vector3::new(0.0, 0.0, 1.0);

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessellationParams {
    /// Samples per Bezier segment of guide curves.
    pub bezier_resolution: usize,
    /// Samples per Bezier segment of bevel profiles.
    pub profile_resolution: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            bezier_resolution: 12,
            profile_resolution: 4,
        }
    }
}

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

impl Polyline {
    /// Creates a polyline from its vertices.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Arc length from the first vertex to every vertex.
    #[must_use]
    pub fn cumulative_arc_lengths(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(self.points.len());
        let mut total = 0.0;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                total += (p - self.points[i - 1]).norm();
            }
            lengths.push(total);
        }
        lengths
    }

    /// Total length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.cumulative_arc_lengths().last().copied().unwrap_or(0.0)
    }

    /// Unit tangent at every vertex: the averaged direction of the adjacent
    /// segments, or the single segment at the ends.
    #[must_use]
    pub fn tangents(&self) -> Vec<Vector3> {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let prev = if i > 0 { i - 1 } else { i };
                let next = if i + 1 < n { i + 1 } else { i };
                let d = self.points[next] - self.points[prev];
                let len = d.norm();
                if len < TOLERANCE {
                    UP
                } else {
                    d / len
                }
            })
            .collect()
    }

    /// Returns the polyline with its first `fraction` of length removed.
    ///
    /// The cut falls between vertices, so a new first vertex is
    /// interpolated there.
    #[must_use]
    pub fn trim_start(&self, fraction: f64) -> Self {
        if fraction <= 0.0 || self.points.len() < 2 {
            return self.clone();
        }
        let lengths = self.cumulative_arc_lengths();
        let total = lengths[lengths.len() - 1];
        let cut = total * fraction.min(1.0);
        let Some(index) = lengths.iter().position(|&l| l > cut) else {
            // Everything is trimmed; keep a zero-length stub at the end.
            let last = self.points[self.points.len() - 1];
            return Self::new(vec![last, last]);
        };
        let (a, b) = (self.points[index - 1], self.points[index]);
        let span = lengths[index] - lengths[index - 1];
        let t = if span < TOLERANCE {
            0.0
        } else {
            (cut - lengths[index - 1]) / span
        };
        let mut points = vec![a + (b - a) * t];
        points.extend_from_slice(&self.points[index..]);
        Self::new(points)
    }

    /// Position and unit tangent at arc length `s` from the start.
    ///
    /// Beyond either end the polyline is extended along its end tangent.
    /// Use [`Polyline::sampler`] when sampling many times.
    #[must_use]
    pub fn sample(&self, s: f64) -> Option<(Point3, Vector3)> {
        self.sampler()?.sample(s)
    }

    /// Arc-length sampler with lengths and tangents computed once.
    ///
    /// Returns `None` for fewer than two vertices.
    #[must_use]
    pub fn sampler(&self) -> Option<PolylineSampler<'_>> {
        if self.points.len() < 2 {
            return None;
        }
        Some(PolylineSampler {
            points: &self.points,
            lengths: self.cumulative_arc_lengths(),
            tangents: self.tangents(),
        })
    }
}

/// Samples a polyline by arc length. See [`Polyline::sampler`].
#[derive(Debug, Clone)]
pub struct PolylineSampler<'a> {
    points: &'a [Point3],
    lengths: Vec<f64>,
    tangents: Vec<Vector3>,
}

impl PolylineSampler<'_> {
    /// Position and unit tangent at arc length `s`, extrapolated along the
    /// end tangents outside the polyline.
    #[must_use]
    pub fn sample(&self, s: f64) -> Option<(Point3, Vector3)> {
        let last = self.points.len() - 1;
        if s <= 0.0 {
            let tangent = self.tangents[0];
            return Some((self.points[0] + tangent * s, tangent));
        }
        if s >= self.lengths[last] {
            let tangent = self.tangents[last];
            return Some((self.points[last] + tangent * (s - self.lengths[last]), tangent));
        }
        let index = self.lengths.partition_point(|&l| l <= s);
        if index == 0 || index > last {
            return None;
        }
        let (a, b) = (self.points[index - 1], self.points[index]);
        let span = self.lengths[index] - self.lengths[index - 1];
        let t = if span < TOLERANCE {
            0.0
        } else {
            (s - self.lengths[index - 1]) / span
        };
        let tangent = (self.tangents[index - 1] * (1.0 - t) + self.tangents[index] * t).normalize();
        Some((a + (b - a) * t, tangent))
    }
}

/// Cross-section axes for a sweep along `tangent` with Z kept up.
///
/// Returns `(side, up)`, both perpendicular to the tangent, with
/// `side x up = tangent`. A tangent along Z has no defined horizontal, so
/// X is used as the side direction there.
#[must_use]
pub fn sweep_frame(tangent: &Vector3) -> (Vector3, Vector3) {
    let side = UP.cross(tangent);
    let side = if side.norm() < 1e-9 {
        Vector3::x()
    } else {
        side.normalize()
    };
    let up = tangent.cross(&side);
    (side, up)
}
