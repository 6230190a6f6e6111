use std::f64::consts::{PI, TAU};

use tracing::trace;

use crate::error::{GeometryError, Result};
use crate::math::{about_eq, Point2};

/// One ring of evenly spaced strand centres.
#[derive(Debug, Clone, PartialEq)]
pub struct StrandRing {
    /// Distance of every centre in the ring from the conductor axis.
    pub radius: f64,
    /// Strand centres, the first on the +X axis, counter-clockwise.
    pub positions: Vec<Point2>,
}

impl StrandRing {
    fn around(radius: f64, count: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / count as f64;
        let positions = (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = step * i as f64;
                Point2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self { radius, positions }
    }

    fn centre() -> Self {
        Self {
            radius: 0.0,
            positions: vec![Point2::origin()],
        }
    }

    /// Whether this is the single strand on the conductor axis.
    #[must_use]
    pub fn is_centre(&self) -> bool {
        about_eq(self.radius, 0.0)
    }

    /// Number of strands in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the ring holds no strands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Angle between neighbouring strands.
    #[must_use]
    pub fn angular_step(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let n = self.positions.len().max(1) as f64;
        TAU / n
    }
}

/// Number of strands of `strand_radius` that fit side by side on a ring of
/// `ring_radius` without overlapping.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ring_capacity(ring_radius: f64, strand_radius: f64) -> usize {
    let mut n = (PI * ring_radius / strand_radius).floor().max(0.0) as usize;
    if n > 0 {
        #[allow(clippy::cast_precision_loss)]
        let chord = 2.0 * ring_radius * (PI / n as f64).sin();
        if chord < 2.0 * strand_radius {
            n -= 1;
        }
    }
    n
}

/// Lays out strand centres in concentric rings, outermost first.
///
/// `conductor_radius` is the radius of the outermost ring of centres (the
/// conductor radius minus one strand radius for a flush fit). Rings step
/// inwards by one strand diameter. When no further ring fits, a single
/// centre strand is added if the last ring left room for it. Rings too
/// small to hold any strand are skipped.
///
/// # Errors
///
/// Returns an error if either radius is not positive or no strand fits.
pub fn pack_strands(conductor_radius: f64, strand_radius: f64) -> Result<Vec<StrandRing>> {
    if strand_radius <= 0.0 {
        return Err(
            GeometryError::InvalidInput(format!("invalid strand radius {strand_radius}")).into(),
        );
    }
    if conductor_radius <= 0.0 {
        return Err(GeometryError::InvalidInput(format!(
            "invalid conductor radius {conductor_radius}"
        ))
        .into());
    }

    let mut rings = Vec::new();
    let mut rc = conductor_radius;
    loop {
        let n = ring_capacity(rc, strand_radius);
        trace!(radius = rc, strands = n, "strand ring");
        if n > 0 {
            rings.push(StrandRing::around(rc, n));
        }

        let rc_next = rc - 2.0 * strand_radius;
        if rc_next < strand_radius {
            if rc > 2.0 * strand_radius {
                rings.push(StrandRing::centre());
            }
            break;
        }
        rc = rc_next;
    }

    if rings.is_empty() {
        return Err(GeometryError::InvalidInput(format!(
            "no strand of radius {strand_radius} fits in radius {conductor_radius}"
        ))
        .into());
    }
    Ok(rings)
}

/// Total number of strands in a layout.
#[must_use]
pub fn strand_count(rings: &[StrandRing]) -> usize {
    rings.iter().map(StrandRing::len).sum()
}
