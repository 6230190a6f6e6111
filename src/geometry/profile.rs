use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeometryError, Result};
use crate::math::bezier::{polar, ArcHandle};

use super::curve::{make_bezier_circle, BezierPoint, BezierSpline};

/// Smallest stripe fraction accepted by [`make_striped_tube_section`].
pub const MIN_STRIPE_AMOUNT: f64 = 0.1;

/// Largest stripe fraction accepted by [`make_striped_tube_section`].
pub const MAX_STRIPE_AMOUNT: f64 = 0.51;

/// A closed 2D cross-section made of one or more cyclic Bezier splines.
///
/// Profiles live in the XY plane. A full tube section is two concentric
/// Bezier circles; striped insulators split the annulus into angular
/// wedges built from exact circular-arc Bezier segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    splines: Vec<BezierSpline>,
}

impl Profile {
    /// Creates a profile from its boundary splines.
    ///
    /// # Errors
    ///
    /// Returns an error if no spline is given or a spline is not cyclic.
    pub fn new(splines: Vec<BezierSpline>) -> Result<Self> {
        if splines.is_empty() {
            return Err(GeometryError::InvalidInput("profile has no splines".into()).into());
        }
        if splines.iter().any(|s| !s.is_cyclic()) {
            return Err(GeometryError::InvalidInput("profile splines must be closed".into()).into());
        }
        Ok(Self { splines })
    }

    /// Returns the boundary splines.
    #[must_use]
    pub fn splines(&self) -> &[BezierSpline] {
        &self.splines
    }

    /// Returns a copy rotated about the origin by `angle` radians.
    #[must_use]
    pub fn rotated_z(&self, angle: f64) -> Self {
        Self {
            splines: self.splines.iter().map(|s| s.rotated_z(angle)).collect(),
        }
    }

    /// Returns a copy with every X coordinate negated.
    #[must_use]
    pub fn mirrored_x(&self) -> Self {
        Self {
            splines: self.splines.iter().map(BezierSpline::mirrored_x).collect(),
        }
    }

    /// Joins the splines of `other` into this profile.
    #[must_use]
    pub fn joined(mut self, other: Self) -> Self {
        self.splines.extend(other.splines);
        self
    }
}

/// The two halves of a striped insulator cross-section.
#[derive(Debug, Clone, PartialEq)]
pub struct StripedSection {
    /// Majority colour wedge(s).
    pub base: Profile,
    /// Stripe wedge(s), rotated into the gap left by `base`.
    pub stripe: Profile,
}

fn check_radii(outer_radius: f64, inner_radius: f64) -> Result<()> {
    if outer_radius <= 0.0 {
        return Err(
            GeometryError::InvalidInput(format!("invalid outer radius {outer_radius}")).into(),
        );
    }
    if inner_radius <= 0.0 {
        return Err(
            GeometryError::InvalidInput(format!("invalid inner radius {inner_radius}")).into(),
        );
    }
    if inner_radius >= outer_radius {
        return Err(GeometryError::InvalidInput(format!(
            "inner radius {inner_radius} must be smaller than outer radius {outer_radius}"
        ))
        .into());
    }
    Ok(())
}

/// Builds a full tube wall: an outer and an inner Bezier circle.
///
/// # Errors
///
/// Returns an error unless `outer_radius > inner_radius > 0`.
pub fn make_tube_section(outer_radius: f64, inner_radius: f64) -> Result<Profile> {
    check_radii(outer_radius, inner_radius)?;
    Profile::new(vec![
        make_bezier_circle(outer_radius)?,
        make_bezier_circle(inner_radius)?,
    ])
}

/// Builds an annular wedge centred on +X spanning `2 * pi * amount`.
///
/// The wedge is a closed 6-point Bezier: three points along the outer arc
/// running clockwise, then three along the inner arc back. The corners
/// where the arcs meet the radial edges have collapsed handles so the
/// radial edges stay straight. With `mirror` the wedge is flipped onto -X.
///
/// # Errors
///
/// Returns an error unless `outer_radius > inner_radius > 0` and
/// `0 < amount < 1`.
pub fn make_tube_section_slice(
    outer_radius: f64,
    inner_radius: f64,
    amount: f64,
    mirror: bool,
) -> Result<Profile> {
    check_radii(outer_radius, inner_radius)?;
    if amount <= 0.0 || amount >= 1.0 {
        return Err(GeometryError::ParameterOutOfRange {
            parameter: "amount",
            value: amount,
            min: 0.0,
            max: 1.0,
        }
        .into());
    }

    // Half the wedge angle; each of the two arcs per radius spans this much.
    let dtheta = PI * amount;
    let outer = ArcHandle::for_arc(dtheta, outer_radius);
    let inner = ArcHandle::for_arc(dtheta, inner_radius);
    let htheta = outer.angle;

    let at = |radius: f64, angle: f64| polar(radius, angle, 0.0);

    let outer_start = at(outer_radius, dtheta);
    let outer_end = at(outer_radius, -dtheta);
    let inner_start = at(inner_radius, -dtheta);
    let inner_end = at(inner_radius, dtheta);

    let points = vec![
        BezierPoint::new(outer_start, outer_start, at(outer.radius, dtheta - htheta)),
        BezierPoint::new(
            at(outer_radius, 0.0),
            at(outer.radius, htheta),
            at(outer.radius, -htheta),
        ),
        BezierPoint::new(outer_end, at(outer.radius, -dtheta + htheta), outer_end),
        BezierPoint::new(inner_start, inner_start, at(inner.radius, -dtheta + htheta)),
        BezierPoint::new(
            at(inner_radius, 0.0),
            at(inner.radius, -htheta),
            at(inner.radius, htheta),
        ),
        BezierPoint::new(inner_end, at(inner.radius, dtheta - htheta), inner_end),
    ];

    let slice = Profile::new(vec![BezierSpline::new(points, true)?])?;
    Ok(if mirror { slice.mirrored_x() } else { slice })
}

/// Builds the base and stripe cross-sections of a two-tone insulator.
///
/// `amount` is the fraction of the circumference taken by the stripe.
/// Double-sided stripes are split into two opposite wedges, as is the
/// base between them. The stripe is rotated so both profiles tile the
/// full annulus without overlapping.
///
/// # Errors
///
/// Returns an error if `amount` lies outside `[0.1, 0.51]` or the radii
/// are invalid.
pub fn make_striped_tube_section(
    outer_radius: f64,
    inner_radius: f64,
    amount: f64,
    double_sided: bool,
) -> Result<StripedSection> {
    if !(MIN_STRIPE_AMOUNT..=MAX_STRIPE_AMOUNT).contains(&amount) {
        return Err(GeometryError::ParameterOutOfRange {
            parameter: "amount",
            value: amount,
            min: MIN_STRIPE_AMOUNT,
            max: MAX_STRIPE_AMOUNT,
        }
        .into());
    }
    check_radii(outer_radius, inner_radius)?;

    let (base, stripe, theta) = if double_sided {
        let half = |amount: f64| -> Result<Profile> {
            Ok(make_tube_section_slice(outer_radius, inner_radius, amount, false)?
                .joined(make_tube_section_slice(outer_radius, inner_radius, amount, true)?))
        };
        (half((1.0 - amount) / 2.0)?, half(amount / 2.0)?, FRAC_PI_2)
    } else {
        (
            make_tube_section_slice(outer_radius, inner_radius, 1.0 - amount, false)?,
            make_tube_section_slice(outer_radius, inner_radius, amount, false)?,
            PI,
        )
    };

    Ok(StripedSection {
        base,
        stripe: stripe.rotated_z(theta),
    })
}
