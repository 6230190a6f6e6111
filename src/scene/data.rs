use crate::geometry::curve::Spline;

slotmap::new_key_type! {
    /// Unique identifier for curve data in the scene.
    pub struct CurveId;
}

slotmap::new_key_type! {
    /// Unique identifier for mesh data in the scene.
    pub struct MeshId;
}

slotmap::new_key_type! {
    /// Unique identifier for a bevel profile in the scene.
    pub struct ProfileId;
}

/// Curve data: one or more splines shared by every object linking it.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveData {
    /// The splines of the curve.
    pub splines: Vec<Spline>,
}

impl CurveData {
    /// Curve data holding a single spline.
    #[must_use]
    pub fn single(spline: impl Into<Spline>) -> Self {
        Self {
            splines: vec![spline.into()],
        }
    }

    /// Total number of control points over all splines.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.splines.iter().map(Spline::point_count).sum()
    }
}
