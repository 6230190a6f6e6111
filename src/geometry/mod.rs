pub mod curve;
pub mod mesh;
pub mod profile;

pub use curve::{BezierPoint, BezierSpline, Curve, CurveDomain, PolySpline, Spline};
pub use mesh::{Face, Mesh};
pub use profile::{Profile, StripedSection};
