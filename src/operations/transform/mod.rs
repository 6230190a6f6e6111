mod curve_deform;

pub use curve_deform::CurveDeform;
