pub mod bounds;
pub mod curve;
pub mod spline;

pub use bounds::Bounds;
pub use curve::{AttributePair, CubicBezier, Curve, CurveDomain, Interpolate, ScaleColor};
pub use spline::Spline;
