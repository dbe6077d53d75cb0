mod attribute;
mod bezier;

pub use attribute::{AttributePair, Interpolate, ScaleColor};
pub use bezier::CubicBezier;

use crate::math::{Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns `count + 1` evenly spaced parameters from `t_min` to `t_max`.
    ///
    /// Every parameter is computed as `t_min + span * i / count` so that two
    /// adjacent intervals share a bit-identical parameter. `count == 0` yields
    /// only `t_min`.
    #[must_use]
    pub fn steps(&self, count: u32) -> Vec<f64> {
        if count == 0 {
            return vec![self.t_min];
        }
        let span = self.t_max - self.t_min;
        (0..=count)
            .map(|i| self.t_min + span * f64::from(i) / f64::from(count))
            .collect()
    }
}

/// Trait for parametric curves in 3D space.
///
/// Evaluation is total: parameters outside the domain extrapolate and
/// degenerate tangents fall back to a finite direction chosen by the
/// implementation.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    fn point(&self, t: f64) -> Point3;

    /// Computes the unit tangent vector at parameter `t`.
    fn tangent(&self, t: f64) -> Vector3;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;
}
