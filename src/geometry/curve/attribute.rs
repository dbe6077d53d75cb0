use crate::math::{UnitQuaternion, Vector3, Vector4, TOLERANCE};

/// A value that can be blended between two endpoint values by a parameter.
pub trait Interpolate: Clone {
    /// Returns the blend of `self` (at `t = 0`) and `other` (at `t = 1`).
    ///
    /// `t` is not clamped.
    #[must_use]
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Vector3 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.lerp(other, t)
    }
}

impl Interpolate for Vector4 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.lerp(other, t)
    }
}

/// Normalized linear interpolation along the shorter arc.
impl Interpolate for UnitQuaternion {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        let mut target = *other.quaternion();
        if self.quaternion().dot(&target) < 0.0 {
            target = -target;
        }
        let blended = self.quaternion().lerp(&target, t);
        UnitQuaternion::try_new(blended, TOLERANCE).unwrap_or(*self)
    }
}

/// Per-endpoint scale and RGBA color for tubes with varying thickness and tint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleColor {
    /// Cross-section scale factor.
    pub scale: f64,
    /// RGBA color.
    pub color: Vector4,
}

impl ScaleColor {
    /// Creates a new scale/color value.
    #[must_use]
    pub fn new(scale: f64, color: Vector4) -> Self {
        Self { scale, color }
    }
}

impl Default for ScaleColor {
    fn default() -> Self {
        Self {
            scale: 1.0,
            color: Vector4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl Interpolate for ScaleColor {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        Self {
            scale: self.scale.interpolate(&other.scale, t),
            color: self.color.interpolate(&other.color, t),
        }
    }
}

/// An auxiliary attribute given at both ends of a curve segment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributePair<A> {
    /// Value at `t = 0`.
    pub begin: A,
    /// Value at `t = 1`.
    pub end: A,
}

impl<A: Interpolate> AttributePair<A> {
    /// Creates a pair from its two endpoint values.
    #[must_use]
    pub fn new(begin: A, end: A) -> Self {
        Self { begin, end }
    }

    /// Creates a pair holding the same value at both ends.
    #[must_use]
    pub fn uniform(value: A) -> Self {
        Self {
            begin: value.clone(),
            end: value,
        }
    }

    /// Returns the attribute at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> A {
        self.begin.interpolate(&self.end, t)
    }
}
