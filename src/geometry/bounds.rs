use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

/// An axis-aligned box given by its center and full size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Center of the box.
    pub center: Point3,
    /// Full extent along each axis.
    pub size: Vector3,
}

impl Bounds {
    /// Creates bounds from a center and a full size.
    #[must_use]
    pub fn new(center: Point3, size: Vector3) -> Self {
        Self { center, size }
    }

    /// Creates bounds spanning two corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point3, b: Point3) -> Self {
        let min = a.inf(&b);
        let max = a.sup(&b);
        Self {
            center: nalgebra::center(&min, &max),
            size: max - min,
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Point3 {
        self.center - self.size * 0.5
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Point3 {
        self.center + self.size * 0.5
    }

    /// Returns whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        let (min, max) = (self.min(), self.max());
        (0..3).all(|i| point[i] >= min[i] && point[i] <= max[i])
    }

    /// Checks that every component and both corners are finite and the size
    /// is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidBounds`] otherwise.
    pub fn validate(&self) -> Result<()> {
        if !self.center.iter().chain(self.size.iter()).all(|v| v.is_finite()) {
            return Err(GeometryError::InvalidBounds("bounds must be finite".into()).into());
        }
        if self.size.iter().any(|v| *v < 0.0) {
            return Err(
                GeometryError::InvalidBounds("bounds size must be non-negative".into()).into(),
            );
        }
        let (min, max) = (self.min(), self.max());
        if !min.iter().chain(max.iter()).all(|v| v.is_finite()) {
            return Err(GeometryError::InvalidBounds("bounds corners overflow".into()).into());
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            size: Vector3::new(10.0, 10.0, 10.0),
        }
    }
}
