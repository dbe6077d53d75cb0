use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{Result, TessellationError};
use crate::math::{Point2, Point3, Vector3};

use super::TriangleMesh;

/// Largest side count of a cross-section ring.
pub const MAX_SIDES: u32 = 1 << 16;

/// Local axis the cross-section is extruded along.
///
/// The same axis is the reference the instance orientations are measured
/// against, so the mesh and the instances always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtrusionAxis {
    /// Rings lie in the XZ plane, stacked along `+Y`.
    Y,
    /// Rings lie in the XY plane, stacked along `+Z`.
    #[default]
    Z,
}

impl ExtrusionAxis {
    /// Returns the unit extrusion direction.
    #[must_use]
    pub fn direction(self) -> Vector3 {
        match self {
            Self::Y => Vector3::y(),
            Self::Z => Vector3::z(),
        }
    }

    /// Returns the `(cos, sin)` basis of the ring plane.
    fn ring_basis(self) -> (Vector3, Vector3) {
        match self {
            Self::Y => (Vector3::x(), Vector3::z()),
            Self::Z => (Vector3::x(), Vector3::y()),
        }
    }
}

/// Builds the two-ring cylindrical strip instanced along every curve step.
///
/// Both rings sit on the unit circle, ring 0 at `-half_height` and ring 1 at
/// `+half_height` along the extrusion axis. Vertex `i` of each ring is at
/// angle `2*pi*i/sides + pi/2`, so vertex 0 points along the ring plane's
/// second basis axis. Normals are radial and the UV is `(ring, angle)`.
///
/// Triangles wind counter-clockwise when seen from outside the tube.
#[derive(Debug, Clone)]
pub struct TessellateCrossSection {
    sides: u32,
    half_height: f64,
    axis: ExtrusionAxis,
}

impl TessellateCrossSection {
    /// Creates a new cross-section tessellation with `sides` vertices per ring.
    #[must_use]
    pub fn new(sides: u32, half_height: f64, axis: ExtrusionAxis) -> Self {
        Self {
            sides,
            half_height,
            axis,
        }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if `sides` is outside `3..=MAX_SIDES` or the half height is not a positive
    /// finite number.
    pub fn execute(&self) -> Result<TriangleMesh> {
        if self.sides < 3 {
            return Err(TessellationError::InvalidParameters(format!(
                "a closed ring needs at least 3 sides, got {}",
                self.sides
            ))
            .into());
        }
        if self.sides > MAX_SIDES {
            return Err(TessellationError::InvalidParameters(format!(
                "a ring has at most {MAX_SIDES} sides, got {}",
                self.sides
            ))
            .into());
        }
        if !(self.half_height.is_finite() && self.half_height > 0.0) {
            return Err(TessellationError::InvalidParameters(
                "half height must be positive".to_owned(),
            )
            .into());
        }

        let q = self.sides;
        let count = q as usize * 2;
        let (u, v) = self.axis.ring_basis();
        let w = self.axis.direction();
        let outward = u.cross(&v).dot(&w) > 0.0;

        let mut vertices = vec![Point3::origin(); count];
        let mut normals = vec![Vector3::zeros(); count];
        let mut uvs = vec![Point2::origin(); count];
        let mut indices = Vec::with_capacity(q as usize * 2);

        for i in 0..q {
            let rad = f64::from(i) / f64::from(q) * TAU + FRAC_PI_2;
            let radial = u * rad.cos() + v * rad.sin();

            let current0 = i;
            let current1 = i + q;
            let next0 = (i + 1) % q;
            let next1 = next0 + q;

            vertices[current0 as usize] = Point3::from(radial - w * self.half_height);
            vertices[current1 as usize] = Point3::from(radial + w * self.half_height);
            normals[current0 as usize] = radial;
            normals[current1 as usize] = radial;
            uvs[current0 as usize] = Point2::new(0.0, rad);
            uvs[current1 as usize] = Point2::new(1.0, rad);

            if outward {
                indices.push([current0, next0, current1]);
                indices.push([current1, next0, next1]);
            } else {
                indices.push([current0, current1, next0]);
                indices.push([current1, next1, next0]);
            }
        }

        Ok(TriangleMesh {
            vertices,
            normals,
            uvs,
            indices,
        })
    }
}
