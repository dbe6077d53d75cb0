use crate::error::{Result, TessellationError};
use crate::geometry::curve::Curve;
use crate::instancing::Instance;
use crate::math::{axis_angle_to, Point3, Vector3};

use super::ExtrusionAxis;

/// Largest instance array a single sampling may produce.
pub const MAX_INSTANCES: u32 = 1 << 24;

/// Discretizes curve segments into per-step instance records.
///
/// Each segment's domain is split into `subdivisions` equal steps; every step
/// becomes one [`Instance`] holding the points and orientations at both ends.
/// Orientations are scaled axis rotations from the tangent to the extrusion
/// axis (see [`axis_angle_to`]).
#[derive(Debug, Clone)]
pub struct SampleInstances {
    subdivisions: u32,
    reference: Vector3,
}

impl SampleInstances {
    /// Creates a new sampler with `subdivisions` steps per segment, measuring
    /// orientations against the given extrusion axis.
    #[must_use]
    pub fn new(subdivisions: u32, axis: ExtrusionAxis) -> Self {
        Self {
            subdivisions,
            reference: axis.direction(),
        }
    }

    /// Returns the number of instances produced for `segments` segments.
    #[must_use]
    pub fn instance_count(&self, segments: usize) -> usize {
        segments.saturating_mul(self.subdivisions as usize)
    }

    /// Returns the instance count for `segments` segments, checked against
    /// [`MAX_INSTANCES`] without allocating anything.
    ///
    /// # Errors
    ///
    /// Returns an error if `subdivisions` is zero or the count exceeds
    /// [`MAX_INSTANCES`].
    pub fn checked_instance_count(&self, segments: usize) -> Result<u32> {
        if self.subdivisions == 0 {
            return Err(TessellationError::InvalidParameters(
                "curve subdivision must be at least 1".to_owned(),
            )
            .into());
        }
        segments
            .checked_mul(self.subdivisions as usize)
            .and_then(|count| u32::try_from(count).ok())
            .filter(|&count| count <= MAX_INSTANCES)
            .ok_or_else(|| {
                TessellationError::InvalidParameters(format!(
                    "{segments} segments x {} subdivisions exceeds {MAX_INSTANCES} instances",
                    self.subdivisions
                ))
                .into()
            })
    }

    /// Samples every segment in order.
    ///
    /// The result is contiguous: within a segment, the end of step `i` is
    /// bit-identical to the start of step `i + 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if `subdivisions` is zero or the instance count
    /// exceeds [`MAX_INSTANCES`].
    pub fn execute<C: Curve>(&self, curves: &[C]) -> Result<Vec<Instance>> {
        let count = self.checked_instance_count(curves.len())?;

        let mut instances = Vec::with_capacity(count as usize);
        for curve in curves {
            let samples: Vec<(Point3, Vector3)> = curve
                .domain()
                .steps(self.subdivisions)
                .into_iter()
                .map(|t| (curve.point(t), axis_angle_to(&curve.tangent(t), &self.reference)))
                .collect();

            instances.extend(samples.windows(2).map(|pair| {
                let (start_pos, start_rot) = &pair[0];
                let (end_pos, end_rot) = &pair[1];
                Instance::new(start_pos, end_pos, start_rot, end_rot)
            }));
        }
        Ok(instances)
    }
}
