use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::geometry::Bounds;
use crate::math::Point3;

/// Scatters waypoints uniformly inside an axis-aligned box.
///
/// Each coordinate is drawn independently from `[min, max]` of the bounds,
/// x first, then y, then z, point by point. The generator is owned by the
/// operation and seeded from `seed`, so equal inputs give equal waypoints.
#[derive(Debug, Clone)]
pub struct GenerateWaypoints {
    bounds: Bounds,
    count: usize,
    seed: u64,
}

impl GenerateWaypoints {
    /// Creates a new `GenerateWaypoints` operation producing `count` points.
    #[must_use]
    pub fn new(bounds: Bounds, count: usize, seed: u64) -> Self {
        Self {
            bounds,
            count,
            seed,
        }
    }

    /// Executes the operation with a fresh [`StdRng`] seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are not finite or have a negative size.
    pub fn execute(&self) -> Result<Vec<Point3>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.execute_with(&mut rng)
    }

    /// Executes the operation drawing from a caller-supplied generator.
    ///
    /// The stored seed is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are not finite or have a negative size.
    pub fn execute_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Point3>> {
        self.bounds.validate()?;
        let min = self.bounds.min();
        let max = self.bounds.max();

        let points = (0..self.count)
            .map(|_| {
                Point3::new(
                    rng.gen_range(min.x..=max.x),
                    rng.gen_range(min.y..=max.y),
                    rng.gen_range(min.z..=max.z),
                )
            })
            .collect();
        Ok(points)
    }
}
