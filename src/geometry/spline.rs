use crate::error::{GeometryError, Result, SolverError};
use crate::math::{Point3, Vector3};
use crate::operations::solve::SolveControlPoints;

use super::curve::{AttributePair, CubicBezier, Curve, Interpolate};

/// An ordered chain of cubic Bézier segments, each starting where the
/// previous one ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline<A = Vector3> {
    curves: Vec<CubicBezier<A>>,
}

impl Spline<Vector3> {
    /// Builds straight segments between consecutive waypoints, with `+Y` as
    /// the up vector everywhere.
    ///
    /// Control points are collapsed onto the segment endpoints until
    /// [`Spline::solve`] runs.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::TooFewWaypoints`] for fewer than 2 waypoints, or
    /// [`GeometryError::NonFinitePoint`] for a non-finite waypoint.
    pub fn from_waypoints(waypoints: &[Point3]) -> Result<Self> {
        Self::from_waypoints_with(waypoints, |_| AttributePair::uniform(Vector3::y()))
    }
}

impl<A: Interpolate> Spline<A> {
    /// Builds straight segments between consecutive waypoints, asking
    /// `attributes` for the endpoint attributes of segment `i`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::TooFewWaypoints`] for fewer than 2 waypoints, or
    /// [`GeometryError::NonFinitePoint`] if a waypoint has a NaN or infinite
    /// coordinate.
    pub fn from_waypoints_with<F>(waypoints: &[Point3], mut attributes: F) -> Result<Self>
    where
        F: FnMut(usize) -> AttributePair<A>,
    {
        if waypoints.len() < 2 {
            return Err(SolverError::TooFewWaypoints {
                min: 2,
                actual: waypoints.len(),
            }
            .into());
        }
        if let Some(index) = waypoints
            .iter()
            .position(|p| !p.iter().all(|v| v.is_finite()))
        {
            return Err(GeometryError::NonFinitePoint { index }.into());
        }
        let curves = waypoints
            .windows(2)
            .enumerate()
            .map(|(i, pair)| CubicBezier::straight_with(pair[0], pair[1], attributes(i)))
            .collect();
        Ok(Self { curves })
    }

    /// Wraps already-built segments.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NoSegments`] if `curves` is empty, or
    /// [`SolverError::Disconnected`] if a segment does not start at the end of
    /// its predecessor.
    pub fn from_curves(curves: Vec<CubicBezier<A>>) -> Result<Self> {
        if curves.is_empty() {
            return Err(SolverError::NoSegments.into());
        }
        SolveControlPoints::check_chain(&curves)?;
        Ok(Self { curves })
    }

    /// Recomputes every control point so the chain is C1-continuous.
    ///
    /// # Errors
    ///
    /// Propagates solver errors.
    pub fn solve(&mut self) -> Result<()> {
        SolveControlPoints::new().execute(&mut self.curves)
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn curves(&self) -> &[CubicBezier<A>] {
        &self.curves
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.curves.len()
    }

    /// Returns the `N + 1` waypoints the segments pass through.
    #[must_use]
    pub fn waypoints(&self) -> Vec<Point3> {
        let mut points = Vec::with_capacity(self.curves.len() + 1);
        if let Some(first) = self.curves.first() {
            points.push(first.start);
        }
        points.extend(self.curves.iter().map(|c| c.end));
        points
    }

    /// Evaluates the spline at global parameter `u`, where segment `i` spans
    /// `[i, i + 1]`. `u` is clamped to `[0, N]`.
    #[must_use]
    pub fn point(&self, u: f64) -> Point3 {
        let (curve, t) = self.locate(u);
        curve.point(t)
    }

    /// Unit tangent at global parameter `u`. See [`Spline::point`].
    #[must_use]
    pub fn tangent(&self, u: f64) -> Vector3 {
        let (curve, t) = self.locate(u);
        curve.tangent(t)
    }

    /// Returns whether every internal junction has matching tangents within
    /// `tolerance`.
    #[must_use]
    pub fn is_c1_continuous(&self, tolerance: f64) -> bool {
        self.curves.windows(2).all(|pair| {
            (pair[0].end - pair[1].start).norm() <= tolerance
                && (pair[0].tangent(1.0) - pair[1].tangent(0.0)).norm() <= tolerance
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn locate(&self, u: f64) -> (&CubicBezier<A>, f64) {
        let last = self.curves.len() - 1;
        let u = u.clamp(0.0, self.curves.len() as f64);
        let index = (u.floor() as usize).min(last);
        (&self.curves[index], u - index as f64)
    }
}
