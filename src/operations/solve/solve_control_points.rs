use crate::error::{Result, SolverError};
use crate::geometry::curve::{CubicBezier, Interpolate};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Computes the inner control points of a chain of Bézier segments so the
/// chain passes smoothly through its waypoints.
///
/// The first control points solve the tridiagonal system
///
/// ```text
/// row 0      : 2 P[0]            +   P[1]   =     K[0] + 2 K[1]
/// row i      :   P[i-1] + 4 P[i] +   P[i+1] = 4 K[i]   + 2 K[i+1]
/// row N-1    : 2 P[N-2] + 7 P[N-1]          = 8 K[N-1] +   K[N]
/// ```
///
/// with the Thomas algorithm, and the second control points follow from
/// continuity: `Q[i] = 2 K[i+1] - P[i+1]`, `Q[N-1] = (K[N] + P[N-1]) / 2`.
/// The result is C2 at interior waypoints with natural (zero curvature) ends.
///
/// A single segment has no neighbours to match, so its control points are
/// placed at one and two thirds of its chord.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolveControlPoints;

impl SolveControlPoints {
    /// Creates a new `SolveControlPoints` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Overwrites the control points of every segment in place.
    ///
    /// Endpoints and attributes are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NoSegments`] for an empty chain, or
    /// [`SolverError::Disconnected`] if a segment does not start at the end of
    /// its predecessor.
    pub fn execute<A: Interpolate>(&self, curves: &mut [CubicBezier<A>]) -> Result<()> {
        Self::check_chain(curves)?;
        let n = curves.len();
        match n {
            0 => return Err(SolverError::NoSegments.into()),
            1 => {
                tracing::warn!("solving a single segment, placing control points on its chord");
                let curve = &mut curves[0];
                let chord = curve.end - curve.start;
                let cp0 = curve.start + chord / 3.0;
                let cp1 = curve.start + chord * (2.0 / 3.0);
                curve.set_control_points(cp0, cp1);
                return Ok(());
            }
            _ => {}
        }

        let first = first_control_points(curves);

        for i in 0..n - 1 {
            let cp1 = Point3::from(curves[i].end.coords * 2.0 - first[i + 1].coords);
            curves[i].set_control_points(first[i], cp1);
        }
        let last = &mut curves[n - 1];
        let cp1 = nalgebra::center(&last.end, &first[n - 1]);
        last.set_control_points(first[n - 1], cp1);

        tracing::debug!(segments = n, "solved spline control points");
        Ok(())
    }

    /// Checks that every segment starts where the previous one ends.
    pub(crate) fn check_chain<A>(curves: &[CubicBezier<A>]) -> Result<()> {
        for (i, pair) in curves.windows(2).enumerate() {
            let gap = (pair[0].end - pair[1].start).norm();
            if gap.is_nan() || gap > TOLERANCE {
                return Err(SolverError::Disconnected { index: i + 1 }.into());
            }
        }
        Ok(())
    }
}

/// Builds and solves the first-control-point system for `n >= 2` segments.
fn first_control_points<A>(curves: &[CubicBezier<A>]) -> Vec<Point3> {
    let n = curves.len();
    let mut a = vec![1.0; n];
    let mut b = vec![4.0; n];
    let mut c = vec![1.0; n];
    let mut r: Vec<Vector3> = curves
        .iter()
        .map(|k| k.start.coords * 4.0 + k.end.coords * 2.0)
        .collect();

    a[0] = 0.0;
    b[0] = 2.0;
    c[0] = 1.0;
    r[0] = curves[0].start.coords + curves[0].end.coords * 2.0;

    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    c[n - 1] = 8.0;
    r[n - 1] = curves[n - 1].start.coords * 8.0 + curves[n - 1].end.coords;

    thomas(&a, &mut b, &c, &mut r)
        .into_iter()
        .map(Point3::from)
        .collect()
}

/// Solves a tridiagonal system with vector right-hand sides in O(n).
///
/// `a` is the sub-diagonal (`a[0]` unused), `b` the main diagonal and `c` the
/// super-diagonal (`c[n-1]` unused). `b` and `r` are consumed as scratch.
fn thomas(a: &[f64], b: &mut [f64], c: &[f64], r: &mut [Vector3]) -> Vec<Vector3> {
    let n = b.len();
    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m * c[i - 1];
        let prev = r[i - 1];
        r[i] -= prev * m;
    }

    let mut x = vec![Vector3::zeros(); n];
    x[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = (r[i] - x[i + 1] * c[i]) / b[i];
    }
    x
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::Curve;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn chain(points: &[Point3]) -> Vec<CubicBezier> {
        points
            .windows(2)
            .map(|w| CubicBezier::straight(w[0], w[1]))
            .collect()
    }

    fn second_derivative_start(c: &CubicBezier) -> Vector3 {
        c.start.coords - c.control_point0.coords * 2.0 + c.control_point1.coords
    }

    fn second_derivative_end(c: &CubicBezier) -> Vector3 {
        c.control_point0.coords - c.control_point1.coords * 2.0 + c.end.coords
    }

    fn wavy() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(2.0, 1.0, 0.5),
            p(3.0, -2.0, 1.0),
            p(5.0, 0.0, 0.0),
            p(7.0, 3.0, -1.0),
            p(8.0, 1.0, 2.0),
        ]
    }

    #[test]
    fn thomas_solves_known_system() {
        let a = [0.0, 1.0, 1.0];
        let mut b = [2.0, 4.0, 4.0];
        let c = [1.0, 1.0, 0.0];
        let mut r = [
            Vector3::new(4.0, -4.0, 0.0),
            Vector3::new(12.0, -12.0, 0.0),
            Vector3::new(14.0, -14.0, 0.0),
        ];
        let x = thomas(&a, &mut b, &c, &mut r);
        assert_relative_eq!(x[0], Vector3::new(1.0, -1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(x[1], Vector3::new(2.0, -2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(x[2], Vector3::new(3.0, -3.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn straight_path_two_segments() {
        let mut curves = chain(&[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        SolveControlPoints::new().execute(&mut curves).unwrap();

        assert_relative_eq!(curves[0].control_point0, p(1.0 / 3.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(curves[0].control_point1, p(2.0 / 3.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(curves[1].control_point0, p(4.0 / 3.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(curves[1].control_point1, p(5.0 / 3.0, 0.0, 0.0), epsilon = 1e-12);

        assert_relative_eq!(curves[0].tangent(1.0), Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(curves[1].tangent(0.0), Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn interior_junctions_are_c1_and_c2() {
        let mut curves = chain(&wavy());
        SolveControlPoints::new().execute(&mut curves).unwrap();
        for pair in curves.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert_relative_eq!(pair[0].derivative(1.0), pair[1].derivative(0.0), epsilon = 1e-9);
            assert_relative_eq!(pair[0].tangent(1.0), pair[1].tangent(0.0), epsilon = 1e-9);
            assert_relative_eq!(
                second_derivative_end(&pair[0]),
                second_derivative_start(&pair[1]),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn ends_have_zero_curvature() {
        let mut curves = chain(&wavy());
        SolveControlPoints::new().execute(&mut curves).unwrap();
        assert_relative_eq!(second_derivative_start(&curves[0]), Vector3::zeros(), epsilon = 1e-9);
        let last = curves.last().unwrap();
        assert_relative_eq!(second_derivative_end(last), Vector3::zeros(), epsilon = 1e-9);
    }

    #[test]
    fn endpoints_are_preserved() {
        let points = wavy();
        let mut curves = chain(&points);
        SolveControlPoints::new().execute(&mut curves).unwrap();
        for (i, c) in curves.iter().enumerate() {
            assert_eq!(c.start, points[i]);
            assert_eq!(c.end, points[i + 1]);
        }
    }

    #[test]
    fn repeated_solves_are_identical() {
        let mut first = chain(&wavy());
        let mut second = chain(&wavy());
        SolveControlPoints::new().execute(&mut first).unwrap();
        SolveControlPoints::new().execute(&mut second).unwrap();
        assert_eq!(first, second);

        SolveControlPoints::new().execute(&mut first).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_segment_uses_chord_thirds() {
        let mut curves = chain(&[p(0.0, 0.0, 0.0), p(3.0, 6.0, 0.0)]);
        SolveControlPoints::new().execute(&mut curves).unwrap();
        assert_relative_eq!(curves[0].control_point0, p(1.0, 2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(curves[0].control_point1, p(2.0, 4.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(curves[0].point(0.5), p(1.5, 3.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn empty_chain_is_rejected() {
        let mut curves: Vec<CubicBezier> = Vec::new();
        assert!(SolveControlPoints::new().execute(&mut curves).is_err());
    }

    #[test]
    fn disconnected_chain_is_rejected() {
        let mut curves = vec![
            CubicBezier::straight(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
            CubicBezier::straight(p(1.0, 1.0, 0.0), p(2.0, 0.0, 0.0)),
        ];
        let err = SolveControlPoints::new().execute(&mut curves).unwrap_err();
        assert!(err.to_string().contains("segment 1"));
    }

    #[test]
    fn nan_junction_is_disconnected() {
        let mut curves = vec![
            CubicBezier::straight(p(0.0, 0.0, 0.0), p(f64::NAN, 0.0, 0.0)),
            CubicBezier::straight(p(f64::NAN, 0.0, 0.0), p(2.0, 0.0, 0.0)),
        ];
        assert!(SolveControlPoints::new().execute(&mut curves).is_err());
    }
}
