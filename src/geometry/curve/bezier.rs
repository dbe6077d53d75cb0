use std::f64::consts::FRAC_PI_2;

use crate::math::{axis_angle_to, Point3, UnitQuaternion, Vector3, TOLERANCE};

use super::{AttributePair, Curve, CurveDomain, Interpolate};

/// A cubic Bézier segment with an auxiliary attribute blended along it.
///
/// `B(t) = (1-t)^3 start + 3(1-t)^2 t cp0 + 3(1-t) t^2 cp1 + t^3 end`
///
/// The attribute type `A` carries whatever the renderer needs per segment end:
/// an up vector (the default), a [`ScaleColor`](super::ScaleColor) pair, or a
/// [`UnitQuaternion`] frame.
///
/// Control points of a segment that belongs to a spline are owned by the
/// solver and get overwritten when it runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBezier<A = Vector3> {
    /// Point at `t = 0`.
    pub start: Point3,
    /// Handle leaving `start`.
    pub control_point0: Point3,
    /// Handle entering `end`.
    pub control_point1: Point3,
    /// Point at `t = 1`.
    pub end: Point3,
    /// Auxiliary values at both ends.
    pub attributes: AttributePair<A>,
}

impl CubicBezier<Vector3> {
    /// Creates a segment from explicit control points with `+Y` as the up
    /// vector at both ends.
    #[must_use]
    pub fn new(start: Point3, control_point0: Point3, control_point1: Point3, end: Point3) -> Self {
        Self::with_attributes(
            start,
            control_point0,
            control_point1,
            end,
            AttributePair::uniform(Vector3::y()),
        )
    }

    /// Creates a straight segment whose control points collapse onto their
    /// respective endpoints.
    #[must_use]
    pub fn straight(start: Point3, end: Point3) -> Self {
        Self::new(start, start, end, end)
    }

    /// Returns the interpolated up vector at `t`.
    #[must_use]
    pub fn up(&self, t: f64) -> Vector3 {
        self.attributes.at(t)
    }
}

impl Default for CubicBezier<Vector3> {
    fn default() -> Self {
        let origin = Point3::origin();
        Self::new(origin, origin, origin, origin)
    }
}

impl<A: Interpolate> CubicBezier<A> {
    /// Creates a segment from explicit control points and endpoint attributes.
    #[must_use]
    pub fn with_attributes(
        start: Point3,
        control_point0: Point3,
        control_point1: Point3,
        end: Point3,
        attributes: AttributePair<A>,
    ) -> Self {
        Self {
            start,
            control_point0,
            control_point1,
            end,
            attributes,
        }
    }

    /// Creates a straight segment carrying the given endpoint attributes.
    #[must_use]
    pub fn straight_with(start: Point3, end: Point3, attributes: AttributePair<A>) -> Self {
        Self::with_attributes(start, start, end, end, attributes)
    }

    /// Replaces both inner control points.
    pub fn set_control_points(&mut self, control_point0: Point3, control_point1: Point3) {
        self.control_point0 = control_point0;
        self.control_point1 = control_point1;
    }

    /// Returns the auxiliary attribute at `t`.
    #[must_use]
    pub fn attribute(&self, t: f64) -> A {
        self.attributes.at(t)
    }

    /// Raw first derivative at `t`, scaled by one third.
    ///
    /// `-(1-t)^2 start + (3(1-t)^2 - 2(1-t)) cp0 + (-3t^2 + 2t) cp1 + t^2 end`
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector3 {
        let omt = 1.0 - t;
        let omt2 = omt * omt;
        let t2 = t * t;
        self.start.coords * -omt2
            + self.control_point0.coords * (3.0 * omt2 - 2.0 * omt)
            + self.control_point1.coords * (-3.0 * t2 + 2.0 * t)
            + self.end.coords * t2
    }

    /// Returns the unit normal at `t`: the derivative crossed with the normal
    /// of the plane spanned by the two end handles.
    ///
    /// Zero when either handle is collapsed, the handles are parallel, or the
    /// derivative lies along the handle plane normal.
    #[must_use]
    pub fn normal(&self, t: f64) -> Vector3 {
        let handles = (self.control_point0 - self.start).cross(&(self.end - self.control_point1));
        let normal = handles.cross(&self.derivative(t));
        let len = normal.norm();
        if len < TOLERANCE {
            return Vector3::zeros();
        }
        normal / len
    }

    /// Returns the rotation that carries local `+Y` onto the tangent at `t`,
    /// with the roll fixed by `tangent x Z`.
    #[must_use]
    pub fn orient(&self, t: f64) -> UnitQuaternion {
        let tangent = self.tangent(t);
        if tangent.norm() < TOLERANCE {
            return UnitQuaternion::identity();
        }
        let mut up = tangent.cross(&Vector3::z());
        if up.norm() < TOLERANCE {
            up = Vector3::y();
        }
        let look = UnitQuaternion::face_towards(&tangent, &up);
        look * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2)
    }

    /// Compact scaled-axis rotation between the tangent at `t` and `reference`.
    ///
    /// See [`axis_angle_to`] for the encoding and its singular cases.
    #[must_use]
    pub fn orientation(&self, t: f64, reference: &Vector3) -> Vector3 {
        axis_angle_to(&self.tangent(t), reference)
    }

    /// Returns the two handle segments `start -> cp0` and `cp1 -> end`.
    #[must_use]
    pub fn control_polygon(&self) -> [(Point3, Point3); 2] {
        [
            (self.start, self.control_point0),
            (self.control_point1, self.end),
        ]
    }
}

impl<A: Interpolate> Curve for CubicBezier<A> {
    fn point(&self, t: f64) -> Point3 {
        let omt = 1.0 - t;
        let omt2 = omt * omt;
        let t2 = t * t;
        Point3::from(
            self.start.coords * (omt2 * omt)
                + self.control_point0.coords * (3.0 * omt2 * t)
                + self.control_point1.coords * (3.0 * omt * t2)
                + self.end.coords * (t2 * t),
        )
    }

    /// Unit tangent at `t`.
    ///
    /// Where the derivative vanishes (a control point coincides with its
    /// endpoint, or a cusp) the chord direction `end - start` is returned
    /// instead, and the zero vector if the whole segment is a point.
    fn tangent(&self, t: f64) -> Vector3 {
        let derivative = self.derivative(t);
        let len = derivative.norm();
        if len >= TOLERANCE {
            return derivative / len;
        }

        let chord = self.end - self.start;
        let chord_len = chord.norm();
        tracing::trace!(t, chord_len, "degenerate derivative, falling back to chord");
        if chord_len < TOLERANCE {
            return Vector3::zeros();
        }
        chord / chord_len
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::ScaleColor;
    use crate::math::Vector4;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn arch() -> CubicBezier {
        CubicBezier::new(p(0.0, 0.0, 0.0), p(1.0, 2.0, 0.0), p(3.0, 2.0, 0.0), p(4.0, 0.0, 0.0))
    }

    #[test]
    fn endpoints_are_interpolated() {
        let c = arch();
        assert_relative_eq!(c.point(0.0), c.start);
        assert_relative_eq!(c.point(1.0), c.end);
    }

    #[test]
    fn midpoint_of_symmetric_arch() {
        let c = arch();
        assert_relative_eq!(c.point(0.5), p(2.0, 1.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn parameters_outside_domain_extrapolate() {
        let line = CubicBezier::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0));
        assert_relative_eq!(line.point(2.0), p(6.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(line.point(-1.0), p(-3.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn tangent_is_unit_length() {
        let c = arch();
        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            assert!((c.tangent(t).norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn tangent_follows_end_handles() {
        let c = arch();
        assert_relative_eq!(c.tangent(0.0), (c.control_point0 - c.start).normalize(), epsilon = 1e-12);
        assert_relative_eq!(c.tangent(1.0), (c.end - c.control_point1).normalize(), epsilon = 1e-12);
        assert_relative_eq!(c.tangent(0.5), Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn derivative_is_one_third_of_finite_difference() {
        let c = arch();
        let h = 1e-6;
        let fd = (c.point(0.3 + h) - c.point(0.3 - h)) / (2.0 * h);
        assert_relative_eq!(c.derivative(0.3) * 3.0, fd, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_tangent_uses_chord() {
        let c = CubicBezier::new(p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0));
        let expected = Vector3::new(1.0, 1.0, 1.0).normalize();
        assert_relative_eq!(c.tangent(0.0), expected, epsilon = 1e-12);
        assert_relative_eq!(c.tangent(1.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn point_curve_has_zero_tangent() {
        let c = CubicBezier::default();
        let t = c.tangent(0.5);
        assert!(t.iter().all(|v| v.is_finite()));
        assert_relative_eq!(t, Vector3::zeros());
    }

    #[test]
    fn straight_collapses_control_points() {
        let c = CubicBezier::straight(p(1.0, 2.0, 3.0), p(4.0, 5.0, 6.0));
        assert_eq!(c.control_point0, c.start);
        assert_eq!(c.control_point1, c.end);
        assert_relative_eq!(c.up(0.5), Vector3::y());
    }

    #[test]
    fn normal_is_perpendicular_to_tangent() {
        let c = CubicBezier::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(2.0, 1.0, 1.0), p(3.0, 0.0, 2.0));
        let n = c.normal(0.4);
        assert!((n.norm() - 1.0).abs() < 1e-12);
        assert!(n.dot(&c.tangent(0.4)).abs() < 1e-9);
    }

    #[test]
    fn normal_of_collapsed_handles_is_zero() {
        let c = CubicBezier::straight(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        assert_relative_eq!(c.normal(0.5), Vector3::zeros());
    }

    #[test]
    fn orient_maps_y_onto_tangent() {
        let c = arch();
        for t in [0.0, 0.25, 0.5, 0.9] {
            assert_relative_eq!(c.orient(t) * Vector3::y(), c.tangent(t), epsilon = 1e-9);
        }
    }

    #[test]
    fn orient_along_z_is_finite() {
        let c = CubicBezier::new(p(0.0, 0.0, 0.0), p(0.0, 0.0, 1.0), p(0.0, 0.0, 2.0), p(0.0, 0.0, 3.0));
        let q = c.orient(0.5);
        assert_relative_eq!(q * Vector3::y(), Vector3::z(), epsilon = 1e-9);
    }

    #[test]
    fn orientation_encodes_rotation_to_reference() {
        let c = arch();
        let r = c.orientation(0.0, &Vector3::z());
        let rot = UnitQuaternion::from_scaled_axis(r);
        assert_relative_eq!(rot * c.tangent(0.0), Vector3::z(), epsilon = 1e-9);
    }

    #[test]
    fn control_polygon_lists_handles() {
        let c = arch();
        let [a, b] = c.control_polygon();
        assert_eq!(a, (c.start, c.control_point0));
        assert_eq!(b, (c.control_point1, c.end));
    }

    #[test]
    fn scale_color_attribute() {
        let c = CubicBezier::with_attributes(
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(3.0, 0.0, 0.0),
            AttributePair::new(
                ScaleColor::new(0.5, Vector4::zeros()),
                ScaleColor::new(1.5, Vector4::new(1.0, 1.0, 1.0, 1.0)),
            ),
        );
        let mid = c.attribute(0.5);
        assert_relative_eq!(mid.scale, 1.0);
        assert_relative_eq!(mid.color, Vector4::new(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn set_control_points_mutates_in_place() {
        let mut c = CubicBezier::straight(p(0.0, 0.0, 0.0), p(3.0, 0.0, 0.0));
        c.set_control_points(p(1.0, 1.0, 0.0), p(2.0, 1.0, 0.0));
        assert_relative_eq!(c.point(0.5), p(1.5, 0.75, 0.0), epsilon = 1e-12);
    }
}
