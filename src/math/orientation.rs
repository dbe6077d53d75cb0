use std::f64::consts::PI;

use super::{perpendicular_dir, Vector3, TOLERANCE};

/// Encodes the rotation between `tangent` and a fixed `reference` axis as a
/// compact scaled axis (`axis * angle`, radians).
///
/// The axis is `tangent x reference` and the angle is the unsigned angle between
/// the two directions, so the encoded rotation carries `tangent` onto
/// `reference`. Its negation carries the reference (the extrusion axis of the
/// cross-section mesh) onto the tangent.
///
/// Singular cases never produce non-finite output:
/// - a zero-length tangent yields the zero vector,
/// - a tangent parallel to the reference yields the zero vector,
/// - a tangent anti-parallel to the reference yields a half turn about a
///   fixed axis perpendicular to the reference.
#[must_use]
pub fn axis_angle_to(tangent: &Vector3, reference: &Vector3) -> Vector3 {
    let tangent_len = tangent.norm();
    let reference_len = reference.norm();
    if tangent_len < TOLERANCE || reference_len < TOLERANCE {
        return Vector3::zeros();
    }
    let tangent = tangent / tangent_len;
    let reference = reference / reference_len;

    let axis = tangent.cross(&reference);
    let axis_len = axis.norm();
    if axis_len < TOLERANCE {
        if tangent.dot(&reference) > 0.0 {
            return Vector3::zeros();
        }
        tracing::trace!("tangent anti-parallel to reference axis, using fallback axis");
        return perpendicular_dir(&reference) * PI;
    }

    axis / axis_len * reference.angle(&tangent)
}
