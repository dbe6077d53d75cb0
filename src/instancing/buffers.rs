//! Plain-old-data records handed to the instanced draw call.
//!
//! All types are `#[repr(C)]` with 4-byte scalar fields and no implicit
//! padding, so slices of them can be reinterpreted as bytes with
//! [`bytemuck::cast_slice`].
//!
//! # Memory Layout
//!
//! - [`Instance`]: 48 bytes (4 x vec3)
//! - [`DrawArgs`]: 20 bytes (5 x u32/i32)
//! - [`MeshVertex`]: 32 bytes (vec3 + vec3 + vec2)

use bytemuck::{Pod, Zeroable};

use crate::math::{Point2, Point3, Vector3};

#[allow(clippy::cast_possible_truncation)]
fn to_f32(v: &Vector3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

/// One discretized step of a curve segment.
///
/// Orientations are compact scaled-axis rotations (axis times angle in
/// radians) rather than matrices, to keep the per-instance payload small.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Instance {
    /// Curve point at the start of the step.
    pub start_pos: [f32; 3],
    /// Curve point at the end of the step.
    pub end_pos: [f32; 3],
    /// Rotation at the start of the step.
    pub start_orientation: [f32; 3],
    /// Rotation at the end of the step.
    pub end_orientation: [f32; 3],
}

impl Instance {
    /// Creates an instance from double precision samples.
    #[must_use]
    pub fn new(
        start_pos: &Point3,
        end_pos: &Point3,
        start_orientation: &Vector3,
        end_orientation: &Vector3,
    ) -> Self {
        Self {
            start_pos: to_f32(&start_pos.coords),
            end_pos: to_f32(&end_pos.coords),
            start_orientation: to_f32(start_orientation),
            end_orientation: to_f32(end_orientation),
        }
    }
}

/// Arguments of an indexed indirect draw.
///
/// Field order matches the `DrawIndexedIndirect` argument layout shared by
/// the common graphics APIs.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawArgs {
    /// Indices drawn per instance (the cross-section index count).
    pub index_count_per_instance: u32,
    /// Number of instances drawn.
    pub instance_count: u32,
    /// First index read from the index buffer.
    pub start_index_location: u32,
    /// Value added to each index before reading a vertex.
    pub base_vertex_location: i32,
    /// First instance read from the instance buffer.
    pub start_instance_location: u32,
}

impl DrawArgs {
    /// Creates draw arguments starting at the beginning of both buffers.
    #[must_use]
    pub const fn new(index_count_per_instance: u32, instance_count: u32) -> Self {
        Self {
            index_count_per_instance,
            instance_count,
            start_index_location: 0,
            base_vertex_location: 0,
            start_instance_location: 0,
        }
    }
}

/// Interleaved cross-section vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in mesh space.
    pub position: [f32; 3],
    /// Unit radial normal.
    pub normal: [f32; 3],
    /// Ring index and angle in radians.
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Creates a vertex from double precision attributes.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(position: &Point3, normal: &Vector3, uv: &Point2) -> Self {
        Self {
            position: to_f32(&position.coords),
            normal: to_f32(normal),
            uv: [uv.x as f32, uv.y as f32],
        }
    }
}
