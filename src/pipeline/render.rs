use crate::error::{GeometryError, Result};
use crate::instancing::{DrawArgs, Instance, TubeBuffers};
use crate::math::Matrix4;
use crate::tessellation::TriangleMesh;

/// Transform of the object a tube is attached to.
///
/// The core never reads these matrices; they are handed to the renderer
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    /// Object space to world space.
    pub local_to_world: Matrix4,
    /// World space to object space.
    pub world_to_local: Matrix4,
}

impl ObjectTransform {
    /// Creates a transform from both matrices as given.
    #[must_use]
    pub fn new(local_to_world: Matrix4, world_to_local: Matrix4) -> Self {
        Self {
            local_to_world,
            world_to_local,
        }
    }

    /// Creates a transform by inverting `local_to_world`.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is singular.
    pub fn from_local_to_world(local_to_world: Matrix4) -> Result<Self> {
        let world_to_local = local_to_world.try_inverse().ok_or_else(|| {
            GeometryError::Degenerate("object transform is not invertible".into())
        })?;
        Ok(Self::new(local_to_world, world_to_local))
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::new(Matrix4::identity(), Matrix4::identity())
    }
}

/// Everything the renderer needs for one instanced tube draw.
#[derive(Debug, Clone, Copy)]
pub struct RenderPacket<'a> {
    /// Cross-section mesh drawn for every instance.
    pub mesh: &'a TriangleMesh,
    /// One record per curve step.
    pub instances: &'a [Instance],
    /// Indirect draw arguments matching `mesh` and `instances`.
    pub args: DrawArgs,
    /// Cross-section radius.
    pub volume: f64,
    /// Transform of the object the tube is attached to.
    pub transform: ObjectTransform,
}

impl<'a> RenderPacket<'a> {
    pub(crate) fn new(buffers: &'a TubeBuffers, volume: f64, transform: ObjectTransform) -> Self {
        Self {
            mesh: buffers.mesh(),
            instances: buffers.instances(),
            args: buffers.args(),
            volume,
            transform,
        }
    }

    /// Returns the instance array as raw bytes.
    #[must_use]
    pub fn instance_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.instances)
    }
}
