use crate::error::{Result, TessellationError};
use crate::geometry::curve::Curve;
use crate::tessellation::{ExtrusionAxis, SampleInstances, TessellateCrossSection, TriangleMesh};

use super::{DrawArgs, Instance, MeshVertex};

/// Longitudinal half extent of the cross-section mesh.
pub const CROSS_SECTION_HALF_HEIGHT: f64 = 0.5;

/// The cross-section mesh, instance array and draw arguments of one tube,
/// always derived together.
///
/// There is no way to update one part in place: a configuration change
/// builds a new `TubeBuffers` and replaces the old one wholesale, which drops
/// every previous allocation at once.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeBuffers {
    mesh: TriangleMesh,
    instances: Vec<Instance>,
    args: DrawArgs,
}

impl TubeBuffers {
    /// Tessellates the cross-section and samples every curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `mesh_quality` is outside `3..=MAX_SIDES`,
    /// `curve_subdivision == 0`, or the instance count exceeds
    /// `MAX_INSTANCES`. Counts are checked before anything is allocated.
    pub fn build<C: Curve>(
        curves: &[C],
        mesh_quality: u32,
        curve_subdivision: u32,
        axis: ExtrusionAxis,
    ) -> Result<Self> {
        let sampler = SampleInstances::new(curve_subdivision, axis);
        let instance_count = sampler.checked_instance_count(curves.len())?;

        let mesh =
            TessellateCrossSection::new(mesh_quality, CROSS_SECTION_HALF_HEIGHT, axis).execute()?;
        let instances = sampler.execute(curves)?;

        let index_count = u32::try_from(mesh.index_count()).map_err(|_| {
            TessellationError::InvalidParameters("cross-section index count exceeds u32".into())
        })?;

        tracing::debug!(
            segments = curves.len(),
            sides = mesh_quality,
            subdivision = curve_subdivision,
            instances = instance_count,
            indices = index_count,
            "built tube buffers"
        );

        Ok(Self {
            mesh,
            instances,
            args: DrawArgs::new(index_count, instance_count),
        })
    }

    /// Returns the cross-section mesh.
    #[must_use]
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Returns the instance records.
    #[must_use]
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Returns the indirect draw arguments.
    #[must_use]
    pub fn args(&self) -> DrawArgs {
        self.args
    }

    /// Returns the instance array as raw bytes.
    #[must_use]
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Returns the draw arguments as raw bytes.
    #[must_use]
    pub fn args_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.args)
    }

    /// Returns the cross-section as interleaved vertices.
    #[must_use]
    pub fn vertex_data(&self) -> Vec<MeshVertex> {
        self.mesh
            .vertices
            .iter()
            .zip(&self.mesh.normals)
            .zip(&self.mesh.uvs)
            .map(|((p, n), uv)| MeshVertex::new(p, n, uv))
            .collect()
    }

    /// Returns the cross-section indices as a flat list.
    #[must_use]
    pub fn index_data(&self) -> Vec<u32> {
        self.mesh.flat_indices()
    }

    /// Returns whether the draw arguments describe the current mesh and
    /// instance array.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.args.index_count_per_instance as usize == self.mesh.index_count()
            && self.args.instance_count as usize == self.instances.len()
    }
}
