mod cross_section;
mod sample_instances;

pub use cross_section::{ExtrusionAxis, TessellateCrossSection, MAX_SIDES};
pub use sample_instances::{SampleInstances, MAX_INSTANCES};

use crate::math::{Point2, Point3, Vector3};

/// A triangle mesh with per-vertex attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangle indices, three per triangle.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len() * 3
    }

    /// Returns the indices as a flat list.
    #[must_use]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }
}
