pub mod buffers;
mod tube_buffers;

pub use buffers::{DrawArgs, Instance, MeshVertex};
pub use tube_buffers::{TubeBuffers, CROSS_SECTION_HALF_HEIGHT};
