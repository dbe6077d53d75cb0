pub mod error;
pub mod geometry;
pub mod instancing;
pub mod math;
pub mod operations;
pub mod pipeline;
pub mod tessellation;

pub use error::{Result, TubelisError};
