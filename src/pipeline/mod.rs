mod config;
mod render;
mod volume_curve;
mod volume_spline;

pub use config::{CurveConfig, TubeConfig, MIN_MESH_QUALITY};
pub use render::{ObjectTransform, RenderPacket};
pub use volume_curve::VolumeCurve;
pub use volume_spline::VolumeSpline;
