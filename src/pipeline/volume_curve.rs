use crate::error::Result;
use crate::geometry::CubicBezier;
use crate::instancing::TubeBuffers;

use super::config::CurveConfig;
use super::render::{ObjectTransform, RenderPacket};

/// A tube following a single user-specified Bézier segment.
#[derive(Debug, Clone)]
pub struct VolumeCurve {
    config: CurveConfig,
    curve: CubicBezier,
    buffers: TubeBuffers,
    transform: ObjectTransform,
}

impl VolumeCurve {
    /// Builds the tube.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: CurveConfig) -> Result<Self> {
        let (curve, buffers) = build(&config)?;
        Ok(Self {
            config,
            curve,
            buffers,
            transform: ObjectTransform::default(),
        })
    }

    /// Applies a new configuration, rebuilding everything if it differs from
    /// the current one.
    ///
    /// # Errors
    ///
    /// Returns an error if the new configuration is invalid. The previous
    /// state is kept in that case.
    pub fn reconfigure(&mut self, config: CurveConfig) -> Result<bool> {
        if config == self.config {
            return Ok(false);
        }
        let (curve, buffers) = build(&config)?;
        tracing::debug!(
            subdivision = config.curve_subdivision,
            sides = config.mesh_quality,
            "reconfigured volume curve"
        );
        self.config = config;
        self.curve = curve;
        self.buffers = buffers;
        Ok(true)
    }

    /// Sets the object transform forwarded to the renderer.
    pub fn set_transform(&mut self, transform: ObjectTransform) {
        self.transform = transform;
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Returns the curve.
    #[must_use]
    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    /// Returns the derived mesh, instances and draw arguments.
    #[must_use]
    pub fn buffers(&self) -> &TubeBuffers {
        &self.buffers
    }

    /// Returns the data for one instanced draw.
    #[must_use]
    pub fn packet(&self) -> RenderPacket<'_> {
        RenderPacket::new(&self.buffers, self.config.spline_width, self.transform)
    }
}

fn build(config: &CurveConfig) -> Result<(CubicBezier, TubeBuffers)> {
    config.validate()?;
    let curve = CubicBezier::new(
        config.start,
        config.control_point0,
        config.control_point1,
        config.end,
    );
    let buffers = TubeBuffers::build(
        std::slice::from_ref(&curve),
        config.mesh_quality,
        config.curve_subdivision,
        config.extrusion,
    )?;
    Ok((curve, buffers))
}
