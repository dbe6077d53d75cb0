use crate::error::{ConfigError, Result};
use crate::geometry::Bounds;
use crate::math::Point3;
use crate::tessellation::{ExtrusionAxis, MAX_INSTANCES, MAX_SIDES};

/// Smallest side count that still closes a ring.
pub const MIN_MESH_QUALITY: u32 = 3;

fn check_min(option: &'static str, value: u32, min: u32) -> Result<()> {
    if value < min {
        return Err(ConfigError::OutOfRange {
            option,
            value: f64::from(value),
            min: f64::from(min),
        }
        .into());
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn check_max(option: &'static str, value: u64, max: u32) -> Result<()> {
    if value > u64::from(max) {
        return Err(ConfigError::AboveMax {
            option,
            value: value as f64,
            max: f64::from(max),
        }
        .into());
    }
    Ok(())
}

fn check_width(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite {
            option: "spline_width",
        }
        .into());
    }
    if value <= 0.0 {
        return Err(ConfigError::NotPositive {
            option: "spline_width",
            value,
        }
        .into());
    }
    Ok(())
}

fn check_point(option: &'static str, point: &Point3) -> Result<()> {
    if point.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { option }.into())
    }
}

/// Options of a tube following a random spline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TubeConfig {
    /// Sides of the cross-section ring.
    pub mesh_quality: u32,
    /// Instances per spline segment.
    pub curve_subdivision: u32,
    /// Number of spline segments.
    pub spline_pieces: u32,
    /// Cross-section radius, forwarded to the renderer.
    pub spline_width: f64,
    /// Box the random waypoints are drawn from.
    pub bounds: Bounds,
    /// Seed of the waypoint generator.
    pub seed: u64,
    /// Extrusion axis of the cross-section and orientation reference.
    pub extrusion: ExtrusionAxis,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            mesh_quality: 12,
            curve_subdivision: 4,
            spline_pieces: 100,
            spline_width: 0.5,
            bounds: Bounds::default(),
            seed: 314_159_265,
            extrusion: ExtrusionAxis::Z,
        }
    }
}

impl TubeConfig {
    /// Sets the cross-section side count.
    #[must_use]
    pub fn with_mesh_quality(mut self, mesh_quality: u32) -> Self {
        self.mesh_quality = mesh_quality;
        self
    }

    /// Sets the instances per segment.
    #[must_use]
    pub fn with_curve_subdivision(mut self, curve_subdivision: u32) -> Self {
        self.curve_subdivision = curve_subdivision;
        self
    }

    /// Sets the number of spline segments.
    #[must_use]
    pub fn with_spline_pieces(mut self, spline_pieces: u32) -> Self {
        self.spline_pieces = spline_pieces;
        self
    }

    /// Sets the cross-section radius.
    #[must_use]
    pub fn with_spline_width(mut self, spline_width: f64) -> Self {
        self.spline_width = spline_width;
        self
    }

    /// Sets the waypoint bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the waypoint seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the extrusion axis.
    #[must_use]
    pub fn with_extrusion(mut self, extrusion: ExtrusionAxis) -> Self {
        self.extrusion = extrusion;
        self
    }

    /// Checks every option.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        check_min("mesh_quality", self.mesh_quality, MIN_MESH_QUALITY)?;
        check_max("mesh_quality", self.mesh_quality.into(), MAX_SIDES)?;
        check_min("curve_subdivision", self.curve_subdivision, 1)?;
        check_min("spline_pieces", self.spline_pieces, 1)?;
        check_max(
            "spline_pieces * curve_subdivision",
            u64::from(self.spline_pieces) * u64::from(self.curve_subdivision),
            MAX_INSTANCES,
        )?;
        check_width(self.spline_width)?;
        self.bounds.validate()
    }

    /// Returns whether switching to `other` needs fresh random waypoints.
    #[must_use]
    pub fn waypoints_differ(&self, other: &Self) -> bool {
        self.spline_pieces != other.spline_pieces
            || self.bounds != other.bounds
            || self.seed != other.seed
    }
}

/// Options of a tube following one user-specified curve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurveConfig {
    /// First endpoint.
    pub start: Point3,
    /// Handle leaving `start`.
    pub control_point0: Point3,
    /// Handle entering `end`.
    pub control_point1: Point3,
    /// Last endpoint.
    pub end: Point3,
    /// Sides of the cross-section ring.
    pub mesh_quality: u32,
    /// Instances along the curve.
    pub curve_subdivision: u32,
    /// Cross-section radius, forwarded to the renderer.
    pub spline_width: f64,
    /// Extrusion axis of the cross-section and orientation reference.
    pub extrusion: ExtrusionAxis,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            start: Point3::origin(),
            control_point0: Point3::origin(),
            control_point1: Point3::origin(),
            end: Point3::origin(),
            mesh_quality: 12,
            curve_subdivision: 4,
            spline_width: 0.5,
            extrusion: ExtrusionAxis::Y,
        }
    }
}

impl CurveConfig {
    /// Creates a configuration for the given control points with default
    /// tessellation options.
    #[must_use]
    pub fn new(start: Point3, control_point0: Point3, control_point1: Point3, end: Point3) -> Self {
        Self {
            start,
            control_point0,
            control_point1,
            end,
            ..Self::default()
        }
    }

    /// Sets the cross-section side count.
    #[must_use]
    pub fn with_mesh_quality(mut self, mesh_quality: u32) -> Self {
        self.mesh_quality = mesh_quality;
        self
    }

    /// Sets the number of instances along the curve.
    #[must_use]
    pub fn with_curve_subdivision(mut self, curve_subdivision: u32) -> Self {
        self.curve_subdivision = curve_subdivision;
        self
    }

    /// Sets the cross-section radius.
    #[must_use]
    pub fn with_spline_width(mut self, spline_width: f64) -> Self {
        self.spline_width = spline_width;
        self
    }

    /// Sets the extrusion axis.
    #[must_use]
    pub fn with_extrusion(mut self, extrusion: ExtrusionAxis) -> Self {
        self.extrusion = extrusion;
        self
    }

    /// Checks every option.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        check_point("start", &self.start)?;
        check_point("control_point0", &self.control_point0)?;
        check_point("control_point1", &self.control_point1)?;
        check_point("end", &self.end)?;
        check_min("mesh_quality", self.mesh_quality, MIN_MESH_QUALITY)?;
        check_max("mesh_quality", self.mesh_quality.into(), MAX_SIDES)?;
        check_min("curve_subdivision", self.curve_subdivision, 1)?;
        check_max("curve_subdivision", self.curve_subdivision.into(), MAX_INSTANCES)?;
        check_width(self.spline_width)
    }
}
