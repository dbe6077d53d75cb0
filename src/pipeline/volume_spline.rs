use crate::error::Result;
use crate::geometry::Spline;
use crate::instancing::TubeBuffers;
use crate::math::Point3;
use crate::operations::creation::GenerateWaypoints;

use super::config::TubeConfig;
use super::render::{ObjectTransform, RenderPacket};

/// A tube following a C1 spline through random (or supplied) waypoints.
///
/// The object owns its spline, cross-section mesh, instances and draw
/// arguments. They are only ever rebuilt together: every successful change
/// replaces all of them, and a failed change leaves all of them as they were.
#[derive(Debug, Clone)]
pub struct VolumeSpline {
    config: TubeConfig,
    waypoints: Vec<Point3>,
    spline: Spline,
    buffers: TubeBuffers,
    transform: ObjectTransform,
}

impl VolumeSpline {
    /// Generates waypoints from the configured bounds and seed and builds the
    /// tube.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: TubeConfig) -> Result<Self> {
        config.validate()?;
        let waypoints = random_waypoints(&config)?;
        let (spline, buffers) = build(&config, &waypoints)?;
        Ok(Self {
            config,
            waypoints,
            spline,
            buffers,
            transform: ObjectTransform::default(),
        })
    }

    /// Builds the tube through explicit waypoints.
    ///
    /// `spline_pieces` is taken from the waypoint count; the bounds and seed
    /// of `config` are kept but unused until a later change asks for random
    /// waypoints again.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, fewer than 2
    /// waypoints are given, or a waypoint is not finite.
    pub fn with_waypoints(config: TubeConfig, waypoints: &[Point3]) -> Result<Self> {
        let config = config.with_spline_pieces(piece_count(waypoints));
        config.validate()?;
        let (spline, buffers) = build(&config, waypoints)?;
        Ok(Self {
            config,
            waypoints: waypoints.to_vec(),
            spline,
            buffers,
            transform: ObjectTransform::default(),
        })
    }

    /// Applies a new configuration.
    ///
    /// Returns `Ok(false)` without doing any work when `config` equals the
    /// current one. Otherwise everything is rebuilt; waypoints are drawn again
    /// only if the piece count, bounds or seed changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the new configuration is invalid. The previous
    /// state is kept in that case.
    pub fn reconfigure(&mut self, config: TubeConfig) -> Result<bool> {
        if config == self.config {
            return Ok(false);
        }
        config.validate()?;

        let fresh = if self.config.waypoints_differ(&config) {
            Some(random_waypoints(&config)?)
        } else {
            None
        };
        let waypoints = fresh.as_deref().unwrap_or(self.waypoints.as_slice());
        let (spline, buffers) = build(&config, waypoints)?;

        tracing::debug!(
            pieces = config.spline_pieces,
            new_waypoints = fresh.is_some(),
            "reconfigured volume spline"
        );
        if let Some(fresh) = fresh {
            self.waypoints = fresh;
        }
        self.config = config;
        self.spline = spline;
        self.buffers = buffers;
        Ok(true)
    }

    /// Replaces the waypoints and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 waypoints are given or a waypoint is
    /// not finite. The previous state is kept in that case.
    pub fn set_waypoints(&mut self, waypoints: &[Point3]) -> Result<()> {
        let config = self.config.clone().with_spline_pieces(piece_count(waypoints));
        config.validate()?;
        let (spline, buffers) = build(&config, waypoints)?;
        self.config = config;
        self.waypoints = waypoints.to_vec();
        self.spline = spline;
        self.buffers = buffers;
        Ok(())
    }

    /// Sets the object transform forwarded to the renderer.
    pub fn set_transform(&mut self, transform: ObjectTransform) {
        self.transform = transform;
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &TubeConfig {
        &self.config
    }

    /// Returns the waypoints the spline passes through.
    #[must_use]
    pub fn waypoints(&self) -> &[Point3] {
        &self.waypoints
    }

    /// Returns the solved spline.
    #[must_use]
    pub fn spline(&self) -> &Spline {
        &self.spline
    }

    /// Returns the derived mesh, instances and draw arguments.
    #[must_use]
    pub fn buffers(&self) -> &TubeBuffers {
        &self.buffers
    }

    /// Returns the object transform.
    #[must_use]
    pub fn transform(&self) -> &ObjectTransform {
        &self.transform
    }

    /// Returns the data for one instanced draw.
    #[must_use]
    pub fn packet(&self) -> RenderPacket<'_> {
        RenderPacket::new(&self.buffers, self.config.spline_width, self.transform)
    }
}

fn random_waypoints(config: &TubeConfig) -> Result<Vec<Point3>> {
    GenerateWaypoints::new(config.bounds, config.spline_pieces as usize + 1, config.seed).execute()
}

fn piece_count(waypoints: &[Point3]) -> u32 {
    u32::try_from(waypoints.len().saturating_sub(1)).unwrap_or(u32::MAX)
}

fn build(config: &TubeConfig, waypoints: &[Point3]) -> Result<(Spline, TubeBuffers)> {
    let mut spline = Spline::from_waypoints(waypoints)?;
    spline.solve()?;
    let buffers = TubeBuffers::build(
        spline.curves(),
        config.mesh_quality,
        config.curve_subdivision,
        config.extrusion,
    )?;
    Ok((spline, buffers))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::instancing::DrawArgs;
    use crate::math::{Matrix4, Vector3};

    fn small() -> TubeConfig {
        TubeConfig::default()
            .with_spline_pieces(6)
            .with_curve_subdivision(3)
            .with_mesh_quality(5)
    }

    #[test]
    fn build_sizes_follow_config() {
        let tube = VolumeSpline::new(small()).unwrap();
        assert_eq!(tube.waypoints().len(), 7);
        assert_eq!(tube.spline().segment_count(), 6);
        assert_eq!(tube.buffers().instances().len(), 18);
        assert_eq!(tube.buffers().args(), DrawArgs::new(30, 18));
    }

    #[test]
    fn waypoints_stay_in_bounds() {
        let bounds = Bounds::new(Point3::new(5.0, 0.0, -5.0), Vector3::new(1.0, 2.0, 3.0));
        let tube = VolumeSpline::new(small().with_bounds(bounds)).unwrap();
        assert!(tube.waypoints().iter().all(|p| bounds.contains(p)));
    }

    #[test]
    fn same_seed_same_tube() {
        let a = VolumeSpline::new(small()).unwrap();
        let b = VolumeSpline::new(small()).unwrap();
        assert_eq!(a.spline(), b.spline());
        assert_eq!(a.buffers(), b.buffers());
    }

    #[test]
    fn unchanged_config_does_nothing() {
        let mut tube = VolumeSpline::new(small()).unwrap();
        assert!(!tube.reconfigure(small()).unwrap());
    }

    #[test]
    fn mesh_quality_change_keeps_waypoints() {
        let mut tube = VolumeSpline::new(small()).unwrap();
        let before = tube.waypoints().to_vec();
        assert!(tube.reconfigure(small().with_mesh_quality(8)).unwrap());
        assert_eq!(tube.waypoints(), before.as_slice());
        assert_eq!(tube.buffers().args().index_count_per_instance, 48);
        assert!(tube.buffers().is_consistent());
    }

    #[test]
    fn subdivision_change_resizes_instances() {
        let mut tube = VolumeSpline::new(small()).unwrap();
        tube.reconfigure(small().with_curve_subdivision(10)).unwrap();
        assert_eq!(tube.buffers().instances().len(), 60);
        assert_eq!(tube.buffers().args().instance_count, 60);
    }

    #[test]
    fn seed_change_draws_new_waypoints() {
        let mut tube = VolumeSpline::new(small()).unwrap();
        let before = tube.waypoints().to_vec();
        tube.reconfigure(small().with_seed(42)).unwrap();
        assert_ne!(tube.waypoints(), before.as_slice());
    }

    #[test]
    fn invalid_reconfigure_keeps_state() {
        let mut tube = VolumeSpline::new(small()).unwrap();
        let before = tube.buffers().clone();
        assert!(tube.reconfigure(small().with_mesh_quality(2)).is_err());
        assert_eq!(tube.buffers(), &before);
        assert_eq!(tube.config(), &small());
    }

    #[test]
    fn explicit_waypoints() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ];
        let mut tube = VolumeSpline::with_waypoints(small(), &points).unwrap();
        assert_eq!(tube.config().spline_pieces, 2);
        assert_eq!(tube.buffers().instances().len(), 6);
        assert!(tube.spline().is_c1_continuous(1e-9));

        tube.set_waypoints(&points[..2]).unwrap();
        assert_eq!(tube.spline().segment_count(), 1);
        assert!(tube.set_waypoints(&points[..1]).is_err());
        assert_eq!(tube.spline().segment_count(), 1);
    }

    #[test]
    fn non_finite_waypoints_never_reach_instances() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(f64::NAN, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert!(VolumeSpline::with_waypoints(TubeConfig::default(), &points).is_err());

        let mut tube = VolumeSpline::new(small()).unwrap();
        let before = tube.buffers().clone();
        assert!(tube.set_waypoints(&points).is_err());
        assert_eq!(tube.buffers(), &before);
        assert_eq!(tube.config().spline_pieces, 6);
    }

    #[test]
    fn transform_is_forwarded() {
        let mut tube = VolumeSpline::new(small()).unwrap();
        let m = Matrix4::new_scaling(2.0);
        tube.set_transform(ObjectTransform::from_local_to_world(m).unwrap());
        let packet = tube.packet();
        assert_eq!(packet.transform.local_to_world, m);
        assert_eq!(packet.args, tube.buffers().args());
        assert!((packet.volume - 0.5).abs() < f64::EPSILON);
        assert_eq!(packet.instance_bytes().len(), 18 * 48);
    }
}
