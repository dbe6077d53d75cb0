use thiserror::Error;

/// Top-level error type for the Tubelis geometry core.
#[derive(Debug, Error)]
pub enum TubelisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },

    #[error("invalid bounds: {0}")]
    InvalidBounds(String),
}

/// Errors raised by the control point solver.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("spline has no segments")]
    NoSegments,

    #[error("at least {min} waypoints are required, got {actual}")]
    TooFewWaypoints { min: usize, actual: usize },

    #[error("segment {index} does not start at the end of the previous segment")]
    Disconnected { index: usize },
}

/// Errors related to tessellation and instance sampling.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Errors raised while validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("option `{option}` = {value} is below the minimum {min}")]
    OutOfRange {
        option: &'static str,
        value: f64,
        min: f64,
    },

    #[error("option `{option}` = {value} is above the maximum {max}")]
    AboveMax {
        option: &'static str,
        value: f64,
        max: f64,
    },

    #[error("option `{option}` = {value} must be positive")]
    NotPositive { option: &'static str, value: f64 },

    #[error("option `{option}` must be finite")]
    NonFinite { option: &'static str },
}

/// Convenience type alias for results using [`TubelisError`].
pub type Result<T> = std::result::Result<T, TubelisError>;
