use thiserror::Error;

/// Errors originating from the navigation and parameter core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid iteration count: {0} (must be >= 1)")]
    InvalidIterations(u32),

    #[error("invalid escape threshold: {0} (must be positive and finite)")]
    InvalidThreshold(f64),

    #[error("invalid parameter {name}: {value} (must be finite)")]
    InvalidParam { name: &'static str, value: f64 },

    #[error("degenerate viewport: {width}×{height}")]
    DegenerateViewport { width: f64, height: f64 },

    #[error("color ramp needs at least {min} stops, got {got}")]
    RampTooShort { min: usize, got: usize },

    #[error("timer already running")]
    TimerActive,

    #[error("invalid timer period: {0:?}")]
    InvalidPeriod(std::time::Duration),
}
