pub mod animation;
pub mod complex;
pub mod controls;
pub mod coords;
pub mod error;
pub mod input;
pub mod params;
pub mod quad;
pub mod ramp;
pub mod session;
pub mod viewport;

// Re-export primary types for convenience.
pub use animation::{auto_params, wall_clock_seconds, Interval};
pub use complex::Complex;
pub use controls::{AnimationMode, FieldValues, ParamController};
pub use coords::{to_plane, CanvasGeometry, LocalPoint, ScreenPoint};
pub use error::CoreError;
pub use input::InputController;
pub use params::{FractalType, FrameUniforms, ParamInput, RenderParams};
pub use quad::{build_quad, PlaneRect, QuadVertex, BASE_CORNERS, SCREEN_CORNERS};
pub use ramp::{ColorRamp, Rgb};
pub use session::{Frame, Session, SessionOptions};
pub use viewport::{zoom_multiplier, ViewportState, MAX_ZOOM, MIN_ZOOM};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
