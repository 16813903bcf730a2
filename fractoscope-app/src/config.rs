use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, error, info, warn};

use fractoscope_core::{
    ColorRamp, FractalType, RenderParams, Rgb, SessionOptions,
};

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

/// Read-only startup settings. Every field may be omitted from the file.
///
/// The viewer never writes this file back; view state is not persisted
/// between runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    /// Gap in points kept around the canvas on every side.
    #[serde(default = "default_canvas_margin")]
    pub canvas_margin: f32,
    /// Wheel delta scale used by the zoom multiplier.
    #[serde(default = "default_zoom_sensitivity")]
    pub zoom_sensitivity: f64,
    #[serde(default = "default_animation_interval_ms")]
    pub animation_interval_ms: u64,
    /// Fractal shown at start-up (`"mandelbrot"` or `"julia"`).
    #[serde(default)]
    pub start_type: FractalType,
    #[serde(default = "default_iterations")]
    pub default_iterations: u32,
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,
    #[serde(default = "default_color_ramp")]
    pub color_ramp: Vec<Rgb>,
}

fn default_window_width() -> f32 {
    1200.0
}
fn default_window_height() -> f32 {
    800.0
}
fn default_canvas_margin() -> f32 {
    8.0
}
fn default_zoom_sensitivity() -> f64 {
    fractoscope_core::viewport::DEFAULT_ZOOM_SENSITIVITY
}
fn default_animation_interval_ms() -> u64 {
    fractoscope_core::animation::DEFAULT_PERIOD.as_millis() as u64
}
fn default_iterations() -> u32 {
    RenderParams::DEFAULT_ITERATIONS
}
fn default_threshold() -> f64 {
    RenderParams::DEFAULT_THRESHOLD
}
fn default_color_ramp() -> Vec<Rgb> {
    fractoscope_core::ramp::default_stops()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            canvas_margin: default_canvas_margin(),
            zoom_sensitivity: default_zoom_sensitivity(),
            animation_interval_ms: default_animation_interval_ms(),
            start_type: FractalType::default(),
            default_iterations: default_iterations(),
            default_threshold: default_threshold(),
            color_ramp: default_color_ramp(),
        }
    }
}

impl ViewerConfig {
    /// Load from `fractoscope.json` next to the executable, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        Self::load_from(&crate::app_dir::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    error!("Failed to parse config: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read config file: {e}");
                Self::default()
            }
        }
    }

    /// Parse and sanitize a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace out-of-range values with their defaults, logging each one.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.window_width.is_finite() && self.window_width > 0.0) {
            warn!(value = self.window_width, "Invalid window_width, using default");
            self.window_width = defaults.window_width;
        }
        if !(self.window_height.is_finite() && self.window_height > 0.0) {
            warn!(value = self.window_height, "Invalid window_height, using default");
            self.window_height = defaults.window_height;
        }
        if !(self.canvas_margin.is_finite() && self.canvas_margin >= 0.0) {
            warn!(value = self.canvas_margin, "Invalid canvas_margin, using default");
            self.canvas_margin = defaults.canvas_margin;
        }
        if !(self.zoom_sensitivity.is_finite() && self.zoom_sensitivity > 0.0) {
            warn!(value = self.zoom_sensitivity, "Invalid zoom_sensitivity, using default");
            self.zoom_sensitivity = defaults.zoom_sensitivity;
        }
        if self.animation_interval_ms == 0 {
            warn!("Invalid animation_interval_ms, using default");
            self.animation_interval_ms = defaults.animation_interval_ms;
        }
        if let Err(e) = RenderParams::new(
            self.start_type,
            self.default_iterations,
            self.default_threshold,
        ) {
            warn!("Invalid default parameters ({e}), using defaults");
            self.default_iterations = defaults.default_iterations;
            self.default_threshold = defaults.default_threshold;
        }
        if let Err(e) = ColorRamp::new(self.color_ramp.clone()) {
            warn!("Invalid color_ramp ({e}), using default");
            self.color_ramp = defaults.color_ramp;
        }
        self
    }

    /// Start-up options for the viewer session.
    pub fn session_options(&self) -> SessionOptions {
        let defaults = SessionOptions::default();
        SessionOptions {
            zoom_sensitivity: self.zoom_sensitivity,
            animation_period: Duration::from_millis(self.animation_interval_ms),
            params: RenderParams::new(
                self.start_type,
                self.default_iterations,
                self.default_threshold,
            )
            .unwrap_or(defaults.params),
            ramp: ColorRamp::new(self.color_ramp.clone()).unwrap_or(defaults.ramp),
        }
    }
}
