use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::animation::{auto_params, Interval, DEFAULT_PERIOD};
use crate::params::{FractalType, ParamInput, RenderParams};

/// Manual editing or timer-driven `(a, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    Manual,
    Auto,
}

impl AnimationMode {
    /// Caption for the toggle button: what pressing it will do.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Manual => "Animate",
            Self::Auto => "Stop",
        }
    }
}

/// What the settings panel should display after a transition.
///
/// Transitions never touch UI state themselves; they hand one of these back
/// and the caller copies it into its widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValues {
    pub type_label: &'static str,
    pub description: &'static str,
    pub iterations: u32,
    pub threshold: f64,
    pub param_a: f64,
    pub param_b: f64,
    pub auto_label: &'static str,
}

/// State machine over `{Mandelbrot, Julia} × {Manual, Auto}`.
#[derive(Debug)]
pub struct ParamController {
    params: RenderParams,
    interval: Interval,
    period: Duration,
}

impl Default for ParamController {
    fn default() -> Self {
        Self::new(RenderParams::default(), DEFAULT_PERIOD)
    }
}

impl ParamController {
    pub fn new(params: RenderParams, period: Duration) -> Self {
        Self {
            params,
            interval: Interval::new(),
            period,
        }
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    pub fn fractal_type(&self) -> FractalType {
        self.params.fractal_type
    }

    pub fn mode(&self) -> AnimationMode {
        if self.interval.is_active() {
            AnimationMode::Auto
        } else {
            AnimationMode::Manual
        }
    }

    pub fn fields(&self) -> FieldValues {
        FieldValues {
            type_label: self.params.fractal_type.label(),
            description: self.params.fractal_type.description(),
            iterations: self.params.iterations(),
            threshold: self.params.threshold(),
            param_a: self.params.ab.re,
            param_b: self.params.ab.im,
            auto_label: self.mode().toggle_label(),
        }
    }

    /// Flip between Mandelbrot and Julia, resetting `(a, b)` to the new
    /// type's defaults.
    pub fn switch_type(&mut self) -> FieldValues {
        let next = self.params.fractal_type.toggled();
        self.params.fractal_type = next;
        self.params.ab = next.default_params();
        info!(fractal = next.label(), "Switched fractal type");
        self.fields()
    }

    /// Validate and apply new values. On error nothing changes.
    pub fn set_params(
        &mut self,
        iterations: u32,
        threshold: f64,
        a: f64,
        b: f64,
    ) -> crate::Result<FieldValues> {
        self.params.set(iterations, threshold, a, b)?;
        Ok(self.fields())
    }

    /// Apply raw field text; unparsable fields keep their previous value.
    pub fn apply_input(&mut self, input: &ParamInput<'_>) -> crate::Result<FieldValues> {
        let (iterations, threshold, a, b) = input.resolve(&self.params);
        self.set_params(iterations, threshold, a, b)
    }

    /// Start the animation if manual, stop it if running.
    pub fn toggle_auto(&mut self, now: Instant) -> crate::Result<FieldValues> {
        if self.interval.cancel() {
            info!("Auto-animation stopped");
        } else {
            self.interval.start(self.period, now)?;
            info!(period_ms = self.period.as_millis() as u64, "Auto-animation started");
        }
        Ok(self.fields())
    }

    /// Advance the animation if a tick is due at `now`.
    ///
    /// `wall_seconds` is the time base fed to [`auto_params`]. Returns the
    /// new field values when a tick fired.
    pub fn tick(&mut self, now: Instant, wall_seconds: f64) -> Option<FieldValues> {
        if !self.interval.poll(now) {
            return None;
        }
        let ab = auto_params(wall_seconds);
        let (iterations, threshold) = (self.params.iterations(), self.params.threshold());
        match self.set_params(iterations, threshold, ab.re, ab.im) {
            Ok(fields) => {
                debug!(a = ab.re, b = ab.im, "Animation tick");
                Some(fields)
            }
            Err(e) => {
                warn!(wall_seconds, "Animation tick rejected: {e}");
                None
            }
        }
    }

    /// How long the event loop may sleep before the next tick.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.interval.time_until_next(now)
    }
}
