use std::time::{Duration, Instant};

use tracing::warn;

use crate::controls::{FieldValues, ParamController};
use crate::coords::{CanvasGeometry, ScreenPoint};
use crate::input::InputController;
use crate::params::{FrameUniforms, ParamInput, RenderParams};
use crate::quad::{build_quad, PlaneRect, QuadVertex};
use crate::ramp::ColorRamp;
use crate::viewport::ViewportState;

/// Immutable per-frame snapshot handed to the rasterizer.
///
/// Built on the event thread and moved to the render worker, so the worker
/// never sees a half-applied pan or parameter change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub uniforms: FrameUniforms,
    pub quad: [QuadVertex; 4],
}

/// Start-up knobs for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub zoom_sensitivity: f64,
    pub animation_period: Duration,
    pub params: RenderParams,
    pub ramp: ColorRamp,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            zoom_sensitivity: crate::viewport::DEFAULT_ZOOM_SENSITIVITY,
            animation_period: crate::animation::DEFAULT_PERIOD,
            params: RenderParams::default(),
            ramp: ColorRamp::default(),
        }
    }
}

/// Everything the viewer mutates, owned in one place.
///
/// Event handlers return `true` when the next frame must be redrawn.
#[derive(Debug)]
pub struct Session {
    viewport: ViewportState,
    input: InputController,
    controls: ParamController,
    ramp: ColorRamp,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            viewport: ViewportState::default(),
            input: InputController::new(options.zoom_sensitivity),
            controls: ParamController::new(options.params, options.animation_period),
            ramp: options.ramp,
        }
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn controls(&self) -> &ParamController {
        &self.controls
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    // -- Navigation --------------------------------------------------------

    pub fn wheel(&mut self, geometry: &CanvasGeometry, cursor: ScreenPoint, delta: f64) -> bool {
        self.input
            .on_wheel(&mut self.viewport, geometry, cursor, delta)
    }

    pub fn pointer_down(&mut self, position: ScreenPoint) {
        self.input.on_pointer_down(position);
    }

    pub fn pointer_up(&mut self) {
        self.input.on_pointer_up();
    }

    pub fn pointer_move(
        &mut self,
        geometry: &CanvasGeometry,
        position: ScreenPoint,
        primary_held: bool,
    ) -> bool {
        self.input
            .on_pointer_move(&mut self.viewport, geometry, position, primary_held)
    }

    pub fn reset_view(&mut self) -> bool {
        let changed = self.viewport != ViewportState::default();
        self.viewport.reset();
        changed
    }

    // -- Parameters --------------------------------------------------------

    pub fn switch_type(&mut self) -> FieldValues {
        self.controls.switch_type()
    }

    /// Apply the settings fields. Rejected input is logged and the
    /// current values are returned so the fields can be restored.
    pub fn apply_input(&mut self, input: &ParamInput<'_>) -> (FieldValues, bool) {
        match self.controls.apply_input(input) {
            Ok(fields) => (fields, true),
            Err(e) => {
                warn!("Rejected settings: {e}");
                (self.controls.fields(), false)
            }
        }
    }

    pub fn toggle_auto(&mut self, now: Instant) -> FieldValues {
        match self.controls.toggle_auto(now) {
            Ok(fields) => fields,
            Err(e) => {
                warn!("Could not toggle animation: {e}");
                self.controls.fields()
            }
        }
    }

    pub fn tick(&mut self, now: Instant, wall_seconds: f64) -> Option<FieldValues> {
        self.controls.tick(now, wall_seconds)
    }

    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.controls.next_tick_in(now)
    }

    // -- Frame -------------------------------------------------------------

    /// Visible plane rectangle for the current viewport.
    pub fn plane_rect(&self) -> PlaneRect {
        PlaneRect::from_viewport(&self.viewport)
    }

    /// Snapshot of uniforms and quad for the next draw.
    pub fn frame(&self) -> Frame {
        Frame {
            uniforms: self.controls.params().uniforms(self.ramp.len() as u32),
            quad: build_quad(&self.plane_rect()),
        }
    }
}
