use tracing::{debug, trace};

use crate::coords::{CanvasGeometry, ScreenPoint};
use crate::viewport::{zoom_multiplier, ViewportState, DEFAULT_ZOOM_SENSITIVITY};

/// Turns raw pointer and wheel events into [`ViewportState`] changes.
///
/// Every handler returns `true` when the viewport changed and a redraw is
/// needed. Events arriving while the canvas has a degenerate size are
/// dropped.
#[derive(Debug, Clone)]
pub struct InputController {
    sensitivity: f64,
    drag_anchor: Option<ScreenPoint>,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_SENSITIVITY)
    }
}

impl InputController {
    pub fn new(sensitivity: f64) -> Self {
        Self {
            sensitivity,
            drag_anchor: None,
        }
    }

    /// Whether a drag reference point is currently held.
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Wheel event at `cursor`. `delta > 0` zooms out, `delta < 0` zooms in.
    pub fn on_wheel(
        &mut self,
        viewport: &mut ViewportState,
        geometry: &CanvasGeometry,
        cursor: ScreenPoint,
        delta: f64,
    ) -> bool {
        let Ok(local) = geometry.to_plane(cursor) else {
            trace!("Wheel ignored: degenerate canvas");
            return false;
        };
        let Some(m) = zoom_multiplier(delta, self.sensitivity) else {
            return false;
        };
        if m == 1.0 {
            return false;
        }
        viewport.zoom_about(local, m)
    }

    /// Primary button pressed: remember where the drag starts.
    pub fn on_pointer_down(&mut self, position: ScreenPoint) {
        self.drag_anchor = Some(position);
    }

    /// Primary button released.
    pub fn on_pointer_up(&mut self) {
        self.drag_anchor = None;
    }

    /// Pointer moved. Pans only while the primary button is held and a drag
    /// reference exists; the reference then moves to `position`.
    pub fn on_pointer_move(
        &mut self,
        viewport: &mut ViewportState,
        geometry: &CanvasGeometry,
        position: ScreenPoint,
        primary_held: bool,
    ) -> bool {
        if !primary_held {
            return false;
        }
        let Some(anchor) = self.drag_anchor else {
            return false;
        };
        let dx = position.x - anchor.x;
        let dy = position.y - anchor.y;
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        let Ok(delta) = geometry.delta_to_plane(dx, dy) else {
            return false;
        };
        viewport.pan(delta);
        self.drag_anchor = Some(position);
        debug!(dx, dy, "Panned");
        true
    }
}
