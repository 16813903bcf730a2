use std::time::Instant;

use eframe::egui;
use tracing::debug;

use fractoscope_core::{CanvasGeometry, ScreenPoint};

use crate::app::FractoscopeApp;

fn screen_point(pos: egui::Pos2) -> ScreenPoint {
    ScreenPoint::new(pos.x as f64, pos.y as f64)
}

/// Mapper geometry for the canvas as laid out this frame.
pub(crate) fn canvas_geometry(rect: egui::Rect) -> CanvasGeometry {
    CanvasGeometry::new(
        rect.width() as f64,
        rect.height() as f64,
        screen_point(rect.min),
    )
}

impl FractoscopeApp {
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let geometry = canvas_geometry(response.rect);

        // Browser convention: positive delta scrolls down, which zooms out.
        let scroll_y = ctx.input(|i| i.raw_scroll_delta.y);
        if scroll_y != 0.0 && response.hovered() {
            if let Some(pos) = response.hover_pos() {
                if self
                    .session
                    .wheel(&geometry, screen_point(pos), -(scroll_y as f64))
                {
                    self.needs_render = true;
                }
            }
        }

        let (pressed, released, primary_down, latest) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.latest_pos(),
            )
        });

        if pressed && response.hovered() {
            if let Some(origin) = ctx.input(|i| i.pointer.press_origin()) {
                self.session.pointer_down(screen_point(origin));
                debug!(x = origin.x, y = origin.y, "Drag anchored");
            }
        }
        if self.session.is_dragging() {
            if let Some(pos) = latest {
                if self
                    .session
                    .pointer_move(&geometry, screen_point(pos), primary_down)
                {
                    self.needs_render = true;
                }
            }
        }
        if released {
            self.session.pointer_up();
        }
    }

    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let text_editing = ctx.memory(|m| m.focused().is_some());
        if text_editing {
            return;
        }

        let (reset, toggle_auto, toggle_hud) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::R) && !i.modifiers.ctrl,
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::H),
            )
        });

        if reset && self.session.reset_view() {
            self.needs_render = true;
        }
        if toggle_auto {
            self.toggle_auto();
        }
        if toggle_hud {
            self.show_hud = !self.show_hud;
        }
    }

    /// Shared by the settings button and the Space key.
    pub(crate) fn toggle_auto(&mut self) {
        let values = self.session.toggle_auto(Instant::now());
        self.sync_fields(values);
    }
}
