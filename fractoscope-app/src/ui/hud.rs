use eframe::egui;

use fractoscope_core::AnimationMode;

use crate::app::{FractoscopeApp, HUD_CORNER_RADIUS, HUD_MARGIN};
use crate::render_bridge::RenderPhase;

const HUD_ALPHA: u8 = 166;

impl FractoscopeApp {
    pub(crate) fn show_hud(&mut self, ctx: &egui::Context) {
        if !self.show_hud {
            return;
        }

        // -- Top-left: view info --
        egui::Area::new(egui::Id::new("hud_view"))
            .anchor(egui::Align2::LEFT_TOP, [HUD_MARGIN * 2.0, HUD_MARGIN * 2.0])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(HUD_ALPHA))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.style_mut().visuals.override_text_color =
                            Some(egui::Color32::from_rgb(220, 220, 220));

                        let viewport = self.session.viewport();
                        let params = self.session.controls().params();
                        ui.label(format!("Type: {}", params.fractal_type.label()));
                        ui.label(format!(
                            "Center: {:.10} {:+.10}i",
                            viewport.center().re,
                            viewport.center().im
                        ));
                        ui.label(format!("Zoom: {:.3e}", viewport.zoom()));
                        ui.label(format!("a, b: {:.4}, {:.4}", params.ab.re, params.ab.im));
                        if self.session.controls().mode() == AnimationMode::Auto {
                            ui.colored_label(egui::Color32::from_rgb(255, 180, 50), "Animating");
                        }
                    });
            });

        // -- Bottom-left: render stats --
        egui::Area::new(egui::Id::new("hud_render"))
            .anchor(egui::Align2::LEFT_BOTTOM, [HUD_MARGIN * 2.0, -HUD_MARGIN * 2.0])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(HUD_ALPHA))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.style_mut().visuals.override_text_color =
                            Some(egui::Color32::from_rgb(200, 200, 200));
                        ui.style_mut().spacing.item_spacing.y = 2.0;

                        let phase_color = match self.render_phase {
                            RenderPhase::Idle => egui::Color32::GRAY,
                            RenderPhase::Rendering => egui::Color32::YELLOW,
                            RenderPhase::Done => egui::Color32::from_rgb(100, 255, 100),
                        };
                        ui.colored_label(phase_color, self.render_phase.label());
                        ui.label(format!(
                            "{:.1} ms, {}\u{00d7}{}",
                            self.render_time.as_secs_f64() * 1000.0,
                            self.rendered_size[0],
                            self.rendered_size[1],
                        ));
                    });
            });
    }
}
