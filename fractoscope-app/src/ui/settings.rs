use eframe::egui;
use tracing::debug;

use fractoscope_core::ParamInput;

use crate::app::{FractoscopeApp, FieldText, SETTINGS_PANEL_WIDTH};

/// Single-line numeric field. Returns `true` when the user committed an
/// edit with Enter or by moving focus away.
fn numeric_field(ui: &mut egui::Ui, label: &str, text: &mut String) -> bool {
    ui.label(label);
    let response = ui.add(egui::TextEdit::singleline(text).desired_width(f32::INFINITY));
    response.lost_focus()
}

impl FractoscopeApp {
    pub(crate) fn show_settings_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("settings")
            .resizable(false)
            .exact_width(SETTINGS_PANEL_WIDTH)
            .show(ctx, |ui| {
                ui.heading("Settings");
                ui.add_space(6.0);

                if ui.button(self.fields.type_label).clicked() {
                    let values = self.session.switch_type();
                    self.sync_fields(values);
                    self.needs_render = true;
                }
                ui.label(egui::RichText::new(self.fields.description).italics());
                ui.add_space(10.0);

                let mut committed = false;
                committed |= numeric_field(ui, "Iterations", &mut self.field_text.iterations);
                committed |= numeric_field(ui, "Threshold", &mut self.field_text.threshold);
                committed |= numeric_field(ui, "a", &mut self.field_text.param_a);
                committed |= numeric_field(ui, "b", &mut self.field_text.param_b);
                if committed {
                    self.apply_field_text();
                }

                ui.add_space(10.0);
                if ui.button(self.fields.auto_label).clicked() {
                    self.toggle_auto();
                }

                ui.add_space(16.0);
                ui.separator();
                ui.small("Wheel: zoom at cursor");
                ui.small("Drag: pan");
                ui.small("R: reset view, Space: animate, H: HUD");
            });
    }

    /// Apply the settings text; rejected or unparsable fields snap back to
    /// the current values.
    fn apply_field_text(&mut self) {
        let FieldText {
            iterations,
            threshold,
            param_a,
            param_b,
        } = &self.field_text;
        let input = ParamInput {
            iterations,
            threshold,
            param_a,
            param_b,
        };
        let (values, applied) = self.session.apply_input(&input);
        debug!(applied, "Settings committed");
        if applied && values != self.fields {
            self.needs_render = true;
        }
        self.sync_fields(values);
    }
}
