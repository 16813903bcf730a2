use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{error, info};

use fractoscope_core::{wall_clock_seconds, FieldValues, Session};
use fractoscope_render::{RampTexture, RenderCancel};

use crate::config::ViewerConfig;
use crate::render_bridge::{render_worker, RenderPhase, RenderRequest, RenderResponse};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Width over height of the visible plane rectangle (3 × 2 units).
pub(crate) const CANVAS_ASPECT: f32 = 1.5;
pub(crate) const SETTINGS_PANEL_WIDTH: f32 = 240.0;
pub(crate) const HUD_MARGIN: f32 = 8.0;
pub(crate) const HUD_CORNER_RADIUS: f32 = 6.0;
const PROGRESS_BAR_HEIGHT: f32 = 3.0;

// ---------------------------------------------------------------------------
// Settings text buffers
// ---------------------------------------------------------------------------

/// Editable text behind the four numeric settings fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FieldText {
    pub(crate) iterations: String,
    pub(crate) threshold: String,
    pub(crate) param_a: String,
    pub(crate) param_b: String,
}

impl FieldText {
    pub(crate) fn from_values(values: &FieldValues) -> Self {
        Self {
            iterations: values.iterations.to_string(),
            threshold: values.threshold.to_string(),
            param_a: values.param_a.to_string(),
            param_b: values.param_b.to_string(),
        }
    }

    /// Rewrite only the parameter text. Animation ticks use this so that
    /// unsubmitted iteration or threshold edits are not overwritten.
    pub(crate) fn refresh_params(&mut self, values: &FieldValues) {
        self.param_a = values.param_a.to_string();
        self.param_b = values.param_b.to_string();
    }
}

/// Completed share of the current render, `None` before any work is queued.
pub(crate) fn progress_fraction(done: usize, total: usize) -> Option<f32> {
    if total == 0 {
        return None;
    }
    Some((done as f32 / total as f32).clamp(0.0, 1.0))
}

// ---------------------------------------------------------------------------
// Canvas geometry
// ---------------------------------------------------------------------------

/// Largest 3:2 rectangle inside `available` after removing `margin` on
/// every side, centred in the remaining space.
pub(crate) fn fit_canvas(available: egui::Rect, margin: f32) -> egui::Rect {
    let inner = available.shrink(margin);
    let w = inner.width().max(0.0);
    let h = inner.height().max(0.0);
    let size = if w / CANVAS_ASPECT <= h {
        egui::vec2(w, w / CANVAS_ASPECT)
    } else {
        egui::vec2(h * CANVAS_ASPECT, h)
    };
    egui::Rect::from_center_size(inner.center(), size)
}

// ---------------------------------------------------------------------------
// Application struct
// ---------------------------------------------------------------------------

pub(crate) struct FractoscopeApp {
    // Viewer state
    pub(crate) session: Session,
    pub(crate) config: ViewerConfig,
    pub(crate) fields: FieldValues,
    pub(crate) field_text: FieldText,

    // Render thread
    pub(crate) tx_request: mpsc::Sender<RenderRequest>,
    pub(crate) rx_response: mpsc::Receiver<RenderResponse>,
    pub(crate) cancel: Arc<RenderCancel>,
    pub(crate) render_id: u64,
    pub(crate) render_phase: RenderPhase,
    pub(crate) needs_render: bool,

    // Last render
    pub(crate) texture: Option<egui::TextureHandle>,
    pub(crate) render_time: Duration,
    pub(crate) rendered_size: [u32; 2],

    // UI state
    pub(crate) show_hud: bool,
}

// ---------------------------------------------------------------------------
// Constructor
// ---------------------------------------------------------------------------

impl FractoscopeApp {
    pub(crate) fn new(egui_ctx: &egui::Context, config: ViewerConfig) -> Self {
        let session = Session::new(config.session_options());
        let fields = session.controls().fields();

        let (tx_req, rx_req) = mpsc::channel();
        let (tx_resp, rx_resp) = mpsc::channel();
        let cancel = Arc::new(RenderCancel::new());

        // The ramp is uploaded once; the worker owns the texture.
        let ramp = RampTexture::upload(session.ramp());
        let ctx = egui_ctx.clone();
        let cancel_clone = cancel.clone();
        thread::spawn(move || {
            render_worker(ctx, ramp, rx_req, tx_resp, cancel_clone);
        });

        info!(
            iterations = fields.iterations,
            threshold = fields.threshold,
            ramp_stops = session.ramp().len(),
            "Viewer initialised"
        );

        Self {
            field_text: FieldText::from_values(&fields),
            session,
            config,
            fields,
            tx_request: tx_req,
            rx_response: rx_resp,
            cancel,
            render_id: 0,
            render_phase: RenderPhase::Idle,
            needs_render: true,
            texture: None,
            render_time: Duration::ZERO,
            rendered_size: [0, 0],
            show_hud: true,
        }
    }

    /// Push a transition's field values into the settings panel.
    pub(crate) fn sync_fields(&mut self, values: FieldValues) {
        self.field_text = FieldText::from_values(&values);
        self.fields = values;
    }

    /// Run the animation timer if it is due and schedule the next wake-up.
    fn drive_animation(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(values) = self.session.tick(now, wall_clock_seconds()) {
            self.field_text.refresh_params(&values);
            self.fields = values;
            self.needs_render = true;
        }
        if let Some(wait) = self.session.next_tick_in(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn draw_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let canvas = fit_canvas(ui.max_rect(), self.config.canvas_margin);
                let width = canvas.width().round() as u32;
                let height = canvas.height().round() as u32;
                if width == 0 || height == 0 {
                    return;
                }

                if self.rendered_size != [width, height] {
                    self.needs_render = true;
                }
                if self.needs_render {
                    self.request_render(width, height);
                }

                let response = ui.allocate_rect(canvas, egui::Sense::click_and_drag());
                let painter = ui.painter_at(canvas);
                painter.rect_filled(canvas, 0.0, egui::Color32::BLACK);
                if let Some(ref tex) = self.texture {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(tex.id(), canvas, uv, egui::Color32::WHITE);
                }
                if self.render_phase == RenderPhase::Rendering {
                    let (done, total) = self.cancel.progress();
                    if let Some(frac) = progress_fraction(done, total) {
                        draw_progress_bar(&painter, canvas, frac);
                    }
                }

                self.handle_canvas_input(ctx, &response);
            });
    }
}

/// Thin bar along the bottom edge of the canvas.
fn draw_progress_bar(painter: &egui::Painter, canvas: egui::Rect, frac: f32) {
    let bar_y = canvas.max.y - PROGRESS_BAR_HEIGHT;
    let track = egui::Rect::from_min_size(
        egui::pos2(canvas.min.x, bar_y),
        egui::vec2(canvas.width(), PROGRESS_BAR_HEIGHT),
    );
    painter.rect_filled(track, 0.0, egui::Color32::from_black_alpha(120));
    if frac > 0.0 {
        let fill = egui::Rect::from_min_size(
            track.min,
            egui::vec2(canvas.width() * frac, PROGRESS_BAR_HEIGHT),
        );
        painter.rect_filled(fill, 0.0, egui::Color32::from_rgb(80, 200, 255));
    }
}

// ---------------------------------------------------------------------------
// eframe::App
// ---------------------------------------------------------------------------

impl eframe::App for FractoscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        self.poll_responses(ctx);
        self.drive_animation(ctx);

        self.show_settings_panel(ctx);
        self.draw_canvas(ctx);
        self.handle_keyboard(ctx);
        self.show_hud(ctx);

        // Input or a settings change may have dirtied the frame after the
        // canvas was drawn; pick it up on the next pass. The progress bar
        // also needs fresh frames while the worker is busy.
        if self.needs_render || self.render_phase == RenderPhase::Rendering {
            ctx.request_repaint();
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub(crate) fn run() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Fractoscope");

    let config = ViewerConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Fractoscope")
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Fractoscope",
        options,
        Box::new(move |cc| Ok(Box::new(FractoscopeApp::new(&cc.egui_ctx, config)))),
    );
    if let Err(ref e) = result {
        error!("Viewer failed: {e}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: f32, h: f32) -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(w, h))
    }

    #[test]
    fn canvas_is_three_by_two() {
        let c = fit_canvas(rect(1000.0, 1000.0), 0.0);
        assert_eq!(c.width(), 1000.0);
        assert!((c.height() - 1000.0 / 1.5).abs() < 1e-3);
    }

    #[test]
    fn wide_area_is_height_limited() {
        let c = fit_canvas(rect(2000.0, 416.0), 8.0);
        assert_eq!(c.height(), 400.0);
        assert_eq!(c.width(), 600.0);
        assert_eq!(c.center(), egui::pos2(1000.0, 208.0));
    }

    #[test]
    fn tiny_area_collapses() {
        let c = fit_canvas(rect(10.0, 10.0), 8.0);
        assert_eq!(c.width(), 0.0);
        assert_eq!(c.height(), 0.0);
    }

    #[test]
    fn field_text_formats_values() {
        let values = Session::default().controls().fields();
        let text = FieldText::from_values(&values);
        assert_eq!(text.iterations, "100");
        assert_eq!(text.threshold, "4");
        assert_eq!(text.param_a, "0");
    }

    #[test]
    fn tick_refresh_keeps_pending_edits() {
        let mut session = Session::default();
        let mut text = FieldText::from_values(&session.controls().fields());
        text.iterations = "25".to_owned();
        text.threshold = "9.5".to_owned();

        let t0 = Instant::now();
        session.toggle_auto(t0);
        let values = session
            .tick(t0 + Duration::from_millis(50), 1.0)
            .expect("tick due after one period");
        text.refresh_params(&values);

        assert_eq!(text.iterations, "25");
        assert_eq!(text.threshold, "9.5");
        assert_eq!(text.param_a, values.param_a.to_string());
        assert_eq!(text.param_b, values.param_b.to_string());
        assert_ne!(text.param_a, "0");
    }

    #[test]
    fn progress_fraction_is_clamped() {
        assert_eq!(progress_fraction(0, 0), None);
        assert_eq!(progress_fraction(5, 10), Some(0.5));
        assert_eq!(progress_fraction(12, 10), Some(1.0));
    }
}
