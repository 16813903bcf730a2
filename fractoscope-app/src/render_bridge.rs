use std::sync::mpsc;
use std::sync::Arc;

use eframe::egui;
use tracing::{debug, error};

use fractoscope_core::Frame;
use fractoscope_render::{rasterize, RampTexture, RenderCancel, RenderResult};

use crate::app::FractoscopeApp;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenderPhase {
    Idle,
    Rendering,
    Done,
}

impl RenderPhase {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Rendering => "Rendering\u{2026}",
            Self::Done => "Done",
        }
    }
}

/// One frame snapshot plus the pixel size to draw it at.
pub(crate) struct RenderRequest {
    pub(crate) id: u64,
    pub(crate) frame: Frame,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

pub(crate) struct RenderResponse {
    pub(crate) id: u64,
    pub(crate) result: RenderResult,
}

// ---------------------------------------------------------------------------
// impl FractoscopeApp: render dispatch and polling
// ---------------------------------------------------------------------------

impl FractoscopeApp {
    /// Snapshot the session and hand it to the worker.
    pub(crate) fn request_render(&mut self, width: u32, height: u32) {
        self.cancel.cancel();
        self.render_id += 1;

        let frame = self.session.frame();
        debug!(
            id = self.render_id,
            width,
            height,
            zoom = self.session.viewport().zoom(),
            "Requesting render"
        );

        let req = RenderRequest {
            id: self.render_id,
            frame,
            width,
            height,
        };

        let _ = self.tx_request.send(req);
        self.render_phase = RenderPhase::Rendering;
        self.needs_render = false;
        self.rendered_size = [width, height];
    }

    pub(crate) fn poll_responses(&mut self, ctx: &egui::Context) {
        while let Ok(resp) = self.rx_response.try_recv() {
            if resp.id == self.render_id && !resp.result.cancelled {
                self.apply_result(ctx, resp.result);
                self.render_phase = RenderPhase::Done;
            }
        }
    }

    fn apply_result(&mut self, ctx: &egui::Context, result: RenderResult) {
        self.render_time = result.elapsed;
        let buffer = result.buffer;
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [buffer.width as usize, buffer.height as usize],
            &buffer.pixels,
        );
        match self.texture {
            Some(ref mut tex) => tex.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("fractal", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

/// Skip queued frames that are already out of date.
fn drain_latest(initial: RenderRequest, rx: &mpsc::Receiver<RenderRequest>) -> RenderRequest {
    let mut req = initial;
    while let Ok(newer) = rx.try_recv() {
        req = newer;
    }
    req
}

pub(crate) fn render_worker(
    ctx: egui::Context,
    ramp: RampTexture,
    rx: mpsc::Receiver<RenderRequest>,
    tx: mpsc::Sender<RenderResponse>,
    cancel: Arc<RenderCancel>,
) {
    while let Ok(initial) = rx.recv() {
        let req = drain_latest(initial, &rx);

        let result = match rasterize(&req.frame, &ramp, req.width, req.height, &cancel) {
            Ok(result) => result,
            Err(e) => {
                error!(id = req.id, "Render failed: {e}");
                continue;
            }
        };
        if result.cancelled {
            continue;
        }

        if tx.send(RenderResponse { id: req.id, result }).is_err() {
            return;
        }
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractoscope_core::Session;

    fn request(id: u64) -> RenderRequest {
        RenderRequest {
            id,
            frame: Session::default().frame(),
            width: 4,
            height: 4,
        }
    }

    #[test]
    fn drain_keeps_newest_request() {
        let (tx, rx) = mpsc::channel();
        tx.send(request(2)).unwrap();
        tx.send(request(3)).unwrap();
        let latest = drain_latest(request(1), &rx);
        assert_eq!(latest.id, 3);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn worker_answers_and_stops_when_channel_closes() {
        let (tx_req, rx_req) = mpsc::channel();
        let (tx_resp, rx_resp) = mpsc::channel();
        let session = Session::default();
        let ramp = RampTexture::upload(session.ramp());
        let cancel = Arc::new(RenderCancel::new());

        tx_req.send(request(7)).unwrap();
        drop(tx_req);
        render_worker(egui::Context::default(), ramp, rx_req, tx_resp, cancel);

        let resp = rx_resp.recv().unwrap();
        assert_eq!(resp.id, 7);
        assert_eq!(resp.result.buffer.pixels.len(), 4 * 4 * 4);
    }
}
