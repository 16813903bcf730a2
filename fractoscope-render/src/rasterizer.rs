use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use fractoscope_core::{Complex, Frame, QuadVertex};

use crate::buffer::RenderBuffer;
use crate::error::RenderError;
use crate::shade::{fractal_type, shade};
use crate::texture::RampTexture;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Tracks the current frame generation for cancellation and progress.
///
/// Incrementing the generation tells in-flight rows to stop early; the
/// progress counters feed the UI's progress bar.
#[derive(Debug)]
pub struct RenderCancel {
    generation: AtomicU64,
    progress_done: AtomicUsize,
    progress_total: AtomicUsize,
}

impl RenderCancel {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            progress_done: AtomicUsize::new(0),
            progress_total: AtomicUsize::new(0),
        }
    }

    /// Abandon the frame in flight by advancing the generation.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn reset_progress(&self, total: usize) {
        self.progress_total.store(total, Ordering::Relaxed);
        self.progress_done.store(0, Ordering::Relaxed);
    }

    fn inc_progress(&self) {
        self.progress_done.fetch_add(1, Ordering::Relaxed);
    }

    /// Rows finished so far as `(done, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.progress_done.load(Ordering::Relaxed),
            self.progress_total.load(Ordering::Relaxed),
        )
    }
}

impl Default for RenderCancel {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// One rasterized frame.
pub struct RenderResult {
    pub buffer: RenderBuffer,
    pub elapsed: Duration,
    pub cancelled: bool,
    pub rows_rendered: usize,
}

// ---------------------------------------------------------------------------
// Quad interpolation
// ---------------------------------------------------------------------------

/// Plane position at clip-space `(sx, sy)` inside the quad.
///
/// Bilinear blend of the four vertices, which for the axis-aligned
/// rectangle the viewer produces equals the varying a GPU would
/// interpolate across the two triangles. Vertices must be in strip order
/// (top-right, top-left, bottom-right, bottom-left).
#[inline]
pub fn interpolate_plane(quad: &[QuadVertex; 4], sx: f64, sy: f64) -> Complex {
    let u = (sx + 1.0) * 0.5;
    let v = (sy + 1.0) * 0.5;
    let [tr, tl, br, bl] = quad.map(|q| q.plane);
    let bottom = bl + (br - bl) * u;
    let top = tl + (tr - tl) * u;
    bottom + (top - bottom) * v
}

/// Clip-space coordinate of a pixel centre. Row 0 is the top of the image.
#[inline]
fn pixel_to_clip(px: u32, py: u32, width: u32, height: u32) -> (f64, f64) {
    (
        (px as f64 + 0.5) / width as f64 * 2.0 - 1.0,
        1.0 - (py as f64 + 0.5) / height as f64 * 2.0,
    )
}

// ---------------------------------------------------------------------------
// Full-frame rasterization
// ---------------------------------------------------------------------------

/// Draw one frame into a `width × height` RGBA buffer.
///
/// Rows are shaded in parallel with Rayon. If `cancel` advances while the
/// frame is in flight the remaining rows are skipped and the result is
/// flagged `cancelled`.
pub fn rasterize(
    frame: &Frame,
    ramp: &RampTexture,
    width: u32,
    height: u32,
    cancel: &RenderCancel,
) -> crate::Result<RenderResult> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    let uniforms = frame.uniforms;
    let kind = fractal_type(uniforms.fractal_type)?;
    if uniforms.ramp_length as usize != ramp.len() {
        return Err(RenderError::RampMismatch {
            texels: ramp.len(),
            expected: uniforms.ramp_length,
        });
    }

    let start = Instant::now();
    let gen = cancel.generation();
    cancel.reset_progress(height as usize);
    debug!(width, height, iterations = uniforms.iterations, "Starting frame");

    let mut buffer = RenderBuffer::new(width, height);
    let stride = buffer.stride();
    let rows_rendered = AtomicUsize::new(0);

    buffer
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(py, row)| {
            if cancel.generation() != gen {
                return;
            }
            for (px, pixel) in row.chunks_exact_mut(4).enumerate() {
                let (sx, sy) = pixel_to_clip(px as u32, py as u32, width, height);
                let point = interpolate_plane(&frame.quad, sx, sy);
                pixel.copy_from_slice(&shade(kind, &uniforms, ramp, point));
            }
            rows_rendered.fetch_add(1, Ordering::Relaxed);
            cancel.inc_progress();
        });

    let cancelled = cancel.generation() != gen;
    let rows_rendered = rows_rendered.into_inner();
    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        rows_rendered, cancelled, "Frame complete"
    );

    Ok(RenderResult {
        buffer,
        elapsed,
        cancelled,
        rows_rendered,
    })
}
