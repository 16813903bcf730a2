use fractoscope_core::ColorRamp;

/// The color ramp uploaded as a 1D lookup texture.
///
/// Sampling mimics a GPU texture with linear filtering and clamp-to-edge
/// wrapping: texel centres sit at `(i + 0.5) / len`, and coordinates outside
/// `[0, 1]` return the edge texel.
#[derive(Debug, Clone)]
pub struct RampTexture {
    texels: Vec<[u8; 4]>,
}

impl RampTexture {
    /// One-time upload. The ramp's stop count becomes the texture width.
    pub fn upload(ramp: &ColorRamp) -> Self {
        let texels = ramp
            .texture_rgba()
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        Self { texels }
    }

    /// Texture width in texels.
    pub fn len(&self) -> usize {
        self.texels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texels.is_empty()
    }

    /// Linearly filtered sample at normalized coordinate `t`.
    pub fn sample(&self, t: f64) -> [u8; 4] {
        let n = self.texels.len();
        if n == 0 {
            return [0, 0, 0, 255];
        }
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let x = (t * n as f64 - 0.5).clamp(0.0, (n - 1) as f64);
        let lo = x.floor() as usize;
        let hi = (lo + 1).min(n - 1);
        lerp_color(self.texels[lo], self.texels[hi], x - lo as f64)
    }
}

fn lerp_color(a: [u8; 4], b: [u8; 4], t: f64) -> [u8; 4] {
    let inv = 1.0 - t;
    let mix = |i: usize| (a[i] as f64 * inv + b[i] as f64 * t).round() as u8;
    [mix(0), mix(1), mix(2), mix(3)]
}
