use fractoscope_core::{Complex, FractalType, FrameUniforms};

use crate::error::RenderError;
use crate::texture::RampTexture;

/// Color of points that never escape.
pub const INTERIOR: [u8; 4] = [0, 0, 0, 255];

/// The result of iterating a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// `|z|` exceeded the threshold after this many completed steps.
    After(u32),
    /// Still bounded after the iteration cap.
    Interior,
}

/// Decode the integer type code of the uniform block.
pub fn fractal_type(code: i32) -> Result<FractalType, RenderError> {
    match code {
        0 => Ok(FractalType::Mandelbrot),
        1 => Ok(FractalType::Julia),
        other => Err(RenderError::UnknownFractalType(other)),
    }
}

/// Escape-time iteration of `z → z² + c` for one plane point.
///
/// Mandelbrot starts from `z₀ = (a, b)` with `c` the point; Julia starts
/// from the point with `c = (a, b)`.
#[inline]
pub fn escape_time(kind: FractalType, u: &FrameUniforms, point: Complex) -> Escape {
    let ab = Complex::new(u.param_a, u.param_b);
    let (mut z, c) = match kind {
        FractalType::Mandelbrot => (ab, point),
        FractalType::Julia => (point, ab),
    };
    let limit_sq = u.threshold * u.threshold;
    for n in 0..u.iterations {
        z = z.square() + c;
        if z.norm_sq() > limit_sq {
            return Escape::After(n);
        }
    }
    Escape::Interior
}

/// Color one point: escaped points sample the ramp at `n / iterations`.
#[inline]
pub fn shade(kind: FractalType, u: &FrameUniforms, ramp: &RampTexture, point: Complex) -> [u8; 4] {
    match escape_time(kind, u, point) {
        Escape::After(n) => ramp.sample(n as f64 / u.iterations.max(1) as f64),
        Escape::Interior => INTERIOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractoscope_core::ColorRamp;

    fn uniforms(kind: FractalType, a: f64, b: f64) -> FrameUniforms {
        FrameUniforms {
            fractal_type: kind.code(),
            iterations: 200,
            threshold: 2.0,
            param_a: a,
            param_b: b,
            ramp_length: 5,
        }
    }

    #[test]
    fn decode_type_codes() {
        assert_eq!(fractal_type(0).unwrap(), FractalType::Mandelbrot);
        assert_eq!(fractal_type(1).unwrap(), FractalType::Julia);
        assert!(matches!(fractal_type(7), Err(RenderError::UnknownFractalType(7))));
    }

    #[test]
    fn mandelbrot_origin_is_interior() {
        let u = uniforms(FractalType::Mandelbrot, 0.0, 0.0);
        assert_eq!(escape_time(FractalType::Mandelbrot, &u, Complex::ZERO), Escape::Interior);
        assert_eq!(
            escape_time(FractalType::Mandelbrot, &u, Complex::new(-1.0, 0.0)),
            Escape::Interior
        );
    }

    #[test]
    fn far_point_escapes_immediately() {
        let u = uniforms(FractalType::Mandelbrot, 0.0, 0.0);
        assert_eq!(
            escape_time(FractalType::Mandelbrot, &u, Complex::new(3.0, 0.0)),
            Escape::After(0)
        );
    }

    #[test]
    fn julia_uses_ab_as_constant() {
        // c = 0: the unit disk is bounded, anything outside escapes.
        let u = uniforms(FractalType::Julia, 0.0, 0.0);
        assert_eq!(escape_time(FractalType::Julia, &u, Complex::new(0.5, 0.5)), Escape::Interior);
        assert!(matches!(
            escape_time(FractalType::Julia, &u, Complex::new(1.1, 0.0)),
            Escape::After(_)
        ));
    }

    #[test]
    fn mandelbrot_uses_ab_as_start() {
        // Starting far out escapes no matter the plane point.
        let u = uniforms(FractalType::Mandelbrot, 5.0, 0.0);
        assert_eq!(
            escape_time(FractalType::Mandelbrot, &u, Complex::ZERO),
            Escape::After(0)
        );
    }

    #[test]
    fn interior_shades_black_and_escape_samples_ramp() {
        let ramp = RampTexture::upload(&ColorRamp::default());
        let u = uniforms(FractalType::Mandelbrot, 0.0, 0.0);
        assert_eq!(shade(FractalType::Mandelbrot, &u, &ramp, Complex::ZERO), INTERIOR);
        assert_eq!(
            shade(FractalType::Mandelbrot, &u, &ramp, Complex::new(3.0, 0.0)),
            ramp.sample(0.0)
        );
    }
}
