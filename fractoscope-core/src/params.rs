use serde::Deserialize;

use crate::complex::Complex;
use crate::error::CoreError;

/// Which quadratic fractal the rasterizer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalType {
    /// Plane point is `c`; `(a, b)` is the starting `z₀`.
    #[default]
    Mandelbrot,
    /// Plane point is `z₀`; `(a, b)` is the constant `c`.
    Julia,
}

impl FractalType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
        }
    }

    /// One-line description of how `a` and `b` are used.
    pub fn description(self) -> &'static str {
        match self {
            Self::Mandelbrot => "z\u{2080} = a + bi, z \u{2192} z\u{b2} + c, c = plane point",
            Self::Julia => "c = a + bi, z \u{2192} z\u{b2} + c, z\u{2080} = plane point",
        }
    }

    /// The `(a, b)` pair a type switch resets to.
    pub fn default_params(self) -> Complex {
        match self {
            Self::Mandelbrot => Complex::new(0.0, 0.0),
            Self::Julia => Complex::new(-0.71, 0.3),
        }
    }

    /// Integer code understood by the rasterizer.
    pub fn code(self) -> i32 {
        match self {
            Self::Mandelbrot => 0,
            Self::Julia => 1,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Mandelbrot => Self::Julia,
            Self::Julia => Self::Mandelbrot,
        }
    }
}

/// Everything the rasterizer needs besides geometry and the ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub fractal_type: FractalType,
    /// `(a, b)` as a single complex value.
    pub ab: Complex,
    iterations: u32,
    threshold: f64,
}

impl RenderParams {
    pub const DEFAULT_ITERATIONS: u32 = 100;
    pub const DEFAULT_THRESHOLD: f64 = 4.0;

    pub fn new(fractal_type: FractalType, iterations: u32, threshold: f64) -> crate::Result<Self> {
        validate_iterations(iterations)?;
        validate_threshold(threshold)?;
        Ok(Self {
            fractal_type,
            ab: fractal_type.default_params(),
            iterations,
            threshold,
        })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Replace all four numeric values at once, or none of them.
    pub fn set(&mut self, iterations: u32, threshold: f64, a: f64, b: f64) -> crate::Result<()> {
        validate_iterations(iterations)?;
        validate_threshold(threshold)?;
        if !a.is_finite() {
            return Err(CoreError::InvalidParam { name: "a", value: a });
        }
        if !b.is_finite() {
            return Err(CoreError::InvalidParam { name: "b", value: b });
        }
        self.iterations = iterations;
        self.threshold = threshold;
        self.ab = Complex::new(a, b);
        Ok(())
    }

    /// Per-frame uniform block for a ramp of `ramp_length` stops.
    pub fn uniforms(&self, ramp_length: u32) -> FrameUniforms {
        FrameUniforms {
            fractal_type: self.fractal_type.code(),
            iterations: self.iterations,
            threshold: self.threshold,
            param_a: self.ab.re,
            param_b: self.ab.im,
            ramp_length,
        }
    }
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            fractal_type: FractalType::Mandelbrot,
            ab: FractalType::Mandelbrot.default_params(),
            iterations: Self::DEFAULT_ITERATIONS,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

fn validate_iterations(iterations: u32) -> crate::Result<()> {
    if iterations < 1 {
        return Err(CoreError::InvalidIterations(iterations));
    }
    Ok(())
}

fn validate_threshold(threshold: f64) -> crate::Result<()> {
    if threshold <= 0.0 || !threshold.is_finite() {
        return Err(CoreError::InvalidThreshold(threshold));
    }
    Ok(())
}

/// Uniform inputs of the rasterizer, one snapshot per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// `0` for Mandelbrot, `1` for Julia.
    pub fractal_type: i32,
    pub iterations: u32,
    pub threshold: f64,
    pub param_a: f64,
    pub param_b: f64,
    pub ramp_length: u32,
}

/// Raw text of the four settings fields.
#[derive(Debug, Clone, Copy)]
pub struct ParamInput<'a> {
    pub iterations: &'a str,
    pub threshold: &'a str,
    pub param_a: &'a str,
    pub param_b: &'a str,
}

impl ParamInput<'_> {
    /// Parse each field, falling back to `current` for anything unparsable
    /// or non-finite. Range checks happen later in [`RenderParams::set`].
    pub fn resolve(&self, current: &RenderParams) -> (u32, f64, f64, f64) {
        (
            parse_or(self.iterations, current.iterations),
            parse_finite_or(self.threshold, current.threshold),
            parse_finite_or(self.param_a, current.ab.re),
            parse_finite_or(self.param_b, current.ab.im),
        )
    }
}

fn parse_or(text: &str, fallback: u32) -> u32 {
    text.trim().parse().unwrap_or(fallback)
}

fn parse_finite_or(text: &str, fallback: f64) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = RenderParams::default();
        assert_eq!(p.fractal_type, FractalType::Mandelbrot);
        assert_eq!(p.ab, Complex::ZERO);
        assert_eq!(p.iterations(), 100);
        assert_eq!(p.threshold(), 4.0);
    }

    #[test]
    fn type_defaults_and_codes() {
        assert_eq!(FractalType::Julia.default_params(), Complex::new(-0.71, 0.3));
        assert_eq!(FractalType::Mandelbrot.code(), 0);
        assert_eq!(FractalType::Julia.code(), 1);
        assert_eq!(FractalType::Julia.toggled().toggled(), FractalType::Julia);
    }

    #[test]
    fn new_validates() {
        assert!(RenderParams::new(FractalType::Julia, 0, 2.0).is_err());
        assert!(RenderParams::new(FractalType::Julia, 10, 0.0).is_err());
        let p = RenderParams::new(FractalType::Julia, 10, 2.0).unwrap();
        assert_eq!(p.ab, FractalType::Julia.default_params());
    }

    #[test]
    fn set_rejects_out_of_range_and_keeps_state() {
        let mut p = RenderParams::default();
        assert!(matches!(p.set(0, 2.0, 0.1, 0.1), Err(CoreError::InvalidIterations(0))));
        assert!(p.set(10, -1.0, 0.1, 0.1).is_err());
        assert!(p.set(10, f64::NAN, 0.1, 0.1).is_err());
        assert!(p.set(10, 2.0, f64::INFINITY, 0.1).is_err());
        assert_eq!(p, RenderParams::default());
    }

    #[test]
    fn set_applies_all_values() {
        let mut p = RenderParams::default();
        p.set(250, 8.0, -0.4, 0.6).unwrap();
        assert_eq!(p.iterations(), 250);
        assert_eq!(p.threshold(), 8.0);
        assert_eq!(p.ab, Complex::new(-0.4, 0.6));
    }

    #[test]
    fn uniforms_carry_everything() {
        let mut p = RenderParams::new(FractalType::Julia, 64, 2.0).unwrap();
        p.ab = Complex::new(0.25, -0.5);
        let u = p.uniforms(5);
        assert_eq!(
            u,
            FrameUniforms {
                fractal_type: 1,
                iterations: 64,
                threshold: 2.0,
                param_a: 0.25,
                param_b: -0.5,
                ramp_length: 5,
            }
        );
    }

    #[test]
    fn malformed_fields_fall_back_to_current() {
        let current = RenderParams::default();
        let input = ParamInput {
            iterations: "lots",
            threshold: " 3.5 ",
            param_a: "NaN",
            param_b: "",
        };
        assert_eq!(input.resolve(&current), (100, 3.5, 0.0, 0.0));
    }

    #[test]
    fn negative_iteration_text_falls_back() {
        let current = RenderParams::default();
        let input = ParamInput {
            iterations: "-5",
            threshold: "inf",
            param_a: "0.1",
            param_b: "-0.2",
        };
        assert_eq!(input.resolve(&current), (100, 4.0, 0.1, -0.2));
    }

    #[test]
    fn fractal_type_parses_snake_case_names() {
        let t: FractalType = serde_json::from_str("\"julia\"").unwrap();
        assert_eq!(t, FractalType::Julia);
        let t: FractalType = serde_json::from_str("\"mandelbrot\"").unwrap();
        assert_eq!(t, FractalType::Mandelbrot);
    }
}
