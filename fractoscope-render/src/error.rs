use thiserror::Error;

/// Errors originating from the rasterizer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid image dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unknown fractal type code: {0}")]
    UnknownFractalType(i32),

    #[error("ramp texture has {texels} texels but uniforms say {expected}")]
    RampMismatch { texels: usize, expected: u32 },

    #[error(transparent)]
    Core(#[from] fractoscope_core::CoreError),
}
