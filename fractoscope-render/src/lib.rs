pub mod buffer;
pub mod error;
pub mod rasterizer;
pub mod shade;
pub mod texture;

pub use buffer::RenderBuffer;
pub use error::RenderError;
pub use rasterizer::{interpolate_plane, rasterize, RenderCancel, RenderResult};
pub use shade::{escape_time, shade, Escape};
pub use texture::RampTexture;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
