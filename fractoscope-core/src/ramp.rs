use crate::error::CoreError;

/// An RGB stop of the color ramp.
pub type Rgb = [u8; 3];

/// Ordered color stops sampled by normalized escape count.
///
/// Built once at start-up and never mutated afterwards; the rasterizer
/// receives it as a 1D lookup texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRamp {
    stops: Vec<Rgb>,
}

impl ColorRamp {
    pub const MIN_STOPS: usize = 2;

    pub fn new(stops: Vec<Rgb>) -> crate::Result<Self> {
        if stops.len() < Self::MIN_STOPS {
            return Err(CoreError::RampTooShort {
                min: Self::MIN_STOPS,
                got: stops.len(),
            });
        }
        Ok(Self { stops })
    }

    /// Number of stops, the `ramp_length` uniform.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Texel bytes in RGBA8 layout, one opaque texel per stop.
    pub fn texture_rgba(&self) -> Vec<u8> {
        self.stops
            .iter()
            .flat_map(|&[r, g, b]| [r, g, b, 255])
            .collect()
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            stops: default_stops(),
        }
    }
}

/// Dark blue through white to orange and back down to near black.
pub fn default_stops() -> Vec<Rgb> {
    vec![
        [0, 7, 100],
        [32, 107, 203],
        [237, 255, 255],
        [255, 170, 0],
        [0, 2, 0],
    ]
}
