//! Screen-space to local plane-space mapping.
//!
//! "Local" coordinates are base-rectangle units relative to the canvas
//! centre: x spans `[-1.5, 1.5]` left to right and y spans `[-1, 1]` top to
//! bottom. The y axis is deliberately *not* flipped here; [`ViewportState`]
//! applies the flip when it turns local coordinates into absolute plane
//! positions.
//!
//! [`ViewportState`]: crate::viewport::ViewportState

use crate::error::CoreError;

/// Half-width of the un-zoomed visible plane region.
pub const HALF_EXTENT_X: f64 = 1.5;
/// Half-height of the un-zoomed visible plane region.
pub const HALF_EXTENT_Y: f64 = 1.0;

/// Raw pointer position in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mapper output: base-rectangle units, origin at the canvas centre, y down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
}

impl LocalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size and position of the canvas inside the window.
///
/// `offset` is the canvas' top-left corner in window pixels: the fixed
/// margin subtracted from every pointer position before normalizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub width: f64,
    pub height: f64,
    pub offset: ScreenPoint,
}

impl CanvasGeometry {
    pub fn new(width: f64, height: f64, offset: ScreenPoint) -> Self {
        Self {
            width,
            height,
            offset,
        }
    }

    /// Geometry whose margin is the same on both axes.
    pub fn with_margin(width: f64, height: f64, margin: f64) -> Self {
        Self::new(width, height, ScreenPoint::new(margin, margin))
    }

    /// Reject zero, negative and non-finite dimensions before any division.
    pub fn validate(&self) -> crate::Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(CoreError::DegenerateViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Map a pointer position to local plane coordinates.
    pub fn to_plane(&self, screen: ScreenPoint) -> crate::Result<LocalPoint> {
        self.validate()?;
        Ok(LocalPoint::new(
            (screen.x - self.offset.x) / self.width * (2.0 * HALF_EXTENT_X) - HALF_EXTENT_X,
            (screen.y - self.offset.y) / self.height * (2.0 * HALF_EXTENT_Y) - HALF_EXTENT_Y,
        ))
    }

    /// Map a pointer *delta* to local plane units (same scale, no offset).
    pub fn delta_to_plane(&self, dx: f64, dy: f64) -> crate::Result<LocalPoint> {
        self.validate()?;
        Ok(LocalPoint::new(
            dx / self.width * (2.0 * HALF_EXTENT_X),
            dy / self.height * (2.0 * HALF_EXTENT_Y),
        ))
    }

    /// Window position of the canvas centre.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            self.offset.x + self.width / 2.0,
            self.offset.y + self.height / 2.0,
        )
    }
}

/// Free-function form of [`CanvasGeometry::to_plane`].
pub fn to_plane(
    screen_x: f64,
    screen_y: f64,
    width: f64,
    height: f64,
    canvas_offset: f64,
) -> crate::Result<LocalPoint> {
    CanvasGeometry::with_margin(width, height, canvas_offset)
        .to_plane(ScreenPoint::new(screen_x, screen_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn close(a: LocalPoint, x: f64, y: f64) -> bool {
        (a.x - x).abs() < EPSILON && (a.y - y).abs() < EPSILON
    }

    #[test]
    fn corners_map_to_base_rectangle() {
        let g = CanvasGeometry::with_margin(600.0, 400.0, 8.0);
        let tl = g.to_plane(ScreenPoint::new(8.0, 8.0)).unwrap();
        let br = g.to_plane(ScreenPoint::new(608.0, 408.0)).unwrap();
        assert!(close(tl, -1.5, -1.0), "{tl:?}");
        assert!(close(br, 1.5, 1.0), "{br:?}");
    }

    #[test]
    fn centre_maps_to_origin() {
        let g = CanvasGeometry::with_margin(300.0, 200.0, 10.0);
        let p = g.to_plane(g.center()).unwrap();
        assert!(close(p, 0.0, 0.0), "{p:?}");
    }

    #[test]
    fn y_is_not_inverted() {
        let g = CanvasGeometry::with_margin(300.0, 200.0, 0.0);
        let upper = g.to_plane(ScreenPoint::new(150.0, 10.0)).unwrap();
        let lower = g.to_plane(ScreenPoint::new(150.0, 190.0)).unwrap();
        assert!(lower.y > upper.y);
    }

    #[test]
    fn free_function_matches_method() {
        let g = CanvasGeometry::with_margin(640.0, 480.0, 12.0);
        let a = g.to_plane(ScreenPoint::new(100.0, 250.0)).unwrap();
        let b = to_plane(100.0, 250.0, 640.0, 480.0, 12.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn delta_ignores_offset() {
        let g = CanvasGeometry::new(300.0, 200.0, ScreenPoint::new(50.0, 70.0));
        let d = g.delta_to_plane(30.0, -20.0).unwrap();
        assert!(close(d, 0.3, -0.2), "{d:?}");
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        for (w, h) in [(0.0, 100.0), (100.0, 0.0), (-1.0, 100.0), (f64::NAN, 1.0)] {
            let g = CanvasGeometry::with_margin(w, h, 0.0);
            assert!(g.to_plane(ScreenPoint::default()).is_err());
            assert!(g.delta_to_plane(1.0, 1.0).is_err());
        }
    }
}
