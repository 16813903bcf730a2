use tracing::debug;

use crate::complex::Complex;
use crate::coords::LocalPoint;

/// Default wheel sensitivity: multiplier change per unit of wheel delta.
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 0.01;

/// Smallest magnification reachable by zooming out.
pub const MIN_ZOOM: f64 = 1e-9;

/// Largest magnification reachable by zooming in. Beyond this `f64`
/// centre coordinates can no longer resolve neighbouring pixels.
pub const MAX_ZOOM: f64 = 1e15;

/// The user-controlled view onto the plane.
///
/// The visible region is the base rectangle `[-1.5, 1.5] × [-1, 1]` divided
/// by `zoom` and shifted by `center`. `zoom` is strictly positive for the
/// whole lifetime of the value and stays within [`MIN_ZOOM`]..=[`MAX_ZOOM`];
/// the only mutators are [`pan`](Self::pan) and
/// [`zoom_about`](Self::zoom_about), both of which preserve that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    center: Complex,
    zoom: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            center: Complex::ZERO,
            zoom: 1.0,
        }
    }
}

impl ViewportState {
    /// Plane position shown at the centre of the canvas.
    pub fn center(&self) -> Complex {
        self.center
    }

    /// Magnification relative to the base rectangle.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Absolute plane position under a local mapper position.
    ///
    /// Local y grows downward while plane y grows upward, hence the sign.
    #[inline]
    pub fn plane_point(&self, local: LocalPoint) -> Complex {
        Complex::new(
            local.x / self.zoom + self.center.re,
            -local.y / self.zoom + self.center.im,
        )
    }

    /// Drag the view by a local-unit delta (see [`CanvasGeometry::delta_to_plane`]).
    ///
    /// Content follows the pointer: x moves opposite the drag, y moves with
    /// it because screen y and plane y point in opposite directions.
    ///
    /// [`CanvasGeometry::delta_to_plane`]: crate::coords::CanvasGeometry::delta_to_plane
    pub fn pan(&mut self, delta: LocalPoint) {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            return;
        }
        self.center.re -= delta.x / self.zoom;
        self.center.im += delta.y / self.zoom;
    }

    /// Zoom by `multiplier` keeping the plane point under `cursor` fixed.
    ///
    /// A multiplier that would leave the zoom range is shortened to land on
    /// the limit. Returns `false` (and leaves the state untouched) when the
    /// multiplier is not a positive finite number or the zoom is already
    /// pinned at the limit in that direction.
    pub fn zoom_about(&mut self, cursor: LocalPoint, multiplier: f64) -> bool {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return false;
        }
        if !(cursor.x.is_finite() && cursor.y.is_finite()) {
            return false;
        }
        let next = (self.zoom * multiplier).clamp(MIN_ZOOM, MAX_ZOOM);
        if next == self.zoom {
            return false;
        }
        let m = next / self.zoom;
        let shift = (m - 1.0) / self.zoom / m;
        self.center.re += shift * cursor.x;
        self.center.im -= shift * cursor.y;
        self.zoom = next;
        debug!(zoom = self.zoom, re = self.center.re, im = self.center.im, "Zoomed");
        true
    }

    /// Back to the start-up view.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Wheel delta to zoom multiplier.
///
/// Positive deltas (scrolling away from the user) zoom out, negative deltas
/// zoom in. The two branches keep the multiplier positive for any finite
/// delta and meet at exactly `1.0` for `delta == 0`.
pub fn zoom_multiplier(delta: f64, sensitivity: f64) -> Option<f64> {
    if !delta.is_finite() || !(sensitivity.is_finite() && sensitivity > 0.0) {
        return None;
    }
    let m = if delta <= 0.0 {
        1.0 - sensitivity * delta
    } else {
        1.0 / (1.0 + sensitivity * delta)
    };
    Some(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn approx(a: Complex, b: Complex) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    #[test]
    fn starts_at_origin_unzoomed() {
        let vp = ViewportState::default();
        assert_eq!(vp.center(), Complex::ZERO);
        assert_eq!(vp.zoom(), 1.0);
    }

    #[test]
    fn multiplier_directions() {
        let zoom_in = zoom_multiplier(-100.0, 0.01).unwrap();
        let zoom_out = zoom_multiplier(100.0, 0.01).unwrap();
        assert!((zoom_in - 2.0).abs() < EPSILON);
        assert!((zoom_out - 0.5).abs() < EPSILON);
        assert_eq!(zoom_multiplier(0.0, 0.01), Some(1.0));
    }

    #[test]
    fn multiplier_stays_positive_for_large_deltas() {
        for delta in [-1e9, -1e3, 1e3, 1e9] {
            let m = zoom_multiplier(delta, 0.01).unwrap();
            assert!(m > 0.0 && m.is_finite(), "delta {delta} gave {m}");
        }
    }

    #[test]
    fn multiplier_rejects_bad_input() {
        assert_eq!(zoom_multiplier(f64::NAN, 0.01), None);
        assert_eq!(zoom_multiplier(1.0, 0.0), None);
        assert_eq!(zoom_multiplier(1.0, -0.5), None);
    }

    #[test]
    fn zoom_keeps_cursor_point_fixed() {
        let mut vp = ViewportState::default();
        vp.pan(LocalPoint::new(0.3, -0.2));
        let cursor = LocalPoint::new(0.7, -0.4);
        for m in [2.0, 0.5, 1.37, 0.01] {
            let before = vp.plane_point(cursor);
            assert!(vp.zoom_about(cursor, m));
            assert!(approx(before, vp.plane_point(cursor)));
        }
    }

    #[test]
    fn zoom_at_centre_leaves_centre_alone() {
        let mut vp = ViewportState::default();
        vp.zoom_about(LocalPoint::new(0.0, 0.0), 3.0);
        assert_eq!(vp.center(), Complex::ZERO);
        assert_eq!(vp.zoom(), 3.0);
    }

    #[test]
    fn zoom_rejects_non_positive_multiplier() {
        let mut vp = ViewportState::default();
        assert!(!vp.zoom_about(LocalPoint::new(0.1, 0.1), 0.0));
        assert!(!vp.zoom_about(LocalPoint::new(0.1, 0.1), -2.0));
        assert!(!vp.zoom_about(LocalPoint::new(0.1, 0.1), f64::INFINITY));
        assert_eq!(vp, ViewportState::default());
    }

    #[test]
    fn zoom_is_clamped_to_range() {
        let cursor = LocalPoint::new(0.4, -0.3);
        let mut vp = ViewportState::default();
        assert!(vp.zoom_about(cursor, 1e30));
        assert_eq!(vp.zoom(), MAX_ZOOM);
        assert!(!vp.zoom_about(cursor, 2.0));
        assert!(vp.zoom_about(cursor, 0.5));
        assert!(vp.zoom() < MAX_ZOOM);

        let mut vp = ViewportState::default();
        let before = vp.plane_point(cursor);
        assert!(vp.zoom_about(cursor, 1e-30));
        assert_eq!(vp.zoom(), MIN_ZOOM);
        assert!(!vp.zoom_about(cursor, 0.5));
        let after = vp.plane_point(cursor);
        assert!(((before.re - after.re) / after.re.abs().max(1.0)).abs() < 1e-6);
        assert!(vp.center().re.is_finite() && vp.center().im.is_finite());
    }

    #[test]
    fn pan_sign_convention() {
        let mut vp = ViewportState::default();
        vp.zoom_about(LocalPoint::default(), 2.0);
        vp.pan(LocalPoint::new(0.5, 0.2));
        assert!(approx(vp.center(), Complex::new(-0.25, 0.1)));
    }

    #[test]
    fn pan_round_trip_restores_center() {
        let mut vp = ViewportState::default();
        vp.zoom_about(LocalPoint::new(0.2, 0.9), 7.5);
        let start = vp.center();
        vp.pan(LocalPoint::new(0.33, -0.71));
        vp.pan(LocalPoint::new(-0.33, 0.71));
        assert!(approx(start, vp.center()));
    }

    #[test]
    fn pan_ignores_nan() {
        let mut vp = ViewportState::default();
        vp.pan(LocalPoint::new(f64::NAN, 1.0));
        assert_eq!(vp, ViewportState::default());
    }

    #[test]
    fn reset_restores_default() {
        let mut vp = ViewportState::default();
        vp.zoom_about(LocalPoint::new(1.0, 1.0), 4.0);
        vp.reset();
        assert_eq!(vp, ViewportState::default());
    }
}
