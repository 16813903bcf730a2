use crate::complex::Complex;
use crate::coords::{HALF_EXTENT_X, HALF_EXTENT_Y};
use crate::viewport::ViewportState;

/// Un-zoomed, un-panned plane corners in triangle-strip order:
/// top-right, top-left, bottom-right, bottom-left.
pub const BASE_CORNERS: [Complex; 4] = [
    Complex { re: HALF_EXTENT_X, im: HALF_EXTENT_Y },
    Complex { re: -HALF_EXTENT_X, im: HALF_EXTENT_Y },
    Complex { re: HALF_EXTENT_X, im: -HALF_EXTENT_Y },
    Complex { re: -HALF_EXTENT_X, im: -HALF_EXTENT_Y },
];

/// Clip-space corners of the full-screen quad, same order as [`BASE_CORNERS`].
pub const SCREEN_CORNERS: [[f32; 2]; 4] = [[1.0, 1.0], [-1.0, 1.0], [1.0, -1.0], [-1.0, -1.0]];

/// The visible plane rectangle for one frame.
///
/// Derived from [`ViewportState`] on demand and never cached: every corner
/// is `base / zoom + center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneRect {
    pub corners: [Complex; 4],
}

impl PlaneRect {
    pub fn from_viewport(viewport: &ViewportState) -> Self {
        let zoom = viewport.zoom();
        let center = viewport.center();
        Self {
            corners: BASE_CORNERS.map(|base| base * (1.0 / zoom) + center),
        }
    }

}

/// One vertex of the rasterizer quad: where it sits on screen and which
/// plane point it carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    pub screen: [f32; 2],
    pub plane: Complex,
}

/// The four vertices handed to the rasterizer each frame.
pub fn build_quad(rect: &PlaneRect) -> [QuadVertex; 4] {
    std::array::from_fn(|i| QuadVertex {
        screen: SCREEN_CORNERS[i],
        plane: rect.corners[i],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::LocalPoint;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn default_view_is_base_rectangle() {
        let rect = PlaneRect::from_viewport(&ViewportState::default());
        assert_eq!(rect.corners, BASE_CORNERS);
    }

    #[test]
    fn zoom_shrinks_rectangle() {
        let mut vp = ViewportState::default();
        vp.zoom_about(LocalPoint::default(), 4.0);
        let [tr, _, _, bl] = PlaneRect::from_viewport(&vp).corners;
        let (w, h) = (tr.re - bl.re, tr.im - bl.im);
        assert!((w - 0.75).abs() < EPSILON);
        assert!((h - 0.5).abs() < EPSILON);
    }

    #[test]
    fn pan_shifts_every_corner() {
        let mut vp = ViewportState::default();
        vp.pan(LocalPoint::new(-1.0, 0.5));
        let rect = PlaneRect::from_viewport(&vp);
        for (corner, base) in rect.corners.iter().zip(BASE_CORNERS) {
            assert!((corner.re - (base.re + 1.0)).abs() < EPSILON);
            assert!((corner.im - (base.im + 0.5)).abs() < EPSILON);
        }
    }

    #[test]
    fn corners_agree_with_plane_point() {
        // The top-left screen corner is local (-1.5, -1): plane y must be +1/zoom.
        let mut vp = ViewportState::default();
        vp.zoom_about(LocalPoint::new(0.4, -0.3), 2.5);
        let rect = PlaneRect::from_viewport(&vp);
        let tl = vp.plane_point(LocalPoint::new(-HALF_EXTENT_X, -HALF_EXTENT_Y));
        assert!((rect.corners[1].re - tl.re).abs() < EPSILON);
        assert!((rect.corners[1].im - tl.im).abs() < EPSILON);
    }

    #[test]
    fn quad_pairs_screen_and_plane_corners() {
        let rect = PlaneRect::from_viewport(&ViewportState::default());
        let quad = build_quad(&rect);
        assert_eq!(quad[0].screen, [1.0, 1.0]);
        assert_eq!(quad[0].plane, Complex::new(1.5, 1.0));
        assert_eq!(quad[3].screen, [-1.0, -1.0]);
        assert_eq!(quad[3].plane, Complex::new(-1.5, -1.0));
    }
}
