//! Viewport transform between the projection plane and pixel space

/// Affine map from a projection-plane rectangle onto a `width` x `height`
/// pixel grid.
///
/// `x1 < x2` map to pixel columns `0..width`. `y1 > y2` map to pixel rows
/// `0..height`, so projection-plane y grows upwards while pixel rows grow
/// downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    width: u32,
    height: u32,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl ViewportTransform {
    /// The grid must be non-empty and the bounds finite with `x1 < x2` and
    /// `y1 > y2`; otherwise pixel coordinates come out infinite or NaN.
    pub fn new(width: u32, height: u32, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        debug_assert!(width > 0 && height > 0, "empty pixel grid {width}x{height}");
        debug_assert!(
            x1.is_finite() && x2.is_finite() && x1 < x2,
            "bad horizontal bounds {x1}..{x2}"
        );
        debug_assert!(
            y1.is_finite() && y2.is_finite() && y1 > y2,
            "bad vertical bounds {y1}..{y2}"
        );
        Self {
            width,
            height,
            x1,
            y1,
            x2,
            y2,
        }
    }

    /// Center the pixel grid on `(center_x, center_y)` of the projection
    /// plane, with `scale` projection units per pixel.
    ///
    /// `scale` must be finite and positive.
    pub fn centered(width: u32, height: u32, center_x: f64, center_y: f64, scale: f64) -> Self {
        let half_w = 0.5 * width as f64 * scale;
        let half_h = 0.5 * height as f64 * scale;
        Self::new(
            width,
            height,
            center_x - half_w,
            center_y + half_h,
            center_x + half_w,
            center_y - half_h,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Projection-plane corners as `(x1, y1, x2, y2)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// Projection units per pixel column
    pub fn xscale(&self) -> f64 {
        (self.x2 - self.x1) / self.width as f64
    }

    /// Projection units per pixel row
    pub fn yscale(&self) -> f64 {
        (self.y1 - self.y2) / self.height as f64
    }

    pub fn to_screen(&self, xp: f64, yp: f64) -> (f64, f64) {
        ((xp - self.x1) / self.xscale(), (self.y1 - yp) / self.yscale())
    }

    pub fn to_projection(&self, px: f64, py: f64) -> (f64, f64) {
        (self.x1 + px * self.xscale(), self.y1 - py * self.yscale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_centered_corners() {
        let t = ViewportTransform::centered(600, 400, 10.0, -5.0, 0.5);
        assert_eq!(t.bounds(), (-140.0, 95.0, 160.0, -105.0));
        assert_eq!(t.xscale(), 0.5);
        assert_eq!(t.yscale(), 0.5);
    }

    #[test]
    fn test_corners_map_to_pixel_edges() {
        let t = ViewportTransform::centered(600, 400, 0.0, 0.0, 2.0);
        let (x1, y1, x2, y2) = t.bounds();
        assert_eq!(t.to_screen(x1, y1), (0.0, 0.0));
        assert_eq!(t.to_screen(x2, y2), (600.0, 400.0));
        assert_eq!(t.to_screen(0.0, 0.0), (300.0, 200.0));
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let t = ViewportTransform::centered(100, 100, 0.0, 0.0, 1.0);
        let (_, low) = t.to_screen(0.0, -10.0);
        let (_, high) = t.to_screen(0.0, 10.0);
        assert!(high < low);
    }

    #[test]
    fn test_to_projection_inverts_to_screen() {
        let t = ViewportTransform::centered(320, 240, 3.5, -1.25, 0.03);
        for (xp, yp) in [(0.0, 0.0), (3.5, -1.25), (-2.0, 4.0), (7.75, 0.125)] {
            let (px, py) = t.to_screen(xp, yp);
            let (xb, yb) = t.to_projection(px, py);
            assert!((xb - xp).abs() < EPS);
            assert!((yb - yp).abs() < EPS);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bad horizontal bounds")]
    fn test_zero_scale_is_rejected() {
        ViewportTransform::centered(100, 100, 0.0, 0.0, 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bad horizontal bounds")]
    fn test_non_finite_scale_is_rejected() {
        ViewportTransform::centered(100, 100, 0.0, 0.0, f64::NAN);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty pixel grid")]
    fn test_empty_grid_is_rejected() {
        ViewportTransform::centered(0, 100, 0.0, 0.0, 1.0);
    }
}
