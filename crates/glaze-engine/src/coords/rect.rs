use glam::Vec2;

use super::EdgeInsets;

/// Axis-aligned rectangle in layout space (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle of `size` centered on `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self { origin: center - size * 0.5, size }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Shrinks the rectangle by `insets`. Sizes never go negative.
    #[inline]
    pub fn inset(self, insets: EdgeInsets) -> Self {
        let r = self.normalized();
        Rect::new(
            r.origin.x + insets.leading,
            r.origin.y + insets.top,
            (r.size.x - insets.horizontal()).max(0.0),
            (r.size.y - insets.vertical()).max(0.0),
        )
    }

    /// Replaces width and/or height while keeping the center fixed.
    #[inline]
    pub fn resized_about_center(self, width: Option<f32>, height: Option<f32>) -> Self {
        let size = Vec2::new(width.unwrap_or(self.size.x), height.unwrap_or(self.size.y));
        Rect::from_center_size(self.center(), size)
    }

    #[inline]
    pub fn translated(self, by: Vec2) -> Self {
        Rect::from_origin_size(self.origin + by, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_width() {
        let n = r(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    // ── center / resize ───────────────────────────────────────────────────

    #[test]
    fn center_of_offset_rect() {
        assert_eq!(r(10.0, 20.0, 100.0, 50.0).center(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn resize_keeps_center() {
        let rect = r(0.0, 0.0, 100.0, 100.0).resized_about_center(Some(20.0), None);
        assert_eq!(rect.center(), Vec2::new(50.0, 50.0));
        assert_eq!(rect.size, Vec2::new(20.0, 100.0));
    }

    // ── inset ─────────────────────────────────────────────────────────────

    #[test]
    fn inset_shrinks_each_edge() {
        let rect = r(0.0, 0.0, 100.0, 60.0).inset(EdgeInsets::new(10.0, 5.0, 0.0, 15.0));
        assert_eq!(rect, r(5.0, 10.0, 80.0, 50.0));
    }

    #[test]
    fn inset_larger_than_rect_clamps_to_zero() {
        let rect = r(0.0, 0.0, 10.0, 10.0).inset(EdgeInsets::all(20.0));
        assert!(rect.is_empty());
        assert_eq!(rect.size, Vec2::ZERO);
    }
}
