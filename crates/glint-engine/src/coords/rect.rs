use super::Vec2;

/// Axis-aligned rectangle in world units (top-left origin, +Y down).
///
/// Sizes are expected to be non-negative; the shape and viewport code only
/// ever constructs rects that way.
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
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    /// Smallest rect containing both corner points, in either order.
    #[inline]
    pub fn from_extents(min: Vec2, max: Vec2) -> Self {
        let origin = Vec2::new(min.x.min(max.x), min.y.min(max.y));
        let size = Vec2::new((max.x - min.x).abs(), (max.y - min.y).abs());
        Self { origin, size }
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
        self.origin + self.size / 2.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// True when the two rects overlap with positive area.
    ///
    /// Touching edges do not count as an intersection.
    #[inline]
    pub fn intersects(self, other: Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.origin.x < b_max.x
            && other.origin.x < a_max.x
            && self.origin.y < b_max.y
            && other.origin.y < a_max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn from_center_size_centers() {
        let rect = Rect::from_center_size(Vec2::new(10.0, 10.0), Vec2::new(4.0, 6.0));
        assert_eq!(rect.origin, Vec2::new(8.0, 7.0));
        assert_eq!(rect.center(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn from_extents_orders_corners() {
        let rect = Rect::from_extents(Vec2::new(5.0, -1.0), Vec2::new(1.0, 3.0));
        assert_eq!(rect.min(), Vec2::new(1.0, -1.0));
        assert_eq!(rect.max(), Vec2::new(5.0, 3.0));
    }

    // ── intersects ────────────────────────────────────────────────────────

    #[test]
    fn intersects_overlapping() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersects(r(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn intersects_contained() {
        let outer = r(0.0, 0.0, 100.0, 100.0);
        let inner = r(10.0, 10.0, 20.0, 20.0);
        assert!(outer.intersects(inner));
        assert!(inner.intersects(outer));
    }

    #[test]
    fn touching_edge_is_not_an_intersection() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).intersects(r(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn disjoint_do_not_intersect() {
        assert!(!r(0.0, 0.0, 5.0, 5.0).intersects(r(20.0, 20.0, 5.0, 5.0)));
    }
}
