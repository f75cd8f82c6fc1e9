use crate::coords::{Rect, Vec2};

/// World units per window pixel at construction.
pub const DEFAULT_SCALE: f32 = 0.1;

/// Scale multiplier applied per scroll notch; positive deltas zoom in.
const ZOOM_STEP: f32 = 0.95;

/// View transform state.
///
/// Invariant: `size == window_px * scale`, re-established by [`rescale`] on
/// every window resize and after every scale change. `center` moves only
/// through drag deltas.
///
/// [`rescale`]: Viewport::rescale
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    center: Vec2,
    size: Vec2,
    scale: f32,
    window_px: Vec2,
    /// World-space grab point while a drag is in progress.
    drag_grab: Option<Vec2>,
}

impl Viewport {
    pub fn new(window_px: Vec2) -> Self {
        let mut vp = Self {
            center: Vec2::zero(),
            size: Vec2::zero(),
            scale: DEFAULT_SCALE,
            window_px,
            drag_grab: None,
        };
        vp.rescale(window_px);
        vp
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Re-derives the view size from the current scale and window pixel size.
    pub fn rescale(&mut self, window_px: Vec2) {
        self.window_px = window_px;
        self.size = window_px * self.scale;
    }

    /// Applies a scroll delta: `scale ← scale · 0.95^delta`, then rescales.
    pub fn zoom(&mut self, delta: f32) {
        self.scale *= ZOOM_STEP.powf(delta);
        self.rescale(self.window_px);
    }

    /// Maps a window pixel position to world coordinates through the current
    /// transform (+Y down in both spaces).
    pub fn pixel_to_world(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            self.center.x + (px.x / self.window_px.x - 0.5) * self.size.x,
            self.center.y + (px.y / self.window_px.y - 0.5) * self.size.y,
        )
    }

    /// Captures the drag grab point (world coordinates) at button-press.
    pub fn start_drag(&mut self, cursor_px: Vec2) {
        self.drag_grab = Some(self.pixel_to_world(cursor_px));
    }

    pub fn end_drag(&mut self) {
        self.drag_grab = None;
    }

    #[inline]
    pub fn dragging(&self) -> bool {
        self.drag_grab.is_some()
    }

    /// Pans so the grabbed world point follows the cursor.
    ///
    /// Shifting the center by `grab − cursor_world` makes the cursor map back
    /// to the grab point afterwards, so the stored grab point stays valid for
    /// the whole drag without being recaptured.
    pub fn drag_to(&mut self, cursor_px: Vec2) {
        if let Some(grab) = self.drag_grab {
            let cursor_world = self.pixel_to_world(cursor_px);
            self.center = self.center + (grab - cursor_world);
        }
    }

    /// The world-space rectangle currently visible; culling tests against it.
    pub fn world_box(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    /// Column-major orthographic view-projection over the visible world box.
    pub fn view_proj(&self) -> [[f32; 4]; 4] {
        let b = self.world_box();
        ortho(b.min().x, b.max().x, b.min().y, b.max().y)
    }
}

/// Screen-space projection over a `w × h` pixel window (for overlays drawn in
/// pixel coordinates).
pub fn pixel_proj(w: f32, h: f32) -> [[f32; 4]; 4] {
    ortho(0.0, w.max(1.0), 0.0, h.max(1.0))
}

/// Column-major orthographic projection mapping `left..right` to NDC x and
/// `top..bottom` (+Y down) to NDC y.
fn ortho(left: f32, right: f32, top: f32, bottom: f32) -> [[f32; 4]; 4] {
    let sx = 2.0 / (right - left);
    let sy = 2.0 / (top - bottom); // negative span flips +Y down into NDC
    [
        [sx, 0.0, 0.0, 0.0],
        [0.0, sy, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [
            -(right + left) / (right - left),
            -(top + bottom) / (top - bottom),
            0.0,
            1.0,
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn vp() -> Viewport {
        Viewport::new(Vec2::new(800.0, 600.0))
    }

    // ── rescale invariant ─────────────────────────────────────────────────

    #[test]
    fn size_is_scale_times_window() {
        let v = vp();
        assert!(close(v.size().x, 80.0));
        assert!(close(v.size().y, 60.0));
    }

    #[test]
    fn resize_rederives_size_keeping_scale() {
        let mut v = vp();
        v.rescale(Vec2::new(400.0, 300.0));
        assert!(close(v.size().x, 40.0));
        assert!(close(v.size().y, 30.0));
        assert!(close(v.scale(), DEFAULT_SCALE));
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn zoom_accumulates_multiplicatively() {
        let mut once = vp();
        once.zoom(2.0);

        let mut twice = vp();
        twice.zoom(1.0);
        twice.zoom(1.0);

        assert!(close(once.scale(), twice.scale()));
        assert!(close(once.size().x, twice.size().x));
    }

    #[test]
    fn positive_delta_zooms_in() {
        let mut v = vp();
        v.zoom(1.0);
        assert!(v.scale() < DEFAULT_SCALE);
        assert!(v.size().x < 80.0);
    }

    #[test]
    fn opposite_deltas_cancel() {
        let mut v = vp();
        v.zoom(3.0);
        v.zoom(-3.0);
        assert!(close(v.scale(), DEFAULT_SCALE));
    }

    // ── pixel ↔ world mapping ─────────────────────────────────────────────

    #[test]
    fn window_center_maps_to_view_center() {
        let v = vp();
        let w = v.pixel_to_world(Vec2::new(400.0, 300.0));
        assert!(close(w.x, 0.0));
        assert!(close(w.y, 0.0));
    }

    #[test]
    fn window_corners_map_to_view_box_corners() {
        let v = vp();
        let tl = v.pixel_to_world(Vec2::zero());
        let br = v.pixel_to_world(Vec2::new(800.0, 600.0));
        assert!(close(tl.x, v.world_box().min().x));
        assert!(close(tl.y, v.world_box().min().y));
        assert!(close(br.x, v.world_box().max().x));
        assert!(close(br.y, v.world_box().max().y));
    }

    // ── drag ──────────────────────────────────────────────────────────────

    #[test]
    fn drag_keeps_grab_point_under_cursor() {
        let mut v = vp();
        let press = Vec2::new(100.0, 100.0);
        v.start_drag(press);
        let grab = v.pixel_to_world(press);

        let moved = Vec2::new(250.0, 180.0);
        v.drag_to(moved);

        let under_cursor = v.pixel_to_world(moved);
        assert!(close(under_cursor.x, grab.x));
        assert!(close(under_cursor.y, grab.y));
    }

    #[test]
    fn drag_without_press_is_a_no_op() {
        let mut v = vp();
        let before = v.center();
        v.drag_to(Vec2::new(123.0, 456.0));
        assert_eq!(v.center(), before);
    }

    #[test]
    fn release_stops_panning() {
        let mut v = vp();
        v.start_drag(Vec2::new(10.0, 10.0));
        v.drag_to(Vec2::new(20.0, 20.0));
        v.end_drag();
        let after_release = v.center();
        v.drag_to(Vec2::new(300.0, 300.0));
        assert_eq!(v.center(), after_release);
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn view_proj_maps_box_corners_to_ndc() {
        let v = vp();
        let m = v.view_proj();
        let apply = |p: Vec2| {
            (
                m[0][0] * p.x + m[3][0],
                m[1][1] * p.y + m[3][1],
            )
        };
        let (x0, y0) = apply(v.world_box().min());
        let (x1, y1) = apply(v.world_box().max());
        assert!(close(x0, -1.0));
        assert!(close(y0, 1.0)); // top of the box is the top of NDC
        assert!(close(x1, 1.0));
        assert!(close(y1, -1.0));
    }
}
