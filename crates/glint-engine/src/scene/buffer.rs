use std::mem;
use std::sync::{Arc, Mutex};

use super::Shape;

/// Handle to the published shape list, shared with the render loop.
///
/// The render pass locks it once per frame, draws, and unlocks; [`SceneBuffer::flip`]
/// is the only writer and holds the same lock, so a reader can never observe a
/// partially updated list.
pub type VisibleShapes = Arc<Mutex<Vec<Shape>>>;

/// Double-buffered shape store.
///
/// `pending` belongs exclusively to the producer thread and needs no
/// synchronization; `visible` is the mutex-shared list the render loop draws.
/// Publishing moves `pending` wholesale into `visible` (a pointer move, not a
/// per-shape copy), so `flip` is O(1) and atomic with respect to the render
/// pass.
#[derive(Debug, Default)]
pub struct SceneBuffer {
    visible: VisibleShapes,
    pending: Vec<Shape>,
}

impl SceneBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shape to the pending (unpublished) list.
    #[inline]
    pub fn push(&mut self, shape: Shape) {
        self.pending.push(shape);
    }

    /// Shapes staged since the last flip.
    #[inline]
    pub fn pending(&self) -> &[Shape] {
        &self.pending
    }

    /// Publishes the pending list: `visible` becomes exactly the shapes pushed
    /// since the previous flip (in push order) and `pending` empties.
    ///
    /// Flipping with nothing staged publishes an empty scene.
    pub fn flip(&mut self) {
        let staged = mem::take(&mut self.pending);
        *self.visible.lock().unwrap() = staged;
    }

    /// Shared handle for the consumer side (render loop, tests).
    pub fn visible_handle(&self) -> VisibleShapes {
        Arc::clone(&self.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::CIRCLE_SIDES;

    fn circle_at(x: f32) -> Shape {
        Shape::circle(Vec2::new(x, 0.0), 2.0, Color::RED, CIRCLE_SIDES)
    }

    // ── publish semantics ─────────────────────────────────────────────────

    #[test]
    fn flip_publishes_in_push_order_and_empties_pending() {
        let mut scene = SceneBuffer::new();
        let visible = scene.visible_handle();

        scene.push(circle_at(1.0));
        scene.push(circle_at(2.0));
        scene.push(circle_at(3.0));
        assert!(visible.lock().unwrap().is_empty());

        scene.flip();

        let shapes = visible.lock().unwrap();
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0], circle_at(1.0));
        assert_eq!(shapes[1], circle_at(2.0));
        assert_eq!(shapes[2], circle_at(3.0));
        drop(shapes);
        assert!(scene.pending().is_empty());
    }

    #[test]
    fn flip_without_pushes_publishes_empty_scene() {
        let mut scene = SceneBuffer::new();
        let visible = scene.visible_handle();

        scene.push(circle_at(1.0));
        scene.flip();
        assert_eq!(visible.lock().unwrap().len(), 1);

        scene.flip();
        assert!(visible.lock().unwrap().is_empty());
    }

    #[test]
    fn flip_replaces_rather_than_appends() {
        let mut scene = SceneBuffer::new();
        let visible = scene.visible_handle();

        scene.push(circle_at(1.0));
        scene.push(circle_at(2.0));
        scene.flip();

        scene.push(circle_at(9.0));
        scene.flip();

        let shapes = visible.lock().unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0], circle_at(9.0));
    }

    #[test]
    fn published_circle_keeps_center_and_radius() {
        let mut scene = SceneBuffer::new();
        scene.push(Shape::circle(
            Vec2::new(10.0, 10.0),
            8.0,
            Color::GREEN,
            CIRCLE_SIDES,
        ));
        scene.flip();

        let visible = scene.visible_handle();
        let shapes = visible.lock().unwrap();
        assert_eq!(shapes.len(), 1);
        let Shape::NGon { center, radius, .. } = &shapes[0] else {
            panic!("expected an NGon");
        };
        assert_eq!(*center, Vec2::new(10.0, 10.0));
        assert_eq!(*radius, 4.0);
    }

    // ── atomicity ─────────────────────────────────────────────────────────

    #[test]
    fn readers_never_observe_a_mixed_list() {
        // The producer alternates between publishing 7 red shapes and 3 blue
        // shapes; a reader thread repeatedly locks the visible list the way
        // the render pass does. Every observation must be homogeneous.
        let mut scene = SceneBuffer::new();
        let visible = scene.visible_handle();

        let reader = std::thread::spawn(move || {
            for _ in 0..2_000 {
                let shapes = visible.lock().unwrap();
                let reds = shapes.iter().filter(|s| s.color() == Color::RED).count();
                let blues = shapes.iter().filter(|s| s.color() == Color::BLUE).count();
                assert!(
                    (reds == shapes.len() && blues == 0) || (blues == shapes.len() && reds == 0),
                    "observed a mix of old and new contents"
                );
                match shapes.len() {
                    0 | 3 | 7 => {}
                    n => panic!("observed a partially filled list of {n} shapes"),
                }
            }
        });

        for i in 0..2_000 {
            let (count, color) = if i % 2 == 0 { (7, Color::RED) } else { (3, Color::BLUE) };
            for _ in 0..count {
                scene.push(Shape::circle(Vec2::zero(), 1.0, color, CIRCLE_SIDES));
            }
            scene.flip();
        }

        reader.join().unwrap();
    }
}
