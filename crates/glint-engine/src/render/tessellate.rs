//! CPU tessellation of shapes into flat colored triangles.

use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::scene::Shape;

/// One vertex of the shape pipeline: world (or overlay pixel) position plus
/// straight-alpha color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShapeVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl ShapeVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Appends `shape` as a triangle fan over its outline vertices.
///
/// Convex outlines only, which both shape variants guarantee. An N-gon of
/// `n` sides yields `n − 2` triangles; a rectangle yields 2.
pub fn tessellate_into(shape: &Shape, out: &mut Vec<ShapeVertex>) {
    let outline = shape.vertices();
    if outline.len() < 3 {
        return;
    }
    let color = shape.color().to_array();
    let v = |i: usize| ShapeVertex {
        pos: [outline[i].x, outline[i].y],
        color,
    };
    for i in 1..outline.len() - 1 {
        out.push(v(0));
        out.push(v(i));
        out.push(v(i + 1));
    }
}

/// Tessellates every shape whose bounding box intersects `view_box` into
/// `out`, preserving list order.
///
/// This is the draw pass's culling step: an O(n) scan, no spatial index.
/// Shapes fully outside the viewport are skipped, not an error.
pub fn tessellate_visible(shapes: &[Shape], view_box: Rect, out: &mut Vec<ShapeVertex>) {
    out.clear();
    for shape in shapes {
        if view_box.intersects(shape.bounds()) {
            tessellate_into(shape, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::CIRCLE_SIDES;

    // ── triangle counts ───────────────────────────────────────────────────

    #[test]
    fn ngon_fans_into_sides_minus_two_triangles() {
        let mut out = Vec::new();
        tessellate_into(
            &Shape::circle(Vec2::zero(), 2.0, Color::RED, CIRCLE_SIDES),
            &mut out,
        );
        assert_eq!(out.len(), (CIRCLE_SIDES as usize - 2) * 3);
    }

    #[test]
    fn rect_fans_into_two_triangles() {
        let mut out = Vec::new();
        tessellate_into(
            &Shape::rect(Vec2::zero(), Vec2::new(2.0, 1.0), Color::GREEN),
            &mut out,
        );
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|v| v.color == Color::GREEN.to_array()));
    }

    // ── culling ───────────────────────────────────────────────────────────

    #[test]
    fn shapes_outside_the_view_box_are_skipped() {
        let inside = Shape::circle(Vec2::new(0.0, 0.0), 2.0, Color::RED, 4);
        let outside = Shape::circle(Vec2::new(100.0, 100.0), 2.0, Color::BLUE, 4);
        let view_box = Rect::from_center_size(Vec2::zero(), Vec2::new(10.0, 10.0));

        let mut out = Vec::new();
        tessellate_visible(&[inside, outside], view_box, &mut out);

        // Only the inside 4-gon survives: 2 triangles.
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|v| v.color == Color::RED.to_array()));
    }

    #[test]
    fn partially_overlapping_shapes_are_drawn() {
        // Box spans x ∈ [-5, 5]; the circle at x = 6 with radius 2 pokes in.
        let straddling = Shape::circle(Vec2::new(6.0, 0.0), 4.0, Color::RED, 4);
        let view_box = Rect::from_center_size(Vec2::zero(), Vec2::new(10.0, 10.0));

        let mut out = Vec::new();
        tessellate_visible(&[straddling], view_box, &mut out);
        assert!(!out.is_empty());
    }

    #[test]
    fn revisiting_reuses_the_buffer() {
        let shape = Shape::rect(Vec2::zero(), Vec2::new(1.0, 1.0), Color::WHITE);
        let view_box = Rect::from_center_size(Vec2::zero(), Vec2::new(10.0, 10.0));

        let mut out = Vec::new();
        tessellate_visible(std::slice::from_ref(&shape), view_box, &mut out);
        tessellate_visible(std::slice::from_ref(&shape), view_box, &mut out);
        assert_eq!(out.len(), 6);
    }
}
