use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Number of sides used for circles built via [`Shape::circle`].
pub const CIRCLE_SIDES: u32 = 20;

/// Default line thickness in world units.
pub const LINE_THICKNESS: f32 = 0.1;

/// A drawable primitive.
///
/// Everything the surface can draw reduces to one of two variants: a regular
/// N-gon (circles are N-gons with enough sides) or a rotated rectangle (lines
/// are thin rectangles). Keeping the set closed keeps culling and
/// tessellation uniform over all shape kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Regular polygon inscribed in a circle of `radius` around `center`.
    /// The first vertex points up (−Y); `sides >= 3`.
    NGon {
        center: Vec2,
        radius: f32,
        sides: u32,
        color: Color,
    },
    /// Rectangle centered on `center`, rotated by `rotation` radians
    /// (counterclockwise-positive in a +Y-down space).
    Rect {
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
    },
}

impl Shape {
    /// Circle approximated by an N-gon of `sides` sides.
    ///
    /// `diameter` matches the caller-facing convention; the stored radius is
    /// half of it.
    pub fn circle(center: Vec2, diameter: f32, color: Color, sides: u32) -> Self {
        Shape::NGon {
            center,
            radius: diameter / 2.0,
            sides: sides.max(3),
            color,
        }
    }

    /// Upward-pointing triangle: a 3-sided circle.
    pub fn triangle(center: Vec2, diameter: f32, color: Color) -> Self {
        Self::circle(center, diameter, color, 3)
    }

    /// Diamond: a 4-sided circle.
    pub fn diamond(center: Vec2, diameter: f32, color: Color) -> Self {
        Self::circle(center, diameter, color, 4)
    }

    /// Axis-aligned rectangle centered on `center`.
    pub fn rect(center: Vec2, size: Vec2, color: Color) -> Self {
        Shape::Rect {
            center,
            size,
            rotation: 0.0,
            color,
        }
    }

    /// Line segment from `p1` to `p2`, drawn as a thin rectangle:
    /// centered on the midpoint, as long as the segment, `thickness` wide,
    /// rotated by the segment's angle.
    pub fn line(p1: Vec2, p2: Vec2, color: Color, thickness: f32) -> Self {
        let d = p2 - p1;
        Shape::Rect {
            center: (p1 + p2) / 2.0,
            size: Vec2::new(d.length(), thickness),
            rotation: d.angle(),
            color,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        match *self {
            Shape::NGon { color, .. } | Shape::Rect { color, .. } => color,
        }
    }

    /// World-space axis-aligned bounding box, used for visibility culling.
    ///
    /// N-gons use the circumscribed circle's box; rotated rectangles use the
    /// extents of their rotated corners.
    pub fn bounds(&self) -> Rect {
        match *self {
            Shape::NGon { center, radius, .. } => {
                Rect::from_center_size(center, Vec2::new(radius * 2.0, radius * 2.0))
            }
            Shape::Rect {
                center,
                size,
                rotation,
                ..
            } => {
                let (sin, cos) = rotation.sin_cos();
                // Extent of a rotated half-size box along each axis.
                let hx = (size.x / 2.0 * cos).abs() + (size.y / 2.0 * sin).abs();
                let hy = (size.x / 2.0 * sin).abs() + (size.y / 2.0 * cos).abs();
                Rect::from_center_size(center, Vec2::new(hx * 2.0, hy * 2.0))
            }
        }
    }

    /// Corner positions of a rect variant after rotation; N-gon vertices for
    /// the polygon variant, starting at the top and winding clockwise in
    /// screen space.
    pub fn vertices(&self) -> Vec<Vec2> {
        match *self {
            Shape::NGon {
                center,
                radius,
                sides,
                ..
            } => (0..sides)
                .map(|i| {
                    let angle = -std::f32::consts::FRAC_PI_2
                        + std::f32::consts::TAU * i as f32 / sides as f32;
                    let (sin, cos) = angle.sin_cos();
                    center + Vec2::new(cos * radius, sin * radius)
                })
                .collect(),
            Shape::Rect {
                center,
                size,
                rotation,
                ..
            } => {
                let hw = size.x / 2.0;
                let hh = size.y / 2.0;
                let (sin, cos) = rotation.sin_cos();
                [
                    Vec2::new(-hw, -hh),
                    Vec2::new(hw, -hh),
                    Vec2::new(hw, hh),
                    Vec2::new(-hw, hh),
                ]
                .into_iter()
                .map(|c| center + Vec2::new(c.x * cos - c.y * sin, c.x * sin + c.y * cos))
                .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── circle family ─────────────────────────────────────────────────────

    #[test]
    fn circle_stores_center_and_half_diameter() {
        let c = Shape::circle(Vec2::new(10.0, 10.0), 8.0, Color::RED, CIRCLE_SIDES);
        let Shape::NGon { center, radius, .. } = c else {
            panic!("circle should be an NGon");
        };
        assert_eq!(center, Vec2::new(10.0, 10.0));
        assert_eq!(radius, 4.0);
    }

    #[test]
    fn triangle_is_a_three_sided_circle() {
        let tri = Shape::triangle(Vec2::new(50.0, 10.0), 10.0, Color::MAGENTA);
        let circ = Shape::circle(Vec2::new(50.0, 10.0), 10.0, Color::MAGENTA, 3);
        assert_eq!(tri, circ);
    }

    #[test]
    fn diamond_is_a_four_sided_circle() {
        let dia = Shape::diamond(Vec2::new(75.0, 10.0), 10.0, Color::CYAN);
        let circ = Shape::circle(Vec2::new(75.0, 10.0), 10.0, Color::CYAN, 4);
        assert_eq!(dia, circ);
    }

    #[test]
    fn ngon_first_vertex_points_up() {
        let tri = Shape::triangle(Vec2::zero(), 2.0, Color::WHITE);
        let verts = tri.vertices();
        assert_eq!(verts.len(), 3);
        assert!(close(verts[0].x, 0.0));
        assert!(close(verts[0].y, -1.0));
    }

    // ── lines ─────────────────────────────────────────────────────────────

    #[test]
    fn line_derives_length_midpoint_and_rotation() {
        let line = Shape::line(
            Vec2::new(10.0, 10.0),
            Vec2::new(30.0, 40.0),
            Color::BLUE,
            LINE_THICKNESS,
        );
        let Shape::Rect {
            center,
            size,
            rotation,
            ..
        } = line
        else {
            panic!("line should be a Rect");
        };
        assert_eq!(center, Vec2::new(20.0, 25.0));
        assert!(close(size.x, (20.0f32 * 20.0 + 30.0 * 30.0).sqrt())); // ≈ 36.06
        assert!(close(size.y, LINE_THICKNESS));
        assert!(close(rotation, 30.0f32.atan2(20.0)));
    }

    #[test]
    fn zero_length_line_is_degenerate_but_valid() {
        let line = Shape::line(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), Color::WHITE, 0.1);
        let Shape::Rect { size, .. } = line else {
            panic!();
        };
        assert_eq!(size.x, 0.0);
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn ngon_bounds_is_circumscribed_box() {
        let c = Shape::circle(Vec2::new(10.0, 10.0), 8.0, Color::RED, CIRCLE_SIDES);
        assert_eq!(c.bounds(), Rect::new(6.0, 6.0, 8.0, 8.0));
    }

    #[test]
    fn axis_aligned_rect_bounds_matches_size() {
        let r = Shape::rect(Vec2::new(30.0, 40.0), Vec2::new(15.0, 10.0), Color::RED);
        assert_eq!(r.bounds(), Rect::new(22.5, 35.0, 15.0, 10.0));
    }

    #[test]
    fn rotated_rect_bounds_covers_corners() {
        // 45° rotation of a 10×10 square: extent grows to 10·√2.
        let r = Shape::Rect {
            center: Vec2::zero(),
            size: Vec2::new(10.0, 10.0),
            rotation: std::f32::consts::FRAC_PI_4,
            color: Color::WHITE,
        };
        let b = r.bounds();
        assert!(close(b.size.x, 10.0 * std::f32::consts::SQRT_2));
        assert!(close(b.size.y, 10.0 * std::f32::consts::SQRT_2));
        for v in r.vertices() {
            assert!(b.min().x - 1e-4 <= v.x && v.x <= b.max().x + 1e-4);
            assert!(b.min().y - 1e-4 <= v.y && v.y <= b.max().y + 1e-4);
        }
    }
}
