use crate::canvas::Canvas;
use crate::color::Color;
use crate::math::{constrain, map_range, Point};
use crate::sketch::{CanvasSize, FrameInput, Sketch};

pub const MAX_DEPTH: u32 = 7;
const HUE_PER_LEVEL: f32 = 20.0;
const DRIFT_PER_FRAME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub apex: Point,
    pub left: Point,
    pub right: Point,
}

impl Triangle {
    /// Equilateral triangle with side `size`, centred on the canvas.
    pub fn centered(size: CanvasSize, side: f32) -> Self {
        let height = side * 3f32.sqrt() / 2.0;
        let apex = Point::new(size.width as f32 / 2.0, (size.height as f32 - height) / 2.0);
        Self {
            apex,
            left: Point::new(apex.x - side / 2.0, apex.y + height),
            right: Point::new(apex.x + side / 2.0, apex.y + height),
        }
    }

    fn split(self) -> [Triangle; 3] {
        let ab = self.apex.midpoint(self.left);
        let bc = self.left.midpoint(self.right);
        let ca = self.right.midpoint(self.apex);
        [
            Triangle { apex: self.apex, left: ab, right: ca },
            Triangle { apex: ab, left: self.left, right: bc },
            Triangle { apex: ca, left: bc, right: self.right },
        ]
    }
}

/// Leaf triangles after `depth` subdivisions, each with its hue. Every level
/// shifts the hue by 20°.
pub fn subdivide(triangle: Triangle, depth: u32, hue: f32, out: &mut Vec<(Triangle, f32)>) {
    if depth == 0 {
        out.push((triangle, hue));
        return;
    }
    let next = (hue + HUE_PER_LEVEL) % 360.0;
    for child in triangle.split() {
        subdivide(child, depth - 1, next, out);
    }
}

/// Sierpinski triangle with recursion depth 1 to 7 from pointer x and base hue
/// 150 to 320 from pointer y. Colours drift slowly over time.
#[derive(Debug, Default)]
pub struct Sierpinski {
    depth: u32,
    color_offset: f32,
    leaves: Vec<(Triangle, f32)>,
}

pub fn build(_size: CanvasSize) -> Box<dyn Sketch> {
    Box::new(Sierpinski::default())
}

impl Sketch for Sierpinski {
    fn draw(&mut self, canvas: &mut Canvas, input: &FrameInput) {
        canvas.background(Color::hsb(45.0, 8.0, 98.0));

        let depth = map_range(input.pointer.x, 0.0, input.width(), 1.0, 8.0).floor();
        self.depth = constrain(depth, 1.0, MAX_DEPTH as f32) as u32;
        let hue_base = map_range(input.pointer.y, 0.0, input.height(), 150.0, 320.0);
        self.color_offset += DRIFT_PER_FRAME;

        let outer = Triangle::centered(input.size, input.size.min_side() * 0.8);
        self.leaves.clear();
        subdivide(outer, self.depth, hue_base, &mut self.leaves);

        for (triangle, hue) in &self.leaves {
            let hue = (hue + self.color_offset) % 360.0;
            let corners = [triangle.apex, triangle.left, triangle.right];
            canvas.fill_polygon(&corners, Color::hsba(hue, 35.0, 95.0, 85.0));
            canvas.stroke_polygon(&corners, 0.5, Color::hsba(hue, 25.0, 80.0, 25.0));
        }
    }

    fn caption(&self) -> Option<String> {
        Some(format!(
            "depth {} · {} triangles",
            self.depth,
            3u32.pow(self.depth)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdivision_yields_three_to_the_depth_leaves() {
        let outer = Triangle::centered(CanvasSize::new(400, 300), 240.0);
        for depth in 0..=4 {
            let mut leaves = Vec::new();
            subdivide(outer, depth, 150.0, &mut leaves);
            assert_eq!(leaves.len(), 3usize.pow(depth));
            assert!(leaves
                .iter()
                .all(|(_, hue)| *hue == 150.0 + HUE_PER_LEVEL * depth as f32));
        }
    }

    #[test]
    fn outer_triangle_is_centred() {
        let outer = Triangle::centered(CanvasSize::new(400, 300), 240.0);
        assert_eq!(outer.apex.x, 200.0);
        assert_eq!(outer.left.y, outer.right.y);
        assert!((outer.right.x - outer.left.x - 240.0).abs() < 1e-4);
        let middle = (outer.apex.y + outer.left.y) / 2.0;
        assert!((middle - 150.0).abs() < 1e-3);
    }

    #[test]
    fn pointer_x_sets_depth() {
        let mut canvas = Canvas::new(400, 300).unwrap();
        let mut sketch = Sierpinski::default();
        let mut input = FrameInput {
            frame: 0,
            seconds: 0.0,
            pointer: Point::default(),
            size: CanvasSize::new(400, 300),
        };
        sketch.draw(&mut canvas, &input);
        assert_eq!(sketch.caption().as_deref(), Some("depth 1 · 3 triangles"));

        input.pointer = Point::new(400.0, 0.0);
        sketch.draw(&mut canvas, &input);
        assert_eq!(sketch.caption().as_deref(), Some("depth 7 · 2187 triangles"));
    }
}
