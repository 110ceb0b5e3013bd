use std::f32::consts::{FRAC_PI_2, TAU};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::math::{map_range, Point};
use crate::sketch::{CanvasSize, FrameInput, Sketch};

const TIME_STEP: f32 = 0.01;
const LAYERS: u32 = 5;

/// Layered regular polygons whose side count drifts between 3 and 12.
///
/// Pointer x sets the rotation speed, pointer y the base hue. Fractional side
/// counts are drawn with a partial last vertex so the shape morphs smoothly.
#[derive(Debug, Default)]
pub struct PolygonMorph {
    time: f32,
    sides: f32,
}

pub fn build(_size: CanvasSize) -> Box<dyn Sketch> {
    Box::new(PolygonMorph::default())
}

/// Vertices of a polygon with a possibly fractional number of sides, first
/// vertex pointing up, relative to the centre.
pub fn vertices(sides: f32, radius: f32, rotation: f32) -> Vec<Point> {
    let sides = sides.max(1.0);
    let whole = sides.floor();
    let fractional = sides - whole;
    let step = TAU / sides;

    let mut points: Vec<Point> = (0..=whole as u32)
        .map(|i| Point::polar(radius, step * i as f32 - FRAC_PI_2 + rotation))
        .collect();
    if fractional > 0.01 {
        let angle = step * (whole + 1.0) - FRAC_PI_2 + rotation;
        points.push(Point::polar(radius * fractional, angle));
    }
    points
}

pub fn side_count(time: f32) -> f32 {
    3.0 + ((time * 0.5).sin() + 1.0) * 4.5
}

fn draw_polygon(canvas: &mut Canvas, center: Point, outline: &[Point], hue: f32, alpha: f32) {
    let points: Vec<Point> = outline.iter().map(|&p| center + p).collect();
    canvas.fill_polygon(&points, Color::hsba(hue, 35.0, 95.0, alpha));
    canvas.stroke_polygon(&points, 1.5, Color::hsba(hue, 50.0, 85.0, alpha));
}

impl Sketch for PolygonMorph {
    fn draw(&mut self, canvas: &mut Canvas, input: &FrameInput) {
        canvas.background(Color::hsb(0.0, 0.0, 95.0));
        self.time += TIME_STEP;

        let speed = map_range(input.pointer.x, 0.0, input.width(), 0.005, 0.05);
        let rotation = self.time * speed;
        let base_hue = map_range(input.pointer.y, 0.0, input.height(), 0.0, 360.0);
        let center = input.size.center();
        self.sides = side_count(self.time);

        for layer in (1..=LAYERS).rev() {
            let layer = layer as f32;
            let hue = (base_hue + layer * 30.0).rem_euclid(360.0);
            let alpha = map_range(layer, 1.0, 5.0, 100.0, 30.0);
            let radius = map_range(layer, 1.0, 5.0, 50.0, 150.0);
            let outline = vertices(self.sides + layer * 0.5, radius, rotation * layer * 0.2);
            draw_polygon(canvas, center, &outline, hue, alpha);
        }

        let core = vertices(self.sides, 30.0, -rotation * 2.0);
        draw_polygon(canvas, center, &core, (base_hue + 180.0).rem_euclid(360.0), 100.0);
    }

    fn caption(&self) -> Option<String> {
        Some(format!("{:.2} sides", self.sides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_side_counts_close_the_loop() {
        let square = vertices(4.0, 10.0, 0.0);
        assert_eq!(square.len(), 5);
        assert!((square[0].x).abs() < 1e-4 && (square[0].y + 10.0).abs() < 1e-4);
        let last = square[4];
        assert!((last.x - square[0].x).abs() < 1e-4 && (last.y - square[0].y).abs() < 1e-4);
    }

    #[test]
    fn fractional_sides_add_a_shortened_vertex() {
        let shape = vertices(4.5, 10.0, 0.0);
        assert_eq!(shape.len(), 6);
        assert!((shape[5].length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn side_count_oscillates_between_three_and_twelve() {
        assert_eq!(side_count(0.0), 7.5);
        for step in 0..2000 {
            let sides = side_count(step as f32 * 0.01);
            assert!((3.0..=12.0).contains(&sides));
        }
    }
}
