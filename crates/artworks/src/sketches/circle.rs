use std::f32::consts::TAU;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::math::{map_range, Point};
use crate::sketch::{CanvasSize, FrameInput, Sketch};

pub const WIDTH: u32 = 700;
pub const HEIGHT: u32 = 500;

const ORBIT: f32 = 150.0;
const RING_STEP: f32 = 15.0;
const FIRST_RING: f32 = 10.0;

/// Clusters of concentric rings spaced evenly on a circle.
///
/// Pointer x picks the number of clusters (3 to 15), pointer y the outermost
/// ring radius (50 to 200). Rings fade outwards.
#[derive(Debug, Default)]
pub struct HarmonicCircles {
    clusters: i32,
    max_radius: f32,
}

pub fn build(_size: CanvasSize) -> Box<dyn Sketch> {
    Box::new(HarmonicCircles::default())
}

impl Sketch for HarmonicCircles {
    fn draw(&mut self, canvas: &mut Canvas, input: &FrameInput) {
        canvas.background(Color::hsb(240.0, 10.0, 100.0));

        self.clusters = map_range(input.pointer.x, 0.0, input.width(), 3.0, 15.0).floor() as i32;
        self.max_radius = map_range(input.pointer.y, 0.0, input.height(), 50.0, 200.0);

        let center = input.size.center();
        let clusters = self.clusters.max(0);
        for i in 0..clusters {
            let angle = TAU / clusters as f32 * i as f32;
            let origin = center + Point::polar(ORBIT, angle);
            let hue = angle / TAU * 360.0;

            let mut radius = FIRST_RING;
            while radius < self.max_radius {
                let alpha = map_range(radius, FIRST_RING, self.max_radius, 80.0, 20.0);
                canvas.stroke_circle(origin, radius, 2.0, Color::hsba(hue, 70.0, 90.0, alpha));
                radius += RING_STEP;
            }

            canvas.fill_circle(origin, 5.0, Color::hsb(hue, 80.0, 95.0));
        }

        canvas.fill_circle(center, 15.0, Color::hsb(200.0, 60.0, 95.0));
    }

    fn caption(&self) -> Option<String> {
        Some(format!(
            "{} clusters · radius {:.0}",
            self.clusters.max(0),
            self.max_radius
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(pointer: Point) -> FrameInput {
        FrameInput {
            frame: 0,
            seconds: 0.0,
            pointer,
            size: CanvasSize::new(WIDTH, HEIGHT),
        }
    }

    #[test]
    fn pointer_drives_cluster_count_and_radius() {
        let mut canvas = Canvas::new(WIDTH, HEIGHT).unwrap();
        let mut sketch = HarmonicCircles::default();

        sketch.draw(&mut canvas, &frame(Point::default()));
        assert_eq!(sketch.caption().as_deref(), Some("3 clusters · radius 50"));

        sketch.draw(&mut canvas, &frame(Point::new(WIDTH as f32, HEIGHT as f32)));
        assert_eq!(sketch.caption().as_deref(), Some("15 clusters · radius 200"));
    }

    #[test]
    fn first_cluster_sits_right_of_centre() {
        let mut canvas = Canvas::new(WIDTH, HEIGHT).unwrap();
        HarmonicCircles::default().draw(&mut canvas, &frame(Point::default()));
        // Centre dot of cluster 0 at hue 0: saturated red-ish.
        let [r, g, b, _] = canvas.pixel(350 + 150, 250).unwrap();
        assert!(r > 200 && g < 100 && b < 100, "got {r},{g},{b}");
    }
}
