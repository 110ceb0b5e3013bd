use std::f32::consts::FRAC_PI_2;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::math::{map_range, Point, PHI};
use crate::sketch::{CanvasSize, FrameInput, Sketch};

const ARMS: u32 = 6;
const SWEEP_DEGREES: f32 = 720.0;
const SEEDS: u32 = 200;
const SPIN_PER_FRAME: f32 = 0.5;

/// Six golden logarithmic spirals, `r = (R / 10) · φ^(θ / 90°)`, over a
/// phyllotaxis of golden-angle seeds. The whole figure turns half a degree per
/// frame.
#[derive(Debug, Default)]
pub struct FibonacciSpiral {
    angle: f32,
    density: f32,
    max_radius: f32,
}

pub fn build(_size: CanvasSize) -> Box<dyn Sketch> {
    Box::new(FibonacciSpiral::default())
}

/// Points of one spiral arm, relative to the centre. Stops once the radius
/// passes `max_radius`.
pub fn arm(max_radius: f32, step_degrees: f32, rotation_degrees: f32) -> Vec<(Point, f32)> {
    let step = step_degrees.max(0.1);
    let mut points = Vec::new();
    let mut theta = 0.0_f32;
    while theta < SWEEP_DEGREES {
        let r = (max_radius / 10.0) * PHI.powf(theta.to_radians() / FRAC_PI_2);
        if r > max_radius {
            break;
        }
        let direction = (theta + rotation_degrees).to_radians();
        points.push((Point::polar(r, direction), r));
        theta += step;
    }
    points
}

impl FibonacciSpiral {
    fn draw_arms(&self, canvas: &mut Canvas, center: Point) {
        for k in 0..ARMS {
            let offset = 360.0 / ARMS as f32 * k as f32;
            let points = arm(self.max_radius, self.density, offset + self.angle);
            for pair in points.windows(2) {
                let (from, _) = pair[0];
                let (to, r) = pair[1];
                let hue = (r / self.max_radius) * 180.0 + 180.0;
                canvas.line(center + from, center + to, 2.0, Color::hsba(hue, 80.0, 90.0, 70.0));
            }
        }
    }

    fn draw_seeds(&self, canvas: &mut Canvas, center: Point) {
        let golden_angle = 360.0 / (PHI * PHI);
        for i in 0..SEEDS {
            let theta = i as f32 * golden_angle + self.angle;
            let r = (i as f32).sqrt() * (self.max_radius / 15.0);
            if r > self.max_radius {
                break;
            }
            let size = map_range(r, 0.0, self.max_radius, 3.0, 1.0);
            let hue = theta.rem_euclid(360.0);
            canvas.fill_circle(
                center + Point::polar(r, theta.to_radians()),
                size * 0.5,
                Color::hsba(hue, 90.0, 100.0, 80.0),
            );
        }
    }
}

impl Sketch for FibonacciSpiral {
    fn draw(&mut self, canvas: &mut Canvas, input: &FrameInput) {
        canvas.background(Color::hsb(230.0, 20.0, 95.0));

        self.density = map_range(input.pointer.x, 0.0, input.width(), 1.0, 5.0);
        self.max_radius = map_range(input.pointer.y, 0.0, input.height(), 100.0, 250.0).max(1.0);

        let center = input.size.center();
        self.draw_arms(canvas, center);
        self.draw_seeds(canvas, center);

        self.angle += SPIN_PER_FRAME;
    }

    fn caption(&self) -> Option<String> {
        Some(format!(
            "step {:.1}° · radius {:.0}",
            self.density, self.max_radius
        ))
    }
}
