use std::f32::consts::{PI, TAU};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::math::{constrain, map_range, Point};
use crate::sketch::{CanvasSize, FrameInput, Sketch};

const T_STEP: f32 = 0.02;
const PHASE_PER_FRAME: f32 = 0.01;

/// Lissajous curve `x = A sin(a t + δ)`, `y = A sin(b t)` traced one point per
/// frame. The trace restarts after a full period and whenever the canvas is
/// resized.
#[derive(Debug)]
pub struct Lissajous {
    points: Vec<Point>,
    t: f32,
    a: u32,
    b: u32,
    delta: f32,
}

pub fn build(_size: CanvasSize) -> Box<dyn Sketch> {
    Box::new(Lissajous::default())
}

impl Default for Lissajous {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            t: 0.0,
            a: 3,
            b: 4,
            delta: 0.0,
        }
    }
}

/// Frequency ratio term for one axis: pointer position mapped onto 1..=5.
pub fn ratio_term(position: f32, extent: f32) -> u32 {
    constrain(map_range(position, 0.0, extent, 1.0, 6.0).floor(), 1.0, 5.0) as u32
}

impl Lissajous {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn reset(&mut self) {
        self.points.clear();
        self.t = 0.0;
    }

    fn step(&mut self, size: CanvasSize) {
        if self.t < TAU {
            let amplitude = size.min_side() * 0.35;
            self.points.push(Point::new(
                amplitude * (self.a as f32 * self.t + self.delta).sin(),
                amplitude * (self.b as f32 * self.t).sin(),
            ));
            self.t += T_STEP;
        } else {
            self.reset();
        }
    }

    fn draw_trace(&self, canvas: &mut Canvas, center: Point) {
        if self.points.len() < 2 {
            return;
        }
        let total = self.points.len() as f32;
        for (i, pair) in self.points.windows(2).enumerate() {
            let progress = i as f32 / total;
            let hue = map_range(progress, 0.0, 1.0, 180.0, 280.0);
            let weight = map_range(progress, 0.0, 1.0, 1.5, 3.5);
            canvas.line(
                center + pair[0],
                center + pair[1],
                weight,
                Color::hsba(hue, 60.0, 85.0, 80.0),
            );
        }
        if let Some(&tip) = self.points.last() {
            canvas.fill_circle(center + tip, 4.0, Color::hsba(280.0, 70.0, 90.0, 90.0));
        }
    }
}

impl Sketch for Lissajous {
    fn draw(&mut self, canvas: &mut Canvas, input: &FrameInput) {
        canvas.background(Color::hsb(200.0, 10.0, 98.0));

        self.a = ratio_term(input.pointer.x, input.width());
        self.b = ratio_term(input.pointer.y, input.height());
        self.delta = input.frame as f32 * PHASE_PER_FRAME;

        self.step(input.size);
        self.draw_trace(canvas, input.size.center());
    }

    fn resized(&mut self, _size: CanvasSize) {
        self.reset();
    }

    fn caption(&self) -> Option<String> {
        let delta = self.delta % PI;
        Some(format!(
            "a:b = {}:{} · δ = {:.2} rad ({:.0}°)",
            self.a,
            self.b,
            delta,
            delta.to_degrees()
        ))
    }
}
