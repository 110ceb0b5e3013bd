use std::f32::consts::TAU;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::math::{map_range, Point};
use crate::sketch::{CanvasSize, FrameInput, Sketch};

const TIME_STEP: f32 = 0.02;
const SAMPLE_STEP: usize = 3;
const DOT_STEP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveShape {
    Sine,
    Cosine,
    /// `(sin θ + cos 1.3θ) · 0.4`
    Composite,
}

impl WaveShape {
    pub fn sample(self, angle: f32) -> f32 {
        match self {
            WaveShape::Sine => angle.sin(),
            WaveShape::Cosine => angle.cos(),
            WaveShape::Composite => (angle.sin() + (angle * 1.3).cos()) * 0.4,
        }
    }
}

struct Wave {
    shape: WaveShape,
    baseline: f32,
    amplitude: f32,
    frequency: f32,
    phase: f32,
    hue: f32,
    weight: f32,
}

impl Wave {
    fn y_at(&self, x: f32, width: f32) -> f32 {
        let angle = (x / width) * TAU * self.frequency + self.phase;
        self.baseline + self.shape.sample(angle) * self.amplitude
    }
}

/// Stacked sine, cosine and composite waves over a vertical gradient.
#[derive(Debug, Default)]
pub struct Waves {
    time: f32,
    frequency: f32,
    amplitude: f32,
}

pub fn build(_size: CanvasSize) -> Box<dyn Sketch> {
    Box::new(Waves::default())
}

impl Waves {
    fn gradient(canvas: &mut Canvas, height: f32) {
        for y in 0..canvas.height() {
            let hue = map_range(y as f32, 0.0, height, 200.0, 260.0);
            let brightness = map_range(y as f32, 0.0, height, 95.0, 85.0);
            canvas.hline(y, Color::hsb(hue, 30.0, brightness));
        }
    }

    fn stroke(canvas: &mut Canvas, wave: &Wave, width: f32) {
        let alpha = match wave.shape {
            WaveShape::Composite => 60.0,
            _ => 80.0,
        };
        let samples: Vec<Point> = (0..=width as usize)
            .step_by(SAMPLE_STEP)
            .map(|x| Point::new(x as f32, wave.y_at(x as f32, width)))
            .collect();
        for pair in samples.windows(2) {
            let brightness = map_range(pair[1].x, 0.0, width, 60.0, 90.0);
            canvas.line(
                pair[0],
                pair[1],
                wave.weight,
                Color::hsba(wave.hue, 70.0, brightness, alpha),
            );
        }

        if wave.shape == WaveShape::Composite {
            return;
        }
        for x in (0..=width as usize).step_by(DOT_STEP) {
            let dot = Point::new(x as f32, wave.y_at(x as f32, width));
            canvas.fill_circle(dot, 2.0, Color::hsba(wave.hue, 80.0, 95.0, 90.0));
        }
    }
}

impl Sketch for Waves {
    fn draw(&mut self, canvas: &mut Canvas, input: &FrameInput) {
        let (width, height) = (input.width(), input.height());
        Self::gradient(canvas, height);

        self.frequency = map_range(input.pointer.x, 0.0, width, 1.0, 5.0);
        self.amplitude = map_range(input.pointer.y, 0.0, height, 20.0, 100.0);
        let (f, a, t) = (self.frequency, self.amplitude, self.time);

        let waves = [
            Wave {
                shape: WaveShape::Sine,
                baseline: height * 0.3,
                amplitude: a,
                frequency: f,
                phase: t,
                hue: 0.0,
                weight: 2.0,
            },
            Wave {
                shape: WaveShape::Sine,
                baseline: height * 0.5,
                amplitude: a * 0.8,
                frequency: f * 1.5,
                phase: t * 1.2,
                hue: 120.0,
                weight: 2.5,
            },
            Wave {
                shape: WaveShape::Cosine,
                baseline: height * 0.7,
                amplitude: a * 0.6,
                frequency: f * 2.0,
                phase: t * 0.8,
                hue: 240.0,
                weight: 3.0,
            },
            Wave {
                shape: WaveShape::Composite,
                baseline: height * 0.5,
                amplitude: a,
                frequency: f,
                phase: t,
                hue: 180.0,
                weight: 1.5,
            },
        ];
        for wave in &waves {
            Self::stroke(canvas, wave, width);
        }

        self.time += TIME_STEP;
    }

    fn caption(&self) -> Option<String> {
        Some(format!(
            "frequency {:.1} · amplitude {:.0}",
            self.frequency, self.amplitude
        ))
    }
}
