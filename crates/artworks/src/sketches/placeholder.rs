use crate::canvas::Canvas;
use crate::color::Color;
use crate::math::{map_range, Point};
use crate::sketch::{CanvasSize, FrameInput, Sketch};

/// Stand-in for artworks that are listed but not drawn yet: a violet
/// gradient with a softly pulsing dot.
#[derive(Debug, Default)]
pub struct ComingSoon;

pub fn build(_size: CanvasSize) -> Box<dyn Sketch> {
    Box::new(ComingSoon)
}

pub fn pulse_diameter(frame: u64) -> f32 {
    20.0 + (frame as f32 * 0.05).sin() * 5.0
}

impl Sketch for ComingSoon {
    fn draw(&mut self, canvas: &mut Canvas, input: &FrameInput) {
        let top = Color::rgb(102, 126, 234);
        let bottom = Color::rgb(118, 75, 162);
        for y in 0..canvas.height() {
            let t = map_range(y as f32, 0.0, input.height(), 0.0, 1.0);
            canvas.hline(y, top.lerp(bottom, t));
        }

        let dot = Point::new(input.width() / 2.0, input.height() / 2.0 + 100.0);
        canvas.fill_circle(dot, pulse_diameter(input.frame) / 2.0, Color::rgba(255, 255, 255, 100));
    }

    fn caption(&self) -> Option<String> {
        Some("coming soon".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_runs_top_to_bottom() {
        let mut canvas = Canvas::new(100, 300).unwrap();
        ComingSoon.draw(
            &mut canvas,
            &FrameInput {
                frame: 0,
                seconds: 0.0,
                pointer: Point::default(),
                size: CanvasSize::new(100, 300),
            },
        );
        assert_eq!(canvas.pixel(0, 0), Some([102, 126, 234, 255]));
        let [r, _, b, _] = canvas.pixel(0, 299).unwrap();
        assert!(r >= 117 && b <= 163);
    }

    #[test]
    fn pulse_stays_between_fifteen_and_twenty_five() {
        for frame in 0..500 {
            let d = pulse_diameter(frame);
            assert!((15.0..=25.0).contains(&d));
        }
    }
}
