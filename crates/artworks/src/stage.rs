use tracing::debug;

use crate::canvas::{Canvas, CanvasError};
use crate::math::Point;
use crate::sketch::{CanvasSize, CanvasSizing, FrameInput, Sketch, SketchRoutine};

/// Container width used when no window tells us otherwise.
pub const DEFAULT_CONTAINER_WIDTH: u32 = 820;

/// A sketch bound to a routine, plus its frame counter.
pub struct SketchInstance {
    sketch: Box<dyn Sketch>,
    sizing: CanvasSizing,
    frame: u64,
}

impl SketchInstance {
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn sizing(&self) -> CanvasSizing {
        self.sizing
    }

    pub fn caption(&self) -> Option<String> {
        self.sketch.caption()
    }
}

/// The surface a host presents: one canvas, sized for whichever sketch is
/// live, plus the container width it was laid out against.
pub struct Stage {
    canvas: Canvas,
    container_width: u32,
}

impl Stage {
    pub fn new(container_width: u32) -> Result<Self, CanvasError> {
        let size = CanvasSizing::FitContainer.resolve(container_width);
        Ok(Self {
            canvas: Canvas::new(size.width, size.height)?,
            container_width,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.canvas.width(), self.canvas.height())
    }

    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    pub fn instantiate(&mut self, routine: &SketchRoutine) -> Result<SketchInstance, CanvasError> {
        let size = routine.sizing.resolve(self.container_width);
        self.canvas.resize(size.width, size.height)?;
        self.canvas.clear();
        Ok(SketchInstance {
            sketch: routine.instantiate(size),
            sizing: routine.sizing,
            frame: 0,
        })
    }

    /// Records a new container width and resizes the canvas for `live` when
    /// its sizing depends on the container. Returns true when the canvas
    /// changed size.
    pub fn set_container_width(
        &mut self,
        width: u32,
        live: Option<&mut SketchInstance>,
    ) -> Result<bool, CanvasError> {
        self.container_width = width;
        let Some(instance) = live else {
            return Ok(false);
        };
        let size = instance.sizing.resolve(width);
        if size == self.size() {
            return Ok(false);
        }
        self.canvas.resize(size.width, size.height)?;
        instance.sketch.resized(size);
        debug!(width = size.width, height = size.height, "resized sketch canvas");
        Ok(true)
    }

    pub fn advance(&mut self, instance: &mut SketchInstance, seconds: f32, pointer: Point) {
        let input = FrameInput {
            frame: instance.frame,
            seconds,
            pointer,
            size: self.size(),
        };
        instance.sketch.draw(&mut self.canvas, &input);
        instance.frame += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    struct Counter {
        resized: Vec<CanvasSize>,
    }

    impl Sketch for Counter {
        fn draw(&mut self, canvas: &mut Canvas, input: &FrameInput) {
            let shade = (input.frame * 10) as u8;
            canvas.background(Color::rgb(shade, shade, shade));
        }

        fn resized(&mut self, size: CanvasSize) {
            self.resized.push(size);
        }

        fn caption(&self) -> Option<String> {
            Some(format!("resized {} times", self.resized.len()))
        }
    }

    fn counter(_: CanvasSize) -> Box<dyn Sketch> {
        Box::new(Counter { resized: Vec::new() })
    }

    #[test]
    fn instantiate_sizes_canvas_for_routine() {
        let mut stage = Stage::new(620).unwrap();
        let instance = stage.instantiate(&SketchRoutine::fixed(70, 50, counter)).unwrap();
        assert_eq!(stage.size(), CanvasSize::new(70, 50));
        assert_eq!(instance.frame(), 0);
        assert_eq!(stage.canvas().pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn advance_counts_frames() {
        let mut stage = Stage::new(620).unwrap();
        let mut instance = stage.instantiate(&SketchRoutine::fit(counter)).unwrap();
        for _ in 0..3 {
            stage.advance(&mut instance, 0.0, Point::default());
        }
        assert_eq!(instance.frame(), 3);
        assert_eq!(stage.canvas().pixel(0, 0), Some([20, 20, 20, 255]));
    }

    #[test]
    fn container_resize_only_touches_fit_sketches() {
        let mut stage = Stage::new(620).unwrap();
        let mut fixed = stage.instantiate(&SketchRoutine::fixed(70, 50, counter)).unwrap();
        assert!(!stage.set_container_width(400, Some(&mut fixed)).unwrap());

        let mut fit = stage.instantiate(&SketchRoutine::fit(counter)).unwrap();
        assert_eq!(stage.size(), CanvasSize::new(380, 300));
        assert!(stage.set_container_width(820, Some(&mut fit)).unwrap());
        assert_eq!(stage.size(), CanvasSize::new(800, 500));
        assert_eq!(fit.caption().as_deref(), Some("resized 1 times"));
    }
}
