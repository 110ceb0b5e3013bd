use crate::canvas::Canvas;
use crate::math::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    pub fn min_side(self) -> f32 {
        self.width.min(self.height) as f32
    }
}

/// How a sketch picks its canvas size from the space the host offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasSizing {
    Fixed(CanvasSize),
    /// Container width minus padding; height is 70% of that, kept in 300..=500.
    FitContainer,
}

impl CanvasSizing {
    pub const PADDING: u32 = 20;
    pub const MIN_HEIGHT: u32 = 300;
    pub const MAX_HEIGHT: u32 = 500;

    pub fn resolve(self, container_width: u32) -> CanvasSize {
        match self {
            CanvasSizing::Fixed(size) => size,
            CanvasSizing::FitContainer => {
                let width = container_width.saturating_sub(Self::PADDING).max(1);
                let height = (width.saturating_mul(7) / 10).clamp(Self::MIN_HEIGHT, Self::MAX_HEIGHT);
                CanvasSize::new(width, height)
            }
        }
    }

    pub fn is_fixed(self) -> bool {
        matches!(self, CanvasSizing::Fixed(_))
    }
}

/// Per-frame input handed to a sketch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Frames drawn by this instance so far; zero on the first call.
    pub frame: u64,
    pub seconds: f32,
    /// Pointer in canvas pixels. Not clamped; starts at the origin.
    pub pointer: Point,
    pub size: CanvasSize,
}

impl FrameInput {
    pub fn width(&self) -> f32 {
        self.size.width as f32
    }

    pub fn height(&self) -> f32 {
        self.size.height as f32
    }
}

/// A stateful drawing routine. Each instance owns its own state.
pub trait Sketch {
    fn draw(&mut self, canvas: &mut Canvas, input: &FrameInput);

    /// Called after the host resized the canvas.
    fn resized(&mut self, _size: CanvasSize) {}

    /// Short status line, e.g. the current parameters.
    fn caption(&self) -> Option<String> {
        None
    }
}

/// The drawing routine stored in an artwork descriptor.
#[derive(Debug, Clone, Copy)]
pub struct SketchRoutine {
    pub sizing: CanvasSizing,
    pub build: fn(CanvasSize) -> Box<dyn Sketch>,
}

impl SketchRoutine {
    pub const fn fit(build: fn(CanvasSize) -> Box<dyn Sketch>) -> Self {
        Self {
            sizing: CanvasSizing::FitContainer,
            build,
        }
    }

    pub const fn fixed(width: u32, height: u32, build: fn(CanvasSize) -> Box<dyn Sketch>) -> Self {
        Self {
            sizing: CanvasSizing::Fixed(CanvasSize::new(width, height)),
            build,
        }
    }

    pub fn instantiate(&self, size: CanvasSize) -> Box<dyn Sketch> {
        (self.build)(size)
    }
}
