use crate::canvas::Canvas;
use crate::color::Color;
use crate::math::{map_range, Point};
use crate::sketch::{CanvasSize, FrameInput, Sketch};

const CENTER_RE: f64 = -0.5;
const START_ZOOM: f32 = 1.0;
const START_ITERATIONS: u32 = 100;

/// Escape-time Mandelbrot set.
///
/// Parameters only change when the pointer moves: x picks the zoom (1 to 4),
/// y the iteration budget (50 to 200). The fractal is recomputed only when the
/// parameters or the canvas size change; other frames reuse the cached image.
pub struct Mandelbrot {
    zoom: f32,
    max_iterations: u32,
    last_pointer: Option<Point>,
    cache: Option<Rendered>,
}

struct Rendered {
    zoom: f32,
    max_iterations: u32,
    image: Canvas,
}

pub fn build(_size: CanvasSize) -> Box<dyn Sketch> {
    Box::new(Mandelbrot::default())
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self {
            zoom: START_ZOOM,
            max_iterations: START_ITERATIONS,
            last_pointer: None,
            cache: None,
        }
    }
}

/// Iterations `z → z² + c` takes to leave radius 2, or `max_iterations` when
/// it never does.
pub fn escape_time(re: f64, im: f64, max_iterations: u32) -> u32 {
    let (mut za, mut zb) = (0.0_f64, 0.0_f64);
    let mut n = 0;
    while n < max_iterations {
        let aa = za * za - zb * zb;
        let bb = 2.0 * za * zb;
        za = aa + re;
        zb = bb + im;
        if za * za + zb * zb > 4.0 {
            break;
        }
        n += 1;
    }
    n
}

pub fn shade(n: u32, max_iterations: u32) -> Color {
    if n >= max_iterations {
        return Color::BLACK;
    }
    let hue = map_range((n as f32).sqrt(), 0.0, (max_iterations as f32).sqrt(), 180.0, 360.0);
    let brightness = map_range(n as f32, 0.0, max_iterations as f32, 50.0, 100.0);
    Color::hsb(hue, 80.0, brightness)
}

impl Mandelbrot {
    fn update_parameters(&mut self, input: &FrameInput) {
        match self.last_pointer {
            Some(previous) if previous != input.pointer => {
                self.zoom = map_range(input.pointer.x, 0.0, input.width(), 1.0, 4.0);
                self.max_iterations =
                    map_range(input.pointer.y, 0.0, input.height(), 50.0, 200.0).floor().max(1.0) as u32;
            }
            _ => {}
        }
        self.last_pointer = Some(input.pointer);
    }

    fn is_current(&self, size: CanvasSize) -> bool {
        self.cache.as_ref().is_some_and(|cache| {
            cache.zoom == self.zoom
                && cache.max_iterations == self.max_iterations
                && cache.image.width() == size.width
                && cache.image.height() == size.height
        })
    }

    fn render(&self, size: CanvasSize) -> Option<Canvas> {
        let mut image = Canvas::new(size.width, size.height).ok()?;
        let zoom = f64::from(self.zoom);
        let (w, h) = (f64::from(size.width), f64::from(size.height));
        let (re_min, re_max) = (-2.5 / zoom + CENTER_RE, 1.0 / zoom + CENTER_RE);
        let (im_min, im_max) = (-1.0 / zoom, 1.0 / zoom);

        for y in 0..size.height {
            let im = im_min + (im_max - im_min) * f64::from(y) / h;
            for x in 0..size.width {
                let re = re_min + (re_max - re_min) * f64::from(x) / w;
                let n = escape_time(re, im, self.max_iterations);
                image.put(x, y, shade(n, self.max_iterations));
            }
        }
        Some(image)
    }
}

impl Sketch for Mandelbrot {
    fn draw(&mut self, canvas: &mut Canvas, input: &FrameInput) {
        self.update_parameters(input);
        if !self.is_current(input.size) {
            if let Some(image) = self.render(input.size) {
                self.cache = Some(Rendered {
                    zoom: self.zoom,
                    max_iterations: self.max_iterations,
                    image,
                });
            }
        }
        if let Some(cache) = &self.cache {
            canvas.blit(&cache.image, 0, 0);
        }
    }

    fn resized(&mut self, _size: CanvasSize) {
        self.cache = None;
    }

    fn caption(&self) -> Option<String> {
        Some(format!(
            "zoom {:.2}x · {} iterations",
            self.zoom, self.max_iterations
        ))
    }
}
