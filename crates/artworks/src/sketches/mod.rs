//! One module per artwork. Each exposes a sketch type and a `build`
//! constructor with the signature [`SketchRoutine`](crate::SketchRoutine)
//! expects.

pub mod circle;
pub mod lissajous;
pub mod mandelbrot;
pub mod placeholder;
pub mod polygon;
pub mod sierpinski;
pub mod spiral;
pub mod wave;

pub use circle::HarmonicCircles;
pub use lissajous::Lissajous;
pub use mandelbrot::Mandelbrot;
pub use placeholder::ComingSoon;
pub use polygon::PolygonMorph;
pub use sierpinski::Sierpinski;
pub use spiral::FibonacciSpiral;
pub use wave::Waves;
