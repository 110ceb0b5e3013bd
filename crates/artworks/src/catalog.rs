use gallery::{ArtworkDescriptor, Registry, RegistryError};

use crate::sketch::SketchRoutine;
use crate::sketches::{circle, lissajous, mandelbrot, placeholder, polygon, sierpinski, spiral, wave};

/// Every artwork in menu order. Unfinished pieces are listed as placeholders.
pub fn catalog() -> Result<Registry<SketchRoutine>, RegistryError> {
    let coming_soon = SketchRoutine::fit(placeholder::build);
    Registry::new(vec![
        ArtworkDescriptor::new(
            "circle",
            "Harmonic Circles",
            "The circle, the most basic figure in mathematics. Move the pointer to grow \
             patterns of rings and feel the beauty of 2πr.",
            SketchRoutine::fixed(circle::WIDTH, circle::HEIGHT, circle::build),
        ),
        ArtworkDescriptor::new(
            "spiral",
            "Fibonacci Spiral",
            "Spirals built on the Fibonacci sequence. The golden ratio φ = (1+√5)/2 ≈ 1.618 \
             weaves the harmony found in nature.",
            SketchRoutine::fit(spiral::build),
        ),
        ArtworkDescriptor::new(
            "fractal",
            "Mandelbrot Set",
            "A fractal on the complex plane. Endless complexity born from the simple \
             recurrence z → z² + c.",
            SketchRoutine::fit(mandelbrot::build),
        ),
        ArtworkDescriptor::new(
            "wave",
            "Trigonometric Waves",
            "Sine and cosine weaving waves together. Move the pointer to change their \
             shape and frequency.",
            SketchRoutine::fit(wave::build),
        ),
        ArtworkDescriptor::new(
            "lissajous",
            "Lissajous Figures",
            "Curves drawn by two perpendicular sine waves: x = A·sin(at + δ), y = B·sin(bt).",
            SketchRoutine::fit(lissajous::build),
        ),
        ArtworkDescriptor::placeholder(
            "rose",
            "Rose Curve",
            "Flower-like curves in polar coordinates. The petals of r = cos(kθ) change \
             with k.",
            coming_soon,
        ),
        ArtworkDescriptor::placeholder(
            "lorenz",
            "Lorenz Attractor",
            "The classic of chaos theory: three differential equations tracing an \
             unpredictable orbit in three dimensions.",
            coming_soon,
        ),
        ArtworkDescriptor::new(
            "polygon",
            "Polygon Metamorphosis",
            "Regular polygons morphing smoothly from a triangle upwards. The pointer sets \
             rotation speed and colour.",
            SketchRoutine::fit(polygon::build),
        ),
        ArtworkDescriptor::placeholder(
            "voronoi",
            "Voronoi Diagram",
            "A partition of the plane around a set of points, colouring the region \
             nearest to each one.",
            coming_soon,
        ),
        ArtworkDescriptor::placeholder(
            "fourier",
            "Fourier Series",
            "Any periodic function as a sum of sines: rotating circles combining into \
             intricate shapes.",
            coming_soon,
        ),
        ArtworkDescriptor::new(
            "sierpinski",
            "Sierpinski Triangle",
            "The textbook fractal. Remove the middle of a triangle and repeat on the three \
             that remain.",
            SketchRoutine::fit(sierpinski::build),
        ),
    ])
}
