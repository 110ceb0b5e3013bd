use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use thiserror::Error;

use crate::color::Color;
use crate::math::Point;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("canvas size {width}x{height} has no pixels")]
    Empty { width: u32, height: u32 },
    #[error("failed to encode canvas: {0}")]
    Image(#[from] image::ImageError),
}

/// RGBA raster with straight-alpha source-over blending.
///
/// Coordinates are in pixels with the origin at the top-left corner; pixel
/// `(x, y)` covers the square `[x, x + 1) × [y, y + 1)`. Shape edges are
/// anti-aliased by distance to the pixel centre.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::Empty { width, height });
        }
        Ok(Self {
            image: RgbaImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Reallocates when the size changes; contents are reset to transparent.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::Empty { width, height });
        }
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
        Ok(())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width() && y < self.height()).then(|| self.image.get_pixel(x, y).0)
    }

    /// Overwrites one pixel, ignoring alpha blending.
    pub fn put(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width() && y < self.height() {
            self.image.put_pixel(x, y, Rgba(color.to_rgba8()));
        }
    }

    pub fn background(&mut self, color: Color) {
        let fill = Rgba(color.with_alpha(1.0).to_rgba8());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Blends `color` into pixel `(x, y)` scaled by `coverage` in `0..=1`.
    pub fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        let [dr, dg, db, da] = pixel.0.map(|c| f32::from(c) / 255.0);
        let out_a = alpha + da * (1.0 - alpha);
        let mix = |src: f32, dst: f32| {
            if out_a <= 0.0 {
                0.0
            } else {
                (src * alpha + dst * da * (1.0 - alpha)) / out_a
            }
        };
        pixel.0 = Color::new(mix(color.r, dr), mix(color.g, dg), mix(color.b, db), out_a).to_rgba8();
    }

    /// Solid horizontal line across the full width at row `y`.
    pub fn hline(&mut self, y: u32, color: Color) {
        if y >= self.height() {
            return;
        }
        for x in 0..self.width() {
            self.blend(i64::from(x), i64::from(y), color, 1.0);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Color) {
        for py in y..y + i64::from(height) {
            for px in x..x + i64::from(width) {
                self.blend(px, py, color, 1.0);
            }
        }
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.cover(center, radius + 1.0, color, |distance| {
            coverage(radius + 0.5 - distance)
        });
    }

    pub fn stroke_circle(&mut self, center: Point, radius: f32, weight: f32, color: Color) {
        let half = weight.max(1.0) * 0.5;
        let strength = weight.min(1.0);
        self.cover(center, radius + half + 1.0, color, |distance| {
            coverage(half + 0.5 - (distance - radius).abs()) * strength
        });
    }

    /// Line segment with round caps; weights below one pixel fade instead of
    /// getting thinner.
    pub fn line(&mut self, from: Point, to: Point, weight: f32, color: Color) {
        let half = weight.max(1.0) * 0.5;
        let strength = weight.clamp(0.0, 1.0);
        let (min_x, max_x) = (from.x.min(to.x) - half - 1.0, from.x.max(to.x) + half + 1.0);
        let (min_y, max_y) = (from.y.min(to.y) - half - 1.0, from.y.max(to.y) + half + 1.0);

        for py in pixel_span(min_y, max_y, self.height()) {
            for px in pixel_span(min_x, max_x, self.width()) {
                let centre = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                let distance = distance_to_segment(centre, from, to);
                let cov = coverage(half + 0.5 - distance) * strength;
                if cov > 0.0 {
                    self.blend(px, py, color, cov);
                }
            }
        }
    }

    pub fn polyline(&mut self, points: &[Point], weight: f32, color: Color) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], weight, color);
        }
    }

    pub fn stroke_polygon(&mut self, points: &[Point], weight: f32, color: Color) {
        self.polyline(points, weight, color);
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if points.len() > 2 {
                self.line(last, first, weight, color);
            }
        }
    }

    /// Scanline fill using the non-zero winding rule, sampled at pixel centres.
    pub fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        let mut crossings: Vec<(f32, i32)> = Vec::with_capacity(points.len());
        for py in pixel_span(min_y, max_y, self.height()) {
            let sample_y = py as f32 + 0.5;
            crossings.clear();
            for (index, &a) in points.iter().enumerate() {
                let b = points[(index + 1) % points.len()];
                if a.y == b.y {
                    continue;
                }
                let (upper, lower, winding) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
                if sample_y < upper.y || sample_y >= lower.y {
                    continue;
                }
                let t = (sample_y - upper.y) / (lower.y - upper.y);
                crossings.push((upper.x + (lower.x - upper.x) * t, winding));
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                let start = (pair[0].0 - 0.5).ceil().max(0.0) as i64;
                let end = (pair[1].0 - 0.5).ceil().min(self.width() as f32) as i64;
                for px in start..end {
                    self.blend(px, py, color, 1.0);
                }
            }
        }
    }

    pub fn fill_triangle(&mut self, a: Point, b: Point, c: Point, color: Color) {
        self.fill_polygon(&[a, b, c], color);
    }

    /// Copies `source` opaquely with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, source: &Canvas, x: i64, y: i64) {
        for (sx, sy, pixel) in source.image.enumerate_pixels() {
            let (dx, dy) = (x + i64::from(sx), y + i64::from(sy));
            if dx < 0 || dy < 0 || dx >= i64::from(self.width()) || dy >= i64::from(self.height()) {
                continue;
            }
            self.image.put_pixel(dx as u32, dy as u32, *pixel);
        }
    }

    pub fn save_png(&self, path: &Path) -> Result<(), CanvasError> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    fn cover(&mut self, center: Point, reach: f32, color: Color, coverage_at: impl Fn(f32) -> f32) {
        for py in pixel_span(center.y - reach, center.y + reach, self.height()) {
            for px in pixel_span(center.x - reach, center.x + reach, self.width()) {
                let centre = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                let cov = coverage_at((centre - center).length());
                if cov > 0.0 {
                    self.blend(px, py, color, cov);
                }
            }
        }
    }
}

fn coverage(signed: f32) -> f32 {
    signed.clamp(0.0, 1.0)
}

/// Pixel indices overlapping `[min, max]`, clipped to `0..limit`.
fn pixel_span(min: f32, max: f32, limit: u32) -> std::ops::Range<i64> {
    if !min.is_finite() || !max.is_finite() {
        return 0..0;
    }
    let start = min.floor().max(0.0) as i64;
    let end = (max.ceil() as i64 + 1).min(i64::from(limit));
    start..end.max(start)
}

fn distance_to_segment(point: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let length_sq = ab.x * ab.x + ab.y * ab.y;
    if length_sq == 0.0 {
        return (point - a).length();
    }
    let ap = point - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / length_sq).clamp(0.0, 1.0);
    (point - (a + ab * t)).length()
}
