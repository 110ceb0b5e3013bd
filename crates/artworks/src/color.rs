/// Straight-alpha colour with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Hue in degrees (wraps), saturation and brightness in `0..=100`.
    pub fn hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self::hsba(hue, saturation, brightness, 100.0)
    }

    /// Like [`Color::hsb`] with alpha in `0..=100`.
    pub fn hsba(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let v = (brightness / 100.0).clamp(0.0, 1.0);
        let h = hue.rem_euclid(360.0) / 60.0;

        let chroma = v * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = v - chroma;
        Self::new(r + m, g + m, b + m, (alpha / 100.0).clamp(0.0, 1.0))
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsb_primaries() {
        assert_eq!(Color::hsb(0.0, 100.0, 100.0).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Color::hsb(120.0, 100.0, 100.0).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Color::hsb(240.0, 100.0, 50.0).to_rgba8(), [0, 0, 128, 255]);
        assert_eq!(Color::hsb(360.0, 100.0, 100.0).to_rgba8(), [255, 0, 0, 255]);
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(Color::hsb(200.0, 0.0, 100.0).to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::hsb(42.0, 0.0, 0.0).to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn hsba_alpha_is_percent() {
        assert_eq!(Color::hsba(60.0, 100.0, 100.0, 50.0).to_rgba8(), [255, 255, 0, 128]);
    }

    #[test]
    fn lerp_endpoints() {
        let from = Color::rgb(102, 126, 234);
        let to = Color::rgb(118, 75, 162);
        assert_eq!(from.lerp(to, 0.0).to_rgba8(), [102, 126, 234, 255]);
        assert_eq!(from.lerp(to, 1.0).to_rgba8(), [118, 75, 162, 255]);
        let mid = from.lerp(to, 0.5).to_rgba8();
        assert_eq!((mid[0], mid[2]), (110, 198));
    }
}
