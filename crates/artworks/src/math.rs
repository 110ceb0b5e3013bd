use std::ops::{Add, Mul, Sub};

/// Golden ratio, `(1 + √5) / 2`.
pub const PHI: f32 = 1.618_034;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the origin in direction `angle` (radians).
    pub fn polar(radius: f32, angle: f32) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Re-maps `value` from `[start1, stop1]` onto `[start2, stop2]` without
/// clamping. A degenerate source range maps everything onto `start2`.
pub fn map_range(value: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    let span = stop1 - start1;
    if span == 0.0 {
        return start2;
    }
    start2 + (stop2 - start2) * ((value - start1) / span)
}

pub fn constrain<T: PartialOrd>(value: T, low: T, high: T) -> T {
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_extrapolates() {
        assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        assert_eq!(map_range(0.0, 0.0, 10.0, 3.0, 15.0), 3.0);
        assert_eq!(map_range(20.0, 0.0, 10.0, 0.0, 1.0), 2.0);
        assert_eq!(map_range(3.0, 10.0, 0.0, 0.0, 10.0), 7.0);
        assert_eq!(map_range(1.0, 2.0, 2.0, 7.0, 9.0), 7.0);
    }

    #[test]
    fn constrain_clamps_both_ends() {
        assert_eq!(constrain(0, 1, 5), 1);
        assert_eq!(constrain(9, 1, 5), 5);
        assert_eq!(constrain(2.5, 1.0, 5.0), 2.5);
    }

    #[test]
    fn golden_ratio_squares_to_itself_plus_one() {
        assert!((PHI * PHI - (PHI + 1.0)).abs() < 1e-5);
    }
}
