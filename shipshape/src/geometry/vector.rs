use super::tolerance::{clamp01, EPS_LEN};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point or offset in absolute pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// Extent of the container that percent and from-end dimensions resolve against.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::new(300.0, 300.0)
    }
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length_sq().sqrt()
    }

    /// Point reflection of `self` through `origin`.
    pub fn reflect_through(self, origin: Vec2) -> Vec2 {
        Vec2::new(2.0 * origin.x - self.x, 2.0 * origin.y - self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Linear interpolation written as a weighted sum so `t = 0` yields exactly `a`
/// and `t = 1` yields exactly `b`.
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    let u = 1.0 - t;
    Vec2::new(a.x * u + b.x * t, a.y * u + b.y * t)
}

/// Nearest point on a curve or segment together with its parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub point: Vec2,
    pub t: f64,
}

/// Exact projection onto the segment `start..end`, clamped to its endpoints.
pub fn closest_point_on_line(start: Vec2, end: Vec2, point: Vec2) -> Projection {
    let line = end - start;
    let len_sq = line.length_sq();
    if len_sq <= EPS_LEN {
        return Projection { point: start, t: 0.0 };
    }
    let t = clamp01((point - start).dot(line) / len_sq);
    Projection {
        point: lerp(start, end, t),
        t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints_exactly() {
        let a = Vec2::new(0.1, -7.3);
        let b = Vec2::new(0.3, 1e9 / 3.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(Vec2::new(0.0, 0.0), Vec2::new(10.0, 20.0), 0.5), Vec2::new(5.0, 10.0));
    }

    #[test]
    fn projection_clamps_to_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let mid = closest_point_on_line(a, b, Vec2::new(4.0, 3.0));
        assert_eq!(mid.point, Vec2::new(4.0, 0.0));
        assert!((mid.t - 0.4).abs() < 1e-12);

        let before = closest_point_on_line(a, b, Vec2::new(-5.0, 1.0));
        assert_eq!(before.t, 0.0);
        assert_eq!(before.point, a);

        let after = closest_point_on_line(a, b, Vec2::new(50.0, -1.0));
        assert_eq!(after.t, 1.0);
        assert_eq!(after.point, b);
    }

    #[test]
    fn zero_length_segment_returns_start() {
        let p = Vec2::new(3.0, 3.0);
        let r = closest_point_on_line(p, p, Vec2::new(9.0, 9.0));
        assert_eq!(r, Projection { point: p, t: 0.0 });
    }

    #[test]
    fn reflect_through_origin() {
        let p = Vec2::new(160.0, -6.0);
        assert_eq!(p.reflect_through(Vec2::new(150.0, 0.0)), Vec2::new(140.0, 6.0));
    }
}
