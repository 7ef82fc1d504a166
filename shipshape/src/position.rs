use crate::dimension::{Dimension, DimensionKind};
use crate::geometry::vector::{Size, Vec2};
use crate::length::CoordinatePair;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// Editor-space point: two independently typed dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexPosition {
    pub x: Dimension,
    pub y: Dimension,
}

impl VertexPosition {
    pub const fn new(x: Dimension, y: Dimension) -> Self {
        Self { x, y }
    }

    pub const fn from_percent(x: f64, y: f64) -> Self {
        Self::new(Dimension::percent(x), Dimension::percent(y))
    }

    pub fn axis(&self, axis: Axis) -> Dimension {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn with_x(self, x: Dimension) -> Self {
        Self::new(x, self.y)
    }

    pub fn with_y(self, y: Dimension) -> Self {
        Self::new(self.x, y)
    }

    pub fn with_axis(self, axis: Axis, d: Dimension) -> Self {
        match axis {
            Axis::X => self.with_x(d),
            Axis::Y => self.with_y(d),
        }
    }

    /// Moves to an absolute pixel position, keeping both unit kinds.
    pub fn with_vector(self, v: Vec2, max: Size) -> Self {
        Self::new(
            Dimension::from_pixels(self.x.kind, max.width, v.x),
            Dimension::from_pixels(self.y.kind, max.height, v.y),
        )
    }

    pub fn with_converted_kind(self, axis: Axis, kind: DimensionKind, max: Size) -> Self {
        match axis {
            Axis::X => self.with_x(self.x.with_converted_kind(kind, max.width)),
            Axis::Y => self.with_y(self.y.with_converted_kind(kind, max.height)),
        }
    }

    pub fn to_rounded(self) -> Self {
        Self::new(self.x.to_rounded(), self.y.to_rounded())
    }

    pub fn to_translated(self, delta: Vec2, max: Size) -> Self {
        Self::new(
            self.x.to_translated(delta.x, max.width),
            self.y.to_translated(delta.y, max.height),
        )
    }

    pub fn to_mirrored(self, origin: VertexPosition, max: Size) -> Self {
        Self::new(
            self.x.to_mirrored(origin.x, max.width),
            self.y.to_mirrored(origin.y, max.height),
        )
    }

    pub fn to_coordinate_pair(self, max: Size) -> CoordinatePair {
        CoordinatePair::new(self.x.to_length(max.width), self.y.to_length(max.height))
    }

    pub fn to_vector(self, max: Size) -> Vec2 {
        Vec2::new(self.x.to_pixels(max.width), self.y.to_pixels(max.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: Size = Size::new(300.0, 200.0);

    #[test]
    fn vector_round_trip_keeps_kinds() {
        let p = VertexPosition::new(Dimension::px_from_end(20.0), Dimension::percent(10.0));
        let moved = p.with_vector(Vec2::new(100.0, 50.0), MAX);
        assert_eq!(moved.x, Dimension::px_from_end(200.0));
        assert_eq!(moved.y, Dimension::percent(25.0));
        assert_eq!(moved.to_vector(MAX), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn translated_and_mirrored() {
        let origin = VertexPosition::from_percent(50.0, 0.0);
        let cp = origin.to_translated(Vec2::new(10.0, -6.0), Size::new(300.0, 300.0));
        assert_eq!(cp.to_vector(Size::new(300.0, 300.0)), Vec2::new(160.0, -6.0));
        let m = cp.to_mirrored(origin, Size::new(300.0, 300.0));
        assert_eq!(m.to_vector(Size::new(300.0, 300.0)), Vec2::new(140.0, 6.0));
    }

    #[test]
    fn coordinate_pair_renders_rounded() {
        let p = VertexPosition::new(Dimension::percent(53.3333), Dimension::px_from_start(4.4));
        assert_eq!(p.to_coordinate_pair(MAX).to_string(), "53.3% 4px");
    }
}
