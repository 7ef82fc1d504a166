//! One path point with optional Bézier control points.

use crate::dimension::DimensionKind;
use crate::error::{Result, ShapeError};
use crate::geometry::tolerance::MIRROR_TOLERANCE_PX;
use crate::geometry::vector::Size;
use crate::position::{Axis, VertexPosition};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a vertex; survives every mutation of the vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(Uuid);

impl VertexId {
    pub fn new() -> Self {
        VertexId(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(VertexId)
    }
}

impl Default for VertexId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    pub fn part(self) -> VertexPart {
        match self {
            Direction::Forward => VertexPart::ControlPointForward,
            Direction::Backward => VertexPart::ControlPointBackward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        })
    }
}

/// Addressable part of a vertex: its own position or one of its control points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VertexPart {
    Position,
    ControlPointForward,
    ControlPointBackward,
}

impl VertexPart {
    pub fn direction(self) -> Option<Direction> {
        match self {
            VertexPart::Position => None,
            VertexPart::ControlPointForward => Some(Direction::Forward),
            VertexPart::ControlPointBackward => Some(Direction::Backward),
        }
    }
}

impl fmt::Display for VertexPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VertexPart::Position => "position",
            VertexPart::ControlPointForward => "controlPointForward",
            VertexPart::ControlPointBackward => "controlPointBackward",
        })
    }
}

/// Vertices are values: every `with_*` method returns a replacement that
/// keeps the same id, and the drawing swaps it in by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    pub id: VertexId,
    pub position: VertexPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_point_forward: Option<VertexPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_point_backward: Option<VertexPosition>,
    #[serde(default)]
    pub is_mirrored: bool,
}

impl Vertex {
    pub fn new(position: VertexPosition) -> Self {
        Self {
            id: VertexId::new(),
            position,
            control_point_forward: None,
            control_point_backward: None,
            is_mirrored: false,
        }
    }

    pub fn from_percent(x: f64, y: f64) -> Self {
        Self::new(VertexPosition::from_percent(x, y))
    }

    pub fn control_point(&self, direction: Direction) -> Option<&VertexPosition> {
        match direction {
            Direction::Forward => self.control_point_forward.as_ref(),
            Direction::Backward => self.control_point_backward.as_ref(),
        }
    }

    fn control_point_mut(&mut self, direction: Direction) -> &mut Option<VertexPosition> {
        match direction {
            Direction::Forward => &mut self.control_point_forward,
            Direction::Backward => &mut self.control_point_backward,
        }
    }

    pub fn part(&self, part: VertexPart) -> Option<&VertexPosition> {
        match part.direction() {
            None => Some(&self.position),
            Some(direction) => self.control_point(direction),
        }
    }

    fn require_part(&self, part: VertexPart) -> Result<VertexPosition> {
        self.part(part).copied().ok_or(ShapeError::MissingPart { id: self.id, part })
    }

    /// Moves the vertex. Control points follow by the same pixel delta so
    /// their offsets from the vertex are preserved.
    pub fn with_position(&self, position: VertexPosition, max: Size) -> Vertex {
        let delta = position.to_vector(max) - self.position.to_vector(max);
        let follow =
            |cp: Option<VertexPosition>| cp.map(|p| p.to_translated(delta, max).to_rounded());
        Vertex {
            id: self.id,
            position: position.to_rounded(),
            control_point_forward: follow(self.control_point_forward),
            control_point_backward: follow(self.control_point_backward),
            is_mirrored: self.is_mirrored,
        }
    }

    /// Sets one control point. While mirrored, the opposite side is
    /// recomputed as the reflection of the new point through the vertex.
    pub fn with_control_point(
        &self,
        direction: Direction,
        position: VertexPosition,
        max: Size,
    ) -> Vertex {
        let mut next = self.clone();
        *next.control_point_mut(direction) = Some(position);
        if self.is_mirrored {
            let mirrored = position.to_mirrored(self.position, max);
            *next.control_point_mut(direction.opposite()) = Some(mirrored);
        }
        next.control_point_forward = next.control_point_forward.map(VertexPosition::to_rounded);
        next.control_point_backward = next.control_point_backward.map(VertexPosition::to_rounded);
        next
    }

    /// Routes a position change to the right mutator for `part`.
    pub fn with_part(&self, part: VertexPart, position: VertexPosition, max: Size) -> Vertex {
        match part.direction() {
            None => self.with_position(position, max),
            Some(direction) => self.with_control_point(direction, position, max),
        }
    }

    /// Sets the raw value of one axis of `part`, keeping its unit kind.
    pub fn with_dimension_value(
        &self,
        part: VertexPart,
        axis: Axis,
        value: f64,
        max: Size,
    ) -> Result<Vertex> {
        let position = self.require_part(part)?;
        let updated = position.with_axis(axis, position.axis(axis).with_value(value));
        Ok(self.with_part(part, updated, max))
    }

    pub fn with_converted_kind(
        &self,
        part: VertexPart,
        axis: Axis,
        kind: DimensionKind,
        max: Size,
    ) -> Result<Vertex> {
        let position = self.require_part(part)?;
        let updated = position.with_converted_kind(axis, kind, max);
        Ok(self.with_part(part, updated, max))
    }

    /// Turning mirroring on re-derives the backward control point from the
    /// forward one (or the forward from the backward when only that exists).
    pub fn with_mirrored(&self, is_mirrored: bool, max: Size) -> Vertex {
        let mut next = self.clone();
        next.is_mirrored = is_mirrored;
        if !is_mirrored {
            return next;
        }
        if let Some(forward) = self.control_point_forward {
            next.control_point_backward =
                Some(forward.to_mirrored(self.position, max).to_rounded());
        } else if let Some(backward) = self.control_point_backward {
            next.control_point_forward =
                Some(backward.to_mirrored(self.position, max).to_rounded());
        }
        next
    }

    /// Drops one control point. Mirroring is always cleared: the remaining
    /// side, if any, becomes independent.
    pub fn without_control_point(&self, direction: Direction) -> Vertex {
        let mut next = self.clone();
        *next.control_point_mut(direction) = None;
        next.is_mirrored = false;
        next
    }

    /// Whether the backward control point is the reflection of the forward
    /// one through the vertex, within [`MIRROR_TOLERANCE_PX`].
    pub fn has_mirrored_control_points(&self, max: Size) -> bool {
        match (self.control_point_forward, self.control_point_backward) {
            (Some(forward), Some(backward)) => {
                let origin = self.position.to_vector(max);
                let reflected = forward.to_vector(max).reflect_through(origin);
                reflected.distance(backward.to_vector(max)) < MIRROR_TOLERANCE_PX
            }
            _ => false,
        }
    }
}
