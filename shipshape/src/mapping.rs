//! Conversion between a [`Drawing`] and its instruction [`Shape`].

use crate::dimension::Dimension;
use crate::drawing::Drawing;
use crate::error::{Result, ShapeError};
use crate::geometry::curve::CurveDegree;
use crate::geometry::tolerance::{CLOSE_TOLERANCE_PX, MIRROR_TOLERANCE_PX};
use crate::geometry::vector::Size;
use crate::instruction::{Command, Shape};
use crate::length::{CoordinatePair, LengthPercentage};
use crate::parse::{parse_shape, px_from_end_offset};
use crate::position::VertexPosition;
use crate::vertex::Vertex;
use tracing::debug;

fn dimension_from_length(len: &LengthPercentage) -> Dimension {
    match len {
        LengthPercentage::Px { value } => Dimension::px_from_start(*value),
        LengthPercentage::Percent { value } => Dimension::percent(*value),
        LengthPercentage::Raw { text, approx } => match px_from_end_offset(text) {
            Some(offset) => Dimension::px_from_end(offset),
            None => dimension_from_length(approx),
        },
    }
}

fn position_from_pair(pair: &CoordinatePair) -> VertexPosition {
    VertexPosition::new(dimension_from_length(&pair.x), dimension_from_length(&pair.y))
}

/// One instruction resolved to vertex indices. `edges[i].start == i`.
struct ImportedEdge {
    start: usize,
    end: usize,
    control1: Option<VertexPosition>,
    control2: Option<VertexPosition>,
}

fn reflects(
    control: VertexPosition,
    forward: VertexPosition,
    origin: VertexPosition,
    max: Size,
) -> bool {
    let reflected = forward.to_vector(max).reflect_through(origin.to_vector(max));
    reflected.distance(control.to_vector(max)) < MIRROR_TOLERANCE_PX
}

/// For every single-control edge, whether its control point is the end
/// vertex's backward point. The end vertex's forward point comes from its
/// outgoing edge, which may itself be undecided, so the cycle is walked
/// backwards twice.
fn inherited_backward(edges: &[ImportedEdge], vertices: &[Vertex], max: Size) -> Vec<bool> {
    let mut backward = vec![false; edges.len()];
    for _ in 0..2 {
        for i in (0..edges.len()).rev() {
            let edge = &edges[i];
            let (Some(control), None) = (edge.control1, edge.control2) else {
                continue;
            };
            let forward = edges
                .get(edge.end)
                .filter(|next| next.control2.is_some() || !backward[edge.end])
                .and_then(|next| next.control1);
            let origin = vertices[edge.end].position;
            backward[i] = forward.is_some_and(|f| reflects(control, f, origin, max));
        }
    }
    backward
}

impl Drawing {
    /// Emits `from` for the first vertex and one instruction per edge, the
    /// last one returning to the first vertex. Edge degree follows the
    /// control points present on its two endpoints.
    pub fn to_shape(&self, max: Size) -> Shape {
        let vertices = self.vertices();
        let n = vertices.len();
        let from = vertices[0].position.to_coordinate_pair(max);
        let commands = (0..n)
            .map(|i| {
                let a = &vertices[i];
                let b = &vertices[(i + 1) % n];
                let to = b.position.to_coordinate_pair(max);
                let forward = a.control_point_forward.map(|p| p.to_coordinate_pair(max));
                let backward = b.control_point_backward.map(|p| p.to_coordinate_pair(max));
                let degree = CurveDegree::infer(forward.is_some(), backward.is_some());
                match (degree, forward, backward) {
                    (CurveDegree::Cubic, Some(c1), Some(c2)) => Command::curve(to, c1, Some(c2)),
                    (CurveDegree::Quadratic, Some(c), None)
                    | (CurveDegree::Quadratic, None, Some(c)) => Command::curve(to, c, None),
                    _ => Command::line(to),
                }
            })
            .collect();
        Shape::new(from, commands)
    }

    /// Rebuilds a drawing from instructions.
    ///
    /// The last instruction is the closing edge when it is `close` or when it
    /// lands within [`CLOSE_TOLERANCE_PX`] of `from`; otherwise its target is
    /// one more vertex and the closing edge is straight. A single control
    /// point belongs to the edge's starting vertex, unless it reflects the
    /// end vertex's forward control point, in which case it is that vertex's
    /// backward point. Vertices whose two control points reflect each other
    /// are marked mirrored.
    pub fn from_shape(shape: &Shape, max: Size) -> Result<Drawing> {
        let mut commands: &[Command] = &shape.commands;
        while let [rest @ .., Command::Close] = commands {
            commands = rest;
        }
        if commands.iter().any(|c| matches!(c, Command::Close)) {
            return Err(ShapeError::parse(0, "\"close\" must be the last instruction"));
        }

        let origin = shape.from.to_vector(max);
        let closes = commands
            .last()
            .and_then(Command::target)
            .is_some_and(|to| to.to_vector(max).distance(origin) <= CLOSE_TOLERANCE_PX);

        let mut vertices = vec![Vertex::new(position_from_pair(&shape.from))];
        let mut edges = Vec::with_capacity(commands.len());
        let last = commands.len().saturating_sub(1);
        for (i, command) in commands.iter().enumerate() {
            let start = vertices.len() - 1;
            let end = if closes && i == last {
                0
            } else {
                let Some(to) = command.target() else {
                    continue;
                };
                vertices.push(Vertex::new(position_from_pair(to)));
                vertices.len() - 1
            };
            let (control1, control2) = match command {
                Command::Curve { control1, control2, .. } => {
                    (Some(position_from_pair(control1)), control2.as_ref().map(position_from_pair))
                }
                _ => (None, None),
            };
            edges.push(ImportedEdge {
                start,
                end,
                control1,
                control2,
            });
        }

        let inherited = inherited_backward(&edges, &vertices, max);
        for (edge, backward) in edges.iter().zip(inherited) {
            match (edge.control1, edge.control2) {
                (Some(c), None) if backward => vertices[edge.end].control_point_backward = Some(c),
                (Some(c1), c2) => {
                    vertices[edge.start].control_point_forward = Some(c1);
                    if let Some(c2) = c2 {
                        vertices[edge.end].control_point_backward = Some(c2);
                    }
                }
                (None, _) => {}
            }
        }

        for v in vertices.iter_mut() {
            v.is_mirrored = v.has_mirrored_control_points(max);
        }
        debug!(vertices = vertices.len(), closes, "built drawing from shape");
        Drawing::new(vertices)
    }

    /// Parses instruction text and rebuilds the drawing from it.
    pub fn from_css(text: &str, max: Size) -> Result<Drawing> {
        let shape = parse_shape(text, max)?;
        Drawing::from_shape(&shape, max)
    }
}
