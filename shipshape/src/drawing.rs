//! The ordered, cyclic vertex list being edited.

use crate::error::{Result, ShapeError, MIN_VERTICES};
use crate::geometry::curve::Curve;
use crate::geometry::vector::{Size, Vec2};
use crate::position::VertexPosition;
use crate::vertex::{Direction, Vertex, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Closed polygon of vertices: vertex `i` connects to `i + 1`, the last one
/// back to the first. Always holds at least [`MIN_VERTICES`] vertices with
/// unique ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vertex>", into = "Vec<Vertex>")]
pub struct Drawing {
    vertices: Vec<Vertex>,
}

/// Geometry of the edge leaving `from`, borrowed from the drawing.
#[derive(Clone, Copy, Debug)]
pub struct DrawingCurve<'a> {
    pub from: &'a Vertex,
    pub to: &'a Vertex,
    pub curve: Curve,
}

impl DrawingCurve<'_> {
    /// Stable key for the edge, built from both endpoint ids.
    pub fn key(&self) -> String {
        format!("{}-{}", self.from.id, self.to.id)
    }
}

impl Default for Drawing {
    /// The starting triangle: top centre, bottom right, bottom left.
    fn default() -> Self {
        Drawing {
            vertices: vec![
                Vertex::from_percent(50.0, 0.0),
                Vertex::from_percent(100.0, 100.0),
                Vertex::from_percent(0.0, 100.0),
            ],
        }
    }
}

impl TryFrom<Vec<Vertex>> for Drawing {
    type Error = ShapeError;
    fn try_from(vertices: Vec<Vertex>) -> Result<Self> {
        Drawing::new(vertices)
    }
}

impl From<Drawing> for Vec<Vertex> {
    fn from(d: Drawing) -> Self {
        d.vertices
    }
}

impl Drawing {
    pub fn new(vertices: Vec<Vertex>) -> Result<Self> {
        if vertices.len() < MIN_VERTICES {
            return Err(ShapeError::InvalidVertexCount {
                count: vertices.len(),
                min: MIN_VERTICES,
            });
        }
        let mut seen = HashSet::with_capacity(vertices.len());
        for v in &vertices {
            if !seen.insert(v.id) {
                return Err(ShapeError::DuplicateVertex(v.id));
            }
        }
        Ok(Drawing { vertices })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.vertices.iter().position(|v| v.id == id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn require_vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.vertex(id).ok_or(ShapeError::VertexNotFound(id))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.vertices.len() {
            Ok(())
        } else {
            Err(ShapeError::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            })
        }
    }

    /// Edge `i`: from vertex `i` to vertex `i + 1` (wrapping).
    pub fn curve_at(&self, max: Size, i: usize) -> Result<DrawingCurve<'_>> {
        self.check_index(i)?;
        let from = &self.vertices[i];
        let to = &self.vertices[(i + 1) % self.vertices.len()];
        let curve = Curve::new(
            from.position.to_vector(max),
            to.position.to_vector(max),
            from.control_point_forward.map(|p| p.to_vector(max)),
            to.control_point_backward.map(|p| p.to_vector(max)),
        );
        Ok(DrawingCurve { from, to, curve })
    }

    pub fn curves(&self, max: Size) -> impl Iterator<Item = DrawingCurve<'_>> + '_ {
        (0..self.vertices.len()).filter_map(move |i| self.curve_at(max, i).ok())
    }

    /// Point halfway along edge `i`, expressed in the unit kinds of the
    /// edge's first vertex.
    pub fn midpoint_at(&self, max: Size, i: usize) -> Result<VertexPosition> {
        let edge = self.curve_at(max, i)?;
        let mid = edge.curve.interpolate(0.5);
        Ok(edge.from.position.with_vector(mid, max))
    }

    /// Offsets vertex `i` by `distance` pixels along the direction from its
    /// previous neighbour to its next neighbour. This is a polygon-based
    /// approximation of the tangent used to place new control points.
    pub fn tangential_position_at(
        &self,
        max: Size,
        distance: f64,
        i: usize,
    ) -> Result<VertexPosition> {
        self.check_index(i)?;
        let n = self.vertices.len();
        let previous = &self.vertices[(i + n - 1) % n];
        let current = &self.vertices[i];
        let next = &self.vertices[(i + 1) % n];

        let d = next.position.to_vector(max) - previous.position.to_vector(max);
        let angle = d.y.atan2(d.x);
        let offset = Vec2::new(angle.cos() * distance, angle.sin() * distance);
        Ok(current.position.to_translated(offset, max))
    }

    /// Splices a fresh vertex (no control points) in after `after_index`.
    pub fn insert_vertex(
        &mut self,
        after_index: usize,
        position: VertexPosition,
    ) -> Result<VertexId> {
        self.check_index(after_index)?;
        let vertex = Vertex::new(position);
        let id = vertex.id;
        self.vertices.insert(after_index + 1, vertex);
        debug!(%id, after_index, count = self.vertices.len(), "inserted vertex");
        Ok(id)
    }

    /// Replaces the vertex with the same id.
    pub fn update_vertex(&mut self, updated: Vertex) -> Result<()> {
        let index = self
            .index_of(updated.id)
            .ok_or(ShapeError::VertexNotFound(updated.id))?;
        self.vertices[index] = updated;
        Ok(())
    }

    pub fn can_delete_vertex(&self, id: VertexId) -> bool {
        self.index_of(id).is_some() && self.vertices.len() > MIN_VERTICES
    }

    /// Removes a vertex. Neighbouring control points are left untouched.
    pub fn delete_vertex(&mut self, id: VertexId) -> Result<()> {
        let index = self.index_of(id).ok_or(ShapeError::VertexNotFound(id))?;
        if self.vertices.len() <= MIN_VERTICES {
            let err = ShapeError::TooFewVertices { min: MIN_VERTICES };
            warn!(%id, "{}", err);
            return Err(err);
        }
        self.vertices.remove(index);
        debug!(%id, count = self.vertices.len(), "deleted vertex");
        Ok(())
    }

    pub fn can_delete_control_point(&self, id: VertexId, direction: Direction) -> bool {
        self.vertex(id)
            .is_some_and(|v| v.control_point(direction).is_some())
    }

    /// Clears one control point and breaks mirroring on that vertex.
    pub fn delete_control_point(&mut self, id: VertexId, direction: Direction) -> Result<()> {
        let index = self.index_of(id).ok_or(ShapeError::VertexNotFound(id))?;
        let vertex = &self.vertices[index];
        if vertex.control_point(direction).is_none() {
            let err = ShapeError::MissingControlPoint { id, direction };
            warn!(%id, "{}", err);
            return Err(err);
        }
        self.vertices[index] = vertex.without_control_point(direction);
        debug!(%id, %direction, "deleted control point");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;

    const MAX: Size = Size::new(300.0, 300.0);

    fn square() -> Drawing {
        Drawing::new(vec![
            Vertex::from_percent(0.0, 0.0),
            Vertex::from_percent(100.0, 0.0),
            Vertex::from_percent(100.0, 100.0),
            Vertex::from_percent(0.0, 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_degenerate_construction() {
        let err = Drawing::new(vec![Vertex::from_percent(0.0, 0.0); 2]).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidVertexCount { count: 2, .. }));

        let v = Vertex::from_percent(0.0, 0.0);
        let err =
            Drawing::new(vec![v.clone(), v.clone(), Vertex::from_percent(1.0, 1.0)]).unwrap_err();
        assert_eq!(err, ShapeError::DuplicateVertex(v.id));
    }

    #[test]
    fn midpoint_of_straight_edge() {
        let d = square();
        let mid = d.midpoint_at(MAX, 0).unwrap();
        assert_eq!(mid, VertexPosition::from_percent(50.0, 0.0));
        // closing edge wraps to the first vertex
        let mid = d.midpoint_at(MAX, 3).unwrap();
        assert_eq!(mid, VertexPosition::from_percent(0.0, 50.0));
        assert!(d.midpoint_at(MAX, 4).is_err());
    }

    #[test]
    fn midpoint_keeps_first_vertex_kinds() {
        let mut d = square();
        let first = d.vertices()[0].clone();
        let px = VertexPosition::new(Dimension::px_from_start(0.0), Dimension::px_from_end(300.0));
        d.update_vertex(Vertex { position: px, ..first }).unwrap();
        let mid = d.midpoint_at(MAX, 0).unwrap();
        assert_eq!(
            mid,
            VertexPosition::new(Dimension::px_from_start(150.0), Dimension::px_from_end(300.0))
        );
    }

    #[test]
    fn tangent_follows_neighbour_direction() {
        let d = square();
        // vertex 1 (top right): previous is top left, next is bottom right
        let p = d.tangential_position_at(MAX, 30.0, 1).unwrap();
        let v = p.to_vector(MAX);
        let expected =
            Vec2::new(300.0, 0.0) + Vec2::new(300.0, 300.0) * (30.0 / (2.0f64.sqrt() * 300.0));
        assert!((v.x - expected.x).abs() <= 1.0);
        assert!((v.y - expected.y).abs() <= 1.0);

        // vertex 0 wraps to use the last vertex as previous
        let p = d.tangential_position_at(MAX, 30.0, 0).unwrap();
        let v = p.to_vector(MAX);
        assert!((v.x - 21.0).abs() <= 1.0 && (v.y + 21.0).abs() <= 1.0, "{:?}", v);
    }

    #[test]
    fn insert_after_index() {
        let mut d = square();
        let id = d.insert_vertex(1, VertexPosition::from_percent(100.0, 50.0)).unwrap();
        assert_eq!(d.len(), 5);
        assert_eq!(d.index_of(id), Some(2));
        let v = d.vertex(id).unwrap();
        assert!(v.control_point_forward.is_none() && v.control_point_backward.is_none());
        assert!(d.insert_vertex(9, VertexPosition::from_percent(0.0, 0.0)).is_err());
    }

    #[test]
    fn delete_vertex_respects_minimum() {
        let mut d = square();
        let id = d.vertices()[0].id;
        d.delete_vertex(id).unwrap();
        assert_eq!(d.len(), 3);

        let before = d.clone();
        let err = d.delete_vertex(d.vertices()[0].id).unwrap_err();
        assert_eq!(err, ShapeError::TooFewVertices { min: 3 });
        assert!(err.is_user_error());
        assert_eq!(d, before);

        let err = d.delete_vertex(VertexId::new()).unwrap_err();
        assert!(matches!(err, ShapeError::VertexNotFound(_)));
        assert!(!err.is_user_error());
    }

    #[test]
    fn delete_missing_control_point_is_user_error() {
        let mut d = square();
        let id = d.vertices()[0].id;
        let err = d.delete_control_point(id, Direction::Forward).unwrap_err();
        assert!(err.is_user_error());
        assert!(!d.can_delete_control_point(id, Direction::Forward));
    }

    #[test]
    fn curves_iterate_every_edge() {
        let d = square();
        let keys: Vec<String> = d.curves(MAX).map(|c| c.key()).collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(keys[3], format!("{}-{}", d.vertices()[3].id, d.vertices()[0].id));
    }
}
