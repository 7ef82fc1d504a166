use crate::drawing::Drawing;
use crate::error::{Result, ShapeError};
use crate::geometry::limits;
use crate::position::VertexPosition;
use crate::vertex::Vertex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const DOCUMENT_VERSION: u32 = 1;

fn position_in_bounds(p: &VertexPosition) -> bool {
    limits::in_coord_bounds(p.x.value) && limits::in_coord_bounds(p.y.value)
}

impl Drawing {
    /// Versioned document: `{ "version": 1, "vertices": [...] }`.
    pub fn to_json_value(&self) -> Result<Value> {
        #[derive(Serialize)]
        struct DocSer<'a> {
            version: u32,
            vertices: &'a [Vertex],
        }
        Ok(serde_json::to_value(DocSer {
            version: DOCUMENT_VERSION,
            vertices: self.vertices(),
        })?)
    }

    /// Loads a document written by [`Drawing::to_json_value`]. A missing
    /// version is read as the current one.
    pub fn from_json_value(v: Value) -> Result<Drawing> {
        #[derive(Deserialize)]
        struct DocDe {
            version: Option<u32>,
            vertices: Vec<Vertex>,
        }
        let doc: DocDe = serde_json::from_value(v)?;
        let version = doc.version.unwrap_or(DOCUMENT_VERSION);
        if version != DOCUMENT_VERSION {
            return Err(ShapeError::Snapshot(format!("unsupported version {}", version)));
        }
        if doc.vertices.len() > limits::MAX_VERTICES {
            return Err(ShapeError::Snapshot(format!("vertices>{}", limits::MAX_VERTICES)));
        }
        for v in &doc.vertices {
            let parts = [
                Some(&v.position),
                v.control_point_forward.as_ref(),
                v.control_point_backward.as_ref(),
            ];
            if !parts.into_iter().flatten().all(position_in_bounds) {
                return Err(ShapeError::Snapshot(format!("vertex \"{}\" out of bounds", v.id)));
            }
        }
        debug!(vertices = doc.vertices.len(), "loaded drawing document");
        Drawing::new(doc.vertices)
    }

    pub fn from_json_str(s: &str) -> Result<Drawing> {
        Drawing::from_json_value(serde_json::from_str(s)?)
    }
}
