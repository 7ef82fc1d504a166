//! Editable closed vector paths with mixed-unit coordinates, their CSS
//! `shape()` instruction form, and snapshot-based undo/redo.

pub mod geometry {
    pub mod curve;
    pub mod limits;
    pub mod tolerance;
    pub mod vector;
}
pub mod config;
pub mod dimension;
pub mod drawing;
pub mod editor;
pub mod error;
pub mod generators;
pub mod history;
pub mod instruction;
pub mod length;
pub mod output;
pub mod parse;
pub mod position;
pub mod vertex;
mod json;
mod mapping;

pub use config::{OutputConfig, ShapeProperty};
pub use dimension::{Dimension, DimensionKind};
pub use drawing::{Drawing, DrawingCurve};
pub use editor::{Editor, EditorSnapshot, Selection, Tool};
pub use error::{Result, ShapeError, MIN_VERTICES};
pub use geometry::curve::{Curve, CurveDegree};
pub use geometry::vector::{Size, Vec2};
pub use history::{Change, StateHistory};
pub use instruction::{Command, FillRule, Shape};
pub use length::{CodeStyle, CoordinatePair, LengthPercentage};
pub use output::CssProperties;
pub use parse::parse_shape;
pub use position::{Axis, VertexPosition};
pub use vertex::{Direction, Vertex, VertexId, VertexPart};
