//! Editing session: tool, drawing, selection and their undo history.
//!
//! Mutating methods change the live state only. Callers decide what makes
//! up one undoable step and call [`Editor::record_change`] after it, e.g.
//! once at the end of a drag rather than on every pointer move.

use crate::config::OutputConfig;
use crate::dimension::DimensionKind;
use crate::drawing::Drawing;
use crate::error::{Result, ShapeError};
use crate::generators::ParametricShape;
use crate::geometry::vector::{Size, Vec2};
use crate::history::StateHistory;
use crate::instruction::Shape;
use crate::output::{css_text, shape_css_properties, CssProperties};
use crate::position::{Axis, VertexPosition};
use crate::vertex::{Direction, Vertex, VertexId, VertexPart};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Pixel distance of control points created by the curve tool.
pub const CONTROL_POINT_DISTANCE_PX: f64 = 30.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Curve,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tool::Select => "select",
            Tool::Curve => "curve",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub id: VertexId,
    pub part: VertexPart,
}

/// Everything undo/redo restores. Derived output is not part of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub tool: Tool,
    pub drawing: Drawing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
    pub state_version: u64,
}

pub struct Editor {
    tool: Tool,
    drawing: Drawing,
    selection: Option<Selection>,
    /// Bumped by every recorded change; history steps that restore the
    /// version already live are not applied again.
    state_version: u64,
    history: StateHistory<EditorSnapshot>,
    config: OutputConfig,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("tool", &self.tool)
            .field("vertices", &self.drawing.len())
            .field("selection", &self.selection)
            .field("state_version", &self.state_version)
            .field("history", &self.history)
            .finish()
    }
}

impl Editor {
    /// Session over the default triangle.
    pub fn new(config: OutputConfig) -> Result<Self> {
        Self::with_drawing(Drawing::default(), config)
    }

    pub fn with_drawing(drawing: Drawing, config: OutputConfig) -> Result<Self> {
        Self::from_snapshot(
            EditorSnapshot {
                tool: Tool::Select,
                drawing,
                selection: None,
                state_version: 0,
            },
            config,
        )
    }

    pub fn from_snapshot(snapshot: EditorSnapshot, config: OutputConfig) -> Result<Self> {
        config.validate()?;
        let history = StateHistory::new(&snapshot)?;
        Ok(Self {
            tool: snapshot.tool,
            drawing: snapshot.drawing,
            selection: snapshot.selection,
            state_version: snapshot.state_version,
            history,
            config,
        })
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            tool: self.tool,
            drawing: self.drawing.clone(),
            selection: self.selection,
            state_version: self.state_version,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Replaces the drawing; the selection no longer applies and is cleared.
    pub fn set_drawing(&mut self, drawing: Drawing) {
        self.drawing = drawing;
        self.selection = None;
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: OutputConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn preview_size(&self) -> Size {
        self.config.preview_size
    }

    pub fn state_version(&self) -> u64 {
        self.state_version
    }

    // ---- selection ----

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Selects a part of a vertex. The part must exist.
    pub fn select(&mut self, id: VertexId, part: VertexPart) -> Result<()> {
        let vertex = self.drawing.require_vertex(id)?;
        if vertex.part(part).is_none() {
            return Err(ShapeError::MissingPart { id, part });
        }
        self.selection = Some(Selection { id, part });
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected_vertex(&self) -> Result<Option<&Vertex>> {
        match self.selection {
            None => Ok(None),
            Some(sel) => self.drawing.require_vertex(sel.id).map(Some),
        }
    }

    pub fn selected_position(&self) -> Result<Option<VertexPosition>> {
        let Some(sel) = self.selection else {
            return Ok(None);
        };
        let vertex = self.drawing.require_vertex(sel.id)?;
        vertex
            .part(sel.part)
            .copied()
            .map(Some)
            .ok_or(ShapeError::MissingPart {
                id: sel.id,
                part: sel.part,
            })
    }

    // ---- edits ----

    fn replace_vertex(
        &mut self,
        id: VertexId,
        f: impl FnOnce(&Vertex, Size) -> Result<Vertex>,
    ) -> Result<()> {
        let max = self.preview_size();
        let updated = f(self.drawing.require_vertex(id)?, max)?;
        self.drawing.update_vertex(updated)
    }

    pub fn update_vertex(&mut self, vertex: Vertex) -> Result<()> {
        self.drawing.update_vertex(vertex)
    }

    /// Moves a vertex, or one of its control points, to `position`.
    pub fn move_part(
        &mut self,
        id: VertexId,
        part: VertexPart,
        position: VertexPosition,
    ) -> Result<()> {
        self.replace_vertex(id, |v, max| {
            if v.part(part).is_none() {
                return Err(ShapeError::MissingPart { id, part });
            }
            Ok(v.with_part(part, position, max))
        })
    }

    /// Moves a part by a pixel offset.
    pub fn translate_part(&mut self, id: VertexId, part: VertexPart, delta: Vec2) -> Result<()> {
        self.replace_vertex(id, |v, max| {
            let current = v.part(part).copied().ok_or(ShapeError::MissingPart { id, part })?;
            Ok(v.with_part(part, current.to_translated(delta, max), max))
        })
    }

    pub fn set_dimension_value(
        &mut self,
        id: VertexId,
        part: VertexPart,
        axis: Axis,
        value: f64,
    ) -> Result<()> {
        self.replace_vertex(id, |v, max| v.with_dimension_value(part, axis, value, max))
    }

    pub fn convert_dimension_kind(
        &mut self,
        id: VertexId,
        part: VertexPart,
        axis: Axis,
        kind: DimensionKind,
    ) -> Result<()> {
        self.replace_vertex(id, |v, max| v.with_converted_kind(part, axis, kind, max))
    }

    pub fn set_mirrored(&mut self, id: VertexId, is_mirrored: bool) -> Result<()> {
        self.replace_vertex(id, |v, max| Ok(v.with_mirrored(is_mirrored, max)))
    }

    /// Curve tool on a vertex: adds a mirrored pair of control points along
    /// the neighbour-to-neighbour direction and selects the forward one.
    pub fn add_control_points(&mut self, id: VertexId) -> Result<()> {
        let max = self.preview_size();
        let index = self.drawing.index_of(id).ok_or(ShapeError::VertexNotFound(id))?;
        let forward = self
            .drawing
            .tangential_position_at(max, CONTROL_POINT_DISTANCE_PX, index)?;
        let vertex = self.drawing.vertices()[index]
            .with_mirrored(true, max)
            .with_control_point(Direction::Forward, forward, max);
        self.drawing.update_vertex(vertex)?;
        self.selection = Some(Selection {
            id,
            part: VertexPart::ControlPointForward,
        });
        debug!(%id, "added control points");
        Ok(())
    }

    pub fn insert_vertex(
        &mut self,
        after_index: usize,
        position: VertexPosition,
    ) -> Result<VertexId> {
        let id = self.drawing.insert_vertex(after_index, position.to_rounded())?;
        self.selection = Some(Selection {
            id,
            part: VertexPart::Position,
        });
        Ok(id)
    }

    /// Splits edge `edge_index` at its midpoint and selects the new vertex.
    pub fn insert_vertex_at_midpoint(&mut self, edge_index: usize) -> Result<VertexId> {
        let mid = self.drawing.midpoint_at(self.preview_size(), edge_index)?;
        self.insert_vertex(edge_index, mid)
    }

    pub fn delete_vertex(&mut self, id: VertexId) -> Result<()> {
        self.drawing.delete_vertex(id)?;
        if self.selection.is_some_and(|s| s.id == id) {
            self.selection = None;
        }
        Ok(())
    }

    pub fn delete_control_point(&mut self, id: VertexId, direction: Direction) -> Result<()> {
        self.drawing.delete_control_point(id, direction)?;
        let part = direction.part();
        if self.selection.is_some_and(|s| s.id == id && s.part == part) {
            self.selection = None;
        }
        Ok(())
    }

    /// Deletes whatever is selected. No-op without a selection.
    pub fn delete_selection(&mut self) -> Result<()> {
        let Some(sel) = self.selection else {
            return Ok(());
        };
        match sel.part.direction() {
            None => self.delete_vertex(sel.id),
            Some(direction) => self.delete_control_point(sel.id, direction),
        }
    }

    /// Replaces the drawing with one parsed from instruction text.
    pub fn load_css(&mut self, text: &str) -> Result<()> {
        let drawing = Drawing::from_css(text, self.preview_size())?;
        self.set_drawing(drawing);
        Ok(())
    }

    /// Replaces the drawing with the outline of a generated shape.
    pub fn load_parametric(&mut self, generator: &dyn ParametricShape) -> Result<()> {
        let max = self.preview_size();
        let drawing = Drawing::from_shape(&generator.to_shape(max), max)?;
        self.set_drawing(drawing);
        Ok(())
    }

    // ---- history ----

    /// Closes the current undoable step under `description`.
    pub fn record_change(&mut self, description: impl Into<String>) -> Result<()> {
        self.state_version += 1;
        let snapshot = self.snapshot();
        self.history.record_change(description, &snapshot)
    }

    fn apply(&mut self, restored: Option<EditorSnapshot>) -> bool {
        match restored {
            Some(s) if s.state_version != self.state_version => {
                debug!(from = self.state_version, to = s.state_version, "restoring editor state");
                self.tool = s.tool;
                self.drawing = s.drawing;
                self.selection = s.selection;
                self.state_version = s.state_version;
                true
            }
            _ => false,
        }
    }

    /// Returns whether the live state changed.
    pub fn undo(&mut self) -> Result<bool> {
        let restored = self.history.undo()?;
        Ok(self.apply(restored))
    }

    pub fn redo(&mut self) -> Result<bool> {
        let restored = self.history.redo()?;
        Ok(self.apply(restored))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &StateHistory<EditorSnapshot> {
        &self.history
    }

    /// For subscribing to history replacements.
    pub fn history_mut(&mut self) -> &mut StateHistory<EditorSnapshot> {
        &mut self.history
    }

    // ---- derived output ----

    pub fn shape(&self) -> Shape {
        self.drawing.to_shape(self.preview_size())
    }

    pub fn css_properties(&self) -> CssProperties {
        shape_css_properties(&self.shape(), self.config.shape_property, self.config.code_style)
    }

    pub fn css_text(&self) -> String {
        css_text(&self.css_properties(), &self.config)
    }

    pub fn svg_path(&self) -> String {
        self.shape().to_svg_path(self.preview_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::CodeStyle;

    fn editor() -> Editor {
        Editor::new(OutputConfig::default()).unwrap()
    }

    fn shape_lines(e: &Editor) -> Vec<String> {
        let s = e.shape();
        std::iter::once(crate::instruction::from_to_css(&s.from, CodeStyle::Default))
            .chain(s.commands.iter().map(|c| c.to_css(CodeStyle::Default)))
            .collect()
    }

    #[test]
    fn curve_tool_adds_mirrored_pair() {
        let mut e = editor();
        let id = e.drawing().vertices()[0].id;
        e.add_control_points(id).unwrap();
        assert_eq!(
            shape_lines(&e),
            vec![
                "from 50% 0%",
                "curve to 100% 100% with 60% 0%",
                "line to 0% 100%",
                "curve to 50% 0% with 40% 0%",
            ]
        );
        assert!(e.drawing().vertices()[0].is_mirrored);
        assert_eq!(
            e.selection(),
            Some(Selection {
                id,
                part: VertexPart::ControlPointForward
            })
        );
    }

    #[test]
    fn selection_must_name_existing_part() {
        let mut e = editor();
        let id = e.drawing().vertices()[1].id;
        let err = e.select(id, VertexPart::ControlPointBackward).unwrap_err();
        assert!(matches!(err, ShapeError::MissingPart { .. }));
        assert!(e.select(VertexId::new(), VertexPart::Position).is_err());
        e.select(id, VertexPart::Position).unwrap();
        assert_eq!(
            e.selected_position().unwrap(),
            Some(VertexPosition::from_percent(100.0, 100.0))
        );
    }

    #[test]
    fn delete_selection_routes_by_part() {
        let mut e = editor();
        let id = e.drawing().vertices()[0].id;
        e.add_control_points(id).unwrap();
        e.delete_selection().unwrap();
        let v = e.drawing().vertex(id).unwrap();
        assert!(v.control_point_forward.is_none());
        assert!(v.control_point_backward.is_some());
        assert!(!v.is_mirrored);
        assert_eq!(e.selection(), None);

        e.select(id, VertexPart::Position).unwrap();
        let err = e.delete_selection().unwrap_err();
        assert!(err.is_user_error());
        assert!(e.selection().is_some());
    }

    #[test]
    fn midpoint_insert_selects_new_vertex() {
        let mut e = editor();
        let id = e.insert_vertex_at_midpoint(1).unwrap();
        assert_eq!(e.drawing().len(), 4);
        assert_eq!(e.drawing().index_of(id), Some(2));
        assert_eq!(e.selected_position().unwrap(), Some(VertexPosition::from_percent(50.0, 100.0)));
        e.delete_selection().unwrap();
        assert_eq!(e.drawing().len(), 3);
    }

    #[test]
    fn undo_redo_restore_recorded_states() {
        let mut e = editor();
        let initial = e.drawing().clone();
        let id = e.drawing().vertices()[0].id;

        e.translate_part(id, VertexPart::Position, Vec2::new(30.0, 0.0)).unwrap();
        e.record_change("move vertex").unwrap();
        let moved = e.drawing().clone();
        e.set_tool(Tool::Curve);
        e.add_control_points(id).unwrap();
        e.record_change("add control points").unwrap();

        assert!(e.undo().unwrap());
        assert_eq!(e.drawing(), &moved);
        assert_eq!(e.tool(), Tool::Select);
        assert!(e.undo().unwrap());
        assert_eq!(e.drawing(), &initial);
        assert!(!e.undo().unwrap());

        assert!(e.redo().unwrap());
        assert_eq!(e.drawing(), &moved);
        e.set_mirrored(id, true).unwrap();
        e.record_change("mirror").unwrap();
        assert!(!e.can_redo());
    }

    #[test]
    fn load_replaces_drawing_and_clears_selection() {
        let mut e = editor();
        let id = e.drawing().vertices()[0].id;
        e.select(id, VertexPart::Position).unwrap();
        e.load_css("from 0% 0%, line to 100% 0%, line to 100% 100%, line to 0% 100%, close")
            .unwrap();
        assert_eq!(e.drawing().len(), 4);
        assert_eq!(e.selection(), None);
        assert!(e.load_css("from 0% 0%").is_err());
        assert_eq!(e.drawing().len(), 4);

        let hexagon = crate::generators::RegularPolygon::new(6).unwrap();
        e.load_parametric(&hexagon).unwrap();
        assert_eq!(e.drawing().len(), 6);
    }

    #[test]
    fn derived_output_follows_config() {
        let mut e = editor();
        assert_eq!(e.svg_path(), "M 150 0 L 300 300 L 0 300 L 150 0");
        assert!(e.css_text().starts_with("clip-path: shape(\n\tfrom 50% 0%,"));
        e.set_config(OutputConfig {
            shape_property: crate::config::ShapeProperty::OffsetPath,
            ..OutputConfig::default()
        })
        .unwrap();
        assert!(e.css_properties().get("animation").is_some());
        assert!(e.css_text().contains("@keyframes followPath"));
        assert!(e
            .set_config(OutputConfig {
                preview_size: Size::new(-1.0, 10.0),
                ..OutputConfig::default()
            })
            .is_err());
    }

    #[test]
    fn undo_reaches_the_initial_drawing_after_many_steps() {
        let mut e = editor();
        let initial = e.drawing().clone();
        let id = initial.vertices()[0].id;
        for i in 0..101 {
            e.translate_part(id, VertexPart::Position, Vec2::new(1.0, 0.0)).unwrap();
            e.record_change(format!("nudge {i}")).unwrap();
        }
        assert_eq!(e.history().undo_stack().len(), 101);
        for _ in 0..101 {
            assert!(e.undo().unwrap());
        }
        assert_eq!(e.drawing(), &initial);
        assert!(!e.can_undo());
        assert!(!e.undo().unwrap());
    }

    #[test]
    fn history_listeners_see_restored_snapshots() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut e = editor();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        e.history_mut()
            .subscribe(move |snap: &EditorSnapshot| sink.borrow_mut().push(snap.state_version));
        let id = e.drawing().vertices()[1].id;
        e.translate_part(id, VertexPart::Position, Vec2::new(-5.0, 0.0)).unwrap();
        e.record_change("move").unwrap();
        e.undo().unwrap();
        e.redo().unwrap();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], seen[2]);
        assert_ne!(seen[0], seen[1]);
    }
}
