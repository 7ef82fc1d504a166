use crate::ShapeEditor;
use serde::de::DeserializeOwned;
use shipshape::generators::{BaseUnit, ParametricShape, RegularPolygon, Squircle, StarPolygon};
use shipshape::{
    Axis, Direction, DimensionKind, Drawing, OutputConfig, ShapeError, Tool, Vec2, VertexId,
    VertexPart, VertexPosition,
};
use crate::error;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Reads one of the core's serde names, e.g. `"controlPointForward"`.
fn parse_name<T: DeserializeOwned>(s: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(s.to_string())).ok()
}

fn to_js<T: serde::Serialize>(v: &T) -> JsValue {
    serde_wasm_bindgen::to_value(v).unwrap_or(JsValue::NULL)
}

macro_rules! arg {
    ($param:literal, $s:expr) => {
        match parse_name($s) {
            Some(v) => v,
            None => return error::invalid_argument($param, $s),
        }
    };
}

macro_rules! vertex_id {
    ($s:expr) => {
        match VertexId::parse($s) {
            Some(id) => id,
            None => return error::invalid_id($s),
        }
    };
}

macro_rules! finite {
    ($($name:ident),+) => {
        $(if !$name.is_finite() {
            return error::non_finite(stringify!($name));
        })+
    };
}

#[wasm_bindgen]
impl ShapeEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ShapeEditor, JsValue> {
        ShapeEditor::rs_new(OutputConfig::default()).map_err(|e| error::from_shape_error(&e))
    }

    /// Editor over the default triangle using a JSON output config.
    pub fn with_config(config_json: &str) -> Result<ShapeEditor, JsValue> {
        OutputConfig::from_json_str(config_json)
            .and_then(ShapeEditor::rs_new)
            .map_err(|e| error::from_shape_error(&e))
    }

    pub fn set_config_res(&mut self, config_json: &str) -> JsValue {
        error::result(
            OutputConfig::from_json_str(config_json)
                .and_then(|c| self.inner.set_config(c))
                .map(|_| JsValue::TRUE),
        )
    }

    pub fn config(&self) -> JsValue {
        to_js(self.inner.config())
    }

    pub fn state_version(&self) -> u64 {
        self.rs_state_version()
    }

    // Tool
    pub fn tool(&self) -> String {
        self.inner.tool().to_string()
    }
    pub fn set_tool(&mut self, tool: &str) -> bool {
        match parse_name::<Tool>(tool) {
            Some(t) => {
                self.inner.set_tool(t);
                true
            }
            None => false,
        }
    }

    // Drawing access
    pub fn vertex_count(&self) -> u32 {
        self.inner.drawing().len() as u32
    }
    pub fn vertices(&self) -> JsValue {
        to_js(&self.inner.drawing().vertices())
    }
    pub fn vertex_ids(&self) -> js_sys::Array {
        let ids: Vec<String> = self
            .inner
            .drawing()
            .vertices()
            .iter()
            .map(|v| v.id.to_string())
            .collect();
        crate::interop::arr_str(ids.iter().map(String::as_str))
    }
    pub fn drawing_json_res(&self) -> JsValue {
        error::result(
            self.inner
                .drawing()
                .to_json_value()
                .map(|doc| JsValue::from_str(&doc.to_string())),
        )
    }
    pub fn load_drawing_json_res(&mut self, json: &str) -> JsValue {
        error::result(Drawing::from_json_str(json).map(|d| {
            self.inner.set_drawing(d);
            JsValue::TRUE
        }))
    }

    // Selection
    pub fn selection(&self) -> JsValue {
        match self.inner.selection() {
            Some(sel) => to_js(&sel),
            None => JsValue::NULL,
        }
    }
    pub fn select_res(&mut self, id: &str, part: &str) -> JsValue {
        let id = vertex_id!(id);
        let part: VertexPart = arg!("part", part);
        error::result(self.inner.select(id, part).map(|_| JsValue::TRUE))
    }
    pub fn clear_selection(&mut self) {
        self.inner.clear_selection();
    }

    // Edits
    /// Moves a part to an absolute pixel position, keeping its unit kinds.
    pub fn move_part_res(&mut self, id: &str, part: &str, x: f64, y: f64) -> JsValue {
        finite!(x, y);
        let id = vertex_id!(id);
        let part: VertexPart = arg!("part", part);
        let max = self.inner.preview_size();
        let target = self
            .inner
            .drawing()
            .require_vertex(id)
            .and_then(|v| v.part(part).copied().ok_or(ShapeError::MissingPart { id, part }))
            .map(|current: VertexPosition| current.with_vector(Vec2::new(x, y), max));
        error::result(
            target
                .and_then(|t| self.inner.move_part(id, part, t))
                .map(|_| JsValue::TRUE),
        )
    }
    pub fn translate_part_res(&mut self, id: &str, part: &str, dx: f64, dy: f64) -> JsValue {
        finite!(dx, dy);
        let id = vertex_id!(id);
        let part: VertexPart = arg!("part", part);
        error::result(
            self.inner
                .translate_part(id, part, Vec2::new(dx, dy))
                .map(|_| JsValue::TRUE),
        )
    }
    pub fn set_dimension_value_res(
        &mut self,
        id: &str,
        part: &str,
        axis: &str,
        value: f64,
    ) -> JsValue {
        finite!(value);
        let id = vertex_id!(id);
        let part: VertexPart = arg!("part", part);
        let axis: Axis = arg!("axis", axis);
        error::result(
            self.inner
                .set_dimension_value(id, part, axis, value)
                .map(|_| JsValue::TRUE),
        )
    }
    pub fn convert_dimension_kind_res(
        &mut self,
        id: &str,
        part: &str,
        axis: &str,
        kind: &str,
    ) -> JsValue {
        let id = vertex_id!(id);
        let part: VertexPart = arg!("part", part);
        let axis: Axis = arg!("axis", axis);
        let kind: DimensionKind = arg!("kind", kind);
        error::result(
            self.inner
                .convert_dimension_kind(id, part, axis, kind)
                .map(|_| JsValue::TRUE),
        )
    }
    pub fn set_mirrored_res(&mut self, id: &str, is_mirrored: bool) -> JsValue {
        let id = vertex_id!(id);
        error::result(self.inner.set_mirrored(id, is_mirrored).map(|_| JsValue::TRUE))
    }
    pub fn add_control_points_res(&mut self, id: &str) -> JsValue {
        let id = vertex_id!(id);
        error::result(self.inner.add_control_points(id).map(|_| JsValue::TRUE))
    }
    pub fn insert_vertex_at_midpoint_res(&mut self, edge_index: u32) -> JsValue {
        error::result(
            self.inner
                .insert_vertex_at_midpoint(edge_index as usize)
                .map(|id| JsValue::from_str(&id.to_string())),
        )
    }
    pub fn delete_vertex(&mut self, id: &str) -> bool {
        VertexId::parse(id).is_some_and(|id| self.inner.delete_vertex(id).is_ok())
    }
    pub fn delete_vertex_res(&mut self, id: &str) -> JsValue {
        let id = vertex_id!(id);
        error::result(self.inner.delete_vertex(id).map(|_| JsValue::TRUE))
    }
    pub fn delete_control_point_res(&mut self, id: &str, direction: &str) -> JsValue {
        let id = vertex_id!(id);
        let direction: Direction = arg!("direction", direction);
        error::result(
            self.inner
                .delete_control_point(id, direction)
                .map(|_| JsValue::TRUE),
        )
    }
    pub fn delete_selection_res(&mut self) -> JsValue {
        error::result(self.inner.delete_selection().map(|_| JsValue::TRUE))
    }

    // Geometry queries (pixel space)
    pub fn midpoint_res(&self, edge_index: u32) -> JsValue {
        let max = self.inner.preview_size();
        error::result(
            self.inner
                .drawing()
                .midpoint_at(max, edge_index as usize)
                .map(|p| {
                    let v = p.to_vector(max);
                    crate::interop::point_obj(v.x, v.y)
                }),
        )
    }
    pub fn tangential_position_res(&self, index: u32, distance: f64) -> JsValue {
        finite!(distance);
        let max = self.inner.preview_size();
        error::result(
            self.inner
                .drawing()
                .tangential_position_at(max, distance, index as usize)
                .map(|p| {
                    let v = p.to_vector(max);
                    crate::interop::point_obj(v.x, v.y)
                }),
        )
    }
    /// Closest point on edge `edge_index` as `[x, y, t]`.
    pub fn closest_point_res(&self, edge_index: u32, x: f64, y: f64) -> JsValue {
        finite!(x, y);
        let max = self.inner.preview_size();
        error::result(
            self.inner
                .drawing()
                .curve_at(max, edge_index as usize)
                .map(|edge| {
                    let p = edge.curve.closest_point(Vec2::new(x, y));
                    crate::interop::arr_f64(&[p.point.x, p.point.y, p.t]).into()
                }),
        )
    }

    // Loading
    pub fn load_css_res(&mut self, text: &str) -> JsValue {
        error::result(self.inner.load_css(text).map(|_| JsValue::TRUE))
    }
    pub fn load_regular_polygon_res(&mut self, sides: u32, swell: f64, rotation: f64) -> JsValue {
        finite!(swell, rotation);
        let generator =
            RegularPolygon::new(sides).map(|g| g.with_swell(swell).with_rotation(rotation));
        self.load_generator(generator)
    }
    pub fn load_star_res(&mut self, points: u32, outer_radius: f64, inner_radius: f64) -> JsValue {
        finite!(outer_radius, inner_radius);
        let generator = StarPolygon::new(points).map(|g| g.with_radii(outer_radius, inner_radius));
        self.load_generator(generator)
    }
    pub fn load_squircle_res(&mut self, curvature: f64, unit: &str) -> JsValue {
        finite!(curvature);
        let unit: BaseUnit = arg!("unit", unit);
        self.load_generator(Ok(Squircle::new(unit, curvature)))
    }

    // History
    pub fn record_change(&mut self, description: &str) -> JsValue {
        error::result(self.inner.record_change(description).map(|_| JsValue::TRUE))
    }
    pub fn undo(&mut self) -> bool {
        self.inner.undo().unwrap_or(false)
    }
    /// Envelope twin of `undo`; a failed snapshot restore surfaces as `internal`.
    pub fn undo_res(&mut self) -> JsValue {
        error::result(self.inner.undo().map(JsValue::from_bool))
    }
    pub fn redo(&mut self) -> bool {
        self.inner.redo().unwrap_or(false)
    }
    pub fn redo_res(&mut self) -> JsValue {
        error::result(self.inner.redo().map(JsValue::from_bool))
    }
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }
    pub fn undo_descriptions(&self) -> js_sys::Array {
        let stack = self.inner.history().undo_stack();
        crate::interop::arr_str(stack.iter().map(|c| c.description.as_str()))
    }

    // Output
    pub fn shape_css(&self) -> String {
        self.inner.shape().to_css(self.inner.config().code_style)
    }
    pub fn css_properties(&self) -> JsValue {
        to_js(&self.inner.css_properties())
    }
    pub fn css_text(&self) -> String {
        self.inner.css_text()
    }
    pub fn svg_path(&self) -> String {
        self.inner.svg_path()
    }
}

impl ShapeEditor {
    fn load_generator<G: ParametricShape>(&mut self, generator: shipshape::Result<G>) -> JsValue {
        error::result(
            generator
                .and_then(|g| self.inner.load_parametric(&g))
                .map(|_| JsValue::TRUE),
        )
    }
}
