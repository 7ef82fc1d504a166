use crate::interop::{new_obj, set_kv};
use shipshape::ShapeError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(id: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "id", &JsValue::from_str(id));
    err("not_found", format!("vertex \"{}\" not found", id), Some(d.into()))
}

#[inline]
pub fn invalid_argument(param: &str, got: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "got", &JsValue::from_str(got));
    err("invalid_argument", format!("invalid value for '{}'", param), Some(d.into()))
}

/// Maps a core error to its envelope. User errors carry the message meant
/// for display; anything else is also logged to the console.
pub fn from_shape_error(e: &ShapeError) -> JsValue {
    if e.is_user_error() {
        return err("user_error", e.to_string(), None);
    }
    web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
    match e {
        ShapeError::VertexNotFound(id) => invalid_id(&id.to_string()),
        ShapeError::MissingPart { id, part } => {
            let d = new_obj();
            set_kv(&d, "id", &JsValue::from_str(&id.to_string()));
            set_kv(&d, "part", &JsValue::from_str(&part.to_string()));
            err("invalid_part", e.to_string(), Some(d.into()))
        }
        ShapeError::IndexOutOfRange { index, len } => {
            let d = new_obj();
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            set_kv(&d, "len", &JsValue::from_f64(*len as f64));
            err("out_of_range", e.to_string(), Some(d.into()))
        }
        ShapeError::Parse { offset, .. } => {
            let d = new_obj();
            set_kv(&d, "offset", &JsValue::from_f64(*offset as f64));
            err("parse_error", e.to_string(), Some(d.into()))
        }
        _ => err("internal", e.to_string(), None),
    }
}

pub fn result(r: shipshape::Result<JsValue>) -> JsValue {
    match r {
        Ok(v) => ok(v),
        Err(e) => from_shape_error(&e),
    }
}
