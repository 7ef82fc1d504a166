use js_sys::{Array, Float64Array, Object, Reflect};
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
pub fn arr_str<'a>(items: impl IntoIterator<Item = &'a str>) -> Array {
    items.into_iter().map(JsValue::from_str).collect()
}
pub fn point_obj(x: f64, y: f64) -> JsValue {
    let o = new_obj();
    set_kv(&o, "x", &JsValue::from_f64(x));
    set_kv(&o, "y", &JsValue::from_f64(y));
    o.into()
}
