use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

#[wasm_bindgen]
pub struct ShapeEditor { pub(crate) inner: shipshape::Editor }

impl ShapeEditor {
    pub fn rs_new(config: shipshape::OutputConfig) -> shipshape::Result<ShapeEditor> {
        Ok(ShapeEditor { inner: shipshape::Editor::new(config)? })
    }
    pub fn rs_state_version(&self) -> u64 { self.inner.state_version() }
}
