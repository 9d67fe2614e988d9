//! WebAssembly bindings over the JSON input documents.

use wasm_bindgen::prelude::*;

use crate::input::NetworkInput;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// Runs the `scenario` section of a [`NetworkInput`] object.
#[wasm_bindgen(js_name = optimizeNetwork)]
pub fn optimize_network(input: JsValue) -> Result<JsValue, JsValue> {
    let doc: NetworkInput = serde_wasm_bindgen::from_value(input).map_err(to_js_error)?;
    let solution = doc.optimize().map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&solution).map_err(to_js_error)
}

/// Compares the `current` and `proposed` sections of a [`NetworkInput`] object.
#[wasm_bindgen(js_name = compareScenarios)]
pub fn compare_scenarios(input: JsValue) -> Result<JsValue, JsValue> {
    let doc: NetworkInput = serde_wasm_bindgen::from_value(input).map_err(to_js_error)?;
    let comparison = doc.compare().map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&comparison).map_err(to_js_error)
}
