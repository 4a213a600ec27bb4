pub mod constraint;
pub mod descriptor;
pub mod dialect;
pub mod naming;
pub mod objects;
pub mod request;
pub mod synth;
pub mod types;

use wasm_bindgen::prelude::*;

use dialect::Dialect;
use objects::ObjectKind;
use synth::Synthesizer;

pub use request::{render_document, Request, RequestError};
pub use synth::{SynthError, NO_CHANGES};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render a JSON request document to SQL
#[wasm_bindgen(js_name = "synthesize")]
pub fn synthesize_json(request: &str, dialect_version: Option<u32>) -> Result<String, String> {
    let dialect = dialect_version
        .map(Dialect::with_version)
        .unwrap_or_default();

    render_document(request, &Synthesizer::new(dialect)).map_err(|e| e.to_string())
}

/// Next free `NEW_<TYPE>_<N>` name among the given sibling names
#[wasm_bindgen(js_name = "nextObjectName")]
pub fn next_object_name(object_type: &str, names: &js_sys::Array) -> Result<String, String> {
    let kind = ObjectKind::from_str(object_type)
        .ok_or_else(|| format!("Unknown object type: {object_type}"))?;
    let siblings: Vec<String> = names.iter().filter_map(|v| v.as_string()).collect();

    Ok(naming::generate_name_for_object(kind, &siblings))
}
