//! Types exposed to JavaScript via wasm-bindgen.

use cellpad_core::Lifecycle;
use serde::Serialize;

/// Snapshot of an editable region's state, returned by `getState()`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsEditableState {
    pub lifecycle: &'static str,
    pub editable: bool,
    pub last_emitted: String,
}

pub(crate) fn lifecycle_name(lifecycle: Lifecycle) -> &'static str {
    match lifecycle {
        Lifecycle::Unmounted => "unmounted",
        Lifecycle::SeedPending => "seedPending",
        Lifecycle::Seeded => "seeded",
    }
}
