/// Bookshoe Web - WASM surface for the browser designer
///
/// The page owns the 3D scene and the settings panel; this module owns the
/// shoe. It hands the page a flat `Float32Array` of triangle positions and
/// keeps the settings in `localStorage` between visits.
use bookshoe_core::{
    Designer, Field, SettingsError, SettingsStore, StlFormat, StorageError, Variant,
};
use tracing::Level;
use tracing_wasm::{WASMLayerConfig, WASMLayerConfigBuilder};
use wasm_bindgen::prelude::*;
use web_sys::Storage;

/// `SettingsStore` over the browser's `localStorage`
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    /// Storage can be missing (privacy modes, sandboxed frames); the store
    /// then behaves as always empty
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage unavailable, settings will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|err| StorageError::Write {
            key: key.to_string(),
            reason: err.as_string().unwrap_or_else(|| String::from("quota exceeded")),
        })
    }
}

#[wasm_bindgen]
pub struct ShoeDesigner {
    designer: Designer<LocalStore>,
}

#[wasm_bindgen]
impl ShoeDesigner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ShoeDesigner {
        ShoeDesigner {
            designer: Designer::open(LocalStore::new(), None),
        }
    }

    /// Wire name of the current variant
    pub fn variant(&self) -> String {
        self.designer.variant().name().to_string()
    }

    pub fn set_variant(&mut self, name: &str) -> Result<(), JsValue> {
        let variant: Variant = name.parse().map_err(|err| JsValue::from_str(&format!("{err}")))?;
        self.designer.set_variant(variant);
        Ok(())
    }

    /// Triangle positions, nine numbers per triangle
    pub fn vertices(&self) -> Vec<f32> {
        self.designer.mesh().to_f32()
    }

    pub fn triangle_count(&self) -> usize {
        self.designer.mesh().triangle_count()
    }

    /// Dotted keys of the fields the settings panel shows, in panel order
    pub fn field_keys(&self) -> Vec<String> {
        field_keys(self.designer.variant())
    }

    pub fn field(&self, key: &str) -> Option<f64> {
        let field: Field = key.parse().ok()?;
        self.designer.settings().get(field)
    }

    pub fn set_field(&mut self, key: &str, value: f64) -> Result<(), JsValue> {
        let field: Field = key.parse().map_err(|err: String| JsValue::from_str(&err))?;
        self.designer.set_field(field, value).map_err(to_js)
    }

    pub fn export_stl(&self, binary: bool) -> Vec<u8> {
        let format = if binary { StlFormat::Binary } else { StlFormat::Ascii };
        self.designer.export_mesh(format)
    }

    pub fn export_settings(&self) -> String {
        self.designer.export_settings()
    }

    /// Apply an exported settings file; nothing changes when it is rejected
    pub fn import_settings(&mut self, json: &str) -> Result<(), JsValue> {
        self.designer
            .import_settings(json)
            .map_err(|err| JsValue::from_str(&format!("Import failed: {err}")))
    }

    pub fn reset_settings(&mut self) {
        self.designer.reset_to_defaults();
    }
}

impl Default for ShoeDesigner {
    fn default() -> Self {
        Self::new()
    }
}

fn field_keys(variant: Variant) -> Vec<String> {
    variant.fields().iter().map(|field| field.key().to_string()).collect()
}

/// Diagnostics go to the browser console, without performance marks
fn log_config() -> WASMLayerConfig {
    WASMLayerConfigBuilder::new()
        .set_max_level(Level::INFO)
        .set_report_logs_in_timings(false)
        .build()
}

fn to_js(err: SettingsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panics show up in the browser console instead of "unreachable"
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(log_config());
    Ok(())
}
