use coalition::{MarkerStyle, Weighting};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Name of the optional page global that overrides [`ControllerConfig`].
pub const CONFIG_GLOBAL: &str = "__compassConfig";

/// Page wiring. Every field has a default, so a page only sets what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub data_url: String,
    pub diagram_url: String,
    pub party_list_id: String,
    pub diagram_container_id: String,
    pub stats_id: String,
    /// Optional checkbox switching seat weighting on and off.
    pub weighted_toggle_id: String,
    /// Optional button that clears the selection.
    pub clear_button_id: String,
    /// Selector for the drawable surface inside the loaded diagram.
    pub surface_selector: String,
    /// Weighting used when the page has no weighting checkbox.
    pub weighting: Weighting,
    pub marker: MarkerStyle,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            data_url: "assets/party-data.json".to_string(),
            diagram_url: "assets/political-compass.svg".to_string(),
            party_list_id: "compass-parties".to_string(),
            diagram_container_id: "compass-diagram".to_string(),
            stats_id: "compass-stats".to_string(),
            weighted_toggle_id: "compass-weighted".to_string(),
            clear_button_id: "compass-clear".to_string(),
            surface_selector: ".compass-surface".to_string(),
            weighting: Weighting::Unweighted,
            marker: MarkerStyle::default(),
        }
    }
}

impl ControllerConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads `window.__compassConfig`, falling back to defaults when it is
    /// absent or unreadable.
    pub fn from_window() -> Self {
        match read_window_config() {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Self::default(),
            Err(err) => {
                web_sys::console::error_1(&JsValue::from_str(&format!(
                    "ignoring {CONFIG_GLOBAL}: {err}"
                )));
                Self::default()
            }
        }
    }
}

fn read_window_config() -> Result<Option<ControllerConfig>, String> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let val = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|e| format!("{e:?}"))?;
    if val.is_undefined() || val.is_null() {
        return Ok(None);
    }
    let raw = js_sys::JSON::stringify(&val)
        .map_err(|e| format!("{e:?}"))?
        .as_string()
        .unwrap_or_default();
    ControllerConfig::from_json(&raw)
        .map(Some)
        .map_err(|e| e.to_string())
}
