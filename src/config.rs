//! Toolbar configuration: element markers and timing windows.
//!
//! Defaults mirror the constants the bubble was tuned with (260 ms fade,
//! 100 ms link-open debounce, 250 ms scroll throttle). Scenario files may
//! override any field, which is why everything derives `Deserialize` with
//! per-field defaults.

use serde::Deserialize;

/// Markers identifying the toolbar's collaborating elements in the host
/// tree. The event binder resolves event targets against these; a browser
/// embedding maps them to CSS classes or data attributes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// The content-editable region the bubble serves.
    pub editable: String,
    /// The floating toolbar root.
    pub toolbar: String,
    /// The options sub-panel that flips between buttons and the URL input.
    pub options_panel: String,
    pub bold_button: String,
    pub italic_button: String,
    pub quote_button: String,
    pub link_button: String,
    pub url_input: String,
    /// Wrapper around the toolbar's own input controls; events landing
    /// inside it must never be read as document selection changes.
    pub input_controls: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            editable: "editable-region".to_string(),
            toolbar: "text-options".to_string(),
            options_panel: "options".to_string(),
            bold_button: "bold".to_string(),
            italic_button: "italic".to_string(),
            quote_button: "quote".to_string(),
            link_button: "url".to_string(),
            url_input: "url-input".to_string(),
            input_controls: "ui-inputs".to_string(),
        }
    }
}

/// Timing windows for the fade, debounce, and throttle logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// How long the fade-out runs before the bubble is parked off-screen.
    pub fade_ms: u64,
    /// Delay between opening the link editor and reading the selection,
    /// so a focus-induced collapse has settled first.
    pub link_debounce_ms: u64,
    /// Window during which repeated scroll events are dropped.
    pub scroll_throttle_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            fade_ms: 260,
            link_debounce_ms: 100,
            scroll_throttle_ms: 250,
        }
    }
}

/// Complete toolbar configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
    pub markers: Markers,
    pub timing: Timing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_matches_tuned_constants() {
        let timing = Timing::default();
        assert_eq!(timing.fade_ms, 260);
        assert_eq!(timing.link_debounce_ms, 100);
        assert_eq!(timing.scroll_throttle_ms, 250);
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let config: ToolbarConfig =
            serde_json::from_str(r#"{ "timing": { "fade_ms": 10 } }"#).unwrap();
        assert_eq!(config.timing.fade_ms, 10);
        assert_eq!(config.timing.link_debounce_ms, 100);
        assert_eq!(config.markers.editable, "editable-region");
    }
}
