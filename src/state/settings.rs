use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{ACCENT_ANNOTATION, ACCENT_EDITOR, MAX_ZOOM, MIN_ZOOM};

/// File name looked up next to the executable or the crate root.
pub const SETTINGS_FILE_NAME: &str = "annotation-overlay.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Overlay and chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Enable debug logging (honours `RUST_LOG` when set)
    pub debug_logging: bool,
    /// Chart zoom in pixels per second
    pub zoom: f64,
    /// Visible chart width in pixels
    pub chart_width: f64,
    /// Drags shorter than this (pixels) create a point annotation
    pub click_threshold_px: f64,
    /// Text given to a new annotation before the user renames it
    pub default_text: String,
    /// Hide committed annotations outside the visible time range
    pub cull_offscreen: bool,
    pub marker_color: String,
    pub editor_color: String,
    /// Where committed annotations are stored; relative paths resolve like the settings file
    pub annotations_path: Option<String>,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            zoom: 8.0,
            chart_width: 960.0,
            click_threshold_px: 4.0,
            default_text: "Name Me".to_string(),
            cull_offscreen: true,
            marker_color: ACCENT_ANNOTATION.to_string(),
            editor_color: ACCENT_EDITOR.to_string(),
            annotations_path: None,
        }
    }
}

impl OverlaySettings {
    /// Load settings from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        let settings: OverlaySettings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Replace values that would break coordinate mapping.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            tracing::warn!(zoom = self.zoom, "invalid zoom in settings, using default");
            self.zoom = defaults.zoom;
        } else if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            tracing::warn!(zoom = self.zoom, "zoom out of range, clamping");
            self.zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
        if !(self.chart_width.is_finite() && self.chart_width > 0.0) {
            self.chart_width = defaults.chart_width;
        }
        if !self.click_threshold_px.is_finite() || self.click_threshold_px < 0.0 {
            self.click_threshold_px = defaults.click_threshold_px;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_use_defaults() {
        let parsed: OverlaySettings = serde_json::from_str(r#"{"zoom": 12.5}"#).unwrap();
        assert_eq!(parsed.zoom, 12.5);
        assert_eq!(parsed.default_text, "Name Me");
        assert_eq!(parsed.click_threshold_px, 4.0);
        assert!(parsed.cull_offscreen);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir()
            .join(format!("annotation-overlay-{}", uuid::Uuid::new_v4()))
            .join(SETTINGS_FILE_NAME);
        let settings = OverlaySettings::load(&path).unwrap();
        assert_eq!(settings, OverlaySettings::default());
    }

    #[test]
    fn test_invalid_values_are_replaced() {
        let parsed: OverlaySettings =
            serde_json::from_str(r#"{"zoom": -1.0, "click_threshold_px": -3.0}"#).unwrap();
        let settings = parsed.sanitized();
        assert_eq!(settings.zoom, 8.0);
        assert_eq!(settings.click_threshold_px, 4.0);
    }

    #[test]
    fn test_extreme_zoom_is_clamped() {
        let tiny: OverlaySettings = serde_json::from_str(r#"{"zoom": 1e-9}"#).unwrap();
        assert_eq!(tiny.sanitized().zoom, MIN_ZOOM);

        let huge: OverlaySettings = serde_json::from_str(r#"{"zoom": 1e9}"#).unwrap();
        assert_eq!(huge.sanitized().zoom, MAX_ZOOM);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("annotation-overlay-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SETTINGS_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(OverlaySettings::load(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}
