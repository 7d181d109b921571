//! Canvas configuration.

use crate::error::ConfigError;
use crate::shapes::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use serde::{Deserialize, Serialize};

/// Smallest width or height of the drawing surface.
pub const MIN_SURFACE_SIZE: u32 = 200;

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Canvas background color.
    pub fn background(self) -> &'static str {
        match self {
            Theme::Light => "#ffffff",
            Theme::Dark => "#0f172a",
        }
    }

    /// Stroke color that contrasts with the background.
    pub fn default_color(self) -> &'static str {
        match self {
            Theme::Light => "#000000",
            Theme::Dark => "#ffffff",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// How the text tool collects the content of new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEntryMode {
    /// Ask the injected prompt synchronously.
    #[default]
    Prompt,
    /// Open an inline edit at the pointer immediately.
    Inline,
}

/// Initial canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub theme: Theme,
    pub text_entry: TextEntryMode,
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub font_size: f64,
    /// Initial stroke color. Falls back to the theme's default color.
    pub color: Option<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            text_entry: TextEntryMode::Prompt,
            width: 800,
            height: 600,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            color: None,
        }
    }
}

impl CanvasConfig {
    /// Parse a JSON config; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn initial_color(&self) -> String {
        self.color
            .clone()
            .unwrap_or_else(|| self.theme.default_color().to_string())
    }
}

/// Clamp surface dimensions to the minimum size.
pub fn clamp_surface_size(width: u32, height: u32) -> (u32, u32) {
    (width.max(MIN_SURFACE_SIZE), height.max(MIN_SURFACE_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_colors() {
        assert_eq!(Theme::Dark.background(), "#0f172a");
        assert_eq!(Theme::Light.background(), "#ffffff");
        assert_eq!(Theme::Dark.default_color(), "#ffffff");
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CanvasConfig::from_json(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.text_entry, TextEntryMode::Prompt);
        assert_eq!(config.width, 800);
        assert_eq!(config.initial_color(), "#ffffff");

        let config = CanvasConfig::from_json(r##"{"text_entry":"inline","color":"#123456"}"##).unwrap();
        assert_eq!(config.text_entry, TextEntryMode::Inline);
        assert_eq!(config.initial_color(), "#123456");
    }

    #[test]
    fn test_invalid_json() {
        assert!(CanvasConfig::from_json(r#"{"width":"wide"}"#).is_err());
    }

    #[test]
    fn test_clamp_surface_size() {
        assert_eq!(clamp_surface_size(100, 900), (200, 900));
        assert_eq!(clamp_surface_size(640, 480), (640, 480));
    }
}
