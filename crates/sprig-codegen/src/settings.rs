//! User preferences and the per-pass generation context.

use crate::error::{CodegenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target presentation framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Framework {
    #[default]
    #[serde(rename = "HTML")]
    Html,
    Tailwind,
    Flutter,
    #[serde(rename = "SwiftUI")]
    SwiftUI,
}

impl Framework {
    pub const ALL: [Framework; 4] = [
        Framework::Html,
        Framework::Tailwind,
        Framework::Flutter,
        Framework::SwiftUI,
    ];

    /// Markup targets use element/attribute syntax.
    pub fn is_markup(&self) -> bool {
        matches!(self, Framework::Html | Framework::Tailwind)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "HTML"),
            Self::Tailwind => write!(f, "Tailwind"),
            Self::Flutter => write!(f, "Flutter"),
            Self::SwiftUI => write!(f, "SwiftUI"),
        }
    }
}

/// What the Flutter output is wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlutterGenerationMode {
    #[default]
    Snippet,
    Stateless,
    FullApp,
}

/// What the SwiftUI output is wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwiftUIGenerationMode {
    #[default]
    Snippet,
    Struct,
    Preview,
}

/// Persisted user preferences, read once per generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginSettings {
    pub framework: Framework,
    /// `className` and style objects instead of `class` and style strings.
    pub jsx: bool,
    /// Use the host's inferred auto-layout for frames that declare none.
    pub optimize_layout: bool,
    pub show_layer_names: bool,
    /// Snap arbitrary pixel values to the Tailwind spacing scale.
    pub round_tailwind_values: bool,
    /// Snap colors to the nearest Tailwind palette entry.
    pub round_tailwind_colors: bool,
    pub custom_tailwind_prefix: Option<String>,
    pub flutter_generation_mode: FlutterGenerationMode,
    #[serde(rename = "swiftUIGenerationMode")]
    pub swiftui_generation_mode: SwiftUIGenerationMode,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            framework: Framework::default(),
            jsx: false,
            optimize_layout: true,
            show_layer_names: false,
            round_tailwind_values: false,
            round_tailwind_colors: false,
            custom_tailwind_prefix: None,
            flutter_generation_mode: FlutterGenerationMode::default(),
            swiftui_generation_mode: SwiftUIGenerationMode::default(),
        }
    }
}

impl PluginSettings {
    /// Default settings targeting `framework`.
    pub fn for_framework(framework: Framework) -> Self {
        Self {
            framework,
            ..Self::default()
        }
    }

    /// Parse a persisted settings document. Missing keys take defaults.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(CodegenError::InvalidSettings)
    }

    /// The class prefix, if one is set and not blank.
    pub fn class_prefix(&self) -> Option<&str> {
        self.custom_tailwind_prefix
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}

/// State for one generation pass, passed by reference down the walk and
/// never mutated by it.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub framework: Framework,
    pub settings: PluginSettings,
    /// Output feeds the in-tool HTML preview rather than the code panel.
    pub preview: bool,
}

impl GenerationContext {
    pub fn new(settings: PluginSettings, preview: bool) -> Self {
        Self {
            framework: settings.framework,
            settings,
            preview,
        }
    }

    /// JSX attribute syntax. The preview is rendered as plain HTML, so it
    /// never uses JSX.
    pub fn jsx(&self) -> bool {
        self.settings.jsx && !self.preview && self.framework.is_markup()
    }

    pub fn optimize_layout(&self) -> bool {
        self.settings.optimize_layout
    }

    pub fn show_layer_names(&self) -> bool {
        self.settings.show_layer_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_json_defaults() {
        let settings =
            PluginSettings::from_json(r#"{"framework": "SwiftUI", "jsx": true}"#).unwrap();
        assert_eq!(settings.framework, Framework::SwiftUI);
        assert!(settings.jsx);
        assert!(settings.optimize_layout);
        assert_eq!(settings.swiftui_generation_mode, SwiftUIGenerationMode::Snippet);
    }

    #[test]
    fn test_settings_modes() {
        let settings = PluginSettings::from_json(
            r#"{"flutterGenerationMode": "fullApp", "swiftUIGenerationMode": "preview"}"#,
        )
        .unwrap();
        assert_eq!(settings.flutter_generation_mode, FlutterGenerationMode::FullApp);
        assert_eq!(settings.swiftui_generation_mode, SwiftUIGenerationMode::Preview);
    }

    #[test]
    fn test_invalid_settings() {
        let err = PluginSettings::from_json(r#"{"framework": "Qt"}"#).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidSettings(_)));
    }

    #[test]
    fn test_blank_prefix_is_ignored() {
        let mut settings = PluginSettings::for_framework(Framework::Tailwind);
        settings.custom_tailwind_prefix = Some("  ".to_string());
        assert_eq!(settings.class_prefix(), None);
        settings.custom_tailwind_prefix = Some("tw-".to_string());
        assert_eq!(settings.class_prefix(), Some("tw-"));
    }

    #[test]
    fn test_preview_disables_jsx() {
        let mut settings = PluginSettings::default();
        settings.jsx = true;
        assert!(GenerationContext::new(settings.clone(), false).jsx());
        assert!(!GenerationContext::new(settings, true).jsx());
    }
}
