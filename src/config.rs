use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Style of the selection highlight drawn over the stage during a render
/// pass. Defaults match the classic inspector overlay.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HighlightConfig {
    #[serde(default = "HighlightConfig::default_color")]
    pub color: u32,
    #[serde(default = "HighlightConfig::default_fill_alpha")]
    pub fill_alpha: f32,
    #[serde(default = "HighlightConfig::default_line_alpha")]
    pub line_alpha: f32,
    #[serde(default = "HighlightConfig::default_line_width")]
    pub line_width: f32,
}

impl HighlightConfig {
    const fn default_color() -> u32 {
        0x007eff
    }

    const fn default_fill_alpha() -> f32 {
        0.3
    }

    const fn default_line_alpha() -> f32 {
        0.6
    }

    const fn default_line_width() -> f32 {
        1.0
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            color: Self::default_color(),
            fill_alpha: Self::default_fill_alpha(),
            line_alpha: Self::default_line_alpha(),
            line_width: Self::default_line_width(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InspectorConfig {
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default = "InspectorConfig::default_auto_select_first_root")]
    pub auto_select_first_root: bool,
}

impl InspectorConfig {
    const fn default_auto_select_first_root() -> bool {
        true
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read inspector config {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse inspector config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("[inspector] Config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            highlight: HighlightConfig::default(),
            auto_select_first_root: Self::default_auto_select_first_root(),
        }
    }
}
