//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use domlens_protocols::HighlightStyleOverrides;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inspector: InspectorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Inspector defaults applied by the command-line tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorConfig {
    #[serde(default)]
    pub highlight_style: HighlightStyleOverrides,

    #[serde(default = "default_true")]
    pub show_tooltip: bool,

    #[serde(default = "default_true")]
    pub single_selection: bool,

    /// Modifier name; kept as text so unknown names can be reported.
    #[serde(default = "default_multi_select_key")]
    pub multi_select_key: String,

    #[serde(default = "default_z_index")]
    pub z_index: i64,

    #[serde(default = "default_hover_throttle_ms")]
    pub hover_throttle_ms: u64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            highlight_style: HighlightStyleOverrides::default(),
            show_tooltip: true,
            single_selection: true,
            multi_select_key: default_multi_select_key(),
            z_index: default_z_index(),
            hover_throttle_ms: default_hover_throttle_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_multi_select_key() -> String {
    "Shift".to_string()
}

fn default_z_index() -> i64 {
    2_147_483_646
}

fn default_hover_throttle_ms() -> u64 {
    16
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for daily log files. Console only when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
