// src/level/config.rs

use serde::{Deserialize, Serialize};

/// Options controlling how a level is turned into a [`super::Map`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Reject open wall loops and ambiguous loop vertices instead of
    /// recording them as warnings.
    pub strict_geometry: bool,

    /// Warnings retained on the map. All of them are logged regardless.
    pub max_warnings: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            strict_geometry: false,
            max_warnings: 256,
        }
    }
}

impl LoadConfig {
    pub fn strict() -> Self {
        LoadConfig {
            strict_geometry: true,
            ..LoadConfig::default()
        }
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
