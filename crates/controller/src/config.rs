//! Layout configuration.
//!
//! A layout is one document with the map settings at the top level plus the
//! block list, the avatar and the controls:
//!
//! ```yaml
//! block_size: 10
//! map: { rows: 30, cols: 30 }
//! view: { rows: 15, cols: 15 }
//! bounds: unbounded
//! developer: false
//! blocks:
//!   - position: { row_start: 5, col_start: 5, row_end: 6, col_end: 6 }
//!     collidable: true
//! avatar:
//!   position: { row_start: 3, col_start: 5, row_end: 4, col_end: 6 }
//! controls:
//!   keyboard: { up: 38, down: 40, left: 37, right: 39 }
//! ```
//!
//! Positions are 0-based cells. The original engine's camelCase keys
//! (`blockSize`, `className`, `collision`, and 1-based `rowStart` /
//! `columnStart` / `rowEnd` / `columnEnd` grid lines) are accepted too.

use burnout_common::{Block, GridExtent, GridRect};
use burnout_input::KeyMap;
use burnout_kernel::BoundsPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Map-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Pixel size of one cell.
    #[serde(alias = "blockSize")]
    pub block_size: i32,
    pub map: GridExtent,
    pub view: GridExtent,
    #[serde(default)]
    pub bounds: BoundsPolicy,
    /// Outline the view window in debug renderers.
    #[serde(default)]
    pub developer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarConfig {
    pub position: GridRect,
    #[serde(default, alias = "className")]
    pub class_name: Option<String>,
}

impl AvatarConfig {
    pub fn at(row: i32, col: i32) -> Self {
        Self {
            position: GridRect::unit(row, col),
            class_name: None,
        }
    }
}

/// Input bindings. Without a keyboard map the game runs without controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default)]
    pub keyboard: Option<KeyMap>,
}

impl ControlsConfig {
    pub fn keyboard(keymap: KeyMap) -> Self {
        Self {
            keyboard: Some(keymap),
        }
    }
}

/// A complete layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(flatten)]
    pub map: MapConfig,
    #[serde(default)]
    pub blocks: Vec<Block>,
    pub avatar: AvatarConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
}

impl GameConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a layout, picking the format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
