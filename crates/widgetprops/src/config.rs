//! # Configuration
//!
//! Settings are loaded by [`confique`], layered in priority order:
//! 1. **Environment variables**: `WIDGETPROPS_MAX_PATH_DEPTH`, etc.
//! 2. **Explicit file**: the path handed to [`PropsConfig::load`], if any.
//! 3. **Global file**: `widgetprops.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! [`PropsConfig::load_file`] reads a single file over the defaults, ignoring
//! the environment and the global file.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `max_path_depth` | `16` | Maximum number of segments in a property path |
//! | `allow_indexed_segments` | `true` | Accept `Name[3]` segments in property paths |
//! | `clamp_child_order` | `true` | Clamp out-of-range reorders to the last slot instead of rejecting them |

use crate::error::Result;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "widgetprops.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PropsConfig {
    /// Maximum number of segments in a property path.
    #[config(default = 16, env = "WIDGETPROPS_MAX_PATH_DEPTH")]
    pub max_path_depth: usize,

    /// Whether path segments may carry an element index (`Items[2]`).
    #[config(default = true, env = "WIDGETPROPS_ALLOW_INDEXED_SEGMENTS")]
    pub allow_indexed_segments: bool,

    /// Whether a child reorder past the last slot is clamped (true) or rejected (false).
    #[config(default = true, env = "WIDGETPROPS_CLAMP_CHILD_ORDER")]
    pub clamp_child_order: bool,
}

impl Default for PropsConfig {
    fn default() -> Self {
        Self {
            max_path_depth: 16,
            allow_indexed_segments: true,
            clamp_child_order: true,
        }
    }
}

impl PropsConfig {
    /// Load the layered configuration. Missing files are skipped.
    ///
    /// The result depends on the host: `WIDGETPROPS_*` variables and the
    /// global file both apply.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        if let Some(global) = global_config_path() {
            builder = builder.file(global);
        }
        let config = builder.load()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Load one file over the compiled defaults. A missing file yields the defaults.
    pub fn load_file(path: &Path) -> Result<Self> {
        let config = Self::builder().file(path).load()?;
        tracing::debug!(?config, path = %path.display(), "loaded configuration file");
        Ok(config)
    }
}

/// Location of the global config file, if the platform has a config directory.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "widgetprops").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
