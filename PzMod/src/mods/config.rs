//! Optional per-mod build settings (pzmod.toml)

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File name of the settings file inside a mod root
pub const CONFIG_FILE: &str = "pzmod.toml";

fn default_output_dir() -> String {
    "mods_output".to_string()
}

fn default_true() -> bool {
    true
}

/// The full settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PzModConfig {
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
}

/// Packaging defaults, overridable from the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_true")]
    pub zip: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            zip: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Warn about media files with extensions the game does not load
    #[serde(default = "default_true")]
    pub check_extensions: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            check_extensions: true,
        }
    }
}

impl PzModConfig {
    /// Load `pzmod.toml` from a mod root, or defaults when there is none
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] if the file exists but is malformed.
    pub fn load(mod_root: &Path) -> Result<Self> {
        let path = mod_root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&content)?;
        tracing::debug!("Loaded build settings from {}", path.display());
        Ok(config)
    }
}
