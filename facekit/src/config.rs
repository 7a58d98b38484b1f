//! Configuration management (config.toml)
//!
//! Lets a studio whose exports use different file names point the loader at
//! them without touching the face model directories themselves.
//!
//! ```toml
//! [layout]
//! base_mesh_file = "neutral.obj"
//! identity_digits = 4
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::layout::Layout;

/// File name of the configuration inside [`config_dir`]
pub const CONFIG_FILE: &str = "config.toml";

/// FaceKit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FaceKitConfig {
    /// File naming inside face model directories
    #[serde(default)]
    pub layout: Layout,
}

impl FaceKitConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\FaceKit\config`
/// On macOS: `~/Library/Application Support/org.ict.FaceKit`
/// On Linux: `~/.config/facekit`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "ict", "FaceKit")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads the configuration from the platform config directory.
///
/// Returns defaults if the file doesn't exist or cannot be parsed.
pub fn load() -> FaceKitConfig {
    let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE)) else {
        return FaceKitConfig::default();
    };
    if !path.exists() {
        return FaceKitConfig::default();
    }
    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring config {}: {:#}", path.display(), e);
            FaceKitConfig::default()
        }
    }
}

/// Loads the configuration from an explicit file. Errors propagate.
pub fn load_from(path: &Path) -> Result<FaceKitConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    FaceKitConfig::parse(&content).with_context(|| format!("In config: {}", path.display()))
}
