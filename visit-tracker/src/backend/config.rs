//! # Configuration
//!
//! Application settings read from `visit_tracker.yaml` in the data directory.
//!
//! ```yaml
//! storage_key: "visits"
//! default_zoom: 15
//! recenter_duration_secs: 1.0
//! home_position: [51.5, -0.1]
//! form:
//!   max_title_length: 256
//!   min_rating: 1
//!   max_rating: 10
//! ```
//!
//! Every field is optional; a missing file means all defaults.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use shared::{Coords, VisitFormConfig};
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::domain::SessionConfig;
use crate::backend::storage::json::visit_repository::DEFAULT_STORAGE_KEY;

pub const CONFIG_FILE_NAME: &str = "visit_tracker.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Slot holding the visit snapshot
    pub storage_key: String,
    pub default_zoom: u8,
    pub recenter_duration_secs: f64,
    /// Position reported to the session when no position sensor is available
    pub home_position: Option<Coords>,
    pub form: VisitFormConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_zoom: session.default_zoom,
            recenter_duration_secs: session.recenter_duration_secs,
            home_position: None,
            form: session.form,
        }
    }
}

impl AppConfig {
    /// Path of the config file inside a data directory
    pub fn path_in(data_directory: &Path) -> PathBuf {
        data_directory.join(CONFIG_FILE_NAME)
    }

    /// Read the config file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config file, replacing any previous one
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            default_zoom: self.default_zoom,
            recenter_duration_secs: self.recenter_duration_secs,
            form: self.form.clone(),
        }
    }
}
