use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::backend::storage::traits::SlotStorage;

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "VISIT_TRACKER_DATA_DIR";

const DEFAULT_DIR_NAME: &str = "Visit Tracker";
const SLOT_EXTENSION: &str = "json";

/// JsonConnection maps each storage slot to `<base_directory>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// `$VISIT_TRACKER_DATA_DIR`, else `~/Documents/Visit Tracker`
    pub fn default_data_directory() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let documents = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        Ok(documents.join(DEFAULT_DIR_NAME))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Turn a slot key into a safe file stem: "my visits" -> "my_visits"
    pub fn safe_slot_name(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect::<String>()
            .trim_matches('.')
            .to_string()
    }

    /// Path of the file backing a slot
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let name = Self::safe_slot_name(key);
        if name.is_empty() {
            return Err(anyhow::anyhow!("Invalid storage key: {:?}", key));
        }
        Ok(self.base_directory.join(format!("{}.{}", name, SLOT_EXTENSION)))
    }
}

impl SlotStorage for JsonConnection {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!("Read {} bytes from {:?}", contents.len(), path);
                Ok(Some(contents))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let temp_path = path.with_extension(format!("{}.tmp", SLOT_EXTENSION));

        // Write to temporary file first, then swap it in
        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> Result<bool> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {:?}", path);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}
