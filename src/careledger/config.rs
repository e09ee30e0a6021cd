use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FACILITIES_FILE: &str = "facilities.txt";
const DEFAULT_INVENTORY_FILE: &str = "inventory.txt";

pub const FACILITIES_FILE_KEY: &str = "facilities-file";
pub const INVENTORY_FILE_KEY: &str = "inventory-file";

/// Configuration for careledger, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Backing file for the facility directory, relative to the data dir
    #[serde(default = "default_facilities_file")]
    pub facilities_file: String,

    /// Backing file for the inventory ledger, relative to the data dir
    #[serde(default = "default_inventory_file")]
    pub inventory_file: String,
}

fn default_facilities_file() -> String {
    DEFAULT_FACILITIES_FILE.to_string()
}

fn default_inventory_file() -> String {
    DEFAULT_INVENTORY_FILE.to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            facilities_file: default_facilities_file(),
            inventory_file: default_inventory_file(),
        }
    }
}

/// Both stores rewrite their whole file, so two keys naming one file would
/// clobber each other. `./a.txt` and `a.txt` count as the same file.
fn same_file(a: &str, b: &str) -> bool {
    let normalize = |p: &str| -> PathBuf {
        Path::new(p.trim())
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    };
    normalize(a) == normalize(b)
}

impl LedgerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LedgerError::Io)?;
        let config: LedgerConfig =
            serde_json::from_str(&content).map_err(LedgerError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LedgerError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LedgerError::Serialization)?;
        fs::write(config_path, content).map_err(LedgerError::Io)?;
        Ok(())
    }

    pub fn facilities_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.facilities_file)
    }

    pub fn inventory_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.inventory_file)
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        match key {
            FACILITIES_FILE_KEY => Ok(&self.facilities_file),
            INVENTORY_FILE_KEY => Ok(&self.inventory_file),
            other => Err(LedgerError::Config(format!("Unknown config key: {}", other))),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(LedgerError::Config(format!("{} cannot be empty", key)));
        }
        let (target, other_key, other_value) = match key {
            FACILITIES_FILE_KEY => (
                &mut self.facilities_file,
                INVENTORY_FILE_KEY,
                &self.inventory_file,
            ),
            INVENTORY_FILE_KEY => (
                &mut self.inventory_file,
                FACILITIES_FILE_KEY,
                &self.facilities_file,
            ),
            other => return Err(LedgerError::Config(format!("Unknown config key: {}", other))),
        };
        if same_file(value, other_value) {
            return Err(LedgerError::Config(format!(
                "{} cannot share a file with {} ({})",
                key, other_key, value
            )));
        }
        *target = value.to_string();
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            (FACILITIES_FILE_KEY, self.facilities_file.as_str()),
            (INVENTORY_FILE_KEY, self.inventory_file.as_str()),
        ]
    }
}
