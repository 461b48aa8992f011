use crate::model::values::KeyBinding;
use anyhow::{Context, Result, anyhow};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".midica.conf";

/// Settings kept between runs in the user's local config file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LocalConfig {
    /// Last soundfont that loaded successfully.
    pub soundfont: Option<PathBuf>,

    /// Action id -> bindings that trigger it.
    pub key_bindings: BTreeMap<String, Vec<KeyBinding>>,
}

impl LocalConfig {
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or_else(|| anyhow!("Could not determine the home directory..!"))
    }

    /// Reads the config at `path`. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No local config at {}, using defaults..!", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse local config {}", path.display()))
    }

    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Stored local config at {}..!", path.display());

        Ok(())
    }

    pub fn bindings_for(&self, action: &str) -> &[KeyBinding] {
        self.key_bindings
            .get(action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
