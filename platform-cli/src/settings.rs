//! Optional on-disk defaults
//!
//! Read from `<config dir>/platform-cli/config.toml` when present. CLI
//! flags override file values; a missing file means built-in defaults.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::org::EntityKind;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub graduate: GraduateSettings,
    pub blacklist: BlacklistSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GraduateSettings {
    pub batch_size: Option<usize>,
    pub platform_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlacklistSettings {
    pub fields: Vec<String>,
    pub extensions: Vec<String>,
    pub sources: Vec<String>,
    pub pages: Vec<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("malformed settings in {}", path.display()))
    }

    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("platform-cli").join("config.toml"))
    }

    /// Per-kind blacklist entries from the settings file.
    pub fn blacklist_entries(&self) -> HashMap<EntityKind, Vec<String>> {
        let mut entries = HashMap::new();
        entries.insert(EntityKind::Field, self.blacklist.fields.clone());
        entries.insert(EntityKind::Extension, self.blacklist.extensions.clone());
        entries.insert(EntityKind::Source, self.blacklist.sources.clone());
        entries.insert(EntityKind::Page, self.blacklist.pages.clone());
        entries
    }
}
