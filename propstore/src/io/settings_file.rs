//! TOML file backend for persisted properties.
//!
//! The file maps each version label to a table of string properties:
//!
//! ```toml
//! ["1.0"]
//! X = "a"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::backend::{BackendSource, SettingsBackend};

type Groups = BTreeMap<String, BTreeMap<String, String>>;

/// Settings file loaded into memory, written back after every mutation.
#[derive(Debug)]
pub struct SettingsFile {
    path: PathBuf,
    groups: Groups,
}

impl SettingsFile {
    /// Load `path`; a missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "opening settings file");
        let groups = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("read settings {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("parse settings {}", path.display()))?
        } else {
            Groups::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            groups,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let buf = toml::to_string_pretty(&self.groups).context("serialize settings toml")?;
        write_atomic(&self.path, &buf)
    }
}

impl SettingsBackend for SettingsFile {
    fn read(&self, group: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .groups
            .get(group)
            .and_then(|keys| keys.get(key))
            .cloned())
    }

    fn write(&mut self, group: &str, key: &str, value: &str) -> Result<()> {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn delete(&mut self, group: &str, key: &str) -> Result<()> {
        let Some(keys) = self.groups.get_mut(group) else {
            return Ok(());
        };
        if keys.remove(key).is_none() {
            return Ok(());
        }
        if keys.is_empty() {
            self.groups.remove(group);
        }
        self.flush()
    }

    fn groups(&self) -> Result<Vec<String>> {
        Ok(self.groups.keys().cloned().collect())
    }

    fn keys(&self, group: &str) -> Result<Vec<String>> {
        Ok(self
            .groups
            .get(group)
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default())
    }
}

/// Opens a [`SettingsFile`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsFileSource {
    pub path: PathBuf,
}

impl SettingsFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BackendSource for SettingsFileSource {
    type Backend = SettingsFile;

    fn open(&self) -> Result<SettingsFile> {
        SettingsFile::open(&self.path)
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("settings path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp settings {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace settings {}", path.display()))?;
    Ok(())
}
