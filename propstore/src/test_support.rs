//! Test-only helpers: in-memory backend, fixed layouts and store builders.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::core::static_table::{LibraryInfo, LocationKind};
use crate::io::backend::{BackendSource, SettingsBackend};
use crate::io::config::{LayoutConfig, StoreConfig, write_config};
use crate::store::{PropertyStore, StoreOptions};

type Groups = BTreeMap<String, BTreeMap<String, String>>;

/// Shared in-memory backend.
///
/// Clones share storage, so a test can keep one handle while the store opens
/// another. `open_count` records how often the store asked for a backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    groups: Rc<RefCell<Groups>>,
    opens: Rc<Cell<usize>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a property before the store sees the backend.
    pub fn with_property(self, group: &str, key: &str, value: &str) -> Self {
        self.groups
            .borrow_mut()
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, group: &str, key: &str) -> Option<String> {
        self.groups
            .borrow()
            .get(group)
            .and_then(|keys| keys.get(key))
            .cloned()
    }

    pub fn open_count(&self) -> usize {
        self.opens.get()
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self, group: &str, key: &str) -> Result<Option<String>> {
        Ok(self.get(group, key))
    }

    fn write(&mut self, group: &str, key: &str, value: &str) -> Result<()> {
        self.groups
            .borrow_mut()
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, group: &str, key: &str) -> Result<()> {
        let mut groups = self.groups.borrow_mut();
        if let Some(keys) = groups.get_mut(group) {
            keys.remove(key);
            if keys.is_empty() {
                groups.remove(group);
            }
        }
        Ok(())
    }

    fn groups(&self) -> Result<Vec<String>> {
        Ok(self.groups.borrow().keys().cloned().collect())
    }

    fn keys(&self, group: &str) -> Result<Vec<String>> {
        Ok(self
            .groups
            .borrow()
            .get(group)
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default())
    }
}

impl BackendSource for MemoryBackend {
    type Backend = MemoryBackend;

    fn open(&self) -> Result<MemoryBackend> {
        self.opens.set(self.opens.get() + 1);
        Ok(self.clone())
    }
}

/// Source whose backend can never be opened.
#[derive(Debug, Clone, Copy)]
pub struct FailingSource;

impl BackendSource for FailingSource {
    type Backend = MemoryBackend;

    fn open(&self) -> Result<MemoryBackend> {
        Err(anyhow!("backend unavailable"))
    }
}

/// Layout reporting `/expanded/<Kind>` and `${prefix}/<Kind>`.
#[derive(Debug, Clone, Copy)]
pub struct FixedLayout;

impl LibraryInfo for FixedLayout {
    fn location(&self, kind: LocationKind) -> String {
        format!("/expanded/{kind:?}")
    }

    fn raw_location(&self, kind: LocationKind) -> String {
        format!("${{prefix}}/{kind:?}")
    }
}

/// Collects formatted tracing output for assertions.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Debug-level subscriber writing plain text into this capture.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        self.buf
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .map_err(|_| io::Error::other("log capture poisoned"))?
            .extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Store over `backend` with [`FixedLayout`], search paths `/specs/a` and
/// `/specs/b`, and no product version.
pub fn memory_store(backend: MemoryBackend, tool_version: &str) -> PropertyStore<MemoryBackend> {
    PropertyStore::new(
        &FixedLayout,
        StoreOptions {
            tool_version: tool_version.to_string(),
            product_version: None,
            search_paths: vec![PathBuf::from("/specs/a"), PathBuf::from("/specs/b")],
        },
        backend,
    )
}

/// Temporary config + settings files for driving the binary.
pub struct TestEnv {
    temp: tempfile::TempDir,
    pub config_path: PathBuf,
    pub settings_path: PathBuf,
}

impl TestEnv {
    /// Write a config with prefix `/opt/tool` and settings inside the tempdir.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let config_path = temp.path().join("config.toml");
        let settings_path = temp.path().join("properties.toml");
        let cfg = StoreConfig {
            settings_path: Some(settings_path.clone()),
            search_paths: vec![PathBuf::from("/opt/tool/specs")],
            layout: LayoutConfig {
                prefix: "/opt/tool".to_string(),
                ..LayoutConfig::default()
            },
        };
        write_config(&config_path, &cfg)?;
        Ok(Self {
            temp,
            config_path,
            settings_path,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Replace the settings file with raw TOML.
    pub fn write_settings(&self, contents: &str) -> Result<()> {
        fs::write(&self.settings_path, contents)
            .with_context(|| format!("write {}", self.settings_path.display()))
    }
}
