//! Property store: value resolution and mutations.
//!
//! Resolution order for a name:
//!
//! 1. static table (computed install locations)
//! 2. reserved names ([`SPEC_PATHS`], [`TOOL_VERSION`], [`PRODUCT_VERSION`])
//! 3. persisted value in the addressed version group
//! 4. persisted value in the closest older version group
//!
//! The backend is opened on first need only, so queries that stop at steps 1-2
//! never touch disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::fallback::{dump_order, fallback_candidates};
use crate::core::key::{PropertyKey, is_hidden};
use crate::core::static_table::{LibraryInfo, LocationKind, StaticTable};
use crate::io::backend::{BackendSource, SettingsBackend};
use crate::io::config::StoreConfig;
use crate::io::layout::ConfiguredLayout;
use crate::io::settings_file::SettingsFileSource;

/// Ordered build-spec search directories, joined with [`PATH_LIST_SEPARATOR`].
pub const SPEC_PATHS: &str = "SPEC_PATHS";
/// The tool's own version.
pub const TOOL_VERSION: &str = "TOOL_VERSION";
/// Product version, only resolvable when one was compiled in.
pub const PRODUCT_VERSION: &str = "PRODUCT_VERSION";

pub const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Version of this build; persisted properties are grouped under it.
pub const BUILD_TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Set with `PROPSTORE_PRODUCT_VERSION` at build time.
pub const BUILD_PRODUCT_VERSION: Option<&str> = option_env!("PROPSTORE_PRODUCT_VERSION");

/// Values the store reports but never persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub tool_version: String,
    pub product_version: Option<String>,
    pub search_paths: Vec<PathBuf>,
}

/// A persisted property as listed by a full dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEntry {
    pub version: String,
    pub name: String,
    pub value: String,
}

/// Versioned property store over a lazily opened backend.
pub struct PropertyStore<S: BackendSource> {
    table: StaticTable,
    options: StoreOptions,
    source: S,
    /// `None` until the first persisted lookup or mutation.
    backend: Option<S::Backend>,
}

impl<S: BackendSource> PropertyStore<S> {
    pub fn new(info: &dyn LibraryInfo, options: StoreOptions, source: S) -> Self {
        Self {
            table: StaticTable::build(info),
            options,
            source,
            backend: None,
        }
    }

    pub fn tool_version(&self) -> &str {
        &self.options.tool_version
    }

    pub fn static_table(&self) -> &StaticTable {
        &self.table
    }

    pub fn is_open(&self) -> bool {
        self.backend.is_some()
    }

    /// Reserved names in report order. [`PRODUCT_VERSION`] is listed only when
    /// a product version is known.
    pub fn reserved_names(&self) -> Vec<&'static str> {
        let mut names = vec![SPEC_PATHS, TOOL_VERSION];
        if self.options.product_version.is_some() {
            names.push(PRODUCT_VERSION);
        }
        names
    }

    /// Resolve `name`, returning an empty string when it is unknown.
    pub fn value(&mut self, name: &str) -> Result<String> {
        Ok(self.value_checked(name, false)?.unwrap_or_default())
    }

    pub fn has_value(&mut self, name: &str) -> Result<bool> {
        Ok(self.value_checked(name, true)?.is_some())
    }

    /// Resolve `name`, distinguishing unknown (`None`) from empty.
    ///
    /// `just_checking` suppresses the fallback trace.
    pub fn value_checked(&mut self, name: &str, just_checking: bool) -> Result<Option<String>> {
        if let Some(value) = self.table.lookup(name) {
            return Ok(Some(value.to_string()));
        }
        if let Some(value) = self.reserved_value(name) {
            return Ok(Some(value));
        }

        let key = PropertyKey::parse(name);
        let baseline = key.group(&self.options.tool_version);
        let backend = open_backend(&self.source, &mut self.backend)?;
        if let Some(value) = backend.read(baseline, &key.name)? {
            return Ok(Some(value));
        }

        for version in fallback_candidates(backend.groups()?, baseline) {
            // Already read above.
            if version == baseline {
                continue;
            }
            if let Some(value) = backend.read(&version, &key.name)? {
                if !just_checking {
                    debug!(
                        baseline,
                        fallback = %version,
                        property = %key.name,
                        "fell back to older version"
                    );
                }
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Persist `value` for `name` under the current version.
    ///
    /// `name` is stored verbatim; a `/` in it is not treated as a version
    /// separator. Hidden names are ignored.
    pub fn set_value(&mut self, name: &str, value: &str) -> Result<()> {
        if is_hidden(name) {
            debug!(property = name, "skipping hidden property");
            return Ok(());
        }
        let backend = open_backend(&self.source, &mut self.backend)?;
        debug!(version = %self.options.tool_version, property = name, "set property");
        backend.write(&self.options.tool_version, name, value)
    }

    /// Remove `name` from the current version. Missing and hidden names are
    /// ignored.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if is_hidden(name) {
            debug!(property = name, "skipping hidden property");
            return Ok(());
        }
        let backend = open_backend(&self.source, &mut self.backend)?;
        debug!(version = %self.options.tool_version, property = name, "remove property");
        backend.delete(&self.options.tool_version, name)
    }

    /// Every persisted property, newest version first. The unversioned group is
    /// not listed.
    pub fn persisted_entries(&mut self) -> Result<Vec<PersistedEntry>> {
        let backend = open_backend(&self.source, &mut self.backend)?;
        let mut entries = Vec::new();
        for version in dump_order(backend.groups()?) {
            for name in backend.keys(&version)? {
                let value = backend.read(&version, &name)?.unwrap_or_default();
                entries.push(PersistedEntry {
                    version: version.clone(),
                    name,
                    value,
                });
            }
        }
        Ok(entries)
    }

    fn reserved_value(&self, name: &str) -> Option<String> {
        match name {
            SPEC_PATHS => Some(self.spec_paths()),
            TOOL_VERSION => Some(self.options.tool_version.clone()),
            PRODUCT_VERSION => self.options.product_version.clone(),
            _ => None,
        }
    }

    fn spec_paths(&self) -> String {
        self.options
            .search_paths
            .iter()
            .map(|path| path.to_string_lossy())
            .collect::<Vec<_>>()
            .join(&PATH_LIST_SEPARATOR.to_string())
    }
}

fn open_backend<'a, S: BackendSource>(
    source: &S,
    slot: &'a mut Option<S::Backend>,
) -> Result<&'a mut S::Backend> {
    if slot.is_none() {
        debug!("opening settings backend");
        *slot = Some(source.open()?);
    }
    slot.as_mut().context("settings backend not open")
}

/// Build a file-backed store from config.
///
/// Search paths default to `<data>/specs` when the config lists none.
pub fn open_from_config(
    cfg: &StoreConfig,
    tool_version: &str,
) -> Result<PropertyStore<SettingsFileSource>> {
    let layout = ConfiguredLayout::new(cfg.layout.clone());
    let search_paths = if cfg.search_paths.is_empty() {
        vec![PathBuf::from(layout.location(LocationKind::Data)).join("specs")]
    } else {
        cfg.search_paths.clone()
    };
    let options = StoreOptions {
        tool_version: tool_version.to_string(),
        product_version: BUILD_PRODUCT_VERSION.map(str::to_string),
        search_paths,
    };
    let source = SettingsFileSource::new(cfg.resolved_settings_path()?);
    Ok(PropertyStore::new(&layout, options, source))
}
