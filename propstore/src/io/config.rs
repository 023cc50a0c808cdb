//! Store configuration, read from `config.toml` in the user config directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV: &str = "PROPSTORE_CONFIG";

const APP_DIR: &str = "propstore";

/// Store configuration (TOML).
///
/// Missing fields fall back to [`StoreConfig::default`], so an empty file is a
/// valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Settings file holding persisted properties. Defaults to
    /// `<config dir>/propstore/properties.toml`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_path: Option<PathBuf>,

    /// Directories searched for specification files, in priority order.
    /// Empty means `<expanded data location>/specs`.
    pub search_paths: Vec<PathBuf>,

    pub layout: LayoutConfig,
}

/// Installation layout templates.
///
/// Templates may reference `${sysroot}`, `${prefix}` and `${host_prefix}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    pub sysroot: String,
    pub prefix: String,
    pub data: String,
    pub docs: String,
    pub headers: String,
    pub libs: String,
    pub binaries: String,
    pub tests: String,
    pub plugins: String,
    pub imports: String,
    pub translations: String,
    pub settings: String,
    pub examples: String,
    pub host_prefix: String,
    pub host_data: String,
    pub host_binaries: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sysroot: String::new(),
            prefix: "/usr/local".to_string(),
            data: "${prefix}".to_string(),
            docs: "${prefix}/doc".to_string(),
            headers: "${prefix}/include".to_string(),
            libs: "${prefix}/lib".to_string(),
            binaries: "${prefix}/bin".to_string(),
            tests: "${prefix}/tests".to_string(),
            plugins: "${prefix}/plugins".to_string(),
            imports: "${prefix}/imports".to_string(),
            translations: "${prefix}/translations".to_string(),
            settings: "${prefix}/etc".to_string(),
            examples: "${prefix}/examples".to_string(),
            host_prefix: "${prefix}".to_string(),
            host_data: "${host_prefix}".to_string(),
            host_binaries: "${host_prefix}/bin".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.layout.prefix.trim().is_empty() {
            return Err(anyhow!("layout.prefix must be non-empty"));
        }
        if self.layout.host_prefix.trim().is_empty() {
            return Err(anyhow!("layout.host_prefix must be non-empty"));
        }
        if self
            .settings_path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(anyhow!("settings_path must be non-empty when set"));
        }
        if self
            .search_paths
            .iter()
            .any(|path| path.as_os_str().is_empty())
        {
            return Err(anyhow!("search_paths must not contain empty entries"));
        }
        Ok(())
    }

    /// Settings file to use, falling back to the user config directory.
    pub fn resolved_settings_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.settings_path {
            return Ok(path.clone());
        }
        Ok(user_config_dir()?.join("properties.toml"))
    }
}

/// Config file to load: `explicit`, else `$PROPSTORE_CONFIG`, else the user
/// config directory.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Ok(user_config_dir()?.join("config.toml"))
}

fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("no user config directory available")
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `StoreConfig::default()`.
pub fn load_config(path: &Path) -> Result<StoreConfig> {
    if !path.exists() {
        let cfg = StoreConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: StoreConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &StoreConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
