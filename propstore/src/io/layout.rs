//! Installation layout backed by [`LayoutConfig`].

use crate::core::static_table::{LibraryInfo, LocationKind};

use super::config::LayoutConfig;

pub const SYSROOT_VAR: &str = "${sysroot}";
pub const PREFIX_VAR: &str = "${prefix}";
pub const HOST_PREFIX_VAR: &str = "${host_prefix}";

/// [`LibraryInfo`] provider reading templates from config.
///
/// Raw locations are the templates verbatim. Expanded locations substitute
/// `${sysroot}`, `${prefix}` and `${host_prefix}`, prepend the sysroot to
/// target paths that do not already reference it, and normalize the result
/// lexically.
#[derive(Debug, Clone)]
pub struct ConfiguredLayout {
    config: LayoutConfig,
}

impl ConfiguredLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    fn template(&self, kind: LocationKind) -> &str {
        let cfg = &self.config;
        match kind {
            LocationKind::Sysroot => &cfg.sysroot,
            LocationKind::Prefix => &cfg.prefix,
            LocationKind::Data => &cfg.data,
            LocationKind::Docs => &cfg.docs,
            LocationKind::Headers => &cfg.headers,
            LocationKind::Libs => &cfg.libs,
            LocationKind::Binaries => &cfg.binaries,
            LocationKind::Tests => &cfg.tests,
            LocationKind::Plugins => &cfg.plugins,
            LocationKind::Imports => &cfg.imports,
            LocationKind::Translations => &cfg.translations,
            LocationKind::Settings => &cfg.settings,
            LocationKind::Examples => &cfg.examples,
            LocationKind::HostPrefix => &cfg.host_prefix,
            LocationKind::HostData => &cfg.host_data,
            LocationKind::HostBinaries => &cfg.host_binaries,
        }
    }

    /// Replace `${host_prefix}` and `${prefix}`, leaving `${sysroot}` in place.
    fn substitute(&self, template: &str) -> String {
        let prefix = &self.config.prefix;
        let host_prefix = self.config.host_prefix.replace(PREFIX_VAR, prefix);
        template
            .replace(HOST_PREFIX_VAR, &host_prefix)
            .replace(PREFIX_VAR, prefix)
    }
}

impl LibraryInfo for ConfiguredLayout {
    fn location(&self, kind: LocationKind) -> String {
        let sysroot = &self.config.sysroot;
        if kind == LocationKind::Sysroot {
            return normalize(sysroot);
        }
        let path = self.substitute(self.template(kind));
        let explicit_sysroot = path.contains(SYSROOT_VAR);
        let path = path.replace(SYSROOT_VAR, sysroot);
        if kind.is_host() || explicit_sysroot || sysroot.is_empty() {
            return normalize(&path);
        }
        normalize(&format!("{sysroot}/{path}"))
    }

    fn raw_location(&self, kind: LocationKind) -> String {
        self.template(kind).to_string()
    }
}

/// Collapse repeated separators, `.` and `..` without touching the filesystem.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
