//! Well-known computed properties.
//!
//! The table is built once from a [`LibraryInfo`] provider and never changes
//! afterwards. Entries shadow persisted properties of the same name and are not
//! subject to version fallback.

/// Installation location kinds a [`LibraryInfo`] provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    Sysroot,
    Prefix,
    Data,
    Docs,
    Headers,
    Libs,
    Binaries,
    Tests,
    Plugins,
    Imports,
    Translations,
    Settings,
    Examples,
    HostPrefix,
    HostData,
    HostBinaries,
}

impl LocationKind {
    /// Host locations describe the build machine rather than the target.
    pub fn is_host(self) -> bool {
        matches!(
            self,
            LocationKind::HostPrefix | LocationKind::HostData | LocationKind::HostBinaries
        )
    }
}

/// Source of installation locations.
pub trait LibraryInfo {
    /// Location with placeholders substituted and the path normalized.
    fn location(&self, kind: LocationKind) -> String;
    /// Location as configured, placeholders preserved.
    fn raw_location(&self, kind: LocationKind) -> String;
}

/// Whether an entry reports the expanded or the raw location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Expanded,
    Raw,
}

const ENTRIES: &[(&str, LocationKind, Form)] = &[
    ("SYSROOT", LocationKind::Sysroot, Form::Raw),
    ("INSTALL_PREFIX", LocationKind::Prefix, Form::Expanded),
    ("INSTALL_DATA", LocationKind::Data, Form::Expanded),
    ("INSTALL_DOCS", LocationKind::Docs, Form::Expanded),
    ("INSTALL_HEADERS", LocationKind::Headers, Form::Expanded),
    ("INSTALL_LIBS", LocationKind::Libs, Form::Expanded),
    ("INSTALL_BINS", LocationKind::Binaries, Form::Expanded),
    ("INSTALL_TESTS", LocationKind::Tests, Form::Expanded),
    ("INSTALL_PLUGINS", LocationKind::Plugins, Form::Expanded),
    ("INSTALL_IMPORTS", LocationKind::Imports, Form::Expanded),
    ("INSTALL_TRANSLATIONS", LocationKind::Translations, Form::Expanded),
    ("INSTALL_CONFIGURATION", LocationKind::Settings, Form::Expanded),
    ("INSTALL_EXAMPLES", LocationKind::Examples, Form::Expanded),
    // Older name for the examples location.
    ("INSTALL_DEMOS", LocationKind::Examples, Form::Expanded),
    ("RAW_INSTALL_PREFIX", LocationKind::Prefix, Form::Raw),
    ("RAW_INSTALL_DATA", LocationKind::Data, Form::Raw),
    ("RAW_INSTALL_DOCS", LocationKind::Docs, Form::Raw),
    ("RAW_INSTALL_HEADERS", LocationKind::Headers, Form::Raw),
    ("RAW_INSTALL_LIBS", LocationKind::Libs, Form::Raw),
    ("RAW_INSTALL_BINS", LocationKind::Binaries, Form::Raw),
    ("RAW_INSTALL_TESTS", LocationKind::Tests, Form::Raw),
    ("RAW_INSTALL_PLUGINS", LocationKind::Plugins, Form::Raw),
    ("RAW_INSTALL_IMPORTS", LocationKind::Imports, Form::Raw),
    ("RAW_INSTALL_TRANSLATIONS", LocationKind::Translations, Form::Raw),
    ("RAW_INSTALL_CONFIGURATION", LocationKind::Settings, Form::Raw),
    ("RAW_INSTALL_EXAMPLES", LocationKind::Examples, Form::Raw),
    ("HOST_PREFIX", LocationKind::HostPrefix, Form::Raw),
    ("HOST_DATA", LocationKind::HostData, Form::Raw),
    ("HOST_BINS", LocationKind::HostBinaries, Form::Raw),
];

/// Order-preserving `(name, value)` list of computed properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTable {
    entries: Vec<(String, String)>,
}

impl StaticTable {
    pub fn build(info: &dyn LibraryInfo) -> Self {
        let entries = ENTRIES
            .iter()
            .map(|&(name, kind, form)| {
                let value = match form {
                    Form::Expanded => info.location(kind),
                    Form::Raw => info.raw_location(kind),
                };
                (name.to_string(), value)
            })
            .collect();
        Self { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
