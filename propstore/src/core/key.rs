//! Structured property addressing.

/// Marker for names reserved to caller bookkeeping. Such names are never persisted.
pub const HIDDEN_PREFIX: char = '.';

/// A property name split into its optional embedded version and bare name.
///
/// `"1.0/X"` addresses `X` in the `1.0` group; `"X"` addresses `X` in the
/// current version's group. The split happens at the last `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyKey {
    pub version: Option<String>,
    pub name: String,
}

impl PropertyKey {
    pub fn parse(raw: &str) -> Self {
        match raw.rsplit_once('/') {
            Some((version, name)) => Self {
                version: Some(version.to_string()),
                name: name.to_string(),
            },
            None => Self {
                version: None,
                name: raw.to_string(),
            },
        }
    }

    /// Group to consult first: the embedded version, else `current`.
    pub fn group<'a>(&'a self, current: &'a str) -> &'a str {
        self.version.as_deref().unwrap_or(current)
    }
}

/// Returns true for names that must never reach the backend.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX)
}
