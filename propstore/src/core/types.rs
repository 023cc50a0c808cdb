//! Shared deterministic types for property commands.
//!
//! These types define the contract between the dispatcher and its callers:
//! what was requested, and what should be reported back.

/// Property command selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print requested properties, or every known property when none are named.
    Query,
    /// Persist `(name, value)` pairs under the current version.
    Set,
    /// Remove names from the current version.
    Unset,
}

/// A single dispatcher invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub mode: Mode,
    /// Names for query/unset; a flat `name, value, name, value, ...` list for set.
    pub properties: Vec<String>,
}

impl Request {
    pub fn new(mode: Mode, properties: Vec<String>) -> Self {
        Self { mode, properties }
    }
}

/// Marker printed for names that do not resolve.
pub const UNKNOWN_MARKER: &str = "**Unknown**";

/// One line of dispatcher output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// `name:value`
    Property { name: String, value: String },
    /// A bare value, used when exactly one name was queried.
    Value(String),
    /// `**Unknown**`, prefixed with `name:` when several names were queried.
    Unknown { name: Option<String> },
}

impl ReportLine {
    pub fn render(&self) -> String {
        match self {
            ReportLine::Property { name, value } => format!("{name}:{value}"),
            ReportLine::Value(value) => value.clone(),
            ReportLine::Unknown { name: Some(name) } => format!("{name}:{UNKNOWN_MARKER}"),
            ReportLine::Unknown { name: None } => UNKNOWN_MARKER.to_string(),
        }
    }
}

/// Outcome of a dispatcher invocation.
///
/// `success` is false when a queried name was unknown or a set list had an
/// unpaired trailing name. Lines are recorded in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecReport {
    pub lines: Vec<ReportLine>,
    pub success: bool,
}
