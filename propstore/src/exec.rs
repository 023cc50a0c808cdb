//! Command dispatch for `propstore query|set|unset`.
//!
//! [`exec`] decides what to report; [`render`] writes it out. Keeping the two
//! apart lets tests inspect a report without capturing stdout.

use std::io::{self, Write};

use anyhow::Result;
use tracing::debug;

use crate::core::types::{ExecReport, Mode, ReportLine, Request};
use crate::io::backend::BackendSource;
use crate::store::PropertyStore;

/// Run one request against `store`.
///
/// Unknown names and unpaired set arguments yield `success = false`; backend
/// failures are returned as errors.
pub fn exec<S: BackendSource>(
    store: &mut PropertyStore<S>,
    request: &Request,
) -> Result<ExecReport> {
    debug!(mode = ?request.mode, count = request.properties.len(), "exec");
    match request.mode {
        Mode::Query if request.properties.is_empty() => dump_all(store),
        Mode::Query => query(store, &request.properties),
        Mode::Set => set(store, &request.properties),
        Mode::Unset => unset(store, &request.properties),
    }
}

/// Write one line per report entry.
pub fn render<W: Write>(report: &ExecReport, out: &mut W) -> io::Result<()> {
    for line in &report.lines {
        writeln!(out, "{}", line.render())?;
    }
    out.flush()
}

fn dump_all<S: BackendSource>(store: &mut PropertyStore<S>) -> Result<ExecReport> {
    let mut lines = Vec::new();
    for entry in store.persisted_entries()? {
        let name = if entry.version == store.tool_version() {
            entry.name
        } else {
            format!("{}/{}", entry.version, entry.name)
        };
        lines.push(ReportLine::Property {
            name,
            value: entry.value,
        });
    }

    let mut computed: Vec<String> = store
        .static_table()
        .entries()
        .map(|(name, _)| name.to_string())
        .collect();
    computed.extend(store.reserved_names().into_iter().map(str::to_string));
    for name in computed {
        let value = store.value(&name)?;
        lines.push(ReportLine::Property { name, value });
    }

    Ok(ExecReport {
        lines,
        success: true,
    })
}

fn query<S: BackendSource>(store: &mut PropertyStore<S>, names: &[String]) -> Result<ExecReport> {
    let labelled = names.len() > 1;
    let mut report = ExecReport {
        lines: Vec::with_capacity(names.len()),
        success: true,
    };
    for name in names {
        if !store.has_value(name)? {
            report.success = false;
            report.lines.push(ReportLine::Unknown {
                name: labelled.then(|| name.clone()),
            });
            continue;
        }
        let value = store.value(name)?;
        let line = if labelled {
            ReportLine::Property {
                name: name.clone(),
                value,
            }
        } else {
            ReportLine::Value(value)
        };
        report.lines.push(line);
    }
    Ok(report)
}

/// Apply `name, value` pairs in order. An unpaired trailing name fails the
/// request; earlier pairs stay applied.
fn set<S: BackendSource>(store: &mut PropertyStore<S>, args: &[String]) -> Result<ExecReport> {
    for pair in args.chunks(2) {
        match pair {
            [name, value] => store.set_value(name, value)?,
            _ => {
                debug!(property = ?pair.first(), "set: missing value");
                return Ok(ExecReport {
                    lines: Vec::new(),
                    success: false,
                });
            }
        }
    }
    Ok(ExecReport {
        lines: Vec::new(),
        success: true,
    })
}

fn unset<S: BackendSource>(store: &mut PropertyStore<S>, names: &[String]) -> Result<ExecReport> {
    for name in names {
        store.remove(name)?;
    }
    Ok(ExecReport {
        lines: Vec::new(),
        success: true,
    })
}
