//! Versioned property store CLI.
//!
//! Persisted properties live in a TOML settings file grouped by tool version.
//! Queries for a property missing under the current version fall back to the
//! newest older version that defines it.

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use propstore::core::types::{Mode, Request};
use propstore::exec::{exec, render};
use propstore::exit_codes;
use propstore::io::config::{config_path, load_config};
use propstore::logging;
use propstore::store::{BUILD_TOOL_VERSION, open_from_config};

#[derive(Parser)]
#[command(
    name = "propstore",
    version,
    about = "Versioned property store for build configuration"
)]
struct Cli {
    /// Config file (default: `$PROPSTORE_CONFIG`, then the user config directory).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Settings file holding persisted properties (overrides the config).
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the named properties, or every property when none are given.
    Query { names: Vec<String> },
    /// Persist `NAME VALUE` pairs for the current version.
    Set {
        #[arg(value_name = "NAME VALUE", allow_hyphen_values = true)]
        pairs: Vec<String>,
    },
    /// Remove properties from the current version.
    Unset {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

impl Command {
    fn into_request(self) -> Request {
        match self {
            Command::Query { names } => Request::new(Mode::Query, names),
            Command::Set { pairs } => Request::new(Mode::Set, pairs),
            Command::Unset { names } => Request::new(Mode::Unset, names),
        }
    }
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(true) => exit_codes::OK,
        Ok(false) => exit_codes::FAILED,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    process::exit(code);
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    let path = config_path(cli.config.as_deref())?;
    let mut cfg = load_config(&path)?;
    if let Some(settings) = cli.settings {
        cfg.settings_path = Some(settings);
    }

    let mut store = open_from_config(&cfg, BUILD_TOOL_VERSION)?;
    let report = exec(&mut store, &cli.command.into_request())?;
    render(&report, &mut io::stdout().lock()).context("write report")?;
    Ok(report.success)
}
