//! Persistent, versioned property store for build configuration.
//!
//! Properties are named strings. Persisted ones live in version groups keyed by
//! the tool version that wrote them; a lookup that misses the current version
//! falls back to the closest older version that defines the name. The
//! architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (key parsing, fallback ordering,
//!   the static property table, request/report types). No I/O.
//! - **[`io`]**: Side-effecting adapters (settings file backend, TOML config,
//!   installation layout).
//!
//! [`store`] implements value resolution and mutations on top of both, and
//! [`exec`] dispatches `query`/`set`/`unset` requests.

pub mod core;
pub mod exec;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
