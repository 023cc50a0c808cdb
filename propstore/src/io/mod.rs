//! I/O adapters for the property store.

pub mod backend;
pub mod config;
pub mod layout;
pub mod settings_file;
