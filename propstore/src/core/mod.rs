//! Deterministic, pure logic shared by the property store.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod fallback;
pub mod key;
pub mod static_table;
pub mod types;
