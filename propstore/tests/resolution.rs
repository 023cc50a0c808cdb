//! Value resolution scenarios: static precedence, version fallback and
//! explicit version addressing.

use propstore::core::types::{Mode, Request};
use propstore::exec::exec;
use propstore::store::{SPEC_PATHS, TOOL_VERSION};
use propstore::test_support::{MemoryBackend, memory_store};

fn versioned_x() -> MemoryBackend {
    MemoryBackend::new()
        .with_property("1.0", "X", "a")
        .with_property("1.5", "X", "b")
}

#[test]
fn static_entries_shadow_persisted_values() {
    let backend = MemoryBackend::new().with_property("2.0", "INSTALL_LIBS", "persisted");
    let mut store = memory_store(backend, "2.0");

    let names: Vec<String> = store
        .static_table()
        .entries()
        .map(|(name, _)| name.to_string())
        .collect();
    for name in names {
        let expected = store
            .static_table()
            .lookup(&name)
            .expect("static entry")
            .to_string();
        assert_eq!(store.value(&name).expect("value"), expected);
    }
    assert_eq!(store.value("INSTALL_LIBS").expect("value"), "/expanded/Libs");
}

#[test]
fn reserved_names_are_not_overridable() {
    let backend = MemoryBackend::new()
        .with_property("2.0", TOOL_VERSION, "persisted")
        .with_property("2.0", SPEC_PATHS, "persisted");
    let mut store = memory_store(backend, "2.0");

    assert_eq!(store.value(TOOL_VERSION).expect("value"), "2.0");
    assert_eq!(store.value(SPEC_PATHS).expect("value"), "/specs/a:/specs/b");
}

#[test]
fn set_then_read_returns_value() {
    let mut store = memory_store(MemoryBackend::new(), "2.0");
    store.set_value("A", "some value").expect("set");
    assert_eq!(store.value("A").expect("value"), "some value");
    store.set_value("A", "other").expect("overwrite");
    assert_eq!(store.value("A").expect("value"), "other");
}

#[test]
fn fallback_picks_closest_older_version() {
    let mut store = memory_store(versioned_x(), "2.0");
    assert_eq!(store.value("X").expect("value"), "b");
}

#[test]
fn fallback_skips_newer_versions() {
    let mut store = memory_store(versioned_x(), "1.2");
    assert_eq!(store.value("X").expect("value"), "a");
}

#[test]
fn fallback_finds_nothing_older_than_every_group() {
    let mut store = memory_store(versioned_x(), "0.9");
    assert!(!store.has_value("X").expect("has"));
    assert_eq!(store.value("X").expect("value"), "");
}

#[test]
fn current_version_wins_over_older_versions() {
    let backend = versioned_x().with_property("2.0", "X", "c");
    let mut store = memory_store(backend, "2.0");
    assert_eq!(store.value("X").expect("value"), "c");
}

#[test]
fn explicit_version_reads_its_group_directly() {
    let backend = versioned_x().with_property("2.0", "X", "c");
    let mut store = memory_store(backend, "2.0");
    assert_eq!(store.value("1.0/X").expect("value"), "a");
    assert_eq!(store.value("1.5/X").expect("value"), "b");
}

#[test]
fn explicit_version_falls_back_to_older_groups_only() {
    let backend = MemoryBackend::new()
        .with_property("0.5", "X", "old")
        .with_property("1.5", "X", "b")
        .with_property("2.0", "X", "c");
    let mut store = memory_store(backend, "2.0");
    assert_eq!(store.value("1.0/X").expect("value"), "old");
    assert!(!store.has_value("0.1/X").expect("has"));
}

#[test]
fn unversioned_group_is_never_a_fallback() {
    let backend = MemoryBackend::new().with_property("", "X", "plain");
    let mut store = memory_store(backend, "2.0");
    assert!(!store.has_value("X").expect("has"));
    assert_eq!(store.value("/X").expect("value"), "plain");
}

#[test]
fn remove_clears_current_version() {
    let mut store = memory_store(MemoryBackend::new(), "2.0");
    store.set_value("A", "1").expect("set");
    store.remove("A").expect("remove");
    assert!(!store.has_value("A").expect("has"));
}

#[test]
fn remove_only_touches_current_version() {
    let backend = MemoryBackend::new().with_property("1.0", "A", "old");
    let mut store = memory_store(backend, "2.0");
    store.set_value("A", "new").expect("set");
    store.remove("A").expect("remove");
    assert_eq!(store.value("A").expect("value"), "old");
}

#[test]
fn hidden_names_are_never_persisted() {
    let backend = MemoryBackend::new();
    let mut store = memory_store(backend.clone(), "2.0");
    store.set_value(".internal", "x").expect("set");
    assert!(!store.has_value(".internal").expect("has"));
    assert_eq!(backend.get("2.0", ".internal"), None);
}

#[test]
fn unpaired_set_applies_earlier_pairs_and_fails() {
    let mut store = memory_store(MemoryBackend::new(), "2.0");
    let request = Request::new(
        Mode::Set,
        vec!["A".to_string(), "1".to_string(), "B".to_string()],
    );

    let report = exec(&mut store, &request).expect("exec");
    assert!(!report.success);
    assert_eq!(store.value("A").expect("value"), "1");
    assert!(!store.has_value("B").expect("has"));
}

#[test]
fn dump_of_empty_backend_lists_computed_properties_only() {
    let mut store = memory_store(MemoryBackend::new(), "2.0");
    let expected = store.static_table().len() + store.reserved_names().len();

    let report = exec(&mut store, &Request::new(Mode::Query, Vec::new())).expect("exec");
    assert!(report.success);
    assert_eq!(report.lines.len(), expected);
    let rendered: Vec<String> = report.lines.iter().map(|line| line.render()).collect();
    assert_eq!(rendered.first().map(String::as_str), Some("SYSROOT:${prefix}/Sysroot"));
    assert!(rendered.contains(&"SPEC_PATHS:/specs/a:/specs/b".to_string()));
    assert_eq!(rendered.last().map(String::as_str), Some("TOOL_VERSION:2.0"));
}
