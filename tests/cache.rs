// tests/cache.rs
// On-disk HTML cache behavior.

use std::fs;

use tba_typegen::core::cache::{cache_key, HtmlCache};

#[test]
fn key_is_last_five_path_segments() {
    assert_eq!(
        cache_key("https://docs.toonboom.com/help/harmony-21/scripting/script/hierarchy.js"),
        "help_harmony-21_scripting_script_hierarchy.js"
    );
    assert_eq!(cache_key("a/b"), "a_b");
}

#[test]
fn store_then_lookup_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let cache = HtmlCache::new(dir.path()).unwrap();
    let url = "https://docs.toonboom.com/help/harmony-21/scripting/script/classBase.html";

    assert!(cache.lookup(url).is_none());
    cache.store(url, "<html>cached</html>");
    assert_eq!(cache.lookup(url).as_deref(), Some("<html>cached</html>"));
}

#[test]
fn legacy_suffixed_entries_are_still_read() {
    let dir = tempfile::tempdir().unwrap();
    let cache = HtmlCache::new(dir.path()).unwrap();
    let url = "https://docs.toonboom.com/help/harmony-21/scripting/script/classOld.html";

    let legacy = dir.path().join(format!("{}.html", cache_key(url)));
    fs::write(legacy, "legacy body").unwrap();
    assert_eq!(cache.lookup(url).as_deref(), Some("legacy body"));
}
