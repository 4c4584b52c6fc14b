// tests/runner_e2e.rs
// Full pipeline offline: seed an in-memory source for a few versions, run the
// batch, then check which files exist and which fragments each one carries.

use std::fs;

use tba_typegen::params::{Host, Params};
use tba_typegen::runner::run_with;
use tba_typegen::source::MemSource;

fn class_page(title: &str) -> String {
    format!(
        r#"<html><body><div class="header"><div class="title">{title}</div></div>
<div class="contents"><a id="details"></a>
<div class="textblock"><p>Does things.</p></div></div></body></html>"#
    )
}

fn harmony_base(version: u32) -> String {
    format!("https://docs.toonboom.com/help/harmony-{version}/scripting/script")
}

fn seed_core(src: &mut MemSource, base: &str, class: &str) {
    src.insert(
        &format!("{base}/hierarchy.js"),
        &format!(r#"var hierarchy = [ ["{class}", "class{class}.html", null] ];"#),
    );
    src.insert(
        &format!("{base}/namespaces_dup.js"),
        "var namespaces_dup = [];",
    );
    src.insert(
        &format!("{base}/class{class}.html"),
        &class_page(&format!("{class} Class Reference")),
    );
}

#[test]
fn batch_outlives_failures_and_gates_fragments_by_version() {
    let out = tempfile::tempdir().unwrap();
    let ovr = tempfile::tempdir().unwrap();
    fs::write(ovr.path().join("preamble.ts"), "// shared preamble\n").unwrap();
    fs::write(
        ovr.path().join("preamble_harmony16up.ts"),
        "// harmony 16+ additions\n",
    )
    .unwrap();
    fs::write(ovr.path().join("preamble_sbpro.ts"), "// sbpro additions\n").unwrap();
    fs::write(ovr.path().join("harmony_post.ts"), "// harmony postscript\n").unwrap();

    let mut src = MemSource::new();
    // harmony-15 succeeds with one class; extended docs do not exist below 16
    seed_core(&mut src, &harmony_base(15), "Scene");
    // harmony-21 succeeds empty, with an extended index listing nothing
    src.insert(
        &format!("{}/hierarchy.js", harmony_base(21)),
        "var hierarchy = [];",
    );
    src.insert(
        &format!("{}/namespaces_dup.js", harmony_base(21)),
        "var namespaces_dup = [];",
    );
    src.insert(
        "https://docs.toonboom.com/help/harmony-21/scripting/extended/index.html",
        "<html><body><nav><h3>Classes</h3><ul></ul></nav></body></html>",
    );
    // storyboard-pro 22 succeeds with one class
    let sb_base = "https://docs.toonboom.com/help/storyboard-pro-22/storyboard/scripting/reference";
    src.insert(
        &format!("{sb_base}/hierarchy.js"),
        r#"var hierarchy = [ ["Panel", "classPanel.html", null] ];"#,
    );
    src.insert(
        &format!("{sb_base}/classPanel.html"),
        &class_page("Panel Class Reference"),
    );
    // every other version has no hierarchy index at all and fails

    let mut params = Params::new();
    params.out_dir = out.path().to_string_lossy().into_owned();
    params.override_dir = ovr.path().to_string_lossy().into_owned();

    let summary = run_with(&params, &mut src, None).unwrap();
    let written: Vec<String> = summary
        .files_written
        .iter()
        .map(|p| {
            p.strip_prefix(out.path())
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(
        written,
        [
            "harmony/15/index.d.ts",
            "harmony/21/index.d.ts",
            "storyboard-pro/22/index.d.ts"
        ]
    );

    // failed versions leave no file behind
    assert!(!out.path().join("harmony/17/index.d.ts").exists());
    assert!(!out.path().join("storyboard-pro/6/index.d.ts").exists());

    let h15 = fs::read_to_string(out.path().join("harmony/15/index.d.ts")).unwrap();
    assert!(h15.contains("// shared preamble"));
    assert!(!h15.contains("// harmony 16+ additions"));
    assert!(!h15.contains("// sbpro additions"));
    assert!(h15.contains("// harmony postscript"));
    assert!(h15.contains("declare class Scene {"));

    let h21 = fs::read_to_string(out.path().join("harmony/21/index.d.ts")).unwrap();
    assert!(h21.contains("// shared preamble"));
    assert!(h21.contains("// harmony 16+ additions"));
    assert!(!h21.contains("// sbpro additions"));
    assert!(h21.contains("// harmony postscript"));

    let sb = fs::read_to_string(out.path().join("storyboard-pro/22/index.d.ts")).unwrap();
    assert!(sb.contains("// shared preamble"));
    assert!(!sb.contains("// harmony 16+ additions"));
    assert!(sb.contains("// sbpro additions"));
    assert!(!sb.contains("// harmony postscript"));
    assert!(sb.contains("declare class Panel {"));
}

#[test]
fn aborted_version_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    let ovr = tempfile::tempdir().unwrap();

    let mut src = MemSource::new();
    seed_core(&mut src, &harmony_base(16), "Scene");
    // the strict extended walk hits a page without a title after the core
    // classes were already buffered
    src.insert(
        "https://docs.toonboom.com/help/harmony-16/scripting/extended/index.html",
        r#"<html><body><nav><h3>Classes</h3>
<ul><li><a href="Bad.html">Bad</a></li></ul></nav></body></html>"#,
    );
    src.insert(
        "https://docs.toonboom.com/help/harmony-16/scripting/extended/Bad.html",
        "<html><body><article></article></body></html>",
    );

    let mut params = Params::new();
    params.host = Some(Host::Harmony);
    params.version = Some(16);
    params.out_dir = out.path().to_string_lossy().into_owned();
    params.override_dir = ovr.path().to_string_lossy().into_owned();

    // a single requested combination reports its failure as an error
    assert!(run_with(&params, &mut src, None).is_err());
    assert!(!out.path().join("harmony/16/index.d.ts").exists());
}
