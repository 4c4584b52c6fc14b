// tests/overrides.rs
// Override file loading and record patching.

use std::fs;

use tba_typegen::overrides::Overrides;
use tba_typegen::records::{ClassRecord, MemberRecord, ParamRecord};

fn record() -> ClassRecord {
    ClassRecord {
        name: "Dir".into(),
        parent: Some("QObject".into()),
        slots: vec![MemberRecord {
            name: "rename".into(),
            ty: "bool".into(),
            params: vec![ParamRecord {
                name: "from".into(),
                ty: "QString".into(),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn load(json: &str) -> Overrides {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overrides.json");
    fs::write(&path, json).unwrap();
    Overrides::load(&path).unwrap()
}

#[test]
fn missing_file_patches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let overrides = Overrides::load(&dir.path().join("overrides.json")).unwrap();
    let mut rec = record();
    assert!(overrides.apply(&mut rec));
    assert_eq!(rec.slots[0].ty, "bool");
}

#[test]
fn skip_marks_the_class_dropped() {
    let overrides = load(r#"{ "Dir": { "skip": true } }"#);
    let mut rec = record();
    assert!(!overrides.apply(&mut rec));
}

#[test]
fn class_fields_are_overwritten() {
    let overrides = load(
        r#"{ "Dir": {
            "desc": "Filesystem directory.",
            "parent": "",
            "is_static": true
        } }"#,
    );
    let mut rec = record();
    assert!(overrides.apply(&mut rec));
    assert_eq!(rec.desc, "Filesystem directory.");
    assert_eq!(rec.parent, None);
    assert!(rec.is_static);
}

#[test]
fn slot_patch_and_param_merge_by_name() {
    let overrides = load(
        r#"{ "Dir": { "slots": { "rename": {
            "type": "boolean",
            "invalid": true,
            "merge_params": [
                { "name": "from", "type": "String", "desc": "Old name." },
                { "name": "nosuch", "type": "int" }
            ]
        } } } }"#,
    );
    let mut rec = record();
    assert!(overrides.apply(&mut rec));
    let slot = &rec.slots[0];
    assert_eq!(slot.ty, "boolean");
    assert!(slot.invalid);
    assert_eq!(slot.params.len(), 1);
    assert_eq!(slot.params[0].ty, "String");
    assert_eq!(slot.params[0].desc, "Old name.");
}

#[test]
fn full_param_replacement() {
    let overrides = load(
        r#"{ "Dir": { "slots": { "rename": {
            "params": [
                { "name": "oldPath", "type": "String" },
                { "name": "newPath", "type": "String" }
            ]
        } } } }"#,
    );
    let mut rec = record();
    assert!(overrides.apply(&mut rec));
    let names: Vec<&str> = rec.slots[0].params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["oldPath", "newPath"]);
}

#[test]
fn synthetic_slots_are_appended() {
    let overrides = load(
        r#"{ "Dir": { "add_slots": [
            { "name": "exists", "type": "bool" }
        ] } }"#,
    );
    let mut rec = record();
    assert!(overrides.apply(&mut rec));
    assert_eq!(rec.slots.len(), 2);
    assert_eq!(rec.slots[1].name, "exists");
    assert_eq!(rec.slots[1].ty, "bool");
}

#[test]
fn unrelated_classes_stay_untouched() {
    let overrides = load(r#"{ "Other": { "skip": true } }"#);
    let mut rec = record();
    assert!(overrides.apply(&mut rec));
    assert_eq!(rec.slots[0].ty, "bool");
}

#[test]
fn malformed_override_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overrides.json");
    fs::write(&path, r#"{ "Dir": { "unknown_key": 1 } }"#).unwrap();
    assert!(Overrides::load(&path).is_err());
}
