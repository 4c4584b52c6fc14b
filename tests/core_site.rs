// tests/core_site.rs
// Doxygen-site extraction, offline against captured-markup fixtures.

use tba_typegen::params::Host;
use tba_typegen::scrape::CoreClassIter;
use tba_typegen::source::MemSource;
use tba_typegen::specs::class_page::parse_class_page;

const BASE: &str = "https://docs.toonboom.com/help/harmony-21/scripting/script";

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<html><body><div class="header"><div class="title">{title}</div></div>
<div class="contents">{body}</div></body></html>"#
    )
}

fn hierarchy_js() -> &'static str {
    r#"var hierarchy =
[
  ["Base", "classBase.html", [
    ["Child", "classChild.html", null],
    ["Dup", "classDup.html", null]
  ]],
  ["Dup", "classDup.html", null],
  ["ns::Inner", "classns_1_1Inner.html", null],
  ["Broken", "classBroken.html", [
    ["BrokenChild", "classBrokenChild.html", null]
  ]],
  ["NoPage", null, [
    ["GrandChild", "classGrandChild.html", null]
  ]]
];"#
}

fn seeded_source() -> MemSource {
    let mut src = MemSource::new();
    src.insert(&format!("{BASE}/hierarchy.js"), hierarchy_js());
    src.insert(
        &format!("{BASE}/namespaces_dup.js"),
        r#"var namespaces_dup = [ ["scene", "namespacescene.html", null] ];"#,
    );
    src.insert(
        &format!("{BASE}/classBase.html"),
        &page(
            "Base Class Reference",
            r#"<a id="details"></a>
<div class="textblock"><p>Base class for things.</p></div>
<div class="memitem">
<div class="memproto"><table class="memname">
<tr><td class="memname">QString name</td><td>(</td></tr>
<tr><td class="paramtype">int&#160;</td><td class="paramname"><em>idx</em></td></tr>
</table></div>
<div class="memdoc"><p>Returns the name at an index.</p>
<table class="params"><tr><td>idx</td><td>: the index</td></tr></table>
</div></div>"#,
        ),
    );
    src.insert(
        &format!("{BASE}/classChild.html"),
        &page("Child Class Reference", ""),
    );
    src.insert(
        &format!("{BASE}/classDup.html"),
        &page("Dup Class Reference", ""),
    );
    src.insert(
        &format!("{BASE}/classBrokenChild.html"),
        &page("BrokenChild Class Reference", ""),
    );
    src.insert(
        &format!("{BASE}/classGrandChild.html"),
        &page("GrandChild Class Reference", ""),
    );
    src.insert(
        &format!("{BASE}/namespacescene.html"),
        &page("scene Namespace Reference", ""),
    );
    src
}

#[test]
fn walk_order_dedup_and_parent_propagation() {
    let mut src = seeded_source();
    let iter = CoreClassIter::new(Host::Harmony, 21, &mut src).unwrap();
    let records: Vec<_> = iter.collect();

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    // Dup yields once (first occurrence), ns::Inner never, Broken loses its
    // own record to the dead link but BrokenChild survives, NoPage has no
    // page but still forwards its name as parent, scene comes from the
    // namespace index.
    assert_eq!(
        names,
        ["Base", "Child", "Dup", "BrokenChild", "GrandChild", "scene"]
    );

    let parents: Vec<Option<&str>> = records.iter().map(|r| r.parent.as_deref()).collect();
    assert_eq!(
        parents,
        [
            None,
            Some("Base"),
            Some("Base"),
            Some("Broken"),
            Some("NoPage"),
            None
        ]
    );

    assert!(records[5].is_namespace);
    assert_eq!(
        records[0].url.as_deref(),
        Some(format!("{BASE}/classBase.html").as_str())
    );
}

#[test]
fn dedup_keys_on_the_page_title_not_the_node_label() {
    let mut src = MemSource::new();
    src.insert(
        &format!("{BASE}/hierarchy.js"),
        r#"var hierarchy =
[
  ["Base", "classBase.html", null],
  ["BaseAlias", "classBaseAlias.html", null]
];"#,
    );
    src.insert(
        &format!("{BASE}/namespaces_dup.js"),
        "var namespaces_dup = [];",
    );
    src.insert(
        &format!("{BASE}/classBase.html"),
        &page("Base Class Reference", ""),
    );
    // the alias entry links a page documenting a class already seen
    src.insert(
        &format!("{BASE}/classBaseAlias.html"),
        &page("Base Class Reference", ""),
    );

    let iter = CoreClassIter::new(Host::Harmony, 21, &mut src).unwrap();
    let names: Vec<String> = iter.map(|r| r.name).collect();
    assert_eq!(names, ["Base"]);
}

#[test]
fn class_page_members_and_param_docs() {
    let mut src = seeded_source();
    let iter = CoreClassIter::new(Host::Harmony, 21, &mut src).unwrap();
    let base = iter.into_iter().next().unwrap();

    assert_eq!(base.desc, "Base class for things.");
    assert_eq!(base.slots.len(), 1);
    let slot = &base.slots[0];
    assert_eq!(slot.name, "name");
    assert_eq!(slot.ty, "QString");
    assert_eq!(slot.desc, "Returns the name at an index.");
    assert_eq!(slot.params.len(), 1);
    assert_eq!(slot.params[0].name, "idx");
    assert_eq!(slot.params[0].ty, "int");
    assert_eq!(slot.params[0].desc, "the index");
}

#[test]
fn missing_hierarchy_index_is_fatal() {
    let mut src = MemSource::new();
    assert!(CoreClassIter::new(Host::Harmony, 21, &mut src).is_err());
}

#[test]
fn member_labels_pick_the_member_category() {
    let html = page(
        "Mixed Class Reference",
        r#"<div class="memitem"><div class="memproto"><span class="mlabel">read</span>
<table class="memname"><tr><td class="memname">int count</td></tr></table></div>
<div class="memdoc"><p>Number of items.</p></div></div>
<div class="memitem"><div class="memproto"><span class="mlabel">signal</span>
<table class="memname"><tr><td class="memname">void changed</td></tr></table></div></div>
<div class="memitem"><div class="memproto">
<table class="memname"><tr><td class="memname">enum ColorType</td></tr></table></div>
<div class="memdoc"><table class="fieldtable">
<tr><td class="fieldname">RED</td><td class="fielddoc">red</td></tr>
<tr><td class="fieldname">GREEN</td><td class="fielddoc">green</td></tr>
</table></div></div>
<div class="memitem"><div class="memproto"><span class="mlabel">friend</span>
<table class="memname"><tr><td class="memname">class QColor</td></tr></table></div></div>
<div class="memitem"><div class="memproto"><span class="mlabel">static</span>
<table class="memname"><tr><td class="memname">static QString temp</td></tr></table></div></div>"#,
    );
    let rec = parse_class_page(&html).unwrap();

    assert_eq!(rec.props.len(), 1);
    assert_eq!(rec.props[0].name, "count");
    assert_eq!(rec.props[0].ty, "int");

    assert_eq!(rec.signals.len(), 1);
    assert_eq!(rec.signals[0].name, "changed");

    assert_eq!(rec.enums.len(), 1);
    assert_eq!(rec.enums[0].name, "ColorType");
    assert_eq!(rec.enums[0].fields, ["RED", "GREEN"]);

    // friend dropped; the static slot is the only slot
    assert_eq!(rec.slots.len(), 1);
    assert_eq!(rec.slots[0].name, "temp");
    assert_eq!(rec.slots[0].keyword.as_deref(), Some("static"));
    assert_eq!(rec.slots[0].ty, "QString");
}

#[test]
fn unrecognized_member_labels_abort_the_page() {
    let html = page(
        "Odd Class Reference",
        r#"<div class="memitem"><div class="memproto"><span class="mlabel">banana</span>
<table class="memname"><tr><td class="memname">int x</td></tr></table></div></div>"#,
    );
    assert!(parse_class_page(&html).is_err());
}

#[test]
fn embedded_name_in_type_is_split_off() {
    let html = page(
        "Leaky Class Reference",
        r#"<div class="memitem"><div class="memproto">
<table class="memname"><tr><td class="memname">QString text someText</td></tr></table>
</div></div>"#,
    );
    let rec = parse_class_page(&html).unwrap();
    assert_eq!(rec.slots[0].ty, "QString");
    assert_eq!(rec.slots[0].name, "text");
}

#[test]
fn unsplittable_type_text_aborts_the_page() {
    let html = page(
        "Hopeless Class Reference",
        r#"<div class="memitem"><div class="memproto">
<table class="memname"><tr><td class="memname">const unsigned int x</td></tr></table>
</div></div>"#,
    );
    assert!(parse_class_page(&html).is_err());
}

#[test]
fn signature_cleanup_rules() {
    let html = page(
        "Cleanup Class Reference",
        r#"<div class="memitem"><div class="memproto">
<table class="memname"><tr><td class="memname">Q_INVOKABLE bool isValid</td></tr></table>
</div></div>
<div class="memitem"><div class="memproto">
<table class="memname"><tr><td class="memname">QString PaletteObjectManager::getPalette</td></tr></table>
</div></div>
<div class="memitem"><div class="memproto">
<table class="memname"><tr><td class="memname">reload</td></tr></table>
</div></div>
<div class="memitem"><div class="memproto">
<table class="memname"><tr><td class="memname">virtual int rowCount</td></tr></table>
</div></div>"#,
    );
    let rec = parse_class_page(&html).unwrap();
    let slots = &rec.slots;
    assert_eq!(slots[0].name, "isValid");
    assert_eq!(slots[0].ty, "bool");
    assert_eq!(slots[1].name, "getPalette");
    assert_eq!(slots[1].ty, "QString");
    // no return type text at all means void
    assert_eq!(slots[2].name, "reload");
    assert_eq!(slots[2].ty, "void");
    assert_eq!(slots[3].name, "rowCount");
    assert_eq!(slots[3].ty, "int");
    assert_eq!(slots[3].keyword.as_deref(), Some("virtual"));
}

#[test]
fn parameter_defaults_come_from_the_equals_tail() {
    let html = page(
        "Defaults Class Reference",
        r#"<div class="memitem"><div class="memproto"><table class="memname">
<tr><td class="memname">void open</td><td>(</td></tr>
<tr><td class="paramtype">QString&#160;</td><td class="paramname"><em>path</em>,</td></tr>
<tr><td class="paramtype">QScriptValue&#160;</td><td class="paramname"><em>opts</em> = QScriptValue(),</td></tr>
</table></div></div>"#,
    );
    let rec = parse_class_page(&html).unwrap();
    let params = &rec.slots[0].params;
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "path");
    assert_eq!(params[0].default, None);
    assert_eq!(params[1].name, "opts");
    assert_eq!(params[1].default.as_deref(), Some("QScriptValue()"));
}

#[test]
fn details_example_listing_keeps_its_lines() {
    let html = page(
        "Scripted Class Reference",
        r#"<a id="details"></a>
<div class="textblock"><p>Runs scripts.</p>
<div class="fragment">
<div class="line">var x = scene.currentFrame();</div>
<div class="line">MessageLog.trace(x);</div>
</div></div>"#,
    );
    let rec = parse_class_page(&html).unwrap();
    assert_eq!(
        rec.example.as_deref(),
        Some("var x = scene.currentFrame();\nMessageLog.trace(x);")
    );
}
