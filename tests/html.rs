// tests/html.rs
// The low-level block finders against awkward but real markup shapes.

use tba_typegen::core::html::{has_class, next_block_with_class_ci, next_elem_ci, opener_of};

#[test]
fn close_tag_needs_a_name_boundary() {
    // </pre> must not close a <p> block
    let s = "<p>see <pre>code</pre> done</p><p>next</p>";
    let (bs, be) = next_elem_ci(s, "p", 0).unwrap();
    assert_eq!(&s[bs..be], "<p>see <pre>code</pre> done</p>");
}

#[test]
fn open_tag_needs_a_name_boundary() {
    let s = "<pre>x</pre><p>y</p>";
    let (bs, be) = next_elem_ci(s, "p", 0).unwrap();
    assert_eq!(&s[bs..be], "<p>y</p>");
}

#[test]
fn nested_same_tag_blocks_balance() {
    let s = r#"<div class="outer">a<div>b</div>c</div>"#;
    let (bs, be) = next_elem_ci(s, "div", 0).unwrap();
    assert_eq!(be, s.len());
    assert!(has_class(opener_of(&s[bs..be]), "outer"));
}

#[test]
fn class_qualified_search_reaches_nested_blocks() {
    let s = r#"<div><div class="want">x</div></div>"#;
    let (bs, be) = next_block_with_class_ci(s, "div", "want", 0).unwrap();
    assert_eq!(&s[bs..be], r#"<div class="want">x</div>"#);
}
