// src/specs/class_page.rs
// Core-site (doxygen) per-class page. One page covers a class or namespace:
// title block, optional details/example block, then a flat list of
// <div class="memitem"> members that we categorize by their mlabel spans.

use std::error::Error;

use crate::core::html::{
    inner_after_open_tag, next_block_with_class_ci, next_elem_ci, strip_tags, to_lower,
};
use crate::core::sanitize::{normalize_entities, normalize_ws};
use crate::records::{ClassRecord, EnumRecord, FieldRecord, MemberRecord, ParamRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Group {
    Slots,
    Props,
    Enums,
    Signals,
}

/// Text content of a tag block: tags stripped, then entities decoded (an
/// encoded `&lt;` must never look like a tag opener), whitespace collapsed.
fn text_of(block: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(inner_after_open_tag(block))))
}

pub fn parse_class_page(html: &str) -> Result<ClassRecord, Box<dyn Error>> {
    let (name, is_namespace) = parse_title(html)?;
    if name.is_empty() {
        return Err("class page has an empty title".into());
    }

    let mut rec = ClassRecord {
        name,
        is_namespace,
        ..Default::default()
    };
    let (desc, example) = parse_details(html);
    rec.desc = desc;
    rec.example = example;

    // A page without a contents div documents no members.
    let Some((cs, ce)) = next_block_with_class_ci(html, "div", "contents", 0) else {
        return Ok(rec);
    };
    let contents = &html[cs..ce];

    let mut pos = 0usize;
    while let Some((ms, me)) = next_block_with_class_ci(contents, "div", "memitem", pos) {
        let item = &contents[ms..me];
        pos = me;

        let labels = sniff_labels(item);
        // friend/delete members carry no useful scripting surface
        let Some(group) = group_from_labels(&labels)? else {
            continue;
        };

        if group == Group::Enums {
            if let Some(e) = parse_enum_div(item)? {
                rec.enums.push(e);
            }
            continue;
        }
        let Some(member) = parse_function_div(item)? else {
            continue;
        };
        match group {
            Group::Slots => rec.slots.push(member),
            Group::Props => rec.props.push(member),
            Group::Signals => rec.signals.push(member),
            Group::Enums => unreachable!(),
        }
    }
    Ok(rec)
}

/* ---------- title & details ---------- */

fn parse_title(html: &str) -> Result<(String, bool), Box<dyn Error>> {
    let (ts, te) =
        next_block_with_class_ci(html, "div", "title", 0).ok_or("class page has no title div")?;
    let inner = inner_after_open_tag(&html[ts..te]);

    // first text node only; the title div nests an ingroups div on some pages
    let first = match inner.find('<') {
        Some(lt) => &inner[..lt],
        None => inner.as_str(),
    };
    let name = normalize_ws(&normalize_entities(first))
        .replace("Class Reference", "")
        .replace("Namespace Reference", "")
        .trim()
        .to_string();
    let is_namespace = strip_tags(&inner).contains("Namespace");
    Ok((name, is_namespace))
}

fn parse_details(html: &str) -> (String, Option<String>) {
    let lc = to_lower(html);
    let Some(anchor) = lc.find(r#"id="details""#) else {
        return (s!(), None);
    };
    let Some((ts, te)) = next_block_with_class_ci(html, "div", "textblock", anchor) else {
        return (s!(), None);
    };
    let block = &html[ts..te];
    let desc = paragraphs_of(block);
    let example = next_block_with_class_ci(block, "div", "fragment", 0)
        .and_then(|(fs, fe)| parse_example(&block[fs..fe]));
    (desc, example)
}

/// Join all non-empty <p> texts with newlines.
fn paragraphs_of(block: &str) -> String {
    let mut lines = Vec::new();
    let mut pos = 0usize;
    while let Some((ps, pe)) = next_elem_ci(block, "p", pos) {
        let line = text_of(&block[ps..pe]);
        if !line.is_empty() {
            lines.push(line);
        }
        pos = pe;
    }
    lines.join("\n")
}

/// Code fragments are one `<div class="line">` per source line.
fn parse_example(fragment: &str) -> Option<String> {
    let mut lines = Vec::new();
    let mut pos = 0usize;
    while let Some((ls, le)) = next_block_with_class_ci(fragment, "div", "line", pos) {
        lines.push(text_of(&fragment[ls..le]));
        pos = le;
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/* ---------- member categorization ---------- */

/// Collect the mlabel spans of a memitem. 'enum' is not usually a real label,
/// so it is additionally sniffed from the memname cell.
fn sniff_labels(item: &str) -> Vec<String> {
    let mut labels = Vec::new();
    let mut pos = 0usize;
    while let Some((ls, le)) = next_block_with_class_ci(item, "span", "mlabel", pos) {
        labels.push(text_of(&item[ls..le]));
        pos = le;
    }
    if !labels.iter().any(|l| l == "enum") {
        if let Some((ms, me)) = next_block_with_class_ci(item, "td", "memname", 0) {
            if text_of(&item[ms..me]).contains("enum") {
                labels.push(s!("enum"));
            }
        }
    }
    labels
}

fn group_from_labels(labels: &[String]) -> Result<Option<Group>, Box<dyn Error>> {
    let has = |n: &str| labels.iter().any(|l| l == n);
    if has("read") || has("write") {
        return Ok(Some(Group::Props));
    }
    // Note - static may be meaningful here
    if labels.is_empty()
        || ["slot", "static", "virtual", "override", "inline"]
            .iter()
            .any(|n| has(n))
    {
        return Ok(Some(Group::Slots));
    }
    if has("enum") {
        return Ok(Some(Group::Enums));
    }
    if has("signal") {
        return Ok(Some(Group::Signals));
    }
    if has("friend") || has("delete") {
        return Ok(None);
    }
    Err(format!("unrecognized member labels: {labels:?}").into())
}

/* ---------- signature table ---------- */

struct Signature {
    ty: String,
    name: String,
    keyword: Option<String>,
    params: Vec<ParamRecord>,
}

fn parse_signature_table(item: &str) -> Result<Option<Signature>, Box<dyn Error>> {
    let Some((ts, te)) = next_block_with_class_ci(item, "table", "memname", 0) else {
        return Ok(None);
    };
    let table = &item[ts..te];

    let mut sig: Option<Signature> = None;
    let mut params = Vec::new();

    let mut pos = 0usize;
    while let Some((rs, re)) = next_elem_ci(table, "tr", pos) {
        let tr = &table[rs..re];
        pos = re;

        if let Some((ms, me)) = next_block_with_class_ci(tr, "td", "memname", 0) {
            let (ty, name, keyword) = clean_function_name(&text_of(&tr[ms..me]))?;
            sig = Some(Signature {
                ty,
                name,
                keyword,
                params: Vec::new(),
            });
        }

        if let Some((pt_s, pt_e)) = next_block_with_class_ci(tr, "td", "paramtype", 0) {
            let ty = text_of(&tr[pt_s..pt_e]);
            if let Some((pn_s, pn_e)) = next_block_with_class_ci(tr, "td", "paramname", 0) {
                let (name, default) = clean_argument_name(&text_of(&tr[pn_s..pn_e]));
                if let Some(name) = name {
                    params.push(ParamRecord {
                        name,
                        ty,
                        default,
                        ..Default::default()
                    });
                }
            }
        }
    }

    Ok(sig.map(|mut s| {
        s.params = params;
        s
    }))
}

/// "virtual QString Class::funcName" → ("QString", "funcName", Some("virtual")).
///
/// Handles the documentation bug where the field name is accidentally part of
/// the type text: when the remainder still contains a space, a clean split
/// into exactly two tokens reassigns type and name; anything else is an error
/// that aborts this page.
fn clean_function_name(txt: &str) -> Result<(String, String, Option<String>), Box<dyn Error>> {
    // extraction-tool invocation marker, not part of the signature
    let txt = txt.replace("Q_INVOKABLE", "");
    let mut txt = txt.trim();

    let mut keyword = None;
    for kw in ["virtual", "static"] {
        if let Some(rest) = txt.strip_prefix(kw) {
            if rest.starts_with(' ') {
                keyword = Some(s!(kw));
                txt = rest.trim_start();
                break;
            }
        }
    }

    // the name is the trailing run of [~ A-Z a-z 0-9 _]
    let bytes = txt.as_bytes();
    let mut i = txt.len();
    while i > 0 {
        let c = bytes[i - 1];
        if c.is_ascii_alphanumeric() || c == b'_' || c == b'~' {
            i -= 1;
        } else {
            break;
        }
    }
    if i == txt.len() {
        return Err(format!("cannot find function name in signature: {txt}").into());
    }
    let mut func_name = s!(&txt[i..]);

    // drop a qualifying Namespace:: immediately before the name
    let mut rest = &txt[..i];
    if let Some(r) = rest.strip_suffix("::") {
        let rb = r.as_bytes();
        let mut j = r.len();
        while j > 0 {
            let c = rb[j - 1];
            if c.is_ascii_alphanumeric() || c == b'_' {
                j -= 1;
            } else {
                break;
            }
        }
        rest = &r[..j];
    }
    let rest = rest.trim();

    let ty = if rest.is_empty() {
        s!("void")
    } else if rest.contains(' ') {
        let mut parts = rest.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(t), Some(n), None) => {
                func_name = s!(n);
                s!(t)
            }
            _ => return Err(format!("cannot split embedded name from type: {rest}").into()),
        }
    } else {
        s!(rest)
    };
    Ok((ty, func_name, keyword))
}

/// "myArg = QString()," → (Some("myArg"), Some("QString()")).
fn clean_argument_name(txt: &str) -> (Option<String>, Option<String>) {
    let mut default = None;
    if let Some(eq) = txt.find('=') {
        let d = txt[eq + 1..].trim().trim_end_matches(',').trim_end();
        if !d.is_empty() {
            default = Some(s!(d));
        }
    }
    let name = txt
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .find(|t| !t.is_empty())
        .map(|t| s!(t));
    (name, default)
}

fn clean_argument_desc(txt: &str) -> String {
    txt.trim_start_matches([':', ' ']).trim().to_string()
}

/* ---------- member docs ---------- */

struct ParamDoc {
    name: String,
    desc: String,
    object_schema: Option<Vec<FieldRecord>>,
}

fn parse_memdoc(item: &str) -> (String, Option<String>, Vec<ParamDoc>) {
    let Some((ds, de)) = next_block_with_class_ci(item, "div", "memdoc", 0) else {
        return (s!(), None, Vec::new());
    };
    let doc = &item[ds..de];

    let desc = paragraphs_of(doc);
    let example = next_block_with_class_ci(doc, "div", "fragment", 0)
        .and_then(|(fs, fe)| parse_example(&doc[fs..fe]));

    let mut param_docs = Vec::new();
    if let Some((ts, te)) = next_block_with_class_ci(doc, "table", "params", 0) {
        let table = &doc[ts..te];
        let mut pos = 0usize;
        while let Some((rs, re)) = next_elem_ci(table, "tr", pos) {
            let tr = &table[rs..re];
            pos = re;

            let Some((n_s, n_e)) = next_elem_ci(tr, "td", 0) else {
                continue;
            };
            let Some((d_s, d_e)) = next_elem_ci(tr, "td", n_e) else {
                continue;
            };
            // A markdownTable in the doc cell describes an object the
            // parameter carries; keep it as a nested schema.
            let object_schema = next_block_with_class_ci(tr, "table", "markdownTable", 0)
                .map(|(ss, se)| parse_markdown_schema(&tr[ss..se]));
            param_docs.push(ParamDoc {
                name: text_of(&tr[n_s..n_e]),
                desc: text_of(&tr[d_s..d_e]),
                object_schema,
            });
        }
    }
    (desc, example, param_docs)
}

/// Three-column (name, type, desc) rows; anything else is skipped.
fn parse_markdown_schema(table: &str) -> Vec<FieldRecord> {
    let mut schema = Vec::new();
    let mut pos = 0usize;
    while let Some((rs, re)) = next_elem_ci(table, "tr", pos) {
        let tr = &table[rs..re];
        pos = re;

        let mut tds = Vec::new();
        let mut td_pos = 0usize;
        while let Some((cs, ce)) = next_elem_ci(tr, "td", td_pos) {
            tds.push(text_of(&tr[cs..ce]));
            td_pos = ce;
        }
        if tds.len() != 3 {
            continue;
        }
        let mut tds = tds.into_iter();
        schema.push(FieldRecord {
            name: tds.next().unwrap_or_default(),
            ty: tds.next().unwrap_or_default(),
            desc: tds.next().unwrap_or_default(),
            object_schema: None,
        });
    }
    schema
}

fn parse_function_div(item: &str) -> Result<Option<MemberRecord>, Box<dyn Error>> {
    let Some(sig) = parse_signature_table(item)? else {
        return Ok(None);
    };
    let mut member = MemberRecord {
        name: sig.name,
        ty: sig.ty,
        keyword: sig.keyword,
        params: sig.params,
        ..Default::default()
    };
    if member.name.is_empty() {
        return Ok(None);
    }

    let (desc, example, param_docs) = parse_memdoc(item);
    member.desc = desc;
    member.example = example;

    // join the parameter documentation with the signature's parameter list
    for param in &mut member.params {
        for doc in &param_docs {
            if doc.name == param.name {
                param.desc = clean_argument_desc(&doc.desc);
                if let Some(schema) = &doc.object_schema {
                    param.object_schema = Some(schema.clone());
                }
            }
        }
    }
    Ok(Some(member))
}

fn parse_enum_div(item: &str) -> Result<Option<EnumRecord>, Box<dyn Error>> {
    let Some(sig) = parse_signature_table(item)? else {
        return Ok(None);
    };
    let mut fields = Vec::new();
    if let Some((ts, te)) = next_block_with_class_ci(item, "table", "fieldtable", 0) {
        let table = &item[ts..te];
        let mut pos = 0usize;
        while let Some((fs, fe)) = next_block_with_class_ci(table, "td", "fieldname", pos) {
            fields.push(text_of(&table[fs..fe]));
            pos = fe;
        }
    }
    Ok(Some(EnumRecord {
        name: sig.name,
        fields,
    }))
}
