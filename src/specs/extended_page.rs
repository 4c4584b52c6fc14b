// src/specs/extended_page.rs
// Extended-site (jsdoc) pages. Unlike the doxygen site, a member's heading
// and its documentation are siblings, so each member is parsed from the
// region between its own h4 heading and the next one.
//
// This site is also the strict one: recovered return and parameter types go
// through the full rewrite pass here, and a wrapper that survives it means
// the source format changed and the run must stop.

use std::error::Error;

use crate::core::html::{
    attr_ci, inner_after_open_tag, next_block_with_class_ci, next_elem_ci, opener_of, strip_tags,
    strip_tags_raw, to_lower,
};
use crate::core::sanitize::{normalize_entities, normalize_ws};
use crate::records::{ClassRecord, FieldRecord, GlobalRecord, MemberRecord, ParamRecord};
use crate::types::convert_type;

fn text_of(block: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(inner_after_open_tag(block))))
}

#[derive(Clone, Debug)]
pub struct IndexEntry {
    pub name: String,
    pub href: String,
}

/// The index page lists classes and modules in its nav sidebar, one list per
/// h3 heading.
pub fn parse_extended_index(html: &str) -> Result<Vec<IndexEntry>, Box<dyn Error>> {
    let (ns, ne) = next_elem_ci(html, "nav", 0).ok_or("extended index has no nav element")?;
    let nav = &html[ns..ne];

    let mut entries = Vec::new();
    let mut pos = 0usize;
    while let Some((hs, he)) = next_elem_ci(nav, "h3", pos) {
        let heading = text_of(&nav[hs..he]);
        pos = he;
        if heading != "Classes" && heading != "Modules" {
            continue;
        }
        let Some((us, ue)) = next_elem_ci(nav, "ul", he) else {
            continue;
        };
        let ul = &nav[us..ue];
        let mut li_pos = 0usize;
        while let Some((ls, le)) = next_elem_ci(ul, "li", li_pos) {
            let li = &ul[ls..le];
            li_pos = le;
            let Some((a_s, a_e)) = next_elem_ci(li, "a", 0) else {
                continue;
            };
            let a = &li[a_s..a_e];
            if let Some(href) = attr_ci(opener_of(a), "href") {
                entries.push(IndexEntry {
                    name: text_of(a),
                    href,
                });
            }
        }
        pos = ue;
    }
    Ok(entries)
}

pub fn parse_extended_class(html: &str) -> Result<ClassRecord, Box<dyn Error>> {
    let (ts, te) = next_block_with_class_ci(html, "h1", "page-title", 0)
        .ok_or("extended page has no page-title")?;
    let title = text_of(&html[ts..te]);
    let is_namespace = title.starts_with("Module:");
    let title = title
        .trim_start_matches("Class:")
        .trim_start_matches("Module:")
        .trim();
    // "Module: namespace/Name" pages declare the class inside a namespace
    let (namespace, name) = match title.rsplit_once('/') {
        Some((ns, n)) => (Some(s!(ns)), s!(n)),
        None => (None, s!(title)),
    };
    if name.is_empty() {
        return Err("extended page title carries no class name".into());
    }
    let mut rec = ClassRecord {
        name,
        namespace,
        is_namespace,
        ..Default::default()
    };

    let (a_s, a_e) = next_elem_ci(html, "article", 0).ok_or("extended page has no article")?;
    let article = &html[a_s..a_e];

    if let Some((os, oe)) = next_block_with_class_ci(article, "div", "container-overview", 0) {
        let overview = &article[os..oe];
        if let Some((ds, de)) = next_block_with_class_ci(overview, "div", "description", 0) {
            rec.desc = text_of(&overview[ds..de]);
        }
    }

    for (heading, body) in member_regions(article) {
        rec.slots.push(parse_member(heading, body)?);
    }
    Ok(rec)
}

/// Split the article into (h4 heading, following sibling markup) regions,
/// one per documented member.
fn member_regions(article: &str) -> Vec<(&str, &str)> {
    let mut heads = Vec::new();
    let mut pos = 0usize;
    while let Some((hs, he)) = next_block_with_class_ci(article, "h4", "name", pos) {
        heads.push((hs, he));
        pos = he;
    }

    let mut regions = Vec::with_capacity(heads.len());
    for (i, &(hs, he)) in heads.iter().enumerate() {
        let body_end = heads.get(i + 1).map(|&(n, _)| n).unwrap_or(article.len());
        regions.push((&article[hs..he], &article[he..body_end]));
    }
    regions
}

fn parse_member(heading: &str, body: &str) -> Result<MemberRecord, Box<dyn Error>> {
    let inner = inner_after_open_tag(heading);

    // the keyword, when present, sits in a type-signature span as a
    // parenthesized word like "(static)"; the signature span never carries it
    let mut keyword = None;
    if let Some((ss, se)) = next_block_with_class_ci(&inner, "span", "type-signature", 0) {
        let t = text_of(&inner[ss..se]);
        if let (Some(o), Some(c)) = (t.find('('), t.rfind(')')) {
            if o + 1 < c {
                keyword = Some(s!(t[o + 1..c].trim()));
            }
        }
    }

    // drop the decoration spans; the bare text that remains is the name
    let mut stripped = inner.clone();
    while let Some((ss, se)) = next_elem_ci(&stripped, "span", 0) {
        stripped.replace_range(ss..se, "");
    }
    let text = strip_tags(&stripped);
    let name = text
        .split_ascii_whitespace()
        .next_back()
        .ok_or("member heading carries no name")?;

    let mut member = MemberRecord {
        name: s!(name),
        ty: s!("void"),
        keyword,
        ..Default::default()
    };

    if let Some((ds, de)) = next_block_with_class_ci(body, "div", "description", 0) {
        member.desc = text_of(&body[ds..de]);
    }

    // h5 headings open the Example / Parameters / Returns sub-sections; each
    // section runs until the next h5
    let mut pos = 0usize;
    while let Some((hs, he)) = next_elem_ci(body, "h5", pos) {
        let title = text_of(&body[hs..he]);
        let section_end = next_elem_ci(body, "h5", he).map(|(n, _)| n).unwrap_or(body.len());
        let section = &body[he..section_end];
        pos = he;

        if title.contains("Example") {
            if let Some((ps, pe)) = next_elem_ci(section, "pre", 0) {
                if let Some((cs, ce)) = next_elem_ci(&section[ps..pe], "code", 0) {
                    member.example = Some(strip_tags_raw(&inner_after_open_tag(
                        &section[ps..pe][cs..ce],
                    )));
                }
            }
        } else if title.contains("Parameter") {
            if let Some((ts2, te2)) = next_block_with_class_ci(section, "table", "params", 0) {
                member.params = parse_params_table(&section[ts2..te2])?;
            }
        } else if title.contains("Returns") {
            member.ty = parse_returns(section)?;
        }
    }
    Ok(member)
}

/// All `span.param-type` texts of the Returns section joined as a union.
/// No type span at all means void.
fn parse_returns(section: &str) -> Result<String, Box<dyn Error>> {
    let mut types = Vec::new();
    let mut pos = 0usize;
    while let Some((ss, se)) = next_block_with_class_ci(section, "span", "param-type", pos) {
        types.push(text_of(&section[ss..se]));
        pos = se;
    }
    if types.is_empty() {
        return Ok(s!("void"));
    }
    extended_convert_type(&types.join("|"))
}

fn parse_params_table(table: &str) -> Result<Vec<ParamRecord>, Box<dyn Error>> {
    let mut params = Vec::new();
    let mut pos = 0usize;
    while let Some((rs, re)) = next_elem_ci(table, "tr", pos) {
        let tr = &table[rs..re];
        pos = re;

        // header rows carry th cells only
        let Some((n_s, n_e)) = next_block_with_class_ci(tr, "td", "name", 0) else {
            continue;
        };
        let Some((t_s, t_e)) = next_block_with_class_ci(tr, "td", "type", 0) else {
            continue;
        };
        let mut param = ParamRecord {
            name: text_of(&tr[n_s..n_e]),
            ty: extended_convert_type(&text_of(&tr[t_s..t_e]))?,
            ..Default::default()
        };
        if let Some((d_s, d_e)) = next_block_with_class_ci(tr, "td", "description", 0) {
            let td = &tr[d_s..d_e];
            param.desc = own_text(td);
            if let Some((b_s, b_e)) = next_elem_ci(td, "tbody", 0) {
                param.object_schema = Some(parse_schema_table(&td[b_s..b_e]));
            }
        }
        params.push(param);
    }
    Ok(params)
}

/// Text of a description cell up to its nested schema table, if any.
fn own_text(td: &str) -> String {
    let inner = inner_after_open_tag(td);
    let cut = to_lower(&inner).find("<table").unwrap_or(inner.len());
    normalize_ws(&normalize_entities(&strip_tags(&inner[..cut])))
}

/// Rows of a nested object-schema table: (name, type, description) with
/// possibly one more schema table inside the description cell.
pub fn parse_schema_table(tbody: &str) -> Vec<FieldRecord> {
    let mut fields = Vec::new();
    let mut pos = 0usize;
    while let Some((rs, re)) = next_elem_ci(tbody, "tr", pos) {
        let tr = &tbody[rs..re];
        pos = re;

        let Some((n_s, n_e)) = next_block_with_class_ci(tr, "td", "name", 0) else {
            continue;
        };
        let ty = next_block_with_class_ci(tr, "td", "type", 0)
            .map(|(t_s, t_e)| text_of(&tr[t_s..t_e]))
            .unwrap_or_default();
        let mut field = FieldRecord {
            name: text_of(&tr[n_s..n_e]),
            ty,
            ..Default::default()
        };
        if let Some((d_s, d_e)) = next_block_with_class_ci(tr, "td", "description", 0) {
            let td = &tr[d_s..d_e];
            field.desc = own_text(td);
            if let Some((b_s, b_e)) = next_elem_ci(td, "tbody", 0) {
                field.object_schema = Some(parse_schema_table(&td[b_s..b_e]));
            }
        }
        fields.push(field);
    }
    fields
}

/// The globals page documents each global as an h4 heading followed by a
/// description and one schema table. A global without a schema table is
/// skipped; there is nothing to declare for it.
pub fn parse_globals_page(html: &str) -> Result<Vec<GlobalRecord>, Box<dyn Error>> {
    let (a_s, a_e) = next_elem_ci(html, "article", 0).ok_or("globals page has no article")?;
    let article = &html[a_s..a_e];

    let mut globals = Vec::new();
    for (heading, body) in member_regions(article) {
        let mut stripped = inner_after_open_tag(heading);
        while let Some((ss, se)) = next_elem_ci(&stripped, "span", 0) {
            stripped.replace_range(ss..se, "");
        }
        let text = strip_tags(&stripped);
        let Some(name) = text.split_ascii_whitespace().next_back() else {
            continue;
        };

        let Some((b_s, b_e)) = next_elem_ci(body, "tbody", 0) else {
            logd!("Global without a schema table, skipping: {name}");
            continue;
        };
        let desc = next_block_with_class_ci(body, "div", "description", 0)
            .map(|(ds, de)| text_of(&body[ds..de]))
            .unwrap_or_default();
        globals.push(GlobalRecord {
            name: s!(name),
            desc,
            object_schema: parse_schema_table(&body[b_s..b_e]),
        });
    }
    Ok(globals)
}

/// The strict rewrite pass: union members are normalized one by one and any
/// generic wrapper that survives means the page format changed under us.
pub fn extended_convert_type(raw: &str) -> Result<String, Box<dyn Error>> {
    let converted: Vec<String> = raw
        .split('|')
        .map(|part| {
            let t = convert_type(part.trim());
            if t == "Boolean" {
                s!("boolean")
            } else {
                t
            }
        })
        .collect();
    let joined = converted.join("|");
    if joined.contains('<') {
        return Err(format!("unhandled type wrapper in extended docs: {raw}").into());
    }
    Ok(joined)
}
