// src/emit.rs
// Declaration emitter: records in, TypeScript declaration text out. Emission
// order is strictly input order; no sorting, grouping, or cross-record
// deduplication happens here.
//
// Callers write into an in-memory buffer and only put the file on disk once
// the whole version succeeded, so a fatal condition never leaves a partial
// file behind that looks finished.

use std::io::{self, Write};

use crate::records::{ClassRecord, FieldRecord, GlobalRecord, MemberRecord, ParamRecord};
use crate::types::{convert_type, convert_value};

pub struct EmitConfig {
    /// Classes never emitted, by name. Mostly Qt internals the scripting
    /// runtime does not actually expose.
    pub skip_classes: Vec<String>,
    /// Member names that collide with TypeScript keywords.
    pub reserved_words: Vec<String>,
    /// Parent names that put a class in static context.
    pub static_roots: Vec<String>,
    /// Column width for word-wrapped description lines.
    pub wrap_width: usize,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            skip_classes: vec![
                s!("QObject"),
                s!("BAPP_SpecialFolders"),
                s!("QScriptable"),
                s!("Labeled"),
                s!("QLineEdit"),
                s!("SCRIPT_QSWidget"),
                s!("QProcess"),
                s!("SCR_BaseInterface"),
            ],
            reserved_words: vec![s!("void")],
            static_roots: vec![s!("GlobalObject"), s!("BAPP_SpecialFolders")],
            wrap_width: 100,
        }
    }
}

impl EmitConfig {
    pub fn skips(&self, name: &str) -> bool {
        self.skip_classes.iter().any(|c| c == name)
    }

    fn reserves(&self, name: &str) -> bool {
        self.reserved_words.iter().any(|w| w == name)
    }
}

/// Drop empty lines and per-line indentation from scraped description text.
pub fn convert_desc(desc: &str) -> String {
    let lines: Vec<&str> = desc
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    lines.join("\n")
}

/// Greedy word wrap. An empty line yields no segments.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    for word in line.split_whitespace() {
        if cur.is_empty() {
            cur = s!(word);
        } else if cur.len() + 1 + word.len() <= width {
            cur.push(' ');
            cur.push_str(word);
        } else {
            out.push(cur);
            cur = s!(word);
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// What goes into one doc comment. Classes and members share the layout,
/// they just fill different fields.
struct DocBlock<'a> {
    desc: &'a str,
    params: &'a [ParamRecord],
    ty: Option<&'a str>,
    url: Option<&'a str>,
    example: Option<&'a str>,
}

fn write_doc(out: &mut dyn Write, cfg: &EmitConfig, doc: &DocBlock) -> io::Result<()> {
    write!(out, "\n/**")?;
    for line in doc.desc.split('\n') {
        write!(out, "\n* {}", wrap(line, cfg.wrap_width).join("\n* "))?;
    }
    for p in doc.params {
        write!(out, "\n* @param {{{}}}", convert_type(&p.ty))?;
        match &p.default {
            Some(d) => write!(out, " [{}={}]", p.name, convert_value(d))?,
            None => write!(out, " {}", p.name)?,
        }
        if !p.desc.is_empty() {
            write!(out, " {}", convert_desc(&p.desc))?;
        }
    }
    if let Some(ty) = doc.ty {
        let ty = convert_type(ty);
        if !ty.is_empty() && ty != "void" {
            write!(out, "\n* @returns {{{ty}}}")?;
        }
    }
    if let Some(url) = doc.url {
        write!(out, "\n* {{@link {url}}}")?;
    }
    if let Some(example) = doc.example {
        write!(out, "\n* @example")?;
        for line in example.split('\n') {
            write!(out, "\n* {line}")?;
        }
    }
    write!(out, "\n*/")
}

/// TS type for a (type token, optional object schema) pair. A schema renders
/// as a structural type with one doc comment per described field.
pub fn build_type(ty: &str, schema: Option<&[FieldRecord]>) -> String {
    let Some(fields) = schema else {
        return convert_type(ty);
    };
    let mut out = s!("{");
    for field in fields {
        if !field.desc.is_empty() {
            out.push_str(&format!("\n/**\n* {}\n*/", field.desc));
        }
        out.push_str(&format!("\n{}:{}", field.name, convert_type(&field.ty)));
    }
    out.push('}');
    out
}

fn member_type(m: &MemberRecord) -> String {
    build_type(&m.ty, m.object_schema.as_deref())
}

/// (name, type) pairs for a signature, with the optional-tail rule applied:
/// from the first optional parameter on, every parameter is optional.
pub fn build_params_list(params: &[ParamRecord]) -> Vec<(String, String)> {
    let mut out = Vec::with_capacity(params.len());
    let mut broke_optional = false;
    for p in params {
        if !broke_optional && p.is_optional() {
            broke_optional = true;
        }
        let mut name = p.name.clone();
        if broke_optional {
            name.push('?');
        }
        out.push((name, build_type(&p.ty, p.object_schema.as_deref())));
    }
    out
}

fn signature_of(params: &[ParamRecord]) -> String {
    build_params_list(params)
        .iter()
        .map(|(n, t)| format!("{n}: {t}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Signals are properties of a library-defined generic callback type.
pub fn build_signal_type(signal: &MemberRecord) -> String {
    format!(
        "QSignal<({}) => {}>",
        signature_of(&signal.params),
        member_type(signal)
    )
}

pub fn write_class(out: &mut dyn Write, cfg: &EmitConfig, cls: &ClassRecord) -> io::Result<()> {
    let is_module = cls.is_namespace;
    let is_static = cls.is_static
        || match &cls.parent {
            None => true,
            Some(parent) => cfg.static_roots.iter().any(|r| r == parent),
        };
    let has_namespace = cls.namespace.is_some();

    if let Some(ns) = &cls.namespace {
        write!(out, "\ndeclare namespace {ns} {{")?;
    }
    let static_str = if is_static { "static " } else { "" };

    write_doc(
        out,
        cfg,
        &DocBlock {
            desc: &cls.desc,
            params: &[],
            ty: None,
            url: cls.url.as_deref(),
            example: cls.example.as_deref(),
        },
    )?;
    if is_module {
        write!(out, "\ndeclare module {} {{", cls.name)?;
    } else {
        // a class inside a namespace block must not repeat `declare`
        let declare_prefix = if has_namespace { "" } else { "declare " };
        match &cls.parent {
            Some(parent) => write!(
                out,
                "\n{declare_prefix}class {} extends {} {{",
                cls.name, parent
            )?,
            None => write!(out, "\n{declare_prefix}class {} {{", cls.name)?,
        }
    }

    let mut used_names: Vec<&str> = Vec::new();

    for slot in &cls.slots {
        if slot.is_destructor() {
            continue;
        }
        if !used_names.contains(&slot.name.as_str()) {
            used_names.push(&slot.name);
        }
        let mut prefix = "";
        if cfg.reserves(&slot.name) {
            prefix = "// /* Invalid - Reserved word */";
        }
        if slot.invalid {
            prefix = "// /* Invalid - Overriding method in parent class with different parameters */";
        }
        write_doc(
            out,
            cfg,
            &DocBlock {
                desc: &slot.desc,
                params: &slot.params,
                ty: Some(&slot.ty),
                url: None,
                example: slot.example.as_deref(),
            },
        )?;
        let sig = signature_of(&slot.params);
        let ty = member_type(slot);
        if is_module {
            write!(out, "\n{prefix}function {} ({sig}): {ty};\n", slot.name)?;
        } else if slot.name == cls.name {
            write!(out, "\nconstructor ({sig});\n")?;
        } else {
            write!(out, "\n{prefix}public {static_str}{} ({sig}): {ty};\n", slot.name)?;
        }
    }

    for signal in &cls.signals {
        if !used_names.contains(&signal.name.as_str()) {
            used_names.push(&signal.name);
        }
        let mut prefix = "";
        if cfg.reserves(&signal.name) {
            prefix = "// /* Invalid - Reserved word */";
        }
        write_doc(
            out,
            cfg,
            &DocBlock {
                desc: &signal.desc,
                params: &signal.params,
                ty: Some(&signal.ty),
                url: None,
                example: signal.example.as_deref(),
            },
        )?;
        write!(
            out,
            "\n{prefix}public {}: {};\n",
            signal.name,
            build_signal_type(signal)
        )?;
    }

    for prop in &cls.props {
        let mut prefix = "";
        if cfg.reserves(&prop.name) {
            prefix = "// /* Invalid - Reserved word */";
        } else if used_names.contains(&prop.name.as_str()) {
            prefix = "// /* Invalid - Duplicate property name */ ";
        } else {
            used_names.push(&prop.name);
        }
        write_doc(
            out,
            cfg,
            &DocBlock {
                desc: &prop.desc,
                params: &prop.params,
                ty: Some(&prop.ty),
                url: None,
                example: prop.example.as_deref(),
            },
        )?;
        let ty = member_type(prop);
        if is_module {
            write!(out, "\n{prefix}var {}: {ty};\n", prop.name)?;
        } else {
            write!(out, "\n{prefix}{static_str}{}: {ty};\n", prop.name)?;
        }
    }

    if has_namespace {
        write!(out, "\n}}")?;
    }
    write!(out, "\n}}\n\n")
}

/// Globals carry no class shell, just a structural interface.
pub fn write_interface(out: &mut dyn Write, cfg: &EmitConfig, global: &GlobalRecord) -> io::Result<()> {
    write_doc(
        out,
        cfg,
        &DocBlock {
            desc: &global.desc,
            params: &[],
            ty: None,
            url: None,
            example: None,
        },
    )?;
    write!(
        out,
        "\ndeclare interface {} {}",
        global.name,
        build_type("", Some(&global.object_schema))
    )
}
