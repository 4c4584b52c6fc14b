// src/records.rs
//
// Normalized records produced by the extractors and consumed by the emitter.
// Everything lives in memory for one application+version run and is dropped
// when the run's file has been written.
//
// `parent` is stored as a plain name string, never a resolved reference: the
// class graph in the docs contains duplicates and dangling parents, and the
// emitter only needs the name for the `extends` clause and the static-context
// check. Keeping it a string avoids a cyclic ownership graph.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    pub parent: Option<String>,
    pub namespace: Option<String>,
    pub is_namespace: bool,
    pub is_static: bool,
    pub desc: String,
    pub example: Option<String>,
    pub url: Option<String>,
    pub slots: Vec<MemberRecord>,
    pub props: Vec<MemberRecord>,
    pub signals: Vec<MemberRecord>,
    pub enums: Vec<EnumRecord>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    /// Raw or normalized type token; "void" when the signature carried none.
    #[serde(rename = "type", default)]
    pub ty: String,
    pub keyword: Option<String>,
    #[serde(default)]
    pub desc: String,
    pub example: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamRecord>,
    pub object_schema: Option<Vec<FieldRecord>>,
    /// Marks a member the docs declare with a signature TypeScript rejects
    /// (override with different parameters); set through overrides only.
    #[serde(default)]
    pub invalid: bool,
}

impl MemberRecord {
    /// C++-style destructors leak into the docs; they are filtered before
    /// emission, never carried downstream.
    pub fn is_destructor(&self) -> bool {
        self.name.starts_with('~')
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ParamRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default)]
    pub desc: String,
    pub default: Option<String>,
    pub object_schema: Option<Vec<FieldRecord>>,
}

impl ParamRecord {
    /// A parameter is optional when it carries a default or its description
    /// talks about one. The emitter extends this to every later parameter in
    /// the same list (optional-tail rule).
    pub fn is_optional(&self) -> bool {
        self.default.is_some() || self.desc.to_ascii_lowercase().contains("default")
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default)]
    pub desc: String,
    pub object_schema: Option<Vec<FieldRecord>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EnumRecord {
    pub name: String,
    /// Field names only; the docs never give usable values.
    pub fields: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GlobalRecord {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub object_schema: Vec<FieldRecord>,
}
