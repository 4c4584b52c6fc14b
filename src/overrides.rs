// src/overrides.rs
// Hand-maintained corrections applied to scraped records before emission.
// The docs are wrong in places that no parser can fix; the override file
// (override/overrides.json) patches those spots by class and slot name.

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::records::{ClassRecord, MemberRecord, ParamRecord};

#[derive(Debug, Default, Deserialize)]
pub struct Overrides {
    #[serde(flatten)]
    classes: HashMap<String, ClassOverride>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassOverride {
    /// Drop the class from the output entirely.
    #[serde(default)]
    pub skip: bool,
    pub desc: Option<String>,
    /// `Some(None)` cannot be expressed in JSON; an empty string clears the
    /// parent instead.
    pub parent: Option<String>,
    pub namespace: Option<String>,
    pub is_namespace: Option<bool>,
    pub is_static: Option<bool>,
    /// Patches to existing slots, by slot name.
    #[serde(default)]
    pub slots: HashMap<String, SlotOverride>,
    /// Synthetic slots the docs do not mention at all.
    #[serde(default)]
    pub add_slots: Vec<MemberRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotOverride {
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub keyword: Option<String>,
    pub desc: Option<String>,
    pub invalid: Option<bool>,
    /// Full replacement of the parameter list.
    pub params: Option<Vec<ParamRecord>>,
    /// Merge-by-name: listed fields replace the scraped parameter's fields,
    /// parameters not listed stay untouched.
    #[serde(default)]
    pub merge_params: Vec<ParamRecord>,
}

impl Overrides {
    /// A missing override file is not an error; there is just nothing to
    /// patch.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        let overrides: Overrides = serde_json::from_str(&data)?;
        Ok(overrides)
    }

    /// Patch one record in place. Returns false when the class is marked
    /// skipped and must not be emitted.
    pub fn apply(&self, rec: &mut ClassRecord) -> bool {
        let Some(ovr) = self.classes.get(&rec.name) else {
            return true;
        };
        if ovr.skip {
            return false;
        }
        if let Some(desc) = &ovr.desc {
            rec.desc = desc.clone();
        }
        if let Some(parent) = &ovr.parent {
            rec.parent = if parent.is_empty() {
                None
            } else {
                Some(parent.clone())
            };
        }
        if let Some(namespace) = &ovr.namespace {
            rec.namespace = Some(namespace.clone());
        }
        if let Some(is_namespace) = ovr.is_namespace {
            rec.is_namespace = is_namespace;
        }
        if let Some(is_static) = ovr.is_static {
            rec.is_static = is_static;
        }
        for slot in &mut rec.slots {
            if let Some(patch) = ovr.slots.get(&slot.name) {
                apply_slot(slot, patch);
            }
        }
        rec.slots.extend(ovr.add_slots.iter().cloned());
        true
    }
}

fn apply_slot(slot: &mut MemberRecord, patch: &SlotOverride) {
    if let Some(ty) = &patch.ty {
        slot.ty = ty.clone();
    }
    if let Some(keyword) = &patch.keyword {
        slot.keyword = Some(keyword.clone());
    }
    if let Some(desc) = &patch.desc {
        slot.desc = desc.clone();
    }
    if let Some(invalid) = patch.invalid {
        slot.invalid = invalid;
    }
    if let Some(params) = &patch.params {
        slot.params = params.clone();
    }
    for merged in &patch.merge_params {
        for param in &mut slot.params {
            if param.name == merged.name {
                if !merged.ty.is_empty() {
                    param.ty = merged.ty.clone();
                }
                if !merged.desc.is_empty() {
                    param.desc = merged.desc.clone();
                }
                if merged.default.is_some() {
                    param.default = merged.default.clone();
                }
            }
        }
    }
}
