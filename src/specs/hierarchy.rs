// src/specs/hierarchy.rs
// Doxygen navigation payloads (hierarchy.js, namespaces_dup.js) declare a
// single JS variable whose initializer is a plain JSON array literal:
// entries are [name, url-or-null, children-or-null]. We slice out the array
// and let serde_json do the rest.

use std::error::Error;

use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HierarchyNode {
    pub name: String,
    pub url: Option<String>,
    pub children: Vec<HierarchyNode>,
}

pub fn parse_hierarchy_js(js: &str, var_name: &str) -> Result<Vec<HierarchyNode>, Box<dyn Error>> {
    if !js.contains(var_name) {
        return Err(format!("expected `var {var_name}` in navigation payload").into());
    }
    let start = js
        .find('[')
        .ok_or("no array literal in navigation payload")?;
    let end = js.rfind(']').ok_or("unterminated array literal")?;
    let value: Value = serde_json::from_str(&js[start..=end])?;
    read_elements(&value)
}

fn read_elements(v: &Value) -> Result<Vec<HierarchyNode>, Box<dyn Error>> {
    let arr = v.as_array().ok_or("hierarchy level is not an array")?;
    let mut items = Vec::with_capacity(arr.len());
    for elem in arr {
        let parts = elem.as_array().ok_or("hierarchy entry is not an array")?;
        let name = parts
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let url = parts
            .get(1)
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(|u| !u.is_empty());
        let children = match parts.get(2) {
            Some(members @ Value::Array(_)) => read_elements(members)?,
            _ => Vec::new(),
        };
        items.push(HierarchyNode {
            name,
            url,
            children,
        });
    }
    Ok(items)
}
