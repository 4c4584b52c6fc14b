// src/types.rs
// Type-token normalizer: free-text type expressions as written in the docs
// into TypeScript type expressions. Normalization never fails; a token that
// matches no rule passes through unchanged, which also makes the whole thing
// idempotent on already-normalized tokens.

/// Strip a generic wrapper like `Array<...>` / `Array.<...>` (doxygen and
/// jsdoc spell it both ways) and return the inner token.
fn strip_wrap<'a>(t: &'a str, name: &str) -> Option<&'a str> {
    let rest = t.trim().strip_prefix(name)?;
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    let inner = rest.strip_prefix('<')?.strip_suffix('>')?;
    Some(inner)
}

fn convert_single(type_name: &str) -> String {
    // Container rewrites are a pattern match on the outer wrapper, not a
    // grammar. Only one level of nesting (2D arrays) is supported; deeper
    // nesting is a documented limitation of the docs themselves.
    if let Some(inner) = strip_wrap(type_name, "Array") {
        if let Some(inner2) = strip_wrap(inner, "Array") {
            return join!(&convert_single(inner2), "[][]");
        }
        return join!(&convert_single(inner), "[]");
    }
    if let Some(inner) = strip_wrap(type_name, "Object") {
        if let Some((k, v)) = inner.split_once(',') {
            return format!("{{[key: {}] : {}}}", convert_single(k), convert_single(v));
        }
    }

    // Cleanup whitespace and remove pointer/reference symbols
    let mut type_name: String = type_name.chars().filter(|c| *c != '*' && *c != '&').collect();
    // Keyword qualifiers are not part of a TS type
    type_name = type_name.replace("virtual", "").replace("static", "");
    let type_name = type_name.trim();

    if type_name.contains("unsigned") || type_name == "integer" {
        return s!("int");
    }
    if type_name.is_empty() {
        return s!("void");
    }
    if type_name == "..." {
        return s!("any");
    }
    // Convert native types to JavaScript types
    match type_name {
        "String" => s!("string"),
        "bool" => s!("boolean"),
        _ => s!(type_name),
    }
}

/// Normalize one raw type token. Unions written with a literal " or " are
/// split, normalized memberwise, and recombined with `|`.
pub fn convert_type(type_name: &str) -> String {
    if type_name.contains(" or ") {
        let types: Vec<String> = type_name.split(" or ").map(convert_single).collect();
        types.join("|")
    } else {
        convert_single(type_name)
    }
}

/// Default-value literals, not types: doc-specific constructor calls map to
/// fixed TS literals.
pub fn convert_value(value: &str) -> String {
    match value {
        "QScriptValue()" => s!("{}"),
        "String()" => s!("\"\""),
        other => s!(other),
    }
}
