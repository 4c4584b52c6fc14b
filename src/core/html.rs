// src/core/html.rs
// Low-level HTML string manipulation helpers.
// These are deliberately naive but tailored to the doxygen/jsdoc markup the
// documentation sites emit. They operate case-insensitively on ASCII
// tag/attribute names.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// True when `lc[i..]` begins an opening tag of `tag` (`tag` already lowercase,
/// without the leading `<`). The byte after the name must end the name.
fn is_open_at(lc: &str, i: usize, tag: &str) -> bool {
    let rest = &lc[i..];
    if !rest.starts_with('<') {
        return false;
    }
    let rest = &rest[1..];
    if !rest.starts_with(tag) {
        return false;
    }
    match rest.as_bytes().get(tag.len()) {
        Some(b) => !b.is_ascii_alphanumeric(),
        None => false,
    }
}

/// True when `lc[i..]` begins the closing tag `close` (already lowercase,
/// `</` included). Same name-boundary rule as the opener: `</pre>` must never
/// pass for `</p`.
fn is_close_at(lc: &str, i: usize, close: &str) -> bool {
    if !lc[i..].starts_with(close) {
        return false;
    }
    match lc.as_bytes().get(i + close.len()) {
        Some(b) => *b == b'>' || b.is_ascii_whitespace(),
        None => false,
    }
}

/// Depth-aware tag block finder for elements that nest (doxygen wraps divs in
/// divs, schema tables in tables). Returns the byte range of the whole block,
/// opening tag through matching closing tag.
pub fn next_elem_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let tag = to_lower(tag);
    let close = join!("</", &tag);

    // locate the opening tag
    let mut start = None;
    let mut i = from;
    while let Some(off) = lc.get(i..)?.find('<') {
        let at = i + off;
        if is_open_at(&lc, at, &tag) {
            start = Some(at);
            break;
        }
        i = at + 1;
    }
    let start = start?;
    let mut pos = s[start..].find('>')? + start + 1;
    let mut depth = 1usize;

    // balance same-name openers/closers until the matching close
    while let Some(off) = lc.get(pos..)?.find('<') {
        let at = pos + off;
        if is_close_at(&lc, at, &close) {
            let gt = s[at..].find('>')? + at + 1;
            depth -= 1;
            if depth == 0 {
                return Some((start, gt));
            }
            pos = gt;
        } else if is_open_at(&lc, at, &tag) {
            // skip self-closing openers like <td/>
            let gt = s[at..].find('>')? + at + 1;
            if !s[at..gt].trim_end_matches('>').ends_with('/') {
                depth += 1;
            }
            pos = gt;
        } else {
            pos = at + 1;
        }
    }
    None
}

/// Pull an attribute value out of an opening tag, quoted or bare.
pub fn attr_ci(opener: &str, name: &str) -> Option<String> {
    let lc = to_lower(opener);
    let pat = join!(&to_lower(name), "=");
    let mut from = 0usize;
    loop {
        let p = lc.get(from..)?.find(&pat)? + from;
        // require a boundary so e.g. data-href= never matches href=
        let bounded = p == 0 || !lc.as_bytes()[p - 1].is_ascii_alphanumeric();
        if !bounded {
            from = p + pat.len();
            continue;
        }
        let val = opener[p + pat.len()..].trim_start();
        let (quote, off) = match val.as_bytes().first() {
            Some(b'"') => ('"', 1),
            Some(b'\'') => ('\'', 1),
            _ => ('\0', 0),
        };
        let end = if quote != '\0' {
            val[off..].find(quote).map(|e| off + e)
        } else {
            val.find(|c: char| c.is_ascii_whitespace() || c == '>')
        }
        .unwrap_or(val.len());
        return Some(val[off..end].to_string());
    }
}

/// Does this opening tag carry a `class` attribute containing `needle`?
pub fn has_class(opener: &str, needle: &str) -> bool {
    match attr_ci(opener, "class") {
        Some(v) => v
            .split_ascii_whitespace()
            .any(|c| c.eq_ignore_ascii_case(needle)),
        None => false,
    }
}

/// The opening tag of a block returned by the finders above.
pub fn opener_of(block: &str) -> &str {
    match block.find('>') {
        Some(gt) => &block[..=gt],
        None => block,
    }
}

/// Depth-aware variant of a class-qualified block search: next `tag` block
/// whose opening tag carries `class`.
pub fn next_block_with_class_ci(
    s: &str,
    tag: &str,
    class: &str,
    from: usize,
) -> Option<(usize, usize)> {
    let mut pos = from;
    while let Some((bs, be)) = next_elem_ci(s, tag, pos) {
        if has_class(opener_of(&s[bs..be]), class) {
            return Some((bs, be));
        }
        // advance past the opener only, so nested candidates are still seen
        pos = bs + 1;
    }
    None
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return the INNER text without the wrapping tags (still may contain nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Remove all HTML tags `<...>` from the string, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Strip tags but keep the line structure of `<div class="line">` code listings:
/// tags removed, entities decoded, whitespace NOT collapsed.
pub fn strip_tags_raw(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_entities(&out).trim().to_string()
}
