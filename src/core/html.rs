// src/core/html.rs
//
// Tolerant, case-insensitive tag scanning. No DOM; good enough for listing pages.

use super::sanitize::{decode_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// True when `lc[at..]` starts an opening tag named `name` (`<li>`, `<li class=..`, `<li/>`).
fn opens_tag(lc: &str, at: usize, name: &str) -> bool {
    let rest = &lc[at..];
    if !rest.starts_with('<') || !rest[1..].starts_with(name) {
        return false;
    }
    matches!(
        rest.as_bytes().get(1 + name.len()),
        Some(b' ' | b'\t' | b'\r' | b'\n' | b'>' | b'/')
    )
}

/// Find the balanced `<name ...>...</name>` block starting at or after `from`.
/// Nested blocks of the same tag are counted, so the outer close is returned.
/// An unclosed block runs to the end of `s`.
pub fn next_tag_block_ci(s: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    block_in_lower(&to_lower(s), &to_lower(name), from)
}

// `lc` is already lowercased; ASCII lowering keeps byte offsets intact.
fn block_in_lower(lc: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let open_pat = format!("<{name}");
    let close_pat = format!("</{name}");

    let mut search = from;
    let start = loop {
        let p = lc.get(search..)?.find(&open_pat)? + search;
        if opens_tag(lc, p, name) { break p; }
        search = p + 1;
    };

    let mut depth = 0usize;
    let mut i = start;
    while i < lc.len() {
        let next_open = lc[i..].find(&open_pat).map(|p| p + i);
        let next_close = lc[i..].find(&close_pat).map(|p| p + i);
        match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => {
                if opens_tag(lc, o, name) { depth += 1; }
                i = o + 1;
            }
            (_, Some(c)) => {
                depth = depth.saturating_sub(1);
                let end = lc[c..].find('>').map(|g| c + g + 1).unwrap_or(lc.len());
                if depth == 0 { return Some((start, end)); }
                i = end;
            }
            (_, None) => return Some((start, lc.len())),
        }
    }
    Some((start, lc.len()))
}

/// Byte ranges of every `<name>` block in document order, including nested ones.
pub fn tag_block_ranges(s: &str, name: &str) -> Vec<(usize, usize)> {
    let lc = to_lower(s);
    let name = to_lower(name);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b, e)) = block_in_lower(&lc, &name, pos) {
        out.push((b, e));
        // step inside the block so nested blocks are visited too
        pos = b + 1;
    }
    out
}

/// The opening tag text of a block: `<li class="x">`.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(gt) => &block[..=gt],
        None => block,
    }
}

/// Attribute value from an opening tag (quoted or bare).
pub fn attr(open: &str, name: &str) -> Option<String> {
    let lc = to_lower(open);
    let needle = format!("{}=", to_lower(name));
    let mut from = 0usize;
    let at = loop {
        let p = lc[from..].find(&needle)? + from;
        // require a word boundary so `data-class=` does not match `class=`
        let boundary = p == 0 || matches!(lc.as_bytes()[p - 1], b' ' | b'\t' | b'\n' | b'\r');
        if boundary { break p + needle.len(); }
        from = p + 1;
    };
    let val = &open[at..];
    let (quote, start) = match val.as_bytes().first() {
        Some(b'"') => (Some('"'), 1),
        Some(b'\'') => (Some('\''), 1),
        _ => (None, 0),
    };
    let end = match quote {
        Some(q) => val[start..].find(q).map(|e| start + e),
        None => val.find(|c: char| c.is_ascii_whitespace() || c == '>'),
    }
    .unwrap_or(val.len());
    Some(decode_entities(&val[start..end]))
}

/// Visible text: tags dropped, entities decoded, whitespace collapsed.
/// Adjacent elements are separated by a space (`get_text(" ")` semantics).
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => { in_tag = true; out.push(' '); }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&out))
}
