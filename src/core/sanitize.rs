// src/core/sanitize.rs

/// Decode the handful of entities listing pages actually use, plus numeric ones.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let semi = tail.find(';').filter(|&i| i <= 10);
        let decoded = semi.and_then(|i| decode_one(&tail[1..i]).map(|c| (c, i)));
        match decoded {
            Some((ch, i)) => {
                out.push(ch);
                rest = &tail[i + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_one(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

const OPENERS: [char; 4] = ['[', '(', '（', '［'];
const CLOSERS: [char; 4] = [']', ')', '）', '］'];

/// Remove bracketed runs like `[FRI]`, `(SOLD OUT)`, `（金）`, `［追加］`.
/// Any opener pairs with the nearest following closer; no nesting.
/// An opener with no closer is kept as text.
pub fn strip_brackets(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find(OPENERS) {
        let after = &rest[open..];
        let first_len = after.chars().next().map_or(1, char::len_utf8);
        match after[first_len..].find(CLOSERS) {
            Some(close) => {
                out.push_str(&rest[..open]);
                let close_at = first_len + close;
                let close_len = after[close_at..].chars().next().map_or(1, char::len_utf8);
                rest = &after[close_at + close_len..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// First run of ASCII digits in `s`, parsed.
pub fn first_number(s: &str) -> Option<u64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
