//! Backtick identifier quoting.
//!
//! The dialect quotes identifiers MySQL-style: `` `name` `` and
//! `` `table`.`column` ``, escaping embedded backticks by doubling them.
//! Unquoted parts are considered "plain" when they match
//! `[A-Za-z_][A-Za-z0-9_$]*`; anything else (expressions, `AS` aliases,
//! function calls) is passed through untouched by [`projection_item`].

/// True when `s` is a bare identifier needing no more than quoting.
pub(crate) fn is_plain_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric())
}

/// Quote a single identifier part: `` name -> `name` ``.
pub(crate) fn quote_part(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push('`');
        }
        out.push(ch);
    }
    out.push('`');
    out
}

/// Quote a possibly dotted path: `` a.b -> `a`.`b` ``. A bare `*` part is
/// left as-is so `t.*` renders usefully.
pub(crate) fn quote_path(path: &str) -> String {
    let mut out = String::new();
    for (i, part) in path.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        if part == "*" {
            out.push('*');
        } else {
            out.push_str(&quote_part(part));
        }
    }
    out
}

/// Render one projection entry: plain identifiers and dotted paths are
/// quoted, anything else is treated as a caller-supplied expression.
pub(crate) fn projection_item(item: &str) -> String {
    let quotable = item
        .split('.')
        .all(|part| part == "*" || is_plain_ident(part));
    if quotable {
        quote_path(item)
    } else {
        item.to_string()
    }
}
