//! Pure string transforms that normalize raw symbol names into canonical
//! asset keys and generated file names. None of these functions have side
//! effects; all canonicalization policy (which transforms run, with which
//! marker tokens) lives in [`crate::CategoryProfile`].

/// Strip exactly one leading `"{prefix}_"` occurrence, case-insensitively.
///
/// Unrelated names are returned unchanged. The bare prefix without a trailing
/// underscore is not stripped; the separator is part of the match.
pub fn strip_library_prefix(name: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return name.to_string();
    }
    let sep_len = prefix.len() + 1;
    if name.len() > sep_len
        && name.is_char_boundary(prefix.len())
        && name.is_char_boundary(sep_len)
        && name[..prefix.len()].eq_ignore_ascii_case(prefix)
        && name.as_bytes()[prefix.len()] == b'_'
    {
        return name[sep_len..].to_string();
    }
    name.to_string()
}

/// Collapse an immediately-repeated first segment: `"a_a_b"` -> `"a_b"`.
///
/// Only the first segment is considered, and only a single repetition is
/// removed. Names without a repeated head are returned unchanged.
pub fn collapse_repeated_prefix(name: &str) -> String {
    let mut parts = name.split('_');
    let (Some(first), Some(second)) = (parts.next(), parts.next()) else {
        return name.to_string();
    };
    if first.is_empty() || !first.eq_ignore_ascii_case(second) {
        return name.to_string();
    }
    let mut out = first.to_string();
    for part in parts {
        out.push('_');
        out.push_str(part);
    }
    out
}

/// Force marker tokens to uppercase wherever they appear as an `_`-delimited
/// segment of `name`. Markers are matched case-insensitively.
pub fn uppercase_markers(name: &str, markers: &[&str]) -> String {
    name.split('_')
        .map(|seg| {
            if markers.iter().any(|m| seg.eq_ignore_ascii_case(m)) {
                seg.to_ascii_uppercase()
            } else {
                seg.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Underscore-separated lowercase form used for generated file names.
///
/// Whitespace and `-` become `_`; any other non-alphanumeric character is
/// dropped; runs of separators collapse to one underscore.
pub fn file_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Canonical asset key: library prefix stripped, optionally collapsed,
/// lowercased. Keys are unique case-insensitively within one item, which the
/// lowercase form makes structural.
pub fn canonical_key(raw: &str, prefix: Option<&str>, collapse: bool) -> String {
    let stripped = match prefix {
        Some(p) => strip_library_prefix(raw, p),
        None => raw.to_string(),
    };
    let collapsed = if collapse {
        collapse_repeated_prefix(&stripped)
    } else {
        stripped
    };
    collapsed.to_ascii_lowercase()
}

#[cfg(test)]
#[path = "../../tests/unit/symbols/canon.rs"]
mod tests;
