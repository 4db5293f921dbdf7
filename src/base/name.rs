//! Qualified-name helpers.
//!
//! Names are dotted paths such as `java.util.Map.Entry`. Nothing here
//! knows which segments are packages and which are types.

use smol_str::SmolStr;

/// Separator between the segments of a qualified name.
pub const SEPARATOR: char = '.';

/// Join an optional qualifier and a name: `qualify(Some("a.b"), "C")` is `a.b.C`.
pub fn qualify(qualifier: Option<&str>, name: &str) -> SmolStr {
    match qualifier {
        Some(q) if !q.is_empty() => SmolStr::from(format!("{q}{SEPARATOR}{name}")),
        _ => SmolStr::new(name),
    }
}

/// Split off the trailing segment: `a.b.C` becomes `(Some("a.b"), "C")`.
pub fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once(SEPARATOR) {
        Some((qualifier, simple)) => (Some(qualifier), simple),
        None => (None, name),
    }
}

/// The trailing segment of a qualified name.
pub fn simple_name(name: &str) -> &str {
    split_qualified(name).1
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character, unless the first two characters are
/// unchanged by upper-casing (`URL` and `A1` stay, `Name` becomes `name`).
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let is_upper = |c: char| c.to_uppercase().eq(std::iter::once(c));
    if chars.clone().next().is_some_and(|second| is_upper(first) && is_upper(second)) {
        return s.to_string();
    }
    first.to_lowercase().chain(chars).collect()
}
