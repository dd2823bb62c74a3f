//! URL resolution: absolute-target detection and base/relative combination.
//!
//! # Design
//! A target counts as absolute when it starts with `scheme://` or with the
//! protocol-relative `//host` form; everything else is combined with the
//! configured base URL. The join trims slashes from both sides so repeated
//! `/` never stack up at the seam, which also makes `combine` associative
//! over chained joins.

/// True if `target` should bypass base-URL combination.
///
/// Accepts `scheme://…` where the scheme is an ASCII letter followed by
/// letters, digits, `+`, `-` or `.`, and the scheme-less `//host` form.
pub fn is_absolute(target: &str) -> bool {
    let Some((prefix, _)) = target.split_once("//") else {
        return false;
    };
    if prefix.is_empty() {
        return true;
    }
    let Some(scheme) = prefix.strip_suffix(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Combine a base URL with a relative target.
///
/// An empty target yields the base unchanged; otherwise the two sides are
/// joined with exactly one `/` regardless of how many either side brought.
pub fn combine(base: &str, target: &str) -> String {
    if target.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        target.trim_start_matches('/')
    )
}
