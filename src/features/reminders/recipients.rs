//! Recipient clause parsing
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.0.0: Extracted from the remind handler

use std::collections::HashSet;

/// Parse the free-text recipient clause of a remind request into a
/// deduplicated set of identifiers.
///
/// The clause arrives as captured by the command grammar, e.g.
/// `"me, bob and self"` or `"me and you and self"`. The word `and` and the
/// comma both act as separators, and a capture can carry one trailing
/// `" and "` artifact which is dropped. A fragment left over from splitting
/// that consists of the bare separator word is kept as the literal
/// identifier `and` — someone can genuinely be called that.
///
/// Output order is unspecified; callers may only rely on every named
/// recipient being present exactly once.
pub fn parse_recipients(ids: &str) -> HashSet<String> {
    let text = ids.strip_suffix(" and ").unwrap_or(ids);

    let fragments: Vec<&str> = if !text.contains(',') {
        text.split(" and ").collect()
    } else {
        let mut fragments = Vec::new();
        for part in text.split(',') {
            if part.contains(" and ") {
                fragments.extend(part.split(" and "));
            } else {
                fragments.push(part);
            }
        }
        fragments
    };

    fragments
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}
