//! Flat `key=value` config-file parsing and boolean token rules.
//!
//! The file format is one pair per line, `#`-prefixed comments, unrecognized
//! keys ignored. Recognition of keys happens at the resolver; this module
//! only parses.

use std::collections::BTreeMap;

/// Parse flat `key=value` text into a map.
///
/// Lines without `=` are ignored, as are blank lines and `#` comments.
/// Keys and values are trimmed; a later duplicate key wins.
pub fn parse_properties(text: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            props.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    props
}

/// Parse a boolean token, case-insensitively.
///
/// `y`/`yes`/`true`/`1` → `Some(true)`, `n`/`no`/`false`/`0` → `Some(false)`,
/// anything else → `None` (the interactive prompt loop re-asks on `None`;
/// config-file values treat `None` as `false`).
pub fn parse_bool_token(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}
