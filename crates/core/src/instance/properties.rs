//! Parsers for the two on-disk property layouts
//!
//! Both layouts are line based: `key=value` pairs, `#` comments, and (for the
//! aggregate layout) `[section]` headers.

use std::collections::BTreeMap;

/// Flat `key=value` pairs of one section.
pub type Properties = BTreeMap<String, String>;

/// Parse a flat properties file (one instance per file).
///
/// Comment lines and lines without `=` are skipped. Keys and values are
/// trimmed and only the first `=` splits, so values may contain `=`.
pub fn parse_properties(contents: &str) -> Properties {
    contents.lines().filter_map(parse_pair).collect()
}

/// Parse an aggregate file of `[name]` sections.
///
/// Pairs before the first header belong to no section and are dropped. A
/// repeated header starts the section over.
pub fn parse_sections(contents: &str) -> BTreeMap<String, Properties> {
    let mut sections = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in contents.lines() {
        if line.starts_with('[') {
            let name = line.trim_matches(|c: char| c == '[' || c == ']' || c.is_whitespace());
            sections.insert(name.to_string(), Properties::new());
            current = Some(name.to_string());
            continue;
        }

        let Some(section) = current.as_ref().and_then(|name| sections.get_mut(name)) else {
            continue;
        };
        if let Some((key, value)) = parse_pair(line) {
            section.insert(key, value);
        }
    }

    sections
}

fn parse_pair(line: &str) -> Option<(String, String)> {
    if line.trim_start().starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}
