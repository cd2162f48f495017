//! Catalog helpers shared by the commands.

use phrasebook::{Node, Tree, Value};
use strsim::levenshtein;

/// Interpret a command-line value: integers, floats and booleans keep their
/// type, anything else is a string.
pub fn parse_value(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        Value::from(n)
    } else if let Ok(n) = raw.parse::<f64>() {
        Value::from(n)
    } else if let Ok(b) = raw.parse::<bool>() {
        Value::from(b)
    } else {
        Value::from(raw)
    }
}

/// Parse a key=value parameter string.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// A phrase reached by walking a locale tree.
pub struct Entry<'a> {
    /// Keys joined with the separator.
    pub key: String,
    pub node: &'a Node,
}

/// Every phrase and plural value in `tree`, with nested keys joined by
/// `separator`, in key order.
pub fn flatten<'a>(tree: &'a Tree, separator: &str) -> Vec<Entry<'a>> {
    let mut entries = Vec::new();
    walk(tree, separator, None, &mut entries);
    entries
}

fn walk<'a>(tree: &'a Tree, separator: &str, prefix: Option<&str>, entries: &mut Vec<Entry<'a>>) {
    for (key, node) in tree {
        let key = match prefix {
            Some(prefix) => format!("{prefix}{separator}{key}"),
            None => key.clone(),
        };
        match node {
            Node::Map(child) if !node.is_plural() && !child.is_empty() => {
                walk(child, separator, Some(&key), entries);
            }
            _ => entries.push(Entry { key, node }),
        }
    }
}

/// Compute typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for keys <= 3 chars
/// - distance <= 2 for longer keys
/// - Limit to 3 suggestions, sorted by distance
pub fn compute_suggestions<'a>(name: &str, available: impl Iterator<Item = &'a String>) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.clone()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
