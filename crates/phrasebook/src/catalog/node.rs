use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A locale tree: phrase keys mapped to phrases, plural forms, or nested trees.
pub type Tree = BTreeMap<String, Node>;

/// CLDR plural category tags, in canonical order.
pub const PLURAL_CATEGORIES: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

/// A value stored in a locale tree.
///
/// Catalogs are plain JSON objects, so a node is either a string or an
/// object. An object whose entries are CLDR category tags is a plural value
/// (`{ "one": "%s cat", "other": "%s cats" }`); any other object is a nested
/// branch reachable with object notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// A plain translated phrase.
    Text(String),

    /// Plural forms or a nested branch.
    Map(Tree),
}

impl Node {
    /// Build a plural value from its `one` and `other` forms.
    pub fn plural(one: impl Into<String>, other: impl Into<String>) -> Node {
        Node::Map(Tree::from([
            ("one".to_string(), Node::Text(one.into())),
            ("other".to_string(), Node::Text(other.into())),
        ]))
    }

    /// Get this node as text, if it is a phrase.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Map(_) => None,
        }
    }

    /// Get this node as a map, if it is one.
    pub fn as_map(&self) -> Option<&Tree> {
        match self {
            Node::Map(tree) => Some(tree),
            Node::Text(_) => None,
        }
    }

    /// Whether this node counts as an existing translation.
    ///
    /// Empty text counts as missing so that blank catalog entries get seeded
    /// with their default text.
    pub fn is_present(&self) -> bool {
        match self {
            Node::Text(text) => !text.is_empty(),
            Node::Map(_) => true,
        }
    }

    /// Whether this node is a plural value: a non-empty map of category tags
    /// to text.
    pub fn is_plural(&self) -> bool {
        match self {
            Node::Map(tree) => {
                !tree.is_empty()
                    && tree.iter().all(|(key, node)| {
                        PLURAL_CATEGORIES.contains(&key.as_str()) && node.as_text().is_some()
                    })
            }
            Node::Text(_) => false,
        }
    }

    /// Text used when a phrase is requested without a count.
    ///
    /// Text nodes are returned as is. Maps yield their `one` form, then their
    /// `other` form, then empty text.
    pub fn singular_text(&self) -> &str {
        match self {
            Node::Text(text) => text,
            Node::Map(tree) => form(tree, "one")
                .or_else(|| form(tree, "other"))
                .unwrap_or_default(),
        }
    }

    /// Text for a CLDR plural category, falling back to `other`.
    ///
    /// Empty forms are skipped. A plural value with neither form renders as
    /// empty text.
    pub fn plural_form(&self, category: &str) -> &str {
        match self {
            Node::Text(text) => text,
            Node::Map(tree) => form(tree, category)
                .filter(|text| !text.is_empty())
                .or_else(|| form(tree, "other"))
                .unwrap_or_default(),
        }
    }
}

fn form<'a>(tree: &'a Tree, key: &str) -> Option<&'a str> {
    tree.get(key).and_then(Node::as_text)
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<Tree> for Node {
    fn from(tree: Tree) -> Self {
        Node::Map(tree)
    }
}
