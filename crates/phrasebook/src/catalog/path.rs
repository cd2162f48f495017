//! Reading and writing locale tree values by key path.

use std::slice;

use crate::catalog::{Catalog, Node, Tree};

/// How a phrase key addresses a locale tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPath {
    /// The whole key is a single top-level entry.
    Flat(String),
    /// The key walks nested maps, one segment per level.
    Nested(Vec<String>),
}

impl KeyPath {
    /// Interpret `key` under an optional object-notation separator.
    ///
    /// A key is nested only when the separator is set and its last
    /// occurrence is neither at the start nor at the end of the key, so
    /// `".hidden"` and `"sentence."` stay flat.
    ///
    /// ```
    /// use phrasebook::KeyPath;
    ///
    /// assert_eq!(
    ///     KeyPath::parse("menu.file.open", Some(".")),
    ///     KeyPath::Nested(vec!["menu".into(), "file".into(), "open".into()])
    /// );
    /// assert_eq!(KeyPath::parse("Hello.", Some(".")), KeyPath::Flat("Hello.".into()));
    /// assert_eq!(KeyPath::parse("a.b", None), KeyPath::Flat("a.b".into()));
    /// ```
    pub fn parse(key: &str, separator: Option<&str>) -> KeyPath {
        let Some(separator) = separator.filter(|separator| !separator.is_empty()) else {
            return KeyPath::Flat(key.to_string());
        };
        match key.rfind(separator) {
            Some(position) if position > 0 && position + separator.len() < key.len() => {
                KeyPath::Nested(key.split(separator).map(str::to_string).collect())
            }
            _ => KeyPath::Flat(key.to_string()),
        }
    }

    fn segments(&self) -> &[String] {
        match self {
            KeyPath::Flat(key) => slice::from_ref(key),
            KeyPath::Nested(segments) => segments,
        }
    }
}

/// The result of reading a key path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// A value exists at the path.
    Found(&'a Node),
    /// The walk stopped at segment `depth` (zero-based): that entry is
    /// absent, or its parent is a phrase rather than a map.
    Missing { depth: usize },
    /// The locale has no tree.
    Unloaded,
}

impl<'a> Lookup<'a> {
    /// The value found, if any.
    pub fn value(self) -> Option<&'a Node> {
        match self {
            Lookup::Found(node) => Some(node),
            Lookup::Missing { .. } | Lookup::Unloaded => None,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// How a write treats missing intermediate maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Write only if every parent map already exists.
    Probe,
    /// Create missing parents, replacing phrases that sit on the path.
    Commit,
}

/// The result of writing a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was stored.
    Written,
    /// A probe found a missing parent; the value is handed back untouched.
    Deferred(Node),
    /// The locale has no tree and nothing was written.
    Unloaded,
}

impl Catalog {
    /// Read the value at `path` without creating anything.
    pub fn lookup(&self, locale: &str, path: &KeyPath) -> Lookup<'_> {
        let Some(mut tree) = self.tree(locale) else {
            return Lookup::Unloaded;
        };
        let segments = path.segments();
        let last = segments.len() - 1;
        for (depth, segment) in segments.iter().enumerate() {
            let Some(node) = tree.get(segment) else {
                return Lookup::Missing { depth };
            };
            if depth == last {
                return Lookup::Found(node);
            }
            match node {
                Node::Map(child) => tree = child,
                Node::Text(_) => return Lookup::Missing { depth: depth + 1 },
            }
        }
        Lookup::Missing { depth: 0 }
    }

    /// Store `node` at `path` according to `mode`.
    pub fn write(&mut self, locale: &str, path: &KeyPath, node: Node, mode: WriteMode) -> WriteOutcome {
        let Some(mut tree) = self.tree_mut(locale) else {
            return WriteOutcome::Unloaded;
        };
        let Some((leaf, parents)) = path.segments().split_last() else {
            return WriteOutcome::Unloaded;
        };
        for segment in parents {
            tree = match mode {
                WriteMode::Probe => match tree.get_mut(segment) {
                    Some(Node::Map(child)) => child,
                    Some(Node::Text(_)) | None => return WriteOutcome::Deferred(node),
                },
                WriteMode::Commit => branch(tree, segment),
            };
        }
        tree.insert(leaf.clone(), node);
        WriteOutcome::Written
    }

    /// Store `node` at `path`, probing first and committing when a parent
    /// is missing. Returns `false` only when the locale is not loaded.
    pub fn assign(&mut self, locale: &str, path: &KeyPath, node: Node) -> bool {
        match self.write(locale, path, node, WriteMode::Probe) {
            WriteOutcome::Written => true,
            WriteOutcome::Deferred(node) => {
                self.write(locale, path, node, WriteMode::Commit) == WriteOutcome::Written
            }
            WriteOutcome::Unloaded => false,
        }
    }
}

/// The child map at `segment`, created or replacing a phrase as needed.
fn branch<'a>(tree: &'a mut Tree, segment: &str) -> &'a mut Tree {
    let child = tree
        .entry(segment.to_string())
        .or_insert_with(|| Node::Map(Tree::new()));
    if let Node::Text(_) = child {
        *child = Node::Map(Tree::new());
    }
    match child {
        Node::Map(map) => map,
        Node::Text(_) => unreachable!("phrase on the path was replaced by a map"),
    }
}
