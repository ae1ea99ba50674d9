//! # Field Lookup
//!
//! Flattens a mapping node into a by-key lookup that every schema level
//! uses, so fields can be fetched in any order regardless of how the author
//! wrote them.
//!
//! Iteration follows encounter order. A repeated key is not diagnosed: the
//! last value wins and the entry stays where the key first appeared.

use indexmap::IndexMap;

use podcheck_core::Node;

/// One key/value entry of a mapping.
#[derive(Debug, Clone, Copy)]
pub struct Field<'n> {
    /// Key text.
    pub key: &'n str,
    /// Line of the key itself.
    pub key_line: usize,
    /// The value node.
    pub value: &'n Node,
}

/// Key lookup over a mapping node.
#[derive(Debug, Default)]
pub struct Fields<'n> {
    map: IndexMap<&'n str, Field<'n>>,
}

impl<'n> Fields<'n> {
    /// Index the entries of `node`. Anything other than a mapping yields an
    /// empty lookup.
    pub fn of(node: &'n Node) -> Self {
        let mut map = IndexMap::new();
        for (key, value) in node.as_mapping().unwrap_or_default() {
            if let Some(text) = key.as_scalar() {
                map.insert(
                    text,
                    Field {
                        key: text,
                        key_line: key.line,
                        value,
                    },
                );
            }
        }
        Self { map }
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&'n Node> {
        self.map.get(key).map(|f| f.value)
    }

    /// Entries in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &Field<'n>> + '_ {
        self.map.values()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
