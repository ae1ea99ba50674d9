//! # Document Tree
//!
//! The parsed, line-annotated representation of a manifest. Nodes are
//! produced once by the tree builder and are read-only afterwards.

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// 1-based source line the node starts on.
    pub line: usize,
    /// Payload of the node.
    pub kind: NodeKind,
}

/// Kind tag and children of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf value, kept as its source text.
    Scalar(String),
    /// Ordered key/value pairs. Keys are always scalars.
    Mapping(Vec<(Node, Node)>),
    /// Ordered child nodes.
    Sequence(Vec<Node>),
}

impl Node {
    /// Build a scalar node.
    pub fn scalar(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            kind: NodeKind::Scalar(text.into()),
        }
    }

    /// Build a mapping node from key/value pairs.
    pub fn mapping(line: usize, entries: Vec<(Node, Node)>) -> Self {
        Self {
            line,
            kind: NodeKind::Mapping(entries),
        }
    }

    /// Build a sequence node.
    pub fn sequence(line: usize, items: Vec<Node>) -> Self {
        Self {
            line,
            kind: NodeKind::Sequence(items),
        }
    }

    /// Scalar text, or `None` for mappings and sequences.
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Key/value pairs of a mapping, or `None`.
    pub fn as_mapping(&self) -> Option<&[(Node, Node)]> {
        match &self.kind {
            NodeKind::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Children of a sequence, or `None`.
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, NodeKind::Scalar(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self.kind, NodeKind::Mapping(_))
    }

    /// Lowercase name of the node kind, for log output.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Scalar(_) => "scalar",
            NodeKind::Mapping(_) => "mapping",
            NodeKind::Sequence(_) => "sequence",
        }
    }
}
