//! # YAML Tree Builder
//!
//! Turns YAML text into [`Node`] trees using the marked event API of
//! `yaml-rust2`, so every node keeps the line its event started on.
//!
//! ## Conversion rules
//!
//! - Scalars keep their source text. Tags are ignored. A plain `~`, which is
//!   also how the parser reports an empty value, becomes the empty string.
//!   An omitted value is placed on the line of the last token before it
//!   (its key, its `-` indicator or the `---` marker).
//! - Aliases are resolved by cloning the anchored node; the clone takes the
//!   alias's line. Expansion stops with [`DocumentError::AliasExpansion`]
//!   once aliases have produced [`MAX_ALIAS_NODES`] nodes in one stream.
//! - Non-scalar mapping keys are rejected with [`DocumentError::ComplexKey`].
//! - Every document of a multi-document stream is returned, in order.

use std::collections::HashMap;
use std::path::Path;

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::error::DocumentError;
use crate::node::{Node, NodeKind};

/// Upper bound on the nodes all aliases of one stream may clone.
pub const MAX_ALIAS_NODES: usize = 10_000;

/// An open collection while its events are being consumed.
enum Frame {
    Sequence {
        line: usize,
        anchor: usize,
        items: Vec<Node>,
    },
    Mapping {
        line: usize,
        anchor: usize,
        entries: Vec<(Node, Node)>,
        pending_key: Option<Node>,
    },
}

struct TreeBuilder<'s> {
    src: &'s str,
    stack: Vec<Frame>,
    documents: Vec<Node>,
    anchors: HashMap<usize, Node>,
    alias_nodes: usize,
    error: Option<DocumentError>,
}

impl<'s> TreeBuilder<'s> {
    fn new(src: &'s str) -> Self {
        Self {
            src,
            stack: Vec::new(),
            documents: Vec::new(),
            anchors: HashMap::new(),
            alias_nodes: 0,
            error: None,
        }
    }

    fn fail(&mut self, error: DocumentError) {
        self.error.get_or_insert(error);
    }

    fn remember(&mut self, anchor: usize, node: &Node) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
    }

    /// Attach a finished node to the innermost open collection, or make it
    /// a document root when nothing is open.
    fn attach(&mut self, node: Node) {
        let complex_key_line = match self.stack.last_mut() {
            None => {
                self.documents.push(node);
                None
            }
            Some(Frame::Sequence { items, .. }) => {
                items.push(node);
                None
            }
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                Some(key) => {
                    entries.push((key, node));
                    None
                }
                None if !node.is_scalar() => Some(node.line),
                None => {
                    *pending_key = Some(node);
                    None
                }
            },
        };
        if let Some(line) = complex_key_line {
            self.fail(DocumentError::ComplexKey { line });
        }
    }

    fn close(&mut self) {
        let (node, anchor) = match self.stack.pop() {
            Some(Frame::Sequence {
                line,
                anchor,
                items,
            }) => (Node::sequence(line, items), anchor),
            Some(Frame::Mapping {
                line,
                anchor,
                entries,
                ..
            }) => (Node::mapping(line, entries), anchor),
            None => return,
        };
        self.remember(anchor, &node);
        self.attach(node);
    }

    /// Line of a null scalar marked at `mark`.
    ///
    /// A written `~` is marked where it stands. An omitted value is marked
    /// at whatever token follows it, which can be several blank or comment
    /// lines further down, so it takes the line of the last token before
    /// the mark instead.
    fn null_line(&self, mark: Marker) -> usize {
        let current = mark.line();
        for (index, text) in self.src.lines().take(current).collect::<Vec<_>>().into_iter().enumerate().rev() {
            let number = index + 1;
            let text = if number == current {
                let mut chars = text.char_indices().skip(mark.col());
                match chars.next() {
                    Some((_, '~')) => return current,
                    Some((end, _)) => &text[..end],
                    None => text,
                }
            } else {
                text
            };
            let text = text.trim();
            if !text.is_empty() && !text.starts_with('#') {
                return number;
            }
        }
        current
    }

    fn resolve_alias(&mut self, id: usize, line: usize) {
        let Some(anchored) = self.anchors.get(&id) else {
            self.fail(DocumentError::UnknownAlias { line });
            return;
        };
        self.alias_nodes += node_count(anchored);
        if self.alias_nodes > MAX_ALIAS_NODES {
            self.fail(DocumentError::AliasExpansion { line });
            return;
        }
        let mut node = anchored.clone();
        node.line = line;
        self.attach(node);
    }

    fn finish(self) -> Result<Vec<Node>, DocumentError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.documents),
        }
    }
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        let line = mark.line();
        match ev {
            Event::Scalar(value, style, anchor, ..) => {
                let node = if style == TScalarStyle::Plain && (value.is_empty() || value == "~") {
                    Node::scalar(self.null_line(mark), String::new())
                } else {
                    Node::scalar(line, value)
                };
                self.remember(anchor, &node);
                self.attach(node);
            }
            Event::SequenceStart(anchor, ..) => self.stack.push(Frame::Sequence {
                line,
                anchor,
                items: Vec::new(),
            }),
            Event::MappingStart(anchor, ..) => self.stack.push(Frame::Mapping {
                line,
                anchor,
                entries: Vec::new(),
                pending_key: None,
            }),
            Event::SequenceEnd | Event::MappingEnd => self.close(),
            Event::Alias(id) => self.resolve_alias(id, line),
            _ => {}
        }
    }
}

fn node_count(node: &Node) -> usize {
    match &node.kind {
        NodeKind::Scalar(_) => 1,
        NodeKind::Mapping(entries) => {
            1 + entries
                .iter()
                .map(|(key, value)| node_count(key) + node_count(value))
                .sum::<usize>()
        }
        NodeKind::Sequence(items) => 1 + items.iter().map(node_count).sum::<usize>(),
    }
}

/// Parse YAML text into one tree per document.
///
/// # Errors
///
/// Returns [`DocumentError::Syntax`] when the text is not valid YAML, and
/// [`DocumentError::ComplexKey`], [`DocumentError::UnknownAlias`] or
/// [`DocumentError::AliasExpansion`] when it is valid YAML that cannot be
/// represented as a [`Node`] tree.
pub fn parse_documents(src: &str) -> Result<Vec<Node>, DocumentError> {
    let mut builder = TreeBuilder::new(src);
    let mut parser = Parser::new(src.chars());
    parser
        .load(&mut builder, true)
        .map_err(|e| DocumentError::Syntax {
            line: e.marker().line(),
            reason: e.info().to_string(),
        })?;
    builder.finish()
}

/// Read a manifest from disk and parse it.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] if the file cannot be read; otherwise
/// the errors of [`parse_documents`]. Non-UTF-8 content is a syntax error.
pub fn load_file(path: &Path) -> Result<Vec<Node>, DocumentError> {
    let bytes = std::fs::read(path).map_err(|source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| DocumentError::Syntax {
        line: 0,
        reason: format!("input is not UTF-8: {e}"),
    })?;
    let documents = parse_documents(&text)?;
    tracing::debug!(
        path = %path.display(),
        documents = documents.len(),
        "parsed manifest"
    );
    Ok(documents)
}
