//! Element tree consumed by the renderer.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. The tree is never mutated while rendering; per-node render
//! state is kept in a separate cache keyed by the same ids.

use std::collections::BTreeMap;

use crate::error::{ConversionError, Result};

/// Stable identity of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with a lowercase tag name and its attributes.
    Element {
        /// Lowercase tag name.
        tag: String,
        /// Attribute values by name.
        attrs: BTreeMap<String, String>,
    },
    /// Character data.
    Text(String),
    /// A CDATA section.
    CData(String),
}

/// A node in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Element, text or CDATA payload.
    pub kind: NodeKind,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Parent element, `None` for the root and detached nodes.
    pub parent: Option<NodeId>,
}

impl Node {
    /// Tag name when this node is an element.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) | NodeKind::CData(_) => None,
        }
    }
}

/// An element tree addressed by [`NodeId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse HTML markup into a document.
    ///
    /// The markup goes through html5ever, so fragments are wrapped in
    /// `html`/`head`/`body` the way a browser would; the `html` element
    /// becomes the root. Comments, doctypes and processing instructions are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Io`] if the markup cannot be read and
    /// [`ConversionError::ParseError`] if it yields no root element.
    pub fn parse(html: &str) -> Result<Self> {
        use html5ever::tendril::TendrilSink;
        use markup5ever_rcdom::RcDom;

        let dom = html5ever::parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Self::new();
        document.copy_rcdom(&dom.document);

        if document.root.is_none() {
            return Err(ConversionError::ParseError("document has no root element".to_string()));
        }
        log::trace!("parsed {} bytes into {} nodes", html.len(), document.len());
        Ok(document)
    }

    fn copy_rcdom(&mut self, document: &markup5ever_rcdom::Handle) {
        use markup5ever_rcdom::NodeData;

        let mut stack: Vec<(markup5ever_rcdom::Handle, Option<NodeId>)> = document
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), None))
            .collect();

        while let Some((handle, parent)) = stack.pop() {
            let id = match &handle.data {
                NodeData::Element { name, attrs, .. } => {
                    let attrs = attrs
                        .borrow()
                        .iter()
                        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                        .collect();
                    self.push(parent, NodeKind::Element {
                        tag: name.local.as_ref().to_ascii_lowercase(),
                        attrs,
                    })
                }
                NodeData::Text { contents } => {
                    if let Some(parent) = parent {
                        self.push(Some(parent), NodeKind::Text(contents.borrow().to_string()));
                    }
                    continue;
                }
                _ => continue,
            };

            for child in handle.children.borrow().iter().rev() {
                stack.push((child.clone(), Some(id)));
            }
        }
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let is_element = matches!(kind, NodeKind::Element { .. });
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
            parent,
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None if is_element && self.root.is_none() => self.root = Some(id),
            None => {}
        }
        id
    }

    /// Append an element under `parent`, or create a detached element when
    /// `parent` is `None`. The first detached element becomes the root.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn element(&mut self, parent: Option<NodeId>, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let attrs = attrs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        self.push(parent, NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attrs,
        })
    }

    /// Append a text node under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(Some(parent), NodeKind::Text(text.to_string()))
    }

    /// Append a CDATA section under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn cdata(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(Some(parent), NodeKind::CData(text.to_string()))
    }

    /// The root element.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Children of a node, empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::tag_name)
    }

    /// Find the first element with `tag` in document order.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            if self.tag_name(id) == Some(tag) {
                return Some(id);
            }
            stack.extend(self.children(id).iter().rev());
        }
        None
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
