//! Owned, mutable markup tree.
//!
//! Documents are parsed with `tl` and copied into an arena so that nodes can
//! be renamed, detached and serialized after the parser's borrow ends.
//!
//! # Module Structure
//!
//! - [`attrs`]: Ordered attribute list
//! - [`parse`]: `tl` -> arena conversion
//! - [`render`]: JSX serialization

mod attrs;
mod parse;
mod render;

pub use attrs::Attributes;

/// Index of a node inside its [`Document`].
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(Element),
    /// Markup text, escaped on output.
    Text(String),
    Comment(String),
    /// Emitted as-is (already valid in the output language).
    Verbatim(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    /// Lower-cased for parsed elements.
    pub name: String,
    pub attrs: Attributes,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document tree.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl Document {
    /// Parse markup text into a document.
    pub fn parse(html: &str) -> Result<Self, tl::ParseError> {
        parse::parse_document(html)
    }

    pub(crate) fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(NodeData {
            kind,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Create an element that is not yet attached anywhere.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(NodeData {
            kind: NodeKind::Element(Element {
                name: name.to_string(),
                attrs: Attributes::new(),
            }),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append a detached verbatim node to `parent`.
    pub fn append_verbatim(&mut self, parent: NodeId, content: impl Into<String>) -> NodeId {
        self.push(NodeKind::Verbatim(content.into()), Some(parent))
    }

    /// Move an unattached node under `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(id)?.kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    pub fn attrs(&self, id: NodeId) -> Option<&Attributes> {
        self.element(id).map(|e| &e.attrs)
    }

    /// Overwrite the whole attribute list of an element.
    pub fn set_attrs(&mut self, id: NodeId, attrs: Attributes) {
        if let Some(e) = self.element_mut(id) {
            e.attrs = attrs;
        }
    }

    /// Change the element kind, keeping attributes and children.
    pub fn rename(&mut self, id: NodeId, name: &str) {
        if let Some(e) = self.element_mut(id) {
            e.name = name.to_string();
        }
    }

    /// Remove a node (with its subtree) from the tree.
    pub fn detach(&mut self, id: NodeId) {
        match self.nodes[id].parent.take() {
            Some(p) => self.nodes[p].children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }
    }

    /// Whether the node is still reachable from a root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            match self.nodes[current].parent {
                Some(p) => current = p,
                None => return self.roots.contains(&current),
            }
        }
    }

    /// All attached elements in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.element(id).is_some() {
                out.push(id);
            }
            stack.extend(self.nodes[id].children.iter().rev());
        }
        out
    }

    /// First attached element with the given tag name (ASCII case-insensitive).
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|&id| self.tag(id).is_some_and(|t| t.eq_ignore_ascii_case(name)))
    }

    /// All attached elements with the given tag name.
    pub fn find_all(&self, name: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|&id| self.tag(id).is_some_and(|t| t.eq_ignore_ascii_case(name)))
            .collect()
    }

    /// Raw concatenated text of a node's subtree, unescaped.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(t) | NodeKind::Verbatim(t) => out.push_str(t),
            NodeKind::Comment(_) => {}
            NodeKind::Element(_) => {
                for &child in &self.nodes[id].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Serialize a node (including its own tag) as JSX.
    pub fn outer_jsx(&self, id: NodeId) -> String {
        let mut out = String::new();
        render::write_node(self, id, &mut out);
        out
    }

    /// Serialize only the children of a node as JSX.
    pub fn inner_jsx(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            render::write_node(self, child, &mut out);
        }
        out
    }
}
