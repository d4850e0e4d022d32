//! DOM Tree (arena-based allocation)
//!
//! A concrete document model for the traversal stack. Nodes live in one
//! `Vec` and refer to each other by [`NodeId`]; [`NodeRef`] pairs an id with
//! the tree so it can be handed to a [`DomStack`](crate::DomStack).

use std::fmt;

use crate::interner::{
    CDATA_NAME, COMMENT_NAME, DOCUMENT_NAME, FRAGMENT_NAME, TEXT_NAME,
};
use crate::{ChildList, DomNode, InternedString, NodeType, StringInterner};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root document node
    pub const ROOT: NodeId = NodeId(0);
    /// No node
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM Node
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// Node name (tag, attribute name, target, or a `#` name)
    pub name: InternedString,
    /// Node-specific data
    pub data: NodeData,
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    Document {
        children: Vec<NodeId>,
    },
    Element {
        attributes: Vec<NodeId>,
        children: Vec<NodeId>,
    },
    Attribute {
        value: String,
    },
    Text(String),
    CDataSection(String),
    Comment(String),
    Notation {
        public_id: String,
        system_id: String,
    },
    DocumentFragment,
    EntityReference,
    Entity {
        value: String,
    },
    ProcessingInstruction {
        data: String,
        attributes: Vec<NodeId>,
    },
    DocumentType {
        entities: Vec<NodeId>,
        notations: Vec<NodeId>,
    },
}

impl NodeData {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeData::Document { .. } => NodeType::Document,
            NodeData::Element { .. } => NodeType::Element,
            NodeData::Attribute { .. } => NodeType::Attribute,
            NodeData::Text(_) => NodeType::Text,
            NodeData::CDataSection(_) => NodeType::CDataSection,
            NodeData::Comment(_) => NodeType::Comment,
            NodeData::Notation { .. } => NodeType::Notation,
            NodeData::DocumentFragment => NodeType::DocumentFragment,
            NodeData::EntityReference => NodeType::EntityReference,
            NodeData::Entity { .. } => NodeType::Entity,
            NodeData::ProcessingInstruction { .. } => NodeType::ProcessingInstruction,
            NodeData::DocumentType { .. } => NodeType::DocumentType,
        }
    }

    /// Get one of the node's child lists
    pub fn list(&self, list: ChildList) -> Option<&[NodeId]> {
        match (self, list) {
            (NodeData::Document { children }, ChildList::Children)
            | (NodeData::Element { children, .. }, ChildList::Children) => Some(children),
            (NodeData::Element { attributes, .. }, ChildList::Attributes)
            | (NodeData::ProcessingInstruction { attributes, .. }, ChildList::Attributes) => {
                Some(attributes)
            }
            (NodeData::DocumentType { entities, .. }, ChildList::Entities) => Some(entities),
            (NodeData::DocumentType { notations, .. }, ChildList::Notations) => Some(notations),
            _ => None,
        }
    }

    fn list_mut(&mut self, list: ChildList) -> Option<&mut Vec<NodeId>> {
        match (self, list) {
            (NodeData::Document { children }, ChildList::Children)
            | (NodeData::Element { children, .. }, ChildList::Children) => Some(children),
            (NodeData::Element { attributes, .. }, ChildList::Attributes)
            | (NodeData::ProcessingInstruction { attributes, .. }, ChildList::Attributes) => {
                Some(attributes)
            }
            (NodeData::DocumentType { entities, .. }, ChildList::Entities) => Some(entities),
            (NodeData::DocumentType { notations, .. }, ChildList::Notations) => Some(notations),
            _ => None,
        }
    }

    /// Character data of text-like nodes and values of attributes/entities
    pub fn value(&self) -> Option<&str> {
        match self {
            NodeData::Attribute { value } | NodeData::Entity { value } => Some(value),
            NodeData::Text(s) | NodeData::CDataSection(s) | NodeData::Comment(s) => Some(s),
            NodeData::ProcessingInstruction { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Arena-based DOM tree
///
/// Created with a document node at [`NodeId::ROOT`].
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(64),
            interner: StringInterner::new(),
        };
        tree.alloc(DOCUMENT_NAME, NodeData::Document { children: Vec::new() });
        tree
    }

    fn alloc(&mut self, name: &str, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let name = self.interner.intern(name);
        self.nodes.push(Node {
            parent: NodeId::NONE,
            name,
            data,
        });
        id
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(
            tag,
            NodeData::Element {
                attributes: Vec::new(),
                children: Vec::new(),
            },
        )
    }

    pub fn create_attribute(&mut self, name: &str, value: &str) -> NodeId {
        self.alloc(name, NodeData::Attribute { value: value.to_string() })
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(TEXT_NAME, NodeData::Text(content.to_string()))
    }

    pub fn create_cdata(&mut self, content: &str) -> NodeId {
        self.alloc(CDATA_NAME, NodeData::CDataSection(content.to_string()))
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.alloc(COMMENT_NAME, NodeData::Comment(content.to_string()))
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(FRAGMENT_NAME, NodeData::DocumentFragment)
    }

    pub fn create_entity_reference(&mut self, name: &str) -> NodeId {
        self.alloc(name, NodeData::EntityReference)
    }

    pub fn create_processing_instruction(&mut self, target: &str, data: &str) -> NodeId {
        self.alloc(
            target,
            NodeData::ProcessingInstruction {
                data: data.to_string(),
                attributes: Vec::new(),
            },
        )
    }

    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.alloc(
            name,
            NodeData::DocumentType {
                entities: Vec::new(),
                notations: Vec::new(),
            },
        )
    }

    pub fn create_entity(&mut self, name: &str, value: &str) -> NodeId {
        self.alloc(name, NodeData::Entity { value: value.to_string() })
    }

    pub fn create_notation(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.alloc(
            name,
            NodeData::Notation {
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            },
        )
    }

    /// Append `child` to one of `parent`'s child lists
    ///
    /// Returns false if either id is unknown or `parent` has no such list.
    pub fn append(&mut self, parent: NodeId, list: ChildList, child: NodeId) -> bool {
        if child.index() >= self.nodes.len() {
            return false;
        }
        let Some(entries) = self
            .nodes
            .get_mut(parent.index())
            .and_then(|node| node.data.list_mut(list))
        else {
            return false;
        };
        entries.push(child);
        self.nodes[child.index()].parent = parent;
        true
    }

    /// Append a child node
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.append(parent, ChildList::Children, child)
    }

    /// Create an attribute node and attach it to `owner`
    pub fn set_attribute(&mut self, owner: NodeId, name: &str, value: &str) -> NodeId {
        let attr = self.create_attribute(name, value);
        self.append(owner, ChildList::Attributes, attr);
        attr
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Name of a node, empty for unknown ids
    pub fn name(&self, id: NodeId) -> &str {
        self.get(id).map(|node| self.interner.get(node.name)).unwrap_or("")
    }

    /// Handle for `id`, if the id belongs to this tree
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.get(id).map(|_| NodeRef { tree: self, id })
    }

    /// Handle for the document node
    pub fn document(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed handle to a node of a [`DomTree`]
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a DomTree {
        self.tree
    }

    pub fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.index()].data
    }

    pub fn name(&self) -> &'a str {
        self.tree.name(self.id)
    }

    pub fn value(&self) -> Option<&'a str> {
        self.data().value()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("type", &self.data().node_type())
            .field("name", &self.name())
            .finish()
    }
}

impl DomNode for NodeRef<'_> {
    #[inline]
    fn node_type(&self) -> NodeType {
        self.data().node_type()
    }

    fn node_name(&self) -> &str {
        self.name()
    }

    fn child_at(&self, list: ChildList, index: usize) -> Option<Self> {
        let id = *self.data().list(list)?.get(index)?;
        self.tree.node(id)
    }

    fn has_child_at(&self, list: ChildList, index: usize) -> bool {
        self.data().list(list).is_some_and(|ids| index < ids.len())
    }
}
