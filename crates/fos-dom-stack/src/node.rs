//! Node types and the accessor contract the stack walks through
//!
//! The stack never owns a tree. It only needs to know a node's type, its
//! name, and how to reach the children in each of its child lists.

/// Node type enumeration
///
/// Raw values follow the DOM `nodeType` numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Element,
    Attribute,
    Text,
    CDataSection,
    EntityReference,
    Entity,
    ProcessingInstruction,
    Comment,
    Document,
    DocumentType,
    DocumentFragment,
    Notation,
}

impl NodeType {
    /// Number of node types
    pub const COUNT: usize = 12;

    /// All node types in raw value order
    pub const ALL: [NodeType; Self::COUNT] = [
        NodeType::Element,
        NodeType::Attribute,
        NodeType::Text,
        NodeType::CDataSection,
        NodeType::EntityReference,
        NodeType::Entity,
        NodeType::ProcessingInstruction,
        NodeType::Comment,
        NodeType::Document,
        NodeType::DocumentType,
        NodeType::DocumentFragment,
        NodeType::Notation,
    ];

    pub fn from_raw(value: u32) -> Option<Self> {
        match value {
            1..=12 => Some(Self::ALL[value as usize - 1]),
            _ => None,
        }
    }

    pub fn to_raw(self) -> u32 {
        self.index() as u32 + 1
    }

    /// Slot of this type in per-type tables
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            NodeType::Element => 0,
            NodeType::Attribute => 1,
            NodeType::Text => 2,
            NodeType::CDataSection => 3,
            NodeType::EntityReference => 4,
            NodeType::Entity => 5,
            NodeType::ProcessingInstruction => 6,
            NodeType::Comment => 7,
            NodeType::Document => 8,
            NodeType::DocumentType => 9,
            NodeType::DocumentFragment => 10,
            NodeType::Notation => 11,
        }
    }

    /// Child lists of this node type, in walk order
    ///
    /// Adding a node type with children means adding a row here; the walk
    /// driver has no per-type branches.
    pub fn child_lists(self) -> &'static [ChildList] {
        match self {
            NodeType::Document => &[ChildList::Children],
            NodeType::Element => &[ChildList::Attributes, ChildList::Children],
            NodeType::ProcessingInstruction => &[ChildList::Attributes],
            NodeType::DocumentType => &[ChildList::Entities, ChildList::Notations],
            NodeType::Attribute
            | NodeType::Text
            | NodeType::CDataSection
            | NodeType::EntityReference
            | NodeType::Entity
            | NodeType::Comment
            | NodeType::DocumentFragment
            | NodeType::Notation => &[],
        }
    }
}

/// A named child collection of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildList {
    /// Child nodes
    Children,
    /// Attribute map (element attributes, processing instruction pseudo-attributes)
    Attributes,
    /// Entity declarations of a document type
    Entities,
    /// Notation declarations of a document type
    Notations,
}

/// Node handle consumed by the traversal stack
///
/// Implementors are cheap handles (references, ids, `Rc`s) into a tree the
/// caller owns. Moving a handle into [`DomStack::push`](crate::DomStack::push)
/// hands it to the stack; dropping it is how the stack destroys a node.
pub trait DomNode: Clone {
    fn node_type(&self) -> NodeType;

    /// Name used by ancestor search (tag name, attribute name, ...)
    fn node_name(&self) -> &str;

    /// Member `index` of the given child list, if there is one
    fn child_at(&self, list: ChildList, index: usize) -> Option<Self>;

    /// Whether the child list has a member at `index`
    ///
    /// False for out-of-range indexes and for lists the node does not have.
    fn has_child_at(&self, list: ChildList, index: usize) -> bool {
        self.child_at(list, index).is_some()
    }
}
