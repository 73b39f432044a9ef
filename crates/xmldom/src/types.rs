//! Core type definitions for the node store
//!
//! Key design principles:
//! 1. Nodes are addressed by generational indices, never pointers
//! 2. Kind-specific data lives in the `NodeKind` payload, not in null fields
//! 3. Use SmallVec for query snapshots (most element lists are short)

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Qualified name given to every text node.
pub const TEXT_NODE_NAME: &str = "#text";

/// Qualified name given to every CDATA section node.
pub const CDATA_NODE_NAME: &str = "#cdata-section";

/// Qualified name given to every document node.
pub const DOCUMENT_NODE_NAME: &str = "#document";

/// Handle to a node slot in a [`DomArena`](crate::DomArena).
///
/// The generation changes every time a slot is reused, so a handle to a
/// freed node never aliases whatever is allocated into that slot later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the arena
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Node type matching the DOM specification's numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            5 => Some(NodeType::EntityReference),
            6 => Some(NodeType::Entity),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            12 => Some(NodeType::Notation),
            _ => None,
        }
    }

    /// Kinds that exist in the enumeration but have no tree behavior.
    pub fn is_reserved(self) -> bool {
        !matches!(
            self,
            NodeType::Element
                | NodeType::Attribute
                | NodeType::Text
                | NodeType::CdataSection
                | NodeType::Document
        )
    }
}

/// The kind of a node and its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        tag_name: String,
    },
    Attribute {
        /// True when set explicitly rather than defaulted.
        specified: bool,
        /// Element whose attribute chain holds this node.
        owner_element: Option<NodeId>,
    },
    Text,
    CdataSection,
    Document,
    EntityReference,
    Entity,
    ProcessingInstruction,
    Comment,
    DocumentType,
    DocumentFragment,
    Notation,
}

impl NodeKind {
    /// An attribute kind that is not attached to any element yet.
    pub fn attribute() -> Self {
        NodeKind::Attribute {
            specified: false,
            owner_element: None,
        }
    }

    pub fn element(tag_name: impl Into<String>) -> Self {
        NodeKind::Element {
            tag_name: tag_name.into(),
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Element { .. } => NodeType::Element,
            NodeKind::Attribute { .. } => NodeType::Attribute,
            NodeKind::Text => NodeType::Text,
            NodeKind::CdataSection => NodeType::CdataSection,
            NodeKind::Document => NodeType::Document,
            NodeKind::EntityReference => NodeType::EntityReference,
            NodeKind::Entity => NodeType::Entity,
            NodeKind::ProcessingInstruction => NodeType::ProcessingInstruction,
            NodeKind::Comment => NodeType::Comment,
            NodeKind::DocumentType => NodeType::DocumentType,
            NodeKind::DocumentFragment => NodeType::DocumentFragment,
            NodeKind::Notation => NodeType::Notation,
        }
    }

    /// Zeroed payload for a node type.
    pub fn from_type(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Element => NodeKind::element(String::new()),
            NodeType::Attribute => NodeKind::attribute(),
            NodeType::Text => NodeKind::Text,
            NodeType::CdataSection => NodeKind::CdataSection,
            NodeType::Document => NodeKind::Document,
            NodeType::EntityReference => NodeKind::EntityReference,
            NodeType::Entity => NodeKind::Entity,
            NodeType::ProcessingInstruction => NodeKind::ProcessingInstruction,
            NodeType::Comment => NodeKind::Comment,
            NodeType::DocumentType => NodeKind::DocumentType,
            NodeType::DocumentFragment => NodeKind::DocumentFragment,
            NodeType::Notation => NodeKind::Notation,
        }
    }
}

/// A single node of the document tree
///
/// Design philosophy:
/// - Strings are owned: setters copy, never alias caller buffers
/// - Links are indices; `parent` is a back-reference, the parent owns the
///   child chain through `first_child` and the siblings' `next_sibling`
/// - Attributes are chained through the sibling links but hang off
///   `first_attr`, never off `first_child`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomNode {
    pub kind: NodeKind,

    // Naming
    pub name: Option<String>,
    pub value: Option<String>,
    pub namespace_uri: Option<String>,
    pub prefix: Option<String>,
    pub local_name: Option<String>,

    // Navigation
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub first_attr: Option<NodeId>,
    pub owner_document: Option<NodeId>,

    /// Opaque caller tag, e.g. a key into a binding layer's own table.
    /// Never copied by clones; handed to the pre-free callback.
    pub user_tag: Option<u64>,
}

impl DomNode {
    /// A node with every field absent.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            name: None,
            value: None,
            namespace_uri: None,
            prefix: None,
            local_name: None,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            prev_sibling: None,
            first_attr: None,
            owner_document: None,
            user_tag: None,
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag_name } => Some(tag_name),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self.kind, NodeKind::Attribute { .. })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }
}

/// Point-in-time snapshot of node handles.
pub type NodeList = SmallVec<[NodeId; 8]>;
