//! Containment and ancestry predicates
//!
//! Side-effect free. The mutator consults these before touching any link.

use crate::arena::DomArena;
use crate::types::{NodeId, NodeType};

/// Whether a node of type `parent` may hold a child of type `child`.
///
/// Reserved node types have no containment rules of their own and accept
/// anything.
pub fn allows_child(parent: NodeType, child: NodeType) -> bool {
    match parent {
        NodeType::Attribute | NodeType::Text | NodeType::CdataSection => false,
        NodeType::Element => !matches!(child, NodeType::Attribute | NodeType::Document),
        NodeType::Document => child == NodeType::Element,
        _ => true,
    }
}

impl DomArena {
    /// True if `candidate` is a proper ancestor of `node`.
    ///
    /// Walks parent links upward from `node`, so the cost is bounded by the
    /// depth of `node` and no recursion is involved.
    pub fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        if !self.contains(candidate) {
            return false;
        }
        self.ancestors(node).skip(1).any(|ancestor| ancestor == candidate)
    }

    /// True iff `child`'s parent is `parent`.
    pub fn is_direct_parent(&self, parent: NodeId, child: NodeId) -> bool {
        self.contains(parent) && self.parent(child) == Some(parent)
    }
}
