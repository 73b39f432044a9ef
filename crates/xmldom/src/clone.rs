//! Node and subtree duplication
//!
//! Clones are always detached: the caller attaches them with the mutator.
//! Deep clones walk the source in pre-order through its own links and keep
//! only the chain of open ancestors on the heap, so source depth never turns
//! into call-stack depth.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeKind, NodeType, DOCUMENT_NODE_NAME};

impl DomArena {
    /// Duplicate `id`, with its descendants when `deep` is set.
    ///
    /// - Attribute: copy marked as specified, without siblings.
    /// - Element: attributes are always copied; children only when `deep`.
    /// - Text / CDATA section: name and value.
    /// - Document: a fresh document; with `deep`, every copied descendant
    ///   belongs to it.
    /// - Reserved kinds: `Ok(None)`.
    ///
    /// Non-document clones have no owner document until they are attached.
    /// If the arena runs out of room, the partial clone is freed and
    /// [`DomError::AllocationFailure`] is returned.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Result<Option<NodeId>> {
        let node_type = self.node(id)?.node_type();
        match node_type {
            NodeType::Attribute => {
                let copy = self.copy_node(id, None)?;
                if let Some(copy) = copy {
                    self.set_specified(copy, true);
                }
                Ok(copy)
            }
            t if t.is_reserved() => Ok(None),
            _ => self.clone_tree(id, deep),
        }
    }

    fn clone_tree(&mut self, src_root: NodeId, deep: bool) -> Result<Option<NodeId>> {
        let Some(root) = self.copy_with_attributes(src_root, None)? else {
            return Ok(None);
        };
        if !deep {
            return Ok(Some(root));
        }

        // Descendants of a cloned document belong to the new document
        let owner = match self.node_type(root) {
            Some(NodeType::Document) => Some(root),
            _ => None,
        };
        match self.clone_descendants(src_root, root, owner) {
            Ok(copied) => {
                tracing::trace!(source = %src_root, clone = %root, copied, "deep clone");
                Ok(Some(root))
            }
            Err(err) => {
                self.free(root);
                Err(err)
            }
        }
    }

    /// Copy every descendant of `src_root` under `root`, preserving order.
    ///
    /// Reserved-kind nodes are skipped together with their subtrees.
    fn clone_descendants(
        &mut self,
        src_root: NodeId,
        root: NodeId,
        owner: Option<NodeId>,
    ) -> Result<usize> {
        // (source, clone) for the source nodes whose subtree is being copied
        let mut open: Vec<(NodeId, NodeId)> = vec![(src_root, root)];
        let mut copied = 0;
        let mut next = self.first_child(src_root);

        while let Some(src) = next {
            let src_parent = self.parent(src);
            while open.last().is_some_and(|&(s, _)| Some(s) != src_parent) {
                open.pop();
            }
            let Some(&(_, dest_parent)) = open.last() else {
                return Err(DomError::InvalidArgument(
                    "source subtree changed during clone".to_string(),
                ));
            };

            match self.copy_with_attributes(src, owner)? {
                Some(copy) => {
                    self.link_child(dest_parent, copy, None);
                    open.push((src, copy));
                    copied += 1;
                    next = self.next_in_subtree(src_root, src);
                }
                None => next = self.next_after_subtree(src_root, src),
            }
        }

        Ok(copied)
    }

    fn copy_with_attributes(
        &mut self,
        src: NodeId,
        owner: Option<NodeId>,
    ) -> Result<Option<NodeId>> {
        let Some(copy) = self.copy_node(src, owner)? else {
            return Ok(None);
        };
        if let Err(err) = self.copy_attributes(src, copy, owner) {
            self.free(copy);
            return Err(err);
        }
        Ok(Some(copy))
    }

    fn copy_attributes(&mut self, src: NodeId, dest: NodeId, owner: Option<NodeId>) -> Result<()> {
        let mut last: Option<NodeId> = None;
        let mut attr = self.first_attr(src);
        while let Some(src_attr) = attr {
            if let Some(copy) = self.copy_node(src_attr, owner)? {
                if let Some(node) = self.get_mut(copy) {
                    node.prev_sibling = last;
                }
                self.set_owner_element(copy, Some(dest));
                let slot = match last {
                    Some(prev) => self.get_mut(prev).map(|node| &mut node.next_sibling),
                    None => self.get_mut(dest).map(|node| &mut node.first_attr),
                };
                if let Some(slot) = slot {
                    *slot = Some(copy);
                }
                last = Some(copy);
            }
            attr = self.next_sibling(src_attr);
        }
        Ok(())
    }

    /// Allocate a linkless copy of one node's fields.
    fn copy_node(&mut self, src: NodeId, owner: Option<NodeId>) -> Result<Option<NodeId>> {
        let src_node = self.node(src)?;
        let copy = match &src_node.kind {
            NodeKind::Element { tag_name } => {
                let mut copy = DomNode::new(NodeKind::element(tag_name.as_str()));
                copy_names(&mut copy, src_node);
                copy
            }
            NodeKind::Attribute { specified, .. } => {
                let mut copy = DomNode::new(NodeKind::Attribute {
                    specified: *specified,
                    owner_element: None,
                });
                copy_names(&mut copy, src_node);
                copy
            }
            NodeKind::Text | NodeKind::CdataSection => {
                let mut copy = DomNode::new(src_node.kind.clone());
                copy.name = src_node.name.clone();
                copy.value = src_node.value.clone();
                copy
            }
            NodeKind::Document => {
                let mut copy = DomNode::new(NodeKind::Document);
                copy.name = Some(DOCUMENT_NODE_NAME.to_string());
                copy
            }
            _ => return Ok(None),
        };

        let is_document = copy.node_type() == NodeType::Document;
        let id = self.alloc(copy)?;
        if let Some(node) = self.get_mut(id) {
            node.owner_document = if is_document { Some(id) } else { owner };
        }
        Ok(Some(id))
    }
}

fn copy_names(dest: &mut DomNode, src: &DomNode) {
    dest.name = src.name.clone();
    dest.value = src.value.clone();
    dest.namespace_uri = src.namespace_uri.clone();
    dest.prefix = src.prefix.clone();
    dest.local_name = src.local_name.clone();
}
