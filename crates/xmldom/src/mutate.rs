//! Tree mutation: append, insert, replace, remove
//!
//! Every public operation validates first and links second, so a returned
//! error means no link was changed.
//!
//! ```text
//! parent ──first_child──▶ c1 ⇄ c2 ⇄ c3 ◀──last_child── parent
//!    ▲                     │    │    │
//!    └──────── parent ─────┴────┴────┘
//! ```

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::hierarchy::allows_child;
use crate::types::{NodeId, NodeKind, NodeType};

impl DomArena {
    /// Append `new_child` after the current last child of `parent`.
    ///
    /// A node already under `parent` moves to the end; a node attached
    /// elsewhere is detached from its old parent first. An unadopted node
    /// (no owner document) is adopted, together with its subtree, by the
    /// parent's document.
    pub fn append_child(&mut self, parent: NodeId, new_child: NodeId) -> Result<()> {
        self.check_insertion(parent, new_child)?;
        self.attach(parent, new_child, None);
        Ok(())
    }

    /// Insert `new_child` immediately before `ref_child`.
    ///
    /// `None` as the reference appends.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> Result<()> {
        let Some(reference) = ref_child else {
            return self.append_child(parent, new_child);
        };

        self.check_insertion(parent, new_child)?;
        if !self.is_direct_parent(parent, reference) {
            return Err(self.rejected(parent, new_child, DomError::NotFound));
        }
        if new_child == reference {
            return Ok(());
        }

        self.attach(parent, new_child, Some(reference));
        Ok(())
    }

    /// Put `new_child` where `old_child` is and hand `old_child` back.
    ///
    /// The returned node is detached with its subtree intact; freeing it is
    /// up to the caller. Replacing a node with itself changes nothing.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<NodeId> {
        self.node(old_child)?;
        self.check_insertion(parent, new_child)?;
        if !self.is_direct_parent(parent, old_child) {
            return Err(self.rejected(parent, new_child, DomError::NotFound));
        }
        if new_child == old_child {
            return Ok(old_child);
        }

        self.attach(parent, new_child, Some(old_child));
        self.detach(old_child);
        tracing::trace!(%parent, new = %new_child, old = %old_child, "replaced child");
        Ok(old_child)
    }

    /// Unlink `old_child` from `parent` and return it, subtree intact.
    pub fn remove_child(&mut self, parent: NodeId, old_child: NodeId) -> Result<NodeId> {
        self.node(parent)?;
        self.node(old_child)?;
        if !self.is_direct_parent(parent, old_child) {
            return Err(self.rejected(parent, old_child, DomError::NotFound));
        }

        self.detach(old_child);
        tracing::trace!(%parent, child = %old_child, "removed child");
        Ok(old_child)
    }

    /// Unlink `old_child` from `parent` and free it with everything it owns.
    pub fn remove_child_and_free(&mut self, parent: NodeId, old_child: NodeId) -> Result<()> {
        let removed = self.remove_child(parent, old_child)?;
        self.free(removed);
        Ok(())
    }

    // --- Attributes ---

    /// Attach `attr` to `element`, replacing an attribute with the same name.
    ///
    /// Returns the replaced attribute, detached.
    pub fn set_attribute_node(&mut self, element: NodeId, attr: NodeId) -> Result<Option<NodeId>> {
        self.check_attribute(element, attr)?;
        let name = self.name(attr).map(str::to_string);
        let existing = self
            .attributes(element)
            .find(|&a| a != attr && self.name(a) == name.as_deref());
        Ok(self.place_attribute(element, attr, existing))
    }

    /// Attach `attr` to `element`, replacing an attribute with the same
    /// namespace URI and local name.
    ///
    /// Absent fields compare equal only to absent fields, so a
    /// non-namespaced attribute never matches a namespaced one.
    pub fn set_attribute_node_ns(
        &mut self,
        element: NodeId,
        attr: NodeId,
    ) -> Result<Option<NodeId>> {
        self.check_attribute(element, attr)?;
        let uri = self.namespace_uri(attr).map(str::to_string);
        let local = self.local_name(attr).map(str::to_string);
        let existing = self.attributes(element).find(|&a| {
            a != attr
                && self.namespace_uri(a) == uri.as_deref()
                && self.local_name(a) == local.as_deref()
        });
        Ok(self.place_attribute(element, attr, existing))
    }

    /// Detach `attr` from `element` and return it.
    pub fn remove_attribute_node(&mut self, element: NodeId, attr: NodeId) -> Result<NodeId> {
        self.node(element)?;
        self.node(attr)?;
        if self.owner_element(attr) != Some(element) {
            return Err(DomError::NotFound);
        }
        self.detach(attr);
        Ok(attr)
    }

    // --- Validation ---

    fn check_insertion(&self, parent: NodeId, new_child: NodeId) -> Result<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(new_child)?;

        // Containment before ownership: a document owns itself
        let parent_type = parent_node.node_type();
        let child_type = child_node.node_type();
        let cycle = parent == new_child || self.is_ancestor(new_child, parent);
        // Attribute chains never enter a child chain, whatever the parent
        if cycle || child_type == NodeType::Attribute || !allows_child(parent_type, child_type) {
            let err = DomError::HierarchyViolation {
                parent: parent_type,
                child: child_type,
            };
            return Err(self.rejected(parent, new_child, err));
        }

        if child_node.owner_document.is_some()
            && child_node.owner_document != parent_node.owner_document
        {
            return Err(self.rejected(parent, new_child, DomError::WrongDocument));
        }

        Ok(())
    }

    fn check_attribute(&self, element: NodeId, attr: NodeId) -> Result<()> {
        let element_node = self.node(element)?;
        let attr_node = self.node(attr)?;

        if !element_node.is_element() || !attr_node.is_attribute() {
            let err = DomError::HierarchyViolation {
                parent: element_node.node_type(),
                child: attr_node.node_type(),
            };
            return Err(self.rejected(element, attr, err));
        }
        if attr_node.owner_document.is_some()
            && attr_node.owner_document != element_node.owner_document
        {
            return Err(self.rejected(element, attr, DomError::WrongDocument));
        }
        match self.owner_element(attr) {
            Some(owner) if owner != element => Err(DomError::InvalidArgument(
                "attribute is in use by another element".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn rejected(&self, parent: NodeId, child: NodeId, err: DomError) -> DomError {
        tracing::debug!(%parent, %child, error = %err, "tree mutation rejected");
        err
    }

    // --- Linking (callers have validated) ---

    fn attach(&mut self, parent: NodeId, child: NodeId, before: Option<NodeId>) {
        let unadopted = self.owner_document(child).is_none();
        self.detach(child);
        self.link_child(parent, child, before);
        if unadopted {
            if let Some(doc) = self.owner_document(parent) {
                self.adopt_subtree(child, doc);
            }
        }
        tracing::trace!(%parent, %child, "attached child");
    }

    fn place_attribute(
        &mut self,
        element: NodeId,
        attr: NodeId,
        replacing: Option<NodeId>,
    ) -> Option<NodeId> {
        if self.owner_element(attr) == Some(element) && replacing.is_none() {
            return None;
        }

        self.detach(attr);
        self.link_attr(element, attr, replacing);
        if let Some(old) = replacing {
            self.detach(old);
        }
        if self.owner_document(attr).is_none() {
            if let Some(doc) = self.owner_document(element) {
                if let Some(node) = self.get_mut(attr) {
                    node.owner_document = Some(doc);
                }
            }
        }
        replacing
    }

    /// Take a node out of whichever chain holds it.
    ///
    /// Children leave their parent's child chain; attributes leave their
    /// element's attribute chain. The node keeps its own subtree.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let prev = node.prev_sibling;
        let next = node.next_sibling;
        let parent = node.parent;
        let owner_element = match node.kind {
            NodeKind::Attribute { owner_element, .. } => owner_element,
            _ => None,
        };

        if let Some(parent) = parent {
            match prev {
                Some(p) => self.set_next(p, next),
                None => {
                    if let Some(node) = self.get_mut(parent) {
                        node.first_child = next;
                    }
                }
            }
            match next {
                Some(n) => self.set_prev(n, prev),
                None => {
                    if let Some(node) = self.get_mut(parent) {
                        node.last_child = prev;
                    }
                }
            }
        } else if let Some(element) = owner_element {
            match prev {
                Some(p) => self.set_next(p, next),
                None => {
                    if let Some(node) = self.get_mut(element) {
                        node.first_attr = next;
                    }
                }
            }
            if let Some(n) = next {
                self.set_prev(n, prev);
            }
            self.set_owner_element(id, None);
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
    }

    /// Link a detached node into `parent`'s child chain before `before`,
    /// or at the end.
    pub(crate) fn link_child(&mut self, parent: NodeId, child: NodeId, before: Option<NodeId>) {
        let prev = match before {
            Some(reference) => self.prev_sibling(reference),
            None => self.last_child(parent),
        };

        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = before;
        }
        match prev {
            Some(p) => self.set_next(p, Some(child)),
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.first_child = Some(child);
                }
            }
        }
        match before {
            Some(reference) => self.set_prev(reference, Some(child)),
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.last_child = Some(child);
                }
            }
        }
    }

    /// Link a detached attribute into `element`'s chain before `before`,
    /// or at the end.
    pub(crate) fn link_attr(&mut self, element: NodeId, attr: NodeId, before: Option<NodeId>) {
        let prev = match before {
            Some(reference) => self.prev_sibling(reference),
            None => self.attributes(element).last(),
        };

        if let Some(node) = self.get_mut(attr) {
            node.parent = None;
            node.prev_sibling = prev;
            node.next_sibling = before;
        }
        self.set_owner_element(attr, Some(element));
        match prev {
            Some(p) => self.set_next(p, Some(attr)),
            None => {
                if let Some(node) = self.get_mut(element) {
                    node.first_attr = Some(attr);
                }
            }
        }
        if let Some(reference) = before {
            self.set_prev(reference, Some(attr));
        }
    }

    /// Give every node of an unadopted subtree, attributes included, an
    /// owner document.
    fn adopt_subtree(&mut self, root: NodeId, doc: NodeId) {
        let mut current = Some(root);
        while let Some(id) = current {
            if let Some(node) = self.get_mut(id) {
                node.owner_document = Some(doc);
            }
            let mut attr = self.first_attr(id);
            while let Some(a) = attr {
                if let Some(node) = self.get_mut(a) {
                    node.owner_document = Some(doc);
                }
                attr = self.next_sibling(a);
            }
            current = self.next_in_subtree(root, id);
        }
    }

    fn set_next(&mut self, id: NodeId, next: Option<NodeId>) {
        if let Some(node) = self.get_mut(id) {
            node.next_sibling = next;
        }
    }

    fn set_prev(&mut self, id: NodeId, prev: Option<NodeId>) {
        if let Some(node) = self.get_mut(id) {
            node.prev_sibling = prev;
        }
    }
}
