//! Subtree deallocation
//!
//! Releasing a node releases its whole child subtree and every attribute
//! chain inside it. The walk is threaded through the tree's own links
//! (`first_child`, `next_sibling`, `prev_sibling`, `parent`), so it needs no
//! stack and no recursion: a document nested a million levels deep is torn
//! down in constant auxiliary memory.
//!
//! ```text
//!   descend first_child ──▶ run to last next_sibling ──▶ repeat until leaf
//!   free leaf (attributes first) ──▶ cut the link that pointed at it
//!   continue from prev_sibling, or from parent when it was the first child
//! ```

use crate::arena::DomArena;
use crate::types::{DomNode, NodeId};

impl DomArena {
    /// Free `id` and everything it owns. Returns the number of released nodes.
    ///
    /// A node that is still attached is detached first. Stale handles are
    /// ignored.
    pub fn free(&mut self, id: NodeId) -> usize {
        self.free_with(id, |_, _| {})
    }

    /// Like [`free`](Self::free), calling `before_free` with every node just
    /// before its storage is released.
    ///
    /// Attributes are reported before the element that owned them, children
    /// before their parent.
    pub fn free_with<F>(&mut self, id: NodeId, mut before_free: F) -> usize
    where
        F: FnMut(NodeId, &DomNode),
    {
        if !self.contains(id) {
            return 0;
        }
        self.detach(id);

        let mut released = 0;
        let mut current = id;
        loop {
            // Find a node with no children and, below the root, no next sibling
            loop {
                if let Some(child) = self.first_child(current) {
                    current = child;
                } else if current == id {
                    break;
                } else if let Some(sibling) = self.next_sibling(current) {
                    current = sibling;
                } else {
                    break;
                }
            }

            released += self.release_attributes(current, &mut before_free);

            // Cut the only link still pointing at `current`
            let resume = if current == id {
                None
            } else if let Some(prev) = self.prev_sibling(current) {
                if let Some(node) = self.get_mut(prev) {
                    node.next_sibling = None;
                }
                Some(prev)
            } else {
                let parent = self.parent(current);
                if let Some(node) = parent.and_then(|p| self.get_mut(p)) {
                    node.first_child = None;
                    node.last_child = None;
                }
                parent
            };

            if let Some(node) = self.get(current) {
                before_free(current, node);
            }
            self.release(current);
            released += 1;

            match resume {
                Some(next) => current = next,
                None => break,
            }
        }

        tracing::debug!(root = %id, released, "freed subtree");
        released
    }

    /// Attributes only ever chain sideways, so one flat pass frees them all.
    fn release_attributes<F>(&mut self, element: NodeId, before_free: &mut F) -> usize
    where
        F: FnMut(NodeId, &DomNode),
    {
        let mut released = 0;
        let mut attr = self.get_mut(element).and_then(|node| node.first_attr.take());
        while let Some(id) = attr {
            attr = self.next_sibling(id);
            if let Some(node) = self.get(id) {
                before_free(id, node);
            }
            self.release(id);
            released += 1;
        }
        released
    }
}
