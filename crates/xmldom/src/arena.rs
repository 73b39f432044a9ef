//! Arena-based node store
//!
//! Every node of every document lives in one `Vec` of slots and is addressed
//! by a generational [`NodeId`]. There are no `Rc`s and no owning pointers
//! between nodes, so ownership cycles cannot be built and dropping the arena
//! releases everything in a single flat pass.
//!
//! ## Memory Layout
//!
//! ```text
//! slots:      [Slot0][Slot1][Slot2]...
//!                ↑ NodeId { index, generation }
//! free_slots: indices of vacant slots, reused LIFO
//! ```
//!
//! A handle whose generation no longer matches its slot is stale. Stale
//! handles behave like null pointers: getters return `None`, mutators return
//! [`DomError::InvalidArgument`].

use crate::error::{DomError, Result};
use crate::namespace::{NamespaceResolver, QNameResolver};
use crate::types::{
    DomNode, NodeId, NodeKind, NodeType, CDATA_NODE_NAME, DOCUMENT_NODE_NAME, TEXT_NODE_NAME,
};
use serde::{Deserialize, Serialize};

/// Configuration for a node arena
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Slots reserved up front.
    pub initial_capacity: usize,
    /// Ceiling on live nodes; `None` means limited only by the index space.
    pub max_nodes: Option<usize>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1024, // typical device description
            max_nodes: None,
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<DomNode>,
}

/// Arena holding the nodes of any number of documents
#[derive(Debug)]
pub struct DomArena {
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    live: usize,
    config: ArenaConfig,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(ArenaConfig {
            initial_capacity: capacity,
            ..ArenaConfig::default()
        })
    }

    pub fn with_config(config: ArenaConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.initial_capacity),
            free_slots: Vec::new(),
            live: 0,
            config,
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// True if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Get node by ID, `None` for stale handles
    pub fn get(&self, id: NodeId) -> Option<&DomNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut DomNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Like [`get`](Self::get) but stale handles are an error.
    pub fn node(&self, id: NodeId) -> Result<&DomNode> {
        self.get(id).ok_or_else(|| DomError::stale("node handle"))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut DomNode> {
        self.get_mut(id).ok_or_else(|| DomError::stale("node handle"))
    }

    /// Iterator over the handles of all live nodes, in slot order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node
                .as_ref()
                .map(|_| NodeId::new(index as u32, slot.generation))
        })
    }

    /// Drop every node of every document (reuses the allocation).
    ///
    /// Slots are vacated rather than truncated so outstanding handles stay
    /// stale instead of aliasing new nodes.
    pub fn clear(&mut self) {
        self.free_slots.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_slots.push(index as u32);
        }
        self.live = 0;
    }

    /// Place a node into a vacant slot.
    pub(crate) fn alloc(&mut self, node: DomNode) -> Result<NodeId> {
        if let Some(limit) = self.config.max_nodes {
            if self.live >= limit {
                tracing::warn!(limit, "node arena is full");
                return Err(DomError::AllocationFailure { limit });
            }
        }

        let id = match self.free_slots.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = u32::try_from(self.slots.len()).map_err(|_| {
                    DomError::AllocationFailure {
                        limit: u32::MAX as usize,
                    }
                })?;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(index, 0)
            }
        };

        self.live += 1;
        Ok(id)
    }

    /// Vacate a slot and hand back what it held.
    ///
    /// Links are not touched: callers unlink first.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<DomNode> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_slots.push(id.index);
        self.live -= 1;
        Some(node)
    }

    // --- Factories ---

    /// Allocate a zeroed node of the given kind, owned by no document.
    pub fn create_node(&mut self, kind: NodeKind) -> Result<NodeId> {
        self.alloc(DomNode::new(kind))
    }

    /// Create a fresh document node. A document is its own owner.
    pub fn create_document(&mut self) -> Result<NodeId> {
        let mut node = DomNode::new(NodeKind::Document);
        node.name = Some(DOCUMENT_NODE_NAME.to_string());
        let id = self.alloc(node)?;
        if let Some(doc) = self.get_mut(id) {
            doc.owner_document = Some(id);
        }
        Ok(id)
    }

    pub fn create_element(&mut self, doc: NodeId, tag_name: &str) -> Result<NodeId> {
        let id = self.create_owned(doc, NodeKind::element(tag_name))?;
        self.named_or_release(id, tag_name)
    }

    /// Create an element whose namespace URI is already known.
    pub fn create_element_ns(
        &mut self,
        doc: NodeId,
        namespace_uri: &str,
        qualified_name: &str,
    ) -> Result<NodeId> {
        let id = self.create_element(doc, qualified_name)?;
        self.set_namespace_uri(id, Some(namespace_uri))?;
        Ok(id)
    }

    pub fn create_attribute(&mut self, doc: NodeId, name: &str) -> Result<NodeId> {
        let id = self.create_owned(doc, NodeKind::attribute())?;
        self.named_or_release(id, name)
    }

    pub fn create_attribute_ns(
        &mut self,
        doc: NodeId,
        namespace_uri: &str,
        qualified_name: &str,
    ) -> Result<NodeId> {
        let id = self.create_attribute(doc, qualified_name)?;
        self.set_namespace_uri(id, Some(namespace_uri))?;
        Ok(id)
    }

    pub fn create_text(&mut self, doc: NodeId, data: &str) -> Result<NodeId> {
        self.create_character_data(doc, NodeKind::Text, TEXT_NODE_NAME, data)
    }

    pub fn create_cdata(&mut self, doc: NodeId, data: &str) -> Result<NodeId> {
        self.create_character_data(doc, NodeKind::CdataSection, CDATA_NODE_NAME, data)
    }

    fn create_character_data(
        &mut self,
        doc: NodeId,
        kind: NodeKind,
        name: &str,
        data: &str,
    ) -> Result<NodeId> {
        let id = self.create_owned(doc, kind)?;
        if let Some(node) = self.get_mut(id) {
            node.name = Some(name.to_string());
            node.value = Some(data.to_string());
        }
        Ok(id)
    }

    fn create_owned(&mut self, doc: NodeId, kind: NodeKind) -> Result<NodeId> {
        if self.node_type(doc) != Some(NodeType::Document) {
            return Err(DomError::InvalidArgument(
                "owner is not a live document".to_string(),
            ));
        }
        let mut node = DomNode::new(kind);
        node.owner_document = Some(doc);
        self.alloc(node)
    }

    fn named_or_release(&mut self, id: NodeId, name: &str) -> Result<NodeId> {
        match self.set_name(id, Some(name)) {
            Ok(()) => Ok(id),
            Err(err) => {
                self.release(id);
                Err(err)
            }
        }
    }

    // --- Field access (null-safe) ---

    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.get(id).map(DomNode::node_type)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(DomNode::name)
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(DomNode::value)
    }

    pub fn namespace_uri(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(DomNode::namespace_uri)
    }

    pub fn prefix(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(DomNode::prefix)
    }

    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(DomNode::local_name)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(DomNode::tag_name)
    }

    /// `Some(specified)` for attribute nodes.
    pub fn is_specified(&self, id: NodeId) -> Option<bool> {
        match self.get(id).map(|node| &node.kind) {
            Some(NodeKind::Attribute { specified, .. }) => Some(*specified),
            _ => None,
        }
    }

    /// Element whose attribute chain holds `id`.
    pub fn owner_element(&self, id: NodeId) -> Option<NodeId> {
        match self.get(id).map(|node| &node.kind) {
            Some(NodeKind::Attribute { owner_element, .. }) => *owner_element,
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.first_child)
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.last_child)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.next_sibling)
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.prev_sibling)
    }

    pub fn first_attr(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.first_attr)
    }

    pub fn owner_document(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.owner_document)
    }

    pub fn user_tag(&self, id: NodeId) -> Option<u64> {
        self.get(id).and_then(|node| node.user_tag)
    }

    // --- Field mutation ---

    /// Set the qualified name and re-derive prefix and local name.
    pub fn set_name(&mut self, id: NodeId, name: Option<&str>) -> Result<()> {
        self.set_name_with(id, name, &QNameResolver)
    }

    /// Set the qualified name using a caller-supplied resolver.
    ///
    /// Prefix and local name always follow the name: clearing the name or a
    /// resolver failure leaves all three unset.
    pub fn set_name_with<R>(&mut self, id: NodeId, name: Option<&str>, resolver: &R) -> Result<()>
    where
        R: NamespaceResolver + ?Sized,
    {
        let node = self.node_mut(id)?;
        node.name = None;
        node.prefix = None;
        node.local_name = None;
        let Some(name) = name else {
            return Ok(());
        };

        let parts = resolver.resolve(name)?;
        node.name = Some(name.to_string());
        node.prefix = parts.prefix;
        node.local_name = Some(parts.local_name);
        Ok(())
    }

    /// Attach an opaque tag to a node; `None` clears it.
    pub fn set_user_tag(&mut self, id: NodeId, tag: Option<u64>) -> Result<()> {
        self.node_mut(id)?.user_tag = tag;
        Ok(())
    }

    pub fn set_value(&mut self, id: NodeId, value: Option<&str>) -> Result<()> {
        self.node_mut(id)?.value = value.map(str::to_string);
        Ok(())
    }

    pub fn set_namespace_uri(&mut self, id: NodeId, uri: Option<&str>) -> Result<()> {
        self.node_mut(id)?.namespace_uri = uri.map(str::to_string);
        Ok(())
    }

    pub fn set_prefix(&mut self, id: NodeId, prefix: Option<&str>) -> Result<()> {
        self.node_mut(id)?.prefix = prefix.map(str::to_string);
        Ok(())
    }

    pub fn set_local_name(&mut self, id: NodeId, local_name: Option<&str>) -> Result<()> {
        self.node_mut(id)?.local_name = local_name.map(str::to_string);
        Ok(())
    }

    /// Copy value, local name, prefix and kind from `src` onto `dest`.
    pub fn set_node_properties(&mut self, dest: NodeId, src: NodeId) -> Result<()> {
        let src_node = self.node(src)?;
        let value = src_node.value.clone();
        let local_name = src_node.local_name.clone();
        let prefix = src_node.prefix.clone();
        let kind = match &src_node.kind {
            NodeKind::Attribute { specified, .. } => NodeKind::Attribute {
                specified: *specified,
                owner_element: None,
            },
            other => other.clone(),
        };

        let dest_node = self.node_mut(dest)?;
        let linked = dest_node.parent.is_some()
            || dest_node.first_child.is_some()
            || dest_node.first_attr.is_some();
        let kind = match (kind, &dest_node.kind) {
            (
                NodeKind::Attribute { specified, .. },
                NodeKind::Attribute { owner_element, .. },
            ) => NodeKind::Attribute {
                specified,
                owner_element: *owner_element,
            },
            (_, NodeKind::Attribute {
                owner_element: Some(_),
                ..
            }) => {
                return Err(DomError::InvalidArgument(
                    "attached attribute cannot change kind".to_string(),
                ))
            }
            (kind, current) if linked && kind.node_type() != current.node_type() => {
                return Err(DomError::InvalidArgument(
                    "linked node cannot change kind".to_string(),
                ))
            }
            (kind, _) => kind,
        };

        dest_node.value = value;
        dest_node.local_name = local_name;
        dest_node.prefix = prefix;
        dest_node.kind = kind;
        Ok(())
    }

    pub(crate) fn set_specified(&mut self, id: NodeId, value: bool) {
        if let Some(NodeKind::Attribute { specified, .. }) =
            self.get_mut(id).map(|node| &mut node.kind)
        {
            *specified = value;
        }
    }

    pub(crate) fn set_owner_element(&mut self, id: NodeId, element: Option<NodeId>) {
        if let Some(NodeKind::Attribute { owner_element, .. }) =
            self.get_mut(id).map(|node| &mut node.kind)
        {
            *owner_element = element;
        }
    }

    // --- Navigation ---

    /// Iterator over the children of a node.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            arena: self,
            next: self.first_child(id),
        }
    }

    /// Iterator over the attribute chain of an element.
    pub fn attributes(&self, id: NodeId) -> Children<'_> {
        Children {
            arena: self,
            next: self.first_attr(id),
        }
    }

    /// Iterator over a node and its ancestors (walking up to the root).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: self.get(id).map(|_| id),
        }
    }

    /// Pre-order iterator over the descendants of a node, excluding the node.
    ///
    /// Walks the tree's own links, so memory use does not grow with depth.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            arena: self,
            root: id,
            next: self.first_child(id),
        }
    }
}

impl DomArena {
    /// Pre-order successor of `current` inside the subtree rooted at `root`.
    ///
    /// Never leaves the subtree: the root's own siblings are not followed.
    pub(crate) fn next_in_subtree(&self, root: NodeId, current: NodeId) -> Option<NodeId> {
        if let Some(child) = self.first_child(current) {
            return Some(child);
        }
        self.next_after_subtree(root, current)
    }

    /// Pre-order successor of `current` once its own subtree is skipped.
    pub(crate) fn next_after_subtree(&self, root: NodeId, current: NodeId) -> Option<NodeId> {
        let mut node = current;
        while node != root {
            if let Some(sibling) = self.next_sibling(node) {
                return Some(sibling);
            }
            node = self.parent(node)?;
        }
        None
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator along a sibling chain.
pub struct Children<'a> {
    arena: &'a DomArena,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.next_sibling(current);
        Some(current)
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    arena: &'a DomArena,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.parent(current);
        Some(current)
    }
}

/// Depth-first iterator over all descendants of a node.
pub struct Descendants<'a> {
    arena: &'a DomArena,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.next_in_subtree(self.root, current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::QualifiedName;

    #[test]
    fn test_arena_basic() {
        let mut arena = DomArena::new();
        let doc = arena.create_document().unwrap();
        let el = arena.create_element(doc, "s:Body").unwrap();

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.name(el), Some("s:Body"));
        assert_eq!(arena.tag_name(el), Some("s:Body"));
        assert_eq!(arena.prefix(el), Some("s"));
        assert_eq!(arena.local_name(el), Some("Body"));
        assert_eq!(arena.owner_document(el), Some(doc));
        assert_eq!(arena.owner_document(doc), Some(doc));
        assert_eq!(arena.name(doc), Some(DOCUMENT_NODE_NAME));
        assert_eq!(arena.value(doc), None);
    }

    #[test]
    fn test_character_data_sentinels() {
        let mut arena = DomArena::new();
        let doc = arena.create_document().unwrap();
        let text = arena.create_text(doc, "hello").unwrap();
        let cdata = arena.create_cdata(doc, "<raw>").unwrap();

        assert_eq!(arena.name(text), Some(TEXT_NODE_NAME));
        assert_eq!(arena.value(text), Some("hello"));
        assert_eq!(arena.name(cdata), Some(CDATA_NODE_NAME));
        assert_eq!(arena.node_type(cdata), Some(NodeType::CdataSection));
    }

    #[test]
    fn test_factory_requires_document() {
        let mut arena = DomArena::new();
        let doc = arena.create_document().unwrap();
        let el = arena.create_element(doc, "a").unwrap();

        let err = arena.create_element(el, "b").unwrap_err();
        assert!(matches!(err, DomError::InvalidArgument(_)));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_stale_handle_is_null() {
        let mut arena = DomArena::new();
        let doc = arena.create_document().unwrap();
        let el = arena.create_element(doc, "a").unwrap();
        arena.release(el);

        assert!(!arena.contains(el));
        assert_eq!(arena.name(el), None);
        assert_eq!(arena.node_type(el), None);
        assert_eq!(arena.children(el).count(), 0);
        assert!(matches!(
            arena.set_value(el, Some("x")),
            Err(DomError::InvalidArgument(_))
        ));

        // The slot is reused under a new generation
        let other = arena.create_element(doc, "b").unwrap();
        assert_eq!(other.index(), el.index());
        assert_ne!(other, el);
        assert_eq!(arena.name(el), None);
        assert_eq!(arena.name(other), Some("b"));
    }

    #[test]
    fn test_setters_copy_and_clear() {
        let mut arena = DomArena::new();
        let doc = arena.create_document().unwrap();
        let attr = arena.create_attribute(doc, "id").unwrap();

        let mut buffer = String::from("first");
        arena.set_value(attr, Some(&buffer)).unwrap();
        buffer.push_str("-changed");
        assert_eq!(arena.value(attr), Some("first"));

        arena.set_value(attr, None).unwrap();
        assert_eq!(arena.value(attr), None);

        arena.set_namespace_uri(attr, Some("urn:a")).unwrap();
        arena.set_prefix(attr, Some("p")).unwrap();
        arena.set_local_name(attr, Some("local")).unwrap();
        assert_eq!(arena.namespace_uri(attr), Some("urn:a"));
        assert_eq!(arena.prefix(attr), Some("p"));
        assert_eq!(arena.local_name(attr), Some("local"));
        // Direct setters bypass resolution
        assert_eq!(arena.name(attr), Some("id"));
    }

    #[test]
    fn test_set_name_failure_leaves_name_unset() {
        let mut arena = DomArena::new();
        let doc = arena.create_document().unwrap();
        let el = arena.create_element(doc, "old").unwrap();

        let failing =
            |_: &str| -> Result<QualifiedName> { Err(DomError::AllocationFailure { limit: 0 }) };
        let err = arena.set_name_with(el, Some("p:new"), &failing).unwrap_err();

        assert!(matches!(err, DomError::AllocationFailure { .. }));
        assert_eq!(arena.name(el), None);
        assert_eq!(arena.prefix(el), None);
        assert_eq!(arena.local_name(el), None);
    }

    #[test]
    fn test_clearing_name_clears_decomposition() {
        let mut arena = DomArena::new();
        let doc = arena.create_document().unwrap();
        let attr = arena.create_attribute(doc, "p:x").unwrap();
        assert_eq!(arena.prefix(attr), Some("p"));

        arena.set_name(attr, None).unwrap();
        assert_eq!(arena.name(attr), None);
        assert_eq!(arena.prefix(attr), None);
        assert_eq!(arena.local_name(attr), None);

        arena.set_name(attr, Some("y")).unwrap();
        assert_eq!(arena.prefix(attr), None);
        assert_eq!(arena.local_name(attr), Some("y"));
    }

    #[test]
    fn test_user_tag() {
        let mut arena = DomArena::new();
        let doc = arena.create_document().unwrap();
        let el = arena.create_element(doc, "a").unwrap();
        assert_eq!(arena.user_tag(el), None);

        arena.set_user_tag(el, Some(7)).unwrap();
        assert_eq!(arena.user_tag(el), Some(7));
        arena.set_user_tag(el, None).unwrap();
        assert_eq!(arena.user_tag(el), None);

        arena.release(el);
        assert!(matches!(
            arena.set_user_tag(el, Some(1)),
            Err(DomError::InvalidArgument(_))
        ));
        assert_eq!(arena.user_tag(el), None);
    }

    #[test]
    fn test_node_limit() {
        let mut arena = DomArena::with_config(ArenaConfig {
            initial_capacity: 4,
            max_nodes: Some(2),
        });
        let doc = arena.create_document().unwrap();
        arena.create_element(doc, "a").unwrap();

        let err = arena.create_element(doc, "b").unwrap_err();
        assert_eq!(err, DomError::AllocationFailure { limit: 2 });
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_set_node_properties() {
        let mut arena = DomArena::new();
        let doc = arena.create_document().unwrap();
        let src = arena.create_attribute_ns(doc, "urn:x", "p:x").unwrap();
        arena.set_value(src, Some("1")).unwrap();
        let dest = arena.create_node(NodeKind::Text).unwrap();

        arena.set_node_properties(dest, src).unwrap();

        assert_eq!(arena.node_type(dest), Some(NodeType::Attribute));
        assert_eq!(arena.value(dest), Some("1"));
        assert_eq!(arena.prefix(dest), Some("p"));
        assert_eq!(arena.local_name(dest), Some("x"));
        // Name and namespace are not part of the copied properties
        assert_eq!(arena.name(dest), None);
        assert_eq!(arena.namespace_uri(dest), None);
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: ArenaConfig = serde_json::from_str(r#"{"max_nodes": 5000}"#).unwrap();
        assert_eq!(config.max_nodes, Some(5000));
        assert_eq!(config.initial_capacity, 1024);
    }

    #[test]
    fn test_node_ids_skip_vacant_slots() {
        let mut arena = DomArena::new();
        let doc = arena.create_document().unwrap();
        let a = arena.create_element(doc, "a").unwrap();
        let b = arena.create_element(doc, "b").unwrap();
        arena.release(a);

        let ids: Vec<NodeId> = arena.node_ids().collect();
        assert_eq!(ids, vec![doc, b]);

        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(doc));
    }
}
