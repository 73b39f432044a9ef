//! Read-only queries over the tree
//!
//! Results are snapshots: later mutations do not update a returned
//! [`NodeList`]. A stale handle yields an empty or negative answer rather
//! than an error.

use crate::arena::DomArena;
use crate::types::{NodeId, NodeKind, NodeList, NodeType};

/// Matches any name in tag-name lookups.
pub const WILDCARD: &str = "*";

impl DomArena {
    /// Ordered snapshot of the children of `id`.
    pub fn children_of(&self, id: NodeId) -> NodeList {
        self.children(id).collect()
    }

    /// Ordered snapshot of an element's attributes; `None` for other kinds.
    pub fn attributes_of(&self, id: NodeId) -> Option<NodeList> {
        self.get(id)
            .filter(|node| node.is_element())
            .map(|_| self.attributes(id).collect())
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.first_child(id).is_some()
    }

    /// True for elements with at least one attribute.
    pub fn has_attributes(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|node| node.is_element() && node.first_attr.is_some())
    }

    /// Attribute of `element` whose qualified name is `name`.
    pub fn attribute_node(&self, element: NodeId, name: &str) -> Option<NodeId> {
        self.attributes(element).find(|&attr| self.name(attr) == Some(name))
    }

    /// Attribute value by qualified name.
    pub fn attribute_value(&self, element: NodeId, name: &str) -> Option<&str> {
        self.attribute_node(element, name)
            .and_then(|attr| self.value(attr))
    }

    /// Elements in the subtree rooted at `root` (inclusive) whose name is
    /// `tag`, in document order. `"*"` matches every element.
    pub fn find_by_tag_name(&self, root: NodeId, tag: &str) -> NodeList {
        self.subtree(root)
            .filter(|&id| {
                self.get(id).is_some_and(|node| {
                    node.is_element() && (tag == WILDCARD || node.name() == Some(tag))
                })
            })
            .collect()
    }

    /// Namespace-aware variant of [`find_by_tag_name`](Self::find_by_tag_name).
    ///
    /// Only elements that carry both a namespace URI and a local name can
    /// match; either pattern may be `"*"`.
    pub fn find_by_tag_name_ns(
        &self,
        root: NodeId,
        namespace_uri: &str,
        local_name: &str,
    ) -> NodeList {
        self.subtree(root)
            .filter(|&id| {
                let Some(node) = self.get(id).filter(|node| node.is_element()) else {
                    return false;
                };
                match (node.namespace_uri(), node.local_name()) {
                    (Some(uri), Some(local)) => {
                        (namespace_uri == WILDCARD || uri == namespace_uri)
                            && (local_name == WILDCARD || local == local_name)
                    }
                    _ => false,
                }
            })
            .collect()
    }

    /// Shallow equality: the same node, or two live nodes with equal type,
    /// name, value, namespace URI, prefix and local name. Links, children and
    /// kind payloads (such as an element's tag name) are not compared.
    pub fn compare(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return self.contains(a);
        }
        let (Some(x), Some(y)) = (self.get(a), self.get(b)) else {
            return false;
        };

        x.node_type() == y.node_type()
            && x.name == y.name
            && x.value == y.value
            && x.namespace_uri == y.namespace_uri
            && x.prefix == y.prefix
            && x.local_name == y.local_name
    }

    /// Concatenated character data of every text and CDATA node under `id`.
    ///
    /// For a text or CDATA node this is its own data.
    pub fn text_content(&self, id: NodeId) -> Option<String> {
        let node = self.get(id)?;
        match node.kind {
            NodeKind::Text | NodeKind::CdataSection => return node.value.clone(),
            _ => {}
        }

        let mut content = String::new();
        for descendant in self.descendants(id) {
            let character_data = matches!(
                self.node_type(descendant),
                Some(NodeType::Text | NodeType::CdataSection)
            );
            if let Some(data) = self.value(descendant).filter(|_| character_data) {
                content.push_str(data);
            }
        }
        Some(content)
    }

    /// `root` followed by its descendants in pre-order, empty when stale.
    fn subtree(&self, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(root)
            .map(|_| root)
            .into_iter()
            .chain(self.descendants(root))
    }
}
