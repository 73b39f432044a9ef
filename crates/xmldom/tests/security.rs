//! Security-focused tests for xmldom.
//!
//! Documents arrive from untrusted peers, so nesting depth and sibling
//! counts are attacker controlled. These tests verify that teardown,
//! cloning, queries and ancestry checks stay iterative at sizes that would
//! overflow the stack of a recursive implementation, and that nothing is
//! leaked afterwards.

#![allow(clippy::unwrap_used)]

use xmldom::{ArenaConfig, DomArena, DomError, NodeId, NodeType, WILDCARD};

const DEPTH: usize = 100_000;
const BREADTH: usize = 100_000;

/// Stack far too small for a recursive walk over `DEPTH` levels.
const SMALL_STACK: usize = 256 * 1024;

fn on_small_stack<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    std::thread::Builder::new()
        .stack_size(SMALL_STACK)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

/// doc > e0 > e1 > ... > e{depth-1} > "leaf". Returns (doc, top, deepest element).
fn deep_chain(arena: &mut DomArena, depth: usize) -> (NodeId, NodeId, NodeId) {
    let doc = arena.create_document().unwrap();
    let deepest = arena.create_element(doc, "e").unwrap();
    let leaf = arena.create_text(doc, "leaf").unwrap();
    arena.append_child(deepest, leaf).unwrap();

    // Built bottom-up so every ancestry check starts from a parentless node
    let mut top = deepest;
    for _ in 1..depth {
        let parent = arena.create_element(doc, "e").unwrap();
        arena.append_child(parent, top).unwrap();
        top = parent;
    }
    arena.append_child(doc, top).unwrap();
    (doc, top, deepest)
}

/// doc > root > (c0, c1, ..., c{breadth-1})
fn wide_tree(arena: &mut DomArena, breadth: usize) -> (NodeId, NodeId) {
    let doc = arena.create_document().unwrap();
    let root = arena.create_element(doc, "root").unwrap();
    arena.append_child(doc, root).unwrap();
    for _ in 0..breadth {
        let child = arena.create_element(doc, "c").unwrap();
        arena.append_child(root, child).unwrap();
    }
    (doc, root)
}

// ---------------------------------------------------------------------------
// Teardown
// ---------------------------------------------------------------------------

#[test]
fn test_free_deep_chain() {
    let (released, remaining) = on_small_stack(|| {
        let mut arena = DomArena::with_capacity(DEPTH + 2);
        let (doc, _, _) = deep_chain(&mut arena, DEPTH);
        let released = arena.free(doc);
        (released, arena.len())
    });
    // Document, the chain and the text leaf
    assert_eq!(released, DEPTH + 2);
    assert_eq!(remaining, 0);
}

#[test]
fn test_free_wide_tree() {
    let (released, remaining) = on_small_stack(|| {
        let mut arena = DomArena::with_capacity(BREADTH + 2);
        let (doc, _) = wide_tree(&mut arena, BREADTH);
        let released = arena.free(doc);
        (released, arena.len())
    });
    assert_eq!(released, BREADTH + 2);
    assert_eq!(remaining, 0);
}

#[test]
fn test_free_deep_chain_with_attributes() {
    let remaining = on_small_stack(|| {
        let mut arena = DomArena::new();
        let (doc, top, _) = deep_chain(&mut arena, 10_000);
        let mut node = Some(top);
        while let Some(id) = node {
            let attr = arena.create_attribute(doc, "a").unwrap();
            arena.set_attribute_node(id, attr).unwrap();
            node = arena.first_child(id).filter(|&c| arena.node_type(c) == Some(NodeType::Element));
        }
        assert_eq!(arena.free(doc), 1 + 10_000 * 2 + 1);
        arena.len()
    });
    assert_eq!(remaining, 0);
}

// ---------------------------------------------------------------------------
// Cloning
// ---------------------------------------------------------------------------

#[test]
fn test_clone_deep_chain() {
    let remaining = on_small_stack(|| {
        let mut arena = DomArena::with_capacity(2 * DEPTH + 4);
        let (doc, top, _) = deep_chain(&mut arena, DEPTH);

        let copy = arena.clone_node(top, true).unwrap().unwrap();
        assert_eq!(arena.len(), 2 * (DEPTH + 1) + 1);
        assert_eq!(arena.descendants(copy).count(), DEPTH);
        assert_eq!(arena.text_content(copy).as_deref(), Some("leaf"));

        assert_eq!(arena.free(copy), DEPTH + 1);
        arena.free(doc);
        arena.len()
    });
    assert_eq!(remaining, 0);
}

#[test]
fn test_clone_wide_tree() {
    let remaining = on_small_stack(|| {
        let mut arena = DomArena::new();
        let (doc, root) = wide_tree(&mut arena, BREADTH);

        let copy = arena.clone_node(root, true).unwrap().unwrap();
        assert_eq!(arena.children(copy).count(), BREADTH);

        arena.free(copy);
        arena.free(doc);
        arena.len()
    });
    assert_eq!(remaining, 0);
}

#[test]
fn test_clone_over_node_limit_rolls_back() {
    let mut arena = DomArena::with_config(ArenaConfig {
        initial_capacity: 1024,
        max_nodes: Some(15_000),
    });
    let (doc, top, _) = deep_chain(&mut arena, 10_000);
    let live = arena.len();

    let err = arena.clone_node(top, true).unwrap_err();

    assert_eq!(err, DomError::AllocationFailure { limit: 15_000 });
    assert_eq!(arena.len(), live);
    arena.free(doc);
    assert!(arena.is_empty());
}

// ---------------------------------------------------------------------------
// Queries and ancestry
// ---------------------------------------------------------------------------

#[test]
fn test_queries_over_deep_chain() {
    on_small_stack(|| {
        let mut arena = DomArena::new();
        let (doc, top, deepest) = deep_chain(&mut arena, DEPTH);

        assert_eq!(arena.find_by_tag_name(doc, "e").len(), DEPTH);
        assert_eq!(arena.find_by_tag_name(doc, WILDCARD).len(), DEPTH);
        assert_eq!(arena.text_content(doc).as_deref(), Some("leaf"));

        assert!(arena.is_ancestor(doc, deepest));
        assert!(arena.is_ancestor(top, deepest));
        assert!(!arena.is_ancestor(deepest, top));
    });
}

#[test]
fn test_cycle_check_over_deep_chain() {
    on_small_stack(|| {
        let mut arena = DomArena::new();
        let (doc, top, deepest) = deep_chain(&mut arena, DEPTH);

        let err = arena.append_child(deepest, top).unwrap_err();
        assert!(matches!(err, DomError::HierarchyViolation { .. }));
        assert_eq!(arena.parent(top), Some(doc));
        assert_eq!(arena.children(deepest).count(), 1);
    });
}

#[test]
fn test_queries_over_wide_tree() {
    let mut arena = DomArena::new();
    let (doc, root) = wide_tree(&mut arena, BREADTH);

    assert_eq!(arena.children_of(root).len(), BREADTH);
    assert_eq!(arena.find_by_tag_name(doc, "c").len(), BREADTH);
    let last = arena.last_child(root).unwrap();
    assert!(arena.is_ancestor(doc, last));
}

// ---------------------------------------------------------------------------
// Namespaced attribute lookup
// ---------------------------------------------------------------------------

#[test]
fn test_namespaced_attribute_after_plain_attribute() {
    let mut arena = DomArena::new();
    let doc = arena.create_document().unwrap();
    let el = arena.create_element(doc, "el").unwrap();

    let plain = arena.create_attribute(doc, "x").unwrap();
    arena.set_attribute_node(el, plain).unwrap();
    assert_eq!(arena.namespace_uri(plain), None);

    let namespaced = arena.create_attribute_ns(doc, "urn:p", "p:x").unwrap();
    let replaced = arena.set_attribute_node_ns(el, namespaced).unwrap();

    assert_eq!(replaced, None);
    let attrs: Vec<NodeId> = arena.attributes(el).collect();
    assert_eq!(attrs, vec![plain, namespaced]);
}

#[test]
fn test_plain_attribute_after_namespaced_attribute() {
    let mut arena = DomArena::new();
    let doc = arena.create_document().unwrap();
    let el = arena.create_element(doc, "el").unwrap();

    let namespaced = arena.create_attribute_ns(doc, "urn:p", "p:x").unwrap();
    arena.set_attribute_node_ns(el, namespaced).unwrap();
    let plain = arena.create_attribute(doc, "x").unwrap();

    assert_eq!(arena.set_attribute_node_ns(el, plain).unwrap(), None);
    assert_eq!(arena.attributes(el).count(), 2);

    let again = arena.create_attribute_ns(doc, "urn:p", "q:x").unwrap();
    assert_eq!(arena.set_attribute_node_ns(el, again).unwrap(), Some(namespaced));
    assert_eq!(arena.owner_element(namespaced), None);
    assert_eq!(arena.attributes(el).collect::<Vec<_>>(), vec![again, plain]);
}
