//! XML DOM Tree Engine
//!
//! Arena-backed node store for parsed protocol documents (device
//! descriptions, SOAP envelopes, event notifications).
//!
//! ## Philosophy
//!
//! - **Handles, not pointers**: nodes are slots in one arena, addressed by
//!   generational [`NodeId`]s; a stale handle reads as null
//! - **Validate, then link**: a mutation that returns an error changed nothing
//! - **No recursion**: teardown, cloning, queries and adoption walk the
//!   tree's own links, so hostile nesting depth cannot exhaust the stack
//!
//! ## Core Design
//!
//! ```text
//! factories ─▶ DomArena (slots) ─▶ mutate (append/insert/replace/remove)
//!                   │                      │
//!                   │                 hierarchy rules
//!                   ▼
//!        query / clone / free (iterative walks)
//! ```
//!
//! ```
//! use xmldom::DomArena;
//!
//! let mut arena = DomArena::new();
//! let doc = arena.create_document()?;
//! let root = arena.create_element(doc, "root")?;
//! let text = arena.create_text(doc, "hello")?;
//! arena.append_child(doc, root)?;
//! arena.append_child(root, text)?;
//!
//! assert_eq!(arena.text_content(doc).as_deref(), Some("hello"));
//! assert_eq!(arena.free(doc), 3);
//! assert!(arena.is_empty());
//! # Ok::<(), xmldom::DomError>(())
//! ```

pub mod arena;
pub mod clone;
pub mod error;
pub mod free;
pub mod hierarchy;
pub mod mutate;
pub mod namespace;
pub mod query;
pub mod types;

pub use arena::{ArenaConfig, DomArena};
pub use error::{DomError, Result};
pub use hierarchy::allows_child;
pub use namespace::{split_qname, NamespaceResolver, QNameResolver, QualifiedName};
pub use query::WILDCARD;
pub use types::*;
