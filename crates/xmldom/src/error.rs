//! Error types for tree operations
//!
//! Flat error hierarchy. Queries never produce these: they degrade to empty
//! results instead.

use crate::types::NodeType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Hierarchy violation: {child:?} may not be placed under {parent:?}")]
    HierarchyViolation { parent: NodeType, child: NodeType },

    #[error("Node belongs to a different document")]
    WrongDocument,

    #[error("Reference node is not a child of the given parent")]
    NotFound,

    #[error("Node allocation failed: arena limit of {limit} nodes reached")]
    AllocationFailure { limit: usize },

    #[error("Namespace resolution failed: {0}")]
    Namespace(String),
}

impl DomError {
    pub(crate) fn stale(what: &str) -> Self {
        DomError::InvalidArgument(format!("{what} does not refer to a live node"))
    }
}
