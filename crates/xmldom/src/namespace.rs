//! Qualified-name decomposition used by the name setter.
//!
//! A qualified name is `prefix:local` or just `local`. Scope-aware resolution
//! (mapping prefixes to URIs) belongs to the parser; the store only needs the
//! prefix and local part of the name it was given.

use crate::error::Result;

/// Prefix and local part of a qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub prefix: Option<String>,
    pub local_name: String,
}

/// Derives `prefix`/`local_name` for a node whose name was just set.
pub trait NamespaceResolver {
    fn resolve(&self, qualified_name: &str) -> Result<QualifiedName>;
}

/// Splits on the first colon, without consulting any namespace scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct QNameResolver;

impl NamespaceResolver for QNameResolver {
    fn resolve(&self, qualified_name: &str) -> Result<QualifiedName> {
        let (prefix, local) = split_qname(qualified_name);
        Ok(QualifiedName {
            prefix: prefix.map(str::to_string),
            local_name: local.to_string(),
        })
    }
}

impl<F> NamespaceResolver for F
where
    F: Fn(&str) -> Result<QualifiedName>,
{
    fn resolve(&self, qualified_name: &str) -> Result<QualifiedName> {
        self(qualified_name)
    }
}

/// Splits a qualified name into its prefix and local parts.
///
/// Only the first colon separates: `a:b:c` is prefix `a`, local `b:c`.
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}
