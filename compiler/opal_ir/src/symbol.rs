//! Qualified operator symbols.
//!
//! A [`Symbol`] is an interned `namespace::base` operator name. All symbols
//! live in one process-wide table built on first use, so two symbols are
//! equal exactly when their qualified strings are equal, and comparison is
//! a single integer compare.

use std::fmt;
use std::sync::LazyLock;

use crate::interner::{InternError, StringInterner};
use crate::Name;

static SYMBOL_TABLE: LazyLock<StringInterner> = LazyLock::new(StringInterner::new);

const NAMESPACE_SEPARATOR: &str = "::";

/// Error when a string cannot be turned into a [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolError {
    #[error("`{0}` is not a qualified name (expected `namespace::name`)")]
    NotQualified(String),
    #[error("`{0}` has an empty namespace or base name")]
    EmptyComponent(String),
    #[error("`{0}` has more than one `::` separator")]
    NestedSeparator(String),
    #[error(transparent)]
    Intern(#[from] InternError),
}

/// Interned qualified operator name, e.g. `aten::add`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    qual: Name,
    ns: Name,
}

impl Symbol {
    /// Intern a `namespace::base` string.
    pub fn from_qual_string(s: &str) -> Result<Symbol, SymbolError> {
        let Some((ns, base)) = s.split_once(NAMESPACE_SEPARATOR) else {
            return Err(SymbolError::NotQualified(s.to_owned()));
        };
        if ns.is_empty() || base.is_empty() {
            return Err(SymbolError::EmptyComponent(s.to_owned()));
        }
        if base.contains(NAMESPACE_SEPARATOR) {
            return Err(SymbolError::NestedSeparator(s.to_owned()));
        }
        Ok(Symbol {
            qual: SYMBOL_TABLE.try_intern(s)?,
            ns: SYMBOL_TABLE.try_intern(ns)?,
        })
    }

    /// The full `namespace::base` string.
    pub fn qual_str(self) -> &'static str {
        SYMBOL_TABLE.lookup(self.qual)
    }

    /// The namespace component.
    pub fn namespace(self) -> &'static str {
        SYMBOL_TABLE.lookup(self.ns)
    }

    /// The name within the namespace.
    pub fn base(self) -> &'static str {
        let qual = self.qual_str();
        &qual[self.namespace().len() + NAMESPACE_SEPARATOR.len()..]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qual_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.qual_str())
    }
}

/// A symbol plus overload discriminator; the empty overload is the default.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct OperatorName {
    pub name: Symbol,
    pub overload_name: Box<str>,
}

impl OperatorName {
    pub fn new(name: Symbol, overload_name: impl Into<Box<str>>) -> Self {
        OperatorName {
            name,
            overload_name: overload_name.into(),
        }
    }

    /// Parse `namespace::base` or `namespace::base.overload`.
    pub fn parse(s: &str) -> Result<OperatorName, SymbolError> {
        let base_start = s
            .find(NAMESPACE_SEPARATOR)
            .map_or(0, |i| i + NAMESPACE_SEPARATOR.len());
        let (qual, overload) = match s[base_start..].find('.') {
            Some(dot) => (&s[..base_start + dot], &s[base_start + dot + 1..]),
            None => (s, ""),
        };
        Ok(OperatorName::new(Symbol::from_qual_string(qual)?, overload))
    }
}

impl fmt::Display for OperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overload_name.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.name, self.overload_name)
        }
    }
}

#[cfg(test)]
mod tests;
