//! Local variable tables.

use crate::Ident;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalTableError {
    #[error("local table index {index} out of range (table has {len} entries)")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered names of one scope.
///
/// The first [`LocalTable::RESERVED`] positions belong to the host runtime;
/// declared parameters and locals follow in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalTable {
    names: Vec<Ident>,
}

impl LocalTable {
    pub const RESERVED: usize = 3;

    /// A table taken verbatim from the host, reserved positions included.
    pub fn new(names: Vec<Ident>) -> Self {
        Self { names }
    }

    /// A table whose declared names start at the first unreserved position.
    pub fn with_locals<I, S>(locals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Ident>,
    {
        let mut names = vec![Ident::new(""), Ident::new("$_"), Ident::new("$~")];
        names.extend(locals.into_iter().map(Into::into));
        Self::new(names)
    }

    pub fn resolve(&self, index: usize) -> Result<&Ident, LocalTableError> {
        self.names.get(index).ok_or(LocalTableError::OutOfRange {
            index,
            len: self.names.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Declared names, reserved positions skipped.
    pub fn locals(&self) -> impl Iterator<Item = &Ident> {
        self.names.iter().skip(Self::RESERVED)
    }
}
