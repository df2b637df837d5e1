//! S-expression serialization for ptree nodes.
//!
//! Converts a parse tree into nested lists of atoms, integers and text.
//!
//! Output format: `(kind ...slot-forms)`
//! - `(lit 1)` → literal
//! - `(call (lit 1) + (array (lit 1)))` → call with receiver and arguments
//! - `(if cond nil (return (lit 2)))` → absent branches are `nil`
//!
//! The value can be printed to and read back from that textual notation, or
//! carried as JSON arrays.

mod diagnostics;
mod json;
mod options;
mod read;
mod to_sexpr;
mod value;

pub use diagnostics::{Diagnostics, TracingDiagnostics, UnhandledNode};
pub use json::{from_json, to_json, JsonError};
pub use options::Options;
pub use read::{parse, ReadError};
pub use to_sexpr::{serialize, Serializer};
pub use value::SExpr;

use rhizome_ptree_ir::{ClosureRef, LocalTableError, NodeKind, SlotError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("{kind}: {source}")]
    LocalTable {
        kind: NodeKind,
        #[source]
        source: LocalTableError,
    },

    #[error("hash literal has an odd number of entries ({len})")]
    OddHashEntries { len: usize },

    #[error("case default clause at position {position} of {len} is not last")]
    MisplacedDefault { position: usize, len: usize },

    #[error("rescue handler chain contains {found}, expected resbody")]
    UnexpectedHandler { found: NodeKind },

    #[error("args: invalid {field} value {value}")]
    InvalidArgs { field: &'static str, value: i64 },

    #[error("back_ref: invalid character code {value}")]
    InvalidBackRef { value: i64 },

    #[error("op_asgn1: expected value and index, found {len} entries")]
    OpAsgnArity { len: usize },

    #[error("{kind}: captured value {handle} is unavailable")]
    ClosureUnavailable { kind: NodeKind, handle: ClosureRef },
}

impl SerializeError {
    /// Whether the input graph broke one of its structural invariants, as
    /// opposed to a captured closure the host could not open.
    pub fn is_structural(&self) -> bool {
        !matches!(self, SerializeError::ClosureUnavailable { .. })
    }
}
