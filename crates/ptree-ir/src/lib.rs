//! Core node model for ptree.
//!
//! A parse tree arrives from the host runtime already built. This crate
//! describes it: a closed set of node kinds, three typed slots per node,
//! sibling chains stored as ordered sequences, the local variable tables of
//! scopes, and the handles behind captured closures.
//!
//! Nothing here interprets a tree; the serializer in `rhizome-ptree-sexpr`
//! owns all per-kind semantics.

mod closure;
mod kind;
mod node;
mod table;

pub use closure::*;
pub use kind::NodeKind;
pub use node::*;
pub use table::*;
