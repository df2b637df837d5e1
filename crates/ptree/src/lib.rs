//! Parse trees of methods and types as S-expressions.
//!
//! ```text
//! (defn blah (scope (block (args) (return (call (lit 1) + (array (lit 1)))))))
//! ```
//!
//! A [`Runtime`] holds the host's types with their method tables and the
//! closures captured by block-defined methods. [`ParseTree`] looks methods up
//! in it and hands their bodies to the serializer.

mod driver;
mod error;
mod runtime;

pub use driver::{ParseTree, TypesTree};
pub use error::TreeError;
pub use runtime::{Runtime, TypeDef, TypeKind};

pub use rhizome_ptree_ir as ir;
pub use rhizome_ptree_sexpr as sexpr;
pub use rhizome_ptree_sexpr::{Options, SExpr};
