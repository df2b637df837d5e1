//! Captured closures behind `bmethod` and `dmethod` nodes.
//!
//! A method defined from a block or from another method object does not own
//! its parameter and body nodes; it holds a handle to a runtime value. The
//! host supplies a [`CapturedClosures`] implementation that opens the handle.

use crate::{Ident, Node};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Opaque handle to a captured closure value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClosureRef(pub u64);

impl fmt::Display for ClosureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "closure#{}", self.0)
    }
}

/// A borrowed view of a captured closure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Captured<'a> {
    pub params: Option<&'a Node>,
    pub body: &'a Node,
    /// Name of the method the value was captured from (`dmethod` only).
    pub owner: Option<&'a Ident>,
}

pub trait CapturedClosures {
    fn captured(&self, handle: ClosureRef) -> Option<Captured<'_>>;
}

/// Resolver for graphs without captured closures.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClosures;

impl CapturedClosures for NoClosures {
    fn captured(&self, _handle: ClosureRef) -> Option<Captured<'_>> {
        None
    }
}

/// An owned captured closure, as a host adapter would dump it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedClosure {
    #[serde(default)]
    pub params: Option<Node>,
    pub body: Node,
    #[serde(default)]
    pub owner: Option<Ident>,
}

impl CapturedClosure {
    pub fn block(params: Option<Node>, body: Node) -> Self {
        Self {
            params,
            body,
            owner: None,
        }
    }

    pub fn method(owner: impl Into<Ident>, body: Node) -> Self {
        Self {
            params: None,
            body,
            owner: Some(owner.into()),
        }
    }

    pub fn as_captured(&self) -> Captured<'_> {
        Captured {
            params: self.params.as_ref(),
            body: &self.body,
            owner: self.owner.as_ref(),
        }
    }
}

impl CapturedClosures for BTreeMap<ClosureRef, CapturedClosure> {
    fn captured(&self, handle: ClosureRef) -> Option<Captured<'_>> {
        self.get(&handle).map(CapturedClosure::as_captured)
    }
}

impl CapturedClosures for HashMap<ClosureRef, CapturedClosure> {
    fn captured(&self, handle: ClosureRef) -> Option<Captured<'_>> {
        self.get(&handle).map(CapturedClosure::as_captured)
    }
}
