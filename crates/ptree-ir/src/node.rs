//! Nodes and their slots.

use crate::{ClosureRef, LocalTable, NodeKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An interned name: method, variable, constant or operator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident(String);

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Literal payload of `lit`, `str`, `xstr` and `match` nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(Ident),
    /// Regular expression source, without delimiters.
    Regex(String),
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(i64::from(v))
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Str(v.to_string())
    }
}

/// One of the three typed slots of a node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[default]
    Empty,
    Node(Box<Node>),
    /// Threaded sibling chain (statements, elements, clauses, parts).
    Seq(Vec<Node>),
    Ident(Ident),
    Lit(Literal),
    Int(i64),
    Table(LocalTable),
    Closure(ClosureRef),
}

impl Slot {
    pub fn type_name(&self) -> &'static str {
        match self {
            Slot::Empty => "empty",
            Slot::Node(_) => "node",
            Slot::Seq(_) => "sequence",
            Slot::Ident(_) => "identifier",
            Slot::Lit(_) => "literal",
            Slot::Int(_) => "integer",
            Slot::Table(_) => "local table",
            Slot::Closure(_) => "closure",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    fn node(node: Option<Node>) -> Self {
        node.map_or(Slot::Empty, |n| Slot::Node(Box::new(n)))
    }
}

/// A slot held a different type than its node kind requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} slot {slot}: expected {expected}, found {found}")]
pub struct SlotError {
    pub kind: NodeKind,
    pub slot: usize,
    pub expected: &'static str,
    pub found: &'static str,
}

static EMPTY: Slot = Slot::Empty;

/// A parse-tree node: a kind tag and up to three slots.
///
/// A node owns everything reachable from its slots, so a node graph is
/// always a tree with threaded lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default)]
    pub slots: [Slot; 3],
}

impl Node {
    pub fn new(kind: NodeKind, slots: [Slot; 3]) -> Self {
        Self { kind, slots }
    }

    /// A node with all slots empty.
    pub fn leaf(kind: NodeKind) -> Self {
        Self::new(kind, Default::default())
    }

    pub fn with_slot(mut self, index: usize, slot: Slot) -> Self {
        self.slots[index] = slot;
        self
    }

    pub fn slot(&self, index: usize) -> &Slot {
        self.slots.get(index).unwrap_or(&EMPTY)
    }

    pub fn has_slot(&self, index: usize) -> bool {
        !self.slot(index).is_empty()
    }

    fn mismatch(&self, index: usize, expected: &'static str) -> SlotError {
        SlotError {
            kind: self.kind,
            slot: index,
            expected,
            found: self.slot(index).type_name(),
        }
    }

    /// Child node, `None` when the slot is empty.
    pub fn child(&self, index: usize) -> Result<Option<&Node>, SlotError> {
        match self.slot(index) {
            Slot::Empty => Ok(None),
            Slot::Node(node) => Ok(Some(node)),
            _ => Err(self.mismatch(index, "node")),
        }
    }

    /// Child node that the kind cannot do without.
    pub fn required(&self, index: usize) -> Result<&Node, SlotError> {
        match self.slot(index) {
            Slot::Node(node) => Ok(node),
            _ => Err(self.mismatch(index, "node")),
        }
    }

    /// Sibling chain. An empty slot is an empty chain and a single node is a
    /// chain of one.
    pub fn chain(&self, index: usize) -> Result<&[Node], SlotError> {
        match self.slot(index) {
            Slot::Empty => Ok(&[]),
            Slot::Seq(nodes) => Ok(nodes),
            Slot::Node(node) => Ok(std::slice::from_ref(node.as_ref())),
            _ => Err(self.mismatch(index, "sequence")),
        }
    }

    pub fn ident(&self, index: usize) -> Result<&Ident, SlotError> {
        match self.slot(index) {
            Slot::Ident(id) => Ok(id),
            _ => Err(self.mismatch(index, "identifier")),
        }
    }

    pub fn literal(&self, index: usize) -> Result<&Literal, SlotError> {
        match self.slot(index) {
            Slot::Lit(lit) => Ok(lit),
            _ => Err(self.mismatch(index, "literal")),
        }
    }

    pub fn int(&self, index: usize) -> Result<i64, SlotError> {
        match self.slot(index) {
            Slot::Int(v) => Ok(*v),
            _ => Err(self.mismatch(index, "integer")),
        }
    }

    pub fn int_opt(&self, index: usize) -> Result<Option<i64>, SlotError> {
        match self.slot(index) {
            Slot::Empty => Ok(None),
            Slot::Int(v) => Ok(Some(*v)),
            _ => Err(self.mismatch(index, "integer")),
        }
    }

    pub fn table(&self, index: usize) -> Result<Option<&LocalTable>, SlotError> {
        match self.slot(index) {
            Slot::Empty => Ok(None),
            Slot::Table(table) => Ok(Some(table)),
            _ => Err(self.mismatch(index, "local table")),
        }
    }

    pub fn closure(&self, index: usize) -> Result<ClosureRef, SlotError> {
        match self.slot(index) {
            Slot::Closure(handle) => Ok(*handle),
            _ => Err(self.mismatch(index, "closure")),
        }
    }
}

// Builder methods. Each fixes the slot layout its kind is read with.
impl Node {
    fn with_children(kind: NodeKind, a: Option<Node>, b: Option<Node>, c: Option<Node>) -> Self {
        Self::new(kind, [Slot::node(a), Slot::node(b), Slot::node(c)])
    }

    pub fn scope(table: Option<LocalTable>, body: Option<Node>) -> Self {
        let table = table.map_or(Slot::Empty, Slot::Table);
        Self::new(NodeKind::Scope, [table, Slot::Empty, Slot::node(body)])
    }

    pub fn block(stmts: Vec<Node>) -> Self {
        Self::new(NodeKind::Block, [Slot::Seq(stmts), Slot::Empty, Slot::Empty])
    }

    pub fn if_(cond: Node, then: Option<Node>, otherwise: Option<Node>) -> Self {
        Self::with_children(NodeKind::If, Some(cond), then, otherwise)
    }

    /// `clauses` holds `when` nodes, optionally followed by one default body.
    pub fn case(head: Node, clauses: Vec<Node>) -> Self {
        Self::new(
            NodeKind::Case,
            [Slot::node(Some(head)), Slot::Seq(clauses), Slot::Empty],
        )
    }

    pub fn when(matches: Node, body: Option<Node>) -> Self {
        Self::with_children(NodeKind::When, Some(matches), body, None)
    }

    pub fn while_loop(cond: Node, body: Option<Node>) -> Self {
        Self::with_children(NodeKind::While, Some(cond), body, None)
    }

    pub fn until_loop(cond: Node, body: Option<Node>) -> Self {
        Self::with_children(NodeKind::Until, Some(cond), body, None)
    }

    /// Records whether a loop tests its condition before the first pass.
    pub fn pre_test(self, pre_test: bool) -> Self {
        self.with_slot(2, Slot::Int(i64::from(pre_test)))
    }

    pub fn iter(call: Node, var: Option<Node>, body: Option<Node>) -> Self {
        Self::with_children(NodeKind::Iter, Some(call), var, body)
    }

    pub fn for_loop(iterable: Node, var: Option<Node>, body: Option<Node>) -> Self {
        Self::with_children(NodeKind::For, Some(iterable), var, body)
    }

    /// `break`, `next`, `yield` and `return`, with an optional value.
    pub fn jump(kind: NodeKind, value: Option<Node>) -> Self {
        Self::with_children(kind, value, None, None)
    }

    pub fn return_(value: Option<Node>) -> Self {
        Self::jump(NodeKind::Return, value)
    }

    pub fn yield_(value: Option<Node>) -> Self {
        Self::jump(NodeKind::Yield, value)
    }

    pub fn begin(body: Option<Node>) -> Self {
        Self::with_children(NodeKind::Begin, body, None, None)
    }

    pub fn rescue(body: Option<Node>, handlers: Vec<Node>, otherwise: Option<Node>) -> Self {
        Self::new(
            NodeKind::Rescue,
            [Slot::node(body), Slot::Seq(handlers), Slot::node(otherwise)],
        )
    }

    pub fn resbody(exceptions: Option<Node>, body: Option<Node>) -> Self {
        Self::with_children(NodeKind::Resbody, exceptions, body, None)
    }

    pub fn ensure(head: Option<Node>, ensure: Option<Node>) -> Self {
        Self::with_children(NodeKind::Ensure, head, None, ensure)
    }

    /// Two-operand kinds: `and`, `or`, `dot2`, `match2`, `argscat`, ...
    pub fn binary(kind: NodeKind, left: Node, right: Node) -> Self {
        Self::with_children(kind, Some(left), Some(right), None)
    }

    pub fn not(body: Node) -> Self {
        Self::with_children(NodeKind::Not, None, Some(body), None)
    }

    pub fn masgn(targets: Node, value: Option<Node>, splat: Option<Node>) -> Self {
        Self::with_children(NodeKind::Masgn, Some(targets), value, splat)
    }

    /// Simple assignment kinds: `lasgn`, `iasgn`, `gasgn`, `cdecl`, ...
    pub fn asgn(kind: NodeKind, name: impl Into<Ident>, value: Option<Node>) -> Self {
        Self::new(
            kind,
            [Slot::Ident(name.into()), Slot::node(value), Slot::Empty],
        )
    }

    pub fn lasgn(name: impl Into<Ident>, value: Node) -> Self {
        Self::asgn(NodeKind::Lasgn, name, Some(value))
    }

    pub fn dasgn_curr(name: impl Into<Ident>, value: Option<Node>) -> Self {
        Self::asgn(NodeKind::DasgnCurr, name, value)
    }

    /// `recv[index] op= value`, stored as value before index.
    pub fn op_asgn1(recv: Node, index: Node, op: impl Into<Ident>, value: Node) -> Self {
        Self::new(
            NodeKind::OpAsgn1,
            [
                Slot::node(Some(recv)),
                Slot::Ident(op.into()),
                Slot::Seq(vec![value, index]),
            ],
        )
    }

    /// `recv.attr op= value`. `attr` is the setter name (`var=`).
    pub fn op_asgn2(recv: Node, attr: impl Into<Ident>, op: impl Into<Ident>, value: Node) -> Self {
        let attr = attr.into();
        let reader = Ident::new(attr.as_str().trim_end_matches('='));
        let selector = Self::new(
            NodeKind::OpAsgn2,
            [Slot::Ident(attr), Slot::Ident(op.into()), Slot::Ident(reader)],
        );
        Self::with_children(NodeKind::OpAsgn2, Some(recv), Some(value), Some(selector))
    }

    pub fn call(recv: Node, mid: impl Into<Ident>, args: Option<Node>) -> Self {
        Self::new(
            NodeKind::Call,
            [Slot::node(Some(recv)), Slot::Ident(mid.into()), Slot::node(args)],
        )
    }

    pub fn fcall(mid: impl Into<Ident>, args: Option<Node>) -> Self {
        Self::new(
            NodeKind::Fcall,
            [Slot::Empty, Slot::Ident(mid.into()), Slot::node(args)],
        )
    }

    pub fn vcall(mid: impl Into<Ident>) -> Self {
        Self::new(
            NodeKind::Vcall,
            [Slot::Empty, Slot::Ident(mid.into()), Slot::Empty],
        )
    }

    pub fn super_(args: Option<Node>) -> Self {
        Self::with_children(NodeKind::Super, None, None, args)
    }

    pub fn array(elems: Vec<Node>) -> Self {
        Self::new(NodeKind::Array, [Slot::Seq(elems), Slot::Empty, Slot::Empty])
    }

    /// `entries` alternates keys and values.
    pub fn hash(entries: Vec<Node>) -> Self {
        Self::new(NodeKind::Hash, [Slot::Seq(entries), Slot::Empty, Slot::Empty])
    }

    /// Variable and constant references: `lvar`, `ivar`, `gvar`, `const`, ...
    pub fn var(kind: NodeKind, name: impl Into<Ident>) -> Self {
        Self::new(kind, [Slot::Ident(name.into()), Slot::Empty, Slot::Empty])
    }

    pub fn lvar(name: impl Into<Ident>) -> Self {
        Self::var(NodeKind::Lvar, name)
    }

    pub fn nth_ref(n: i64) -> Self {
        Self::new(NodeKind::NthRef, [Slot::Empty, Slot::Int(n), Slot::Empty])
    }

    pub fn back_ref(c: char) -> Self {
        Self::new(
            NodeKind::BackRef,
            [Slot::Empty, Slot::Int(i64::from(u32::from(c))), Slot::Empty],
        )
    }

    pub fn lit(value: impl Into<Literal>) -> Self {
        Self::new(NodeKind::Lit, [Slot::Lit(value.into()), Slot::Empty, Slot::Empty])
    }

    pub fn sym(name: impl Into<Ident>) -> Self {
        Self::lit(Literal::Symbol(name.into()))
    }

    pub fn str_(value: impl Into<String>) -> Self {
        Self::new(
            NodeKind::Str,
            [Slot::Lit(Literal::Str(value.into())), Slot::Empty, Slot::Empty],
        )
    }

    pub fn xstr(command: impl Into<String>) -> Self {
        Self::new(
            NodeKind::Xstr,
            [Slot::Lit(Literal::Str(command.into())), Slot::Empty, Slot::Empty],
        )
    }

    /// Interpolated string family: `dstr`, `dxstr`, `dregx`, `dregx_once`, `dsym`.
    pub fn interpolated(kind: NodeKind, prefix: impl Into<String>, parts: Vec<Node>) -> Self {
        Self::new(
            kind,
            [Slot::Lit(Literal::Str(prefix.into())), Slot::Empty, Slot::Seq(parts)],
        )
    }

    pub fn dstr(prefix: impl Into<String>, parts: Vec<Node>) -> Self {
        Self::interpolated(NodeKind::Dstr, prefix, parts)
    }

    pub fn evstr(body: Node) -> Self {
        Self::with_children(NodeKind::Evstr, None, Some(body), None)
    }

    /// Parameter list. `rest` is -1 for no splat, -2 for an anonymous one,
    /// otherwise the splat's position in the local table minus one.
    pub fn args(required: i64, optional: Option<Node>, rest: i64) -> Self {
        Self::new(
            NodeKind::Args,
            [Slot::Int(required), Slot::node(optional), Slot::Int(rest)],
        )
    }

    pub fn no_args() -> Self {
        Self::args(0, None, -1)
    }

    pub fn splat(head: Node) -> Self {
        Self::with_children(NodeKind::Splat, Some(head), None, None)
    }

    pub fn block_arg(name: impl Into<Ident>) -> Self {
        Self::var(NodeKind::BlockArg, name)
    }

    pub fn block_pass(body: Node, iter: Node) -> Self {
        Self::with_children(NodeKind::BlockPass, None, Some(body), Some(iter))
    }

    pub fn defn(name: impl Into<Ident>, body: Option<Node>) -> Self {
        Self::new(
            NodeKind::Defn,
            [Slot::Empty, Slot::Ident(name.into()), Slot::node(body)],
        )
    }

    pub fn defs(recv: Node, name: impl Into<Ident>, body: Option<Node>) -> Self {
        Self::new(
            NodeKind::Defs,
            [Slot::node(Some(recv)), Slot::Ident(name.into()), Slot::node(body)],
        )
    }

    pub fn alias(new: impl Into<Ident>, old: impl Into<Ident>) -> Self {
        Self::new(
            NodeKind::Alias,
            [Slot::Ident(new.into()), Slot::Ident(old.into()), Slot::Empty],
        )
    }

    pub fn undef(name: impl Into<Ident>) -> Self {
        Self::new(NodeKind::Undef, [Slot::Empty, Slot::Ident(name.into()), Slot::Empty])
    }

    pub fn class(name: impl Into<Ident>, superclass: Option<Node>, body: Option<Node>) -> Self {
        Self::new(
            NodeKind::Class,
            [Slot::Ident(name.into()), Slot::node(body), Slot::node(superclass)],
        )
    }

    pub fn module(name: impl Into<Ident>, body: Option<Node>) -> Self {
        Self::new(
            NodeKind::Module,
            [Slot::Ident(name.into()), Slot::node(body), Slot::Empty],
        )
    }

    pub fn colon2(head: Node, name: impl Into<Ident>) -> Self {
        Self::new(
            NodeKind::Colon2,
            [Slot::node(Some(head)), Slot::Ident(name.into()), Slot::Empty],
        )
    }

    pub fn colon3(name: impl Into<Ident>) -> Self {
        Self::new(NodeKind::Colon3, [Slot::Empty, Slot::Ident(name.into()), Slot::Empty])
    }

    pub fn self_() -> Self {
        Self::leaf(NodeKind::SelfRef)
    }

    pub fn nil() -> Self {
        Self::leaf(NodeKind::Nil)
    }

    pub fn true_() -> Self {
        Self::leaf(NodeKind::True)
    }

    pub fn false_() -> Self {
        Self::leaf(NodeKind::False)
    }

    /// Statement position marker in front of `next`.
    pub fn newline(line: i64, file: impl Into<String>, next: Node) -> Self {
        Self::new(
            NodeKind::Newline,
            [
                Slot::Int(line),
                Slot::Lit(Literal::Str(file.into())),
                Slot::node(Some(next)),
            ],
        )
    }

    pub fn bmethod(handle: ClosureRef) -> Self {
        Self::new(NodeKind::Bmethod, [Slot::Closure(handle), Slot::Empty, Slot::Empty])
    }

    pub fn dmethod(handle: ClosureRef) -> Self {
        Self::new(NodeKind::Dmethod, [Slot::Closure(handle), Slot::Empty, Slot::Empty])
    }

    pub fn attrasgn(recv: Node, mid: impl Into<Ident>, args: Option<Node>) -> Self {
        Self::new(
            NodeKind::Attrasgn,
            [Slot::node(Some(recv)), Slot::Ident(mid.into()), Slot::node(args)],
        )
    }
}
