//! Convert nodes to S-expressions.
//!
//! The walk runs on an explicit task stack. Serializing a node opens a fresh
//! list frame headed by its kind, schedules its slots in emission order and
//! closes the frame. A statement chain in a splicing position schedules its
//! statements straight into the list that is already open, so nothing about
//! chain length ever reaches the Rust call stack.

use crate::{Diagnostics, Options, SExpr, SerializeError, TracingDiagnostics, UnhandledNode};
use rhizome_ptree_ir::*;

static NO_CLOSURES: NoClosures = NoClosures;

/// Serialize `root` with default collaborators: no captured closures and
/// diagnostics logged through `tracing`.
pub fn serialize(root: &Node, options: &Options) -> Result<SExpr, SerializeError> {
    Serializer::new(*options).serialize(root)
}

pub struct Serializer<'a> {
    options: Options,
    closures: &'a dyn CapturedClosures,
    diagnostics: Option<&'a mut dyn Diagnostics>,
}

impl<'a> Serializer<'a> {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            closures: &NO_CLOSURES,
            diagnostics: None,
        }
    }

    pub fn with_closures(mut self, closures: &'a dyn CapturedClosures) -> Self {
        self.closures = closures;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: &'a mut dyn Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Serialize one tree into one list.
    ///
    /// A line-marker root yields its forms inside a `(block ...)` whether or
    /// not markers are emitted, so both settings share one shape.
    pub fn serialize<'n>(&mut self, root: &'n Node) -> Result<SExpr, SerializeError>
    where
        'a: 'n,
    {
        let mut forms = Vec::new();
        self.serialize_into(root, &mut forms)?;
        if root.kind != NodeKind::Newline && forms.len() == 1 {
            return Ok(forms.remove(0));
        }
        forms.insert(0, SExpr::atom(NodeKind::Block.name()));
        Ok(SExpr::Seq(forms))
    }

    /// Append the forms of `root` to `out`. `out` is untouched on error.
    #[tracing::instrument(level = "trace", skip_all, fields(kind = %root.kind))]
    pub fn serialize_into<'n>(
        &mut self,
        root: &'n Node,
        out: &mut Vec<SExpr>,
    ) -> Result<(), SerializeError>
    where
        'a: 'n,
    {
        let mut tracing = TracingDiagnostics;
        let diagnostics: &mut dyn Diagnostics = match self.diagnostics.as_deref_mut() {
            Some(diagnostics) => diagnostics,
            None => &mut tracing,
        };
        let mut walk = Walk {
            options: self.options,
            closures: self.closures,
            diagnostics,
            tasks: vec![Task::Emit(root)],
            frames: Vec::new(),
            output: Vec::new(),
            tables: Vec::new(),
        };
        walk.run()?;
        out.append(&mut walk.output);
        Ok(())
    }
}

/// Pending work, popped last-in first-out.
enum Task<'n> {
    /// Serialize a node as one element of the open list.
    Emit(&'n Node),
    /// Serialize a node, merging a statement chain into the open list.
    Splice(&'n Node),
    /// Append a finished value to the open list.
    Push(SExpr),
    /// Close the innermost frame and append it to its parent.
    Close,
    /// Continue a rescue handler chain inside the previous handler.
    Handlers(&'n [Node]),
    EnterScope(Option<&'n LocalTable>),
    LeaveScope,
}

struct Walk<'n, 'd> {
    options: Options,
    closures: &'n dyn CapturedClosures,
    diagnostics: &'d mut dyn Diagnostics,
    tasks: Vec<Task<'n>>,
    /// Open lists, innermost last.
    frames: Vec<Vec<SExpr>>,
    output: Vec<SExpr>,
    tables: Vec<Option<&'n LocalTable>>,
}

impl<'n> Walk<'n, '_> {
    fn run(&mut self) -> Result<(), SerializeError> {
        while let Some(task) = self.tasks.pop() {
            match task {
                Task::Emit(node) => self.node(node, false)?,
                Task::Splice(node) => self.node(node, true)?,
                Task::Push(value) => self.current().push(value),
                Task::Close => {
                    if let Some(list) = self.frames.pop() {
                        self.current().push(SExpr::Seq(list));
                    }
                }
                Task::Handlers(chain) => self.handlers(chain)?,
                Task::EnterScope(table) => self.tables.push(table),
                Task::LeaveScope => {
                    self.tables.pop();
                }
            }
        }
        Ok(())
    }

    fn current(&mut self) -> &mut Vec<SExpr> {
        match self.frames.last_mut() {
            Some(frame) => frame,
            None => &mut self.output,
        }
    }

    fn table(&self) -> Option<&'n LocalTable> {
        self.tables.last().copied().flatten()
    }

    /// Open a frame for `kind` and schedule `plan` inside it.
    fn open(&mut self, kind: NodeKind, plan: Vec<Task<'n>>) {
        self.frames.push(vec![SExpr::atom(kind.name())]);
        self.tasks.push(Task::Close);
        self.tasks.extend(plan.into_iter().rev());
    }

    fn node(&mut self, node: &'n Node, splice: bool) -> Result<(), SerializeError> {
        let mut plan = Vec::new();
        match node.kind {
            NodeKind::Block => {
                let stmts = node.chain(0)?.iter().map(Task::Splice);
                if splice {
                    self.tasks.extend(stmts.rev());
                } else {
                    self.open(node.kind, stmts.collect());
                }
                return Ok(());
            }

            NodeKind::Newline => {
                if self.options.include_line_markers {
                    let marker = SExpr::seq(vec![
                        SExpr::atom(node.kind.name()),
                        SExpr::int(node.int(0)?),
                        SExpr::text(text_literal(node, 1)?),
                    ]);
                    self.current().push(marker);
                }
                if let Some(next) = node.child(2)? {
                    self.tasks.push(if splice {
                        Task::Splice(next)
                    } else {
                        Task::Emit(next)
                    });
                }
                return Ok(());
            }

            NodeKind::Method | NodeKind::Scope => plan.push(or_nil(node, 2)?),

            NodeKind::Fbody
            | NodeKind::Defined
            | NodeKind::Splat
            | NodeKind::ToAry
            | NodeKind::Svalue => plan.push(or_nil(node, 0)?),

            NodeKind::OptN | NodeKind::Not | NodeKind::Evstr => plan.push(or_nil(node, 1)?),

            NodeKind::If => {
                plan.push(or_nil(node, 0)?);
                plan.push(or_nil(node, 1)?);
                plan.push(or_nil(node, 2)?);
            }

            NodeKind::Case => {
                plan.push(or_nil(node, 0)?);
                let clauses = node.chain(1)?;
                for (position, clause) in clauses.iter().enumerate() {
                    if clause.kind != NodeKind::When && position + 1 != clauses.len() {
                        return Err(SerializeError::MisplacedDefault {
                            position,
                            len: clauses.len(),
                        });
                    }
                    plan.push(Task::Emit(clause));
                }
                if clauses.last().map_or(true, |c| c.kind == NodeKind::When) {
                    plan.push(Task::Push(SExpr::nil()));
                }
            }

            NodeKind::When => {
                plan.push(or_nil(node, 0)?);
                plan.push(or_nil(node, 1)?);
            }

            NodeKind::While | NodeKind::Until => {
                plan.push(or_nil(node, 0)?);
                plan.push(spliced_or_nil(node, 1)?);
                if let Some(flag) = node.int_opt(2)? {
                    let flag = if flag != 0 { "true" } else { "false" };
                    plan.push(Task::Push(SExpr::atom(flag)));
                }
            }

            NodeKind::Iter | NodeKind::For => {
                plan.push(or_nil(node, 0)?);
                plan.push(match node.slot(1) {
                    Slot::Empty | Slot::Int(1) | Slot::Int(2) => Task::Push(SExpr::nil()),
                    _ => Task::Emit(node.required(1)?),
                });
                plan.push(or_nil(node, 2)?);
            }

            NodeKind::Break | NodeKind::Next | NodeKind::Yield | NodeKind::Return => {
                optional(&mut plan, node, 0)?;
            }

            NodeKind::Begin => plan.push(spliced_or_nil(node, 0)?),

            NodeKind::Rescue => {
                plan.push(or_nil(node, 0)?);
                let handlers = node.chain(1)?;
                plan.push(if handlers.is_empty() {
                    Task::Push(SExpr::nil())
                } else {
                    Task::Handlers(handlers)
                });
                optional(&mut plan, node, 2)?;
            }

            NodeKind::Resbody => {
                plan.push(or_nil(node, 0)?);
                plan.push(or_nil(node, 1)?);
            }

            NodeKind::Ensure => {
                plan.push(or_nil(node, 0)?);
                optional(&mut plan, node, 2)?;
            }

            NodeKind::And
            | NodeKind::Or
            | NodeKind::Match2
            | NodeKind::Match3
            | NodeKind::Dot2
            | NodeKind::Dot3
            | NodeKind::Flip2
            | NodeKind::Flip3
            | NodeKind::Argscat
            | NodeKind::Argspush
            | NodeKind::OpAsgnAnd
            | NodeKind::OpAsgnOr
            | NodeKind::Sclass => {
                plan.push(or_nil(node, 0)?);
                plan.push(or_nil(node, 1)?);
            }

            NodeKind::Masgn => {
                plan.push(or_nil(node, 0)?);
                match node.slot(2) {
                    Slot::Empty | Slot::Int(-1) => {}
                    _ => plan.push(Task::Emit(node.required(2)?)),
                }
                plan.push(or_nil(node, 1)?);
            }

            NodeKind::Lasgn
            | NodeKind::Dasgn
            | NodeKind::DasgnCurr
            | NodeKind::Gasgn
            | NodeKind::Iasgn
            | NodeKind::Cdecl
            | NodeKind::Cvasgn
            | NodeKind::Cvdecl => {
                plan.push(ident(node, 0)?);
                optional(&mut plan, node, 1)?;
            }

            NodeKind::OpAsgn1 => {
                let (value, index) = match node.chain(2)? {
                    [value, index] => (value, index),
                    other => return Err(SerializeError::OpAsgnArity { len: other.len() }),
                };
                plan.push(or_nil(node, 0)?);
                plan.push(Task::Emit(index));
                plan.push(ident(node, 1)?);
                plan.push(Task::Emit(value));
            }

            NodeKind::OpAsgn2 => {
                let selector = node.required(2)?;
                plan.push(or_nil(node, 0)?);
                plan.push(ident(selector, 0)?);
                plan.push(ident(selector, 1)?);
                plan.push(or_nil(node, 1)?);
            }

            NodeKind::Call => {
                optional(&mut plan, node, 0)?;
                plan.push(ident(node, 1)?);
                optional(&mut plan, node, 2)?;
            }

            NodeKind::Fcall => {
                plan.push(ident(node, 1)?);
                plan.push(or_nil(node, 2)?);
            }

            NodeKind::Vcall => plan.push(ident(node, 1)?),

            NodeKind::Super => optional(&mut plan, node, 2)?,

            NodeKind::Array => plan.extend(node.chain(0)?.iter().map(Task::Emit)),

            NodeKind::Hash => {
                let entries = node.chain(0)?;
                if entries.len() % 2 != 0 {
                    return Err(SerializeError::OddHashEntries { len: entries.len() });
                }
                for pair in entries.chunks_exact(2) {
                    plan.push(Task::Emit(&pair[0]));
                    plan.push(Task::Emit(&pair[1]));
                }
            }

            NodeKind::Lvar
            | NodeKind::Dvar
            | NodeKind::Ivar
            | NodeKind::Cvar
            | NodeKind::Gvar
            | NodeKind::Const
            | NodeKind::Attrset
            | NodeKind::BlockArg => plan.push(ident(node, 0)?),

            NodeKind::NthRef => plan.push(Task::Push(SExpr::int(node.int(1)?))),

            NodeKind::BackRef => {
                let value = node.int(1)?;
                let c = u32::try_from(value)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(SerializeError::InvalidBackRef { value })?;
                plan.push(Task::Push(SExpr::atom(c.to_string())));
            }

            NodeKind::Lit | NodeKind::Str | NodeKind::Xstr | NodeKind::Match => {
                plan.push(Task::Push(literal(node.literal(0)?)));
            }

            NodeKind::Dstr
            | NodeKind::Dxstr
            | NodeKind::Dregx
            | NodeKind::DregxOnce
            | NodeKind::Dsym => {
                plan.push(Task::Push(SExpr::text(text_literal(node, 0)?)));
                for part in node.chain(2)? {
                    plan.push(match part.kind {
                        NodeKind::Evstr => or_nil(part, 1)?,
                        _ => Task::Emit(part),
                    });
                }
            }

            NodeKind::Args => self.args(node, &mut plan)?,

            NodeKind::BlockPass => {
                plan.push(or_nil(node, 1)?);
                plan.push(or_nil(node, 2)?);
            }

            NodeKind::Defn => {
                if let Some(body) = node.child(2)? {
                    plan.push(ident(node, 1)?);
                    plan.push(Task::Emit(body));
                }
            }

            NodeKind::Defs => {
                if let Some(body) = node.child(2)? {
                    plan.push(or_nil(node, 0)?);
                    plan.push(ident(node, 1)?);
                    plan.push(Task::Emit(body));
                }
            }

            NodeKind::Alias | NodeKind::Valias => {
                plan.push(ident(node, 0)?);
                plan.push(ident(node, 1)?);
            }

            NodeKind::Undef | NodeKind::Colon3 => plan.push(ident(node, 1)?),

            NodeKind::Class => {
                plan.push(ident(node, 0)?);
                optional(&mut plan, node, 2)?;
                plan.push(or_nil(node, 1)?);
            }

            NodeKind::Module => {
                plan.push(ident(node, 0)?);
                plan.push(or_nil(node, 1)?);
            }

            NodeKind::Colon2 => {
                plan.push(or_nil(node, 0)?);
                plan.push(ident(node, 1)?);
            }

            NodeKind::Attrasgn => {
                plan.push(or_nil(node, 0)?);
                plan.push(ident(node, 1)?);
                plan.push(or_nil(node, 2)?);
            }

            NodeKind::Bmethod => {
                let captured = self.captured(node)?;
                plan.push(captured.params.map_or(Task::Push(SExpr::nil()), Task::Emit));
                plan.push(Task::Emit(captured.body));
            }

            NodeKind::Dmethod => {
                let captured = self.captured(node)?;
                plan.push(Task::Push(
                    captured
                        .owner
                        .map_or_else(SExpr::nil, |owner| SExpr::atom(owner.as_str())),
                ));
                plan.push(Task::Emit(captured.body));
            }

            NodeKind::Redo
            | NodeKind::Retry
            | NodeKind::SelfRef
            | NodeKind::Nil
            | NodeKind::True
            | NodeKind::False
            | NodeKind::Zarray
            | NodeKind::Zsuper
            | NodeKind::Postexe => {}

            // Runtime-only kinds and ids outside the table.
            NodeKind::Cfunc
            | NodeKind::Cref
            | NodeKind::Memo
            | NodeKind::Ifunc
            | NodeKind::Last
            | NodeKind::Other(_) => {
                self.diagnostics.unhandled(UnhandledNode::of(node));
                self.current().push(SExpr::seq(vec![
                    SExpr::atom("unhandled"),
                    SExpr::int(i64::from(node.kind.id())),
                ]));
                return Ok(());
            }
        }
        if node.kind.introduces_scope() {
            plan.insert(0, Task::EnterScope(node.table(0)?));
            plan.push(Task::LeaveScope);
        }
        self.open(node.kind, plan);
        Ok(())
    }

    /// Open one handler of a rescue chain; the rest of the chain nests
    /// inside it.
    fn handlers(&mut self, chain: &'n [Node]) -> Result<(), SerializeError> {
        let Some((first, rest)) = chain.split_first() else {
            return Ok(());
        };
        if first.kind != NodeKind::Resbody {
            return Err(SerializeError::UnexpectedHandler { found: first.kind });
        }
        let mut plan = vec![or_nil(first, 0)?, or_nil(first, 1)?];
        if !rest.is_empty() {
            plan.push(Task::Handlers(rest));
        }
        self.open(first.kind, plan);
        Ok(())
    }

    /// Parameter names come from the enclosing scope's local table. Without
    /// one, or with nothing declared, the list stays bare.
    fn args(&self, node: &'n Node, plan: &mut Vec<Task<'n>>) -> Result<(), SerializeError> {
        let required = node.int(0)?;
        let optional = node.child(1)?;
        let rest = node.int(2)?;
        let Some(table) = self.table() else {
            return Ok(());
        };
        if required == 0 && optional.is_none() && rest == -1 {
            return Ok(());
        }

        let resolve = |index: usize| -> Result<&'n Ident, SerializeError> {
            table.resolve(index).map_err(|source| SerializeError::LocalTable {
                kind: node.kind,
                source,
            })
        };

        let required = usize::try_from(required).map_err(|_| SerializeError::InvalidArgs {
            field: "required",
            value: required,
        })?;
        let optional_count = match optional {
            Some(defaults) if defaults.kind == NodeKind::Block => defaults.chain(0)?.len(),
            Some(_) => 1,
            None => 0,
        };
        for index in LocalTable::RESERVED..LocalTable::RESERVED + required + optional_count {
            plan.push(Task::Push(SExpr::atom(resolve(index)?.as_str())));
        }

        match rest {
            -1 | -2 => {}
            r if r > 0 => {
                let name = resolve(r as usize + 1)?;
                plan.push(Task::Push(SExpr::atom(format!("*{}", name))));
            }
            value => {
                return Err(SerializeError::InvalidArgs {
                    field: "rest",
                    value,
                })
            }
        }

        if let Some(defaults) = optional {
            plan.push(Task::Emit(defaults));
        }
        Ok(())
    }

    fn captured(&self, node: &'n Node) -> Result<Captured<'n>, SerializeError> {
        let handle = node.closure(0)?;
        self.closures
            .captured(handle)
            .ok_or(SerializeError::ClosureUnavailable {
                kind: node.kind,
                handle,
            })
    }
}

fn or_nil(node: &Node, index: usize) -> Result<Task<'_>, SerializeError> {
    Ok(node
        .child(index)?
        .map_or(Task::Push(SExpr::nil()), Task::Emit))
}

fn spliced_or_nil(node: &Node, index: usize) -> Result<Task<'_>, SerializeError> {
    Ok(node
        .child(index)?
        .map_or(Task::Push(SExpr::nil()), Task::Splice))
}

fn optional<'n>(plan: &mut Vec<Task<'n>>, node: &'n Node, index: usize) -> Result<(), SerializeError> {
    if let Some(child) = node.child(index)? {
        plan.push(Task::Emit(child));
    }
    Ok(())
}

fn ident(node: &Node, index: usize) -> Result<Task<'static>, SerializeError> {
    Ok(Task::Push(SExpr::atom(node.ident(index)?.as_str())))
}

fn text_literal(node: &Node, index: usize) -> Result<&str, SerializeError> {
    match node.literal(index)? {
        Literal::Str(s) | Literal::Regex(s) => Ok(s.as_str()),
        _ => Err(SlotError {
            kind: node.kind,
            slot: index,
            expected: "string literal",
            found: "literal",
        }
        .into()),
    }
}

fn literal(lit: &Literal) -> SExpr {
    match lit {
        Literal::Int(v) => SExpr::Int(*v),
        Literal::Float(v) => SExpr::Atom(format!("{:?}", v)),
        Literal::Str(s) | Literal::Regex(s) => SExpr::Text(s.clone()),
        Literal::Symbol(name) => SExpr::Atom(name.as_str().to_string()),
    }
}
