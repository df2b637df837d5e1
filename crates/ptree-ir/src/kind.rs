//! Node kinds.

use serde::{Deserialize, Serialize};

macro_rules! node_kinds {
    ($($(#[$doc:meta])* $variant:ident = $id:literal => $name:literal,)*) => {
        /// The kind tag of a parse-tree node.
        ///
        /// Ids follow the host runtime's node type table. Ids the table does
        /// not know are kept as `Other` so they can still be reported.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum NodeKind {
            $($(#[$doc])* $variant,)*
            /// A raw kind id outside the known table.
            Other(u16),
        }

        impl NodeKind {
            /// Every known kind, in id order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant,)*];

            /// Canonical lowercase tag, used as the head of every emitted list.
            pub fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$variant => $name,)*
                    NodeKind::Other(_) => "unknown",
                }
            }

            /// Raw id in the host runtime's node type table.
            pub fn id(self) -> u16 {
                match self {
                    $(NodeKind::$variant => $id,)*
                    NodeKind::Other(id) => id,
                }
            }

            pub fn from_id(id: u16) -> Self {
                match id {
                    $($id => NodeKind::$variant,)*
                    other => NodeKind::Other(other),
                }
            }
        }
    };
}

node_kinds! {
    Method = 0 => "method",
    Fbody = 1 => "fbody",
    Cfunc = 2 => "cfunc",
    /// Introduces a local variable table.
    Scope = 3 => "scope",
    /// Statement sequence.
    Block = 4 => "block",
    If = 5 => "if",
    Case = 6 => "case",
    When = 7 => "when",
    OptN = 8 => "opt_n",
    While = 9 => "while",
    Until = 10 => "until",
    Iter = 11 => "iter",
    For = 12 => "for",
    Break = 13 => "break",
    Next = 14 => "next",
    Redo = 15 => "redo",
    Retry = 16 => "retry",
    Begin = 17 => "begin",
    Rescue = 18 => "rescue",
    Resbody = 19 => "resbody",
    Ensure = 20 => "ensure",
    And = 21 => "and",
    Or = 22 => "or",
    Not = 23 => "not",
    Masgn = 24 => "masgn",
    Lasgn = 25 => "lasgn",
    Dasgn = 26 => "dasgn",
    DasgnCurr = 27 => "dasgn_curr",
    Gasgn = 28 => "gasgn",
    Iasgn = 29 => "iasgn",
    Cdecl = 30 => "cdecl",
    Cvasgn = 31 => "cvasgn",
    Cvdecl = 32 => "cvdecl",
    /// Indexed compound assignment: `a[i] op= v`.
    OpAsgn1 = 33 => "op_asgn1",
    /// Attribute compound assignment: `a.b op= v`.
    OpAsgn2 = 34 => "op_asgn2",
    OpAsgnAnd = 35 => "op_asgn_and",
    OpAsgnOr = 36 => "op_asgn_or",
    Call = 37 => "call",
    /// Call without a receiver: `foo(args)`.
    Fcall = 38 => "fcall",
    /// Variable-or-call: `foo`.
    Vcall = 39 => "vcall",
    Super = 40 => "super",
    Zsuper = 41 => "zsuper",
    Array = 42 => "array",
    Zarray = 43 => "zarray",
    Hash = 44 => "hash",
    Return = 45 => "return",
    Yield = 46 => "yield",
    Lvar = 47 => "lvar",
    Dvar = 48 => "dvar",
    Gvar = 49 => "gvar",
    Ivar = 50 => "ivar",
    Const = 51 => "const",
    Cvar = 52 => "cvar",
    NthRef = 53 => "nth_ref",
    BackRef = 54 => "back_ref",
    Match = 55 => "match",
    Match2 = 56 => "match2",
    Match3 = 57 => "match3",
    Lit = 58 => "lit",
    Str = 59 => "str",
    Dstr = 60 => "dstr",
    Xstr = 61 => "xstr",
    Dxstr = 62 => "dxstr",
    Evstr = 63 => "evstr",
    Dregx = 64 => "dregx",
    DregxOnce = 65 => "dregx_once",
    Args = 66 => "args",
    Argscat = 67 => "argscat",
    Argspush = 68 => "argspush",
    Splat = 69 => "splat",
    ToAry = 70 => "to_ary",
    Svalue = 71 => "svalue",
    BlockArg = 72 => "block_arg",
    BlockPass = 73 => "block_pass",
    Defn = 74 => "defn",
    Defs = 75 => "defs",
    Alias = 76 => "alias",
    Valias = 77 => "valias",
    Undef = 78 => "undef",
    Class = 79 => "class",
    Module = 80 => "module",
    Sclass = 81 => "sclass",
    Colon2 = 82 => "colon2",
    Colon3 = 83 => "colon3",
    Cref = 84 => "cref",
    Dot2 = 85 => "dot2",
    Dot3 = 86 => "dot3",
    Flip2 = 87 => "flip2",
    Flip3 = 88 => "flip3",
    Attrset = 89 => "attrset",
    #[serde(rename = "self")]
    SelfRef = 90 => "self",
    Nil = 91 => "nil",
    True = 92 => "true",
    False = 93 => "false",
    Defined = 94 => "defined",
    /// Statement position marker: line number and source name.
    Newline = 95 => "newline",
    Postexe = 96 => "postexe",
    /// Method defined from another method object.
    Dmethod = 97 => "dmethod",
    /// Method defined from a block.
    Bmethod = 98 => "bmethod",
    Memo = 99 => "memo",
    Ifunc = 100 => "ifunc",
    Dsym = 101 => "dsym",
    Attrasgn = 102 => "attrasgn",
    Last = 103 => "last",
}

impl NodeKind {
    /// Whether this kind owns a local variable table.
    pub fn introduces_scope(self) -> bool {
        matches!(self, NodeKind::Scope)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Other(id) => write!(f, "unknown#{}", id),
            kind => f.write_str(kind.name()),
        }
    }
}
