//! The S-expression value and its printed form.

use std::fmt;

/// Atom used where a child is absent.
pub const NIL: &str = "nil";

/// Serializer output: atoms, integers, text and ordered lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SExpr {
    Atom(String),
    Int(i64),
    Text(String),
    Seq(Vec<SExpr>),
}

impl SExpr {
    pub fn atom(name: impl Into<String>) -> Self {
        SExpr::Atom(name.into())
    }

    pub fn int(v: i64) -> Self {
        SExpr::Int(v)
    }

    pub fn text(s: impl Into<String>) -> Self {
        SExpr::Text(s.into())
    }

    pub fn seq(items: Vec<SExpr>) -> Self {
        SExpr::Seq(items)
    }

    /// The absent-child marker.
    pub fn nil() -> Self {
        SExpr::Atom(NIL.to_string())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, SExpr::Atom(name) if name == NIL)
    }

    /// Appends to a list. Any other value is first wrapped into a
    /// one-element list.
    pub fn push(&mut self, item: SExpr) {
        match self {
            SExpr::Seq(items) => items.push(item),
            other => {
                let first = std::mem::replace(other, SExpr::Seq(Vec::new()));
                *other = SExpr::Seq(vec![first, item]);
            }
        }
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SExpr::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SExpr::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Leading atom of a list, i.e. the node kind of a serialized node.
    pub fn head(&self) -> Option<&str> {
        self.as_seq()?.first()?.as_atom()
    }

    /// Elements after the leading atom.
    pub fn tail(&self) -> &[SExpr] {
        match self.as_seq() {
            Some([_, rest @ ..]) => rest,
            _ => &[],
        }
    }
}

impl From<i64> for SExpr {
    fn from(v: i64) -> Self {
        SExpr::Int(v)
    }
}

impl From<Vec<SExpr>> for SExpr {
    fn from(items: Vec<SExpr>) -> Self {
        SExpr::Seq(items)
    }
}

/// Whether an atom must be written between bars to read back as itself.
fn needs_bars(name: &str) -> bool {
    name.is_empty()
        || name.parse::<i64>().is_ok()
        || name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '|' | ';' | '\\'))
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Atom(name) if needs_bars(name) => {
                f.write_str("|")?;
                for c in name.chars() {
                    match c {
                        '|' => f.write_str("\\|")?,
                        '\\' => f.write_str("\\\\")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("|")
            }
            SExpr::Atom(name) => f.write_str(name),
            SExpr::Int(v) => write!(f, "{}", v),
            SExpr::Text(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            SExpr::Seq(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}
