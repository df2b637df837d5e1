//! Read S-expressions from their printed form.

use crate::SExpr;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected `)` at offset {0}")]
    UnexpectedClose(usize),

    #[error("unterminated {what} starting at offset {offset}")]
    Unterminated { what: &'static str, offset: usize },

    #[error("invalid escape `\\{escape}` at offset {offset}")]
    InvalidEscape { escape: char, offset: usize },

    #[error("trailing input at offset {0}")]
    TrailingInput(usize),
}

/// Parse exactly one S-expression.
pub fn parse(input: &str) -> Result<SExpr, ReadError> {
    let mut reader = Reader {
        chars: input.char_indices().peekable(),
    };
    let value = reader.read()?;
    reader.skip_trivia();
    match reader.chars.peek() {
        Some(&(offset, _)) => Err(ReadError::TrailingInput(offset)),
        None => Ok(value),
    }
}

struct Reader<'a> {
    chars: Peekable<CharIndices<'a>>,
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '"' | '|' | ';')
}

impl Reader<'_> {
    /// Skips whitespace and `;` line comments.
    fn skip_trivia(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else if c == ';' {
                while let Some((_, c)) = self.chars.next() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read(&mut self) -> Result<SExpr, ReadError> {
        self.skip_trivia();
        let (offset, c) = self.chars.next().ok_or(ReadError::UnexpectedEnd)?;
        match c {
            '(' => self.read_list(offset),
            ')' => Err(ReadError::UnexpectedClose(offset)),
            '"' => self
                .read_delimited('"', "string", offset)
                .map(SExpr::Text),
            '|' => self.read_delimited('|', "atom", offset).map(SExpr::Atom),
            c => Ok(self.read_bare(c)),
        }
    }

    fn read_list(&mut self, offset: usize) -> Result<SExpr, ReadError> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.chars.peek() {
                None => {
                    return Err(ReadError::Unterminated {
                        what: "list",
                        offset,
                    })
                }
                Some(&(_, ')')) => {
                    self.chars.next();
                    return Ok(SExpr::Seq(items));
                }
                Some(_) => items.push(self.read()?),
            }
        }
    }

    /// Reads up to the closing `delim`, resolving escapes.
    fn read_delimited(
        &mut self,
        delim: char,
        what: &'static str,
        offset: usize,
    ) -> Result<String, ReadError> {
        let mut out = String::new();
        loop {
            let (at, c) = self
                .chars
                .next()
                .ok_or(ReadError::Unterminated { what, offset })?;
            match c {
                c if c == delim => return Ok(out),
                '\\' => {
                    let (_, escape) = self
                        .chars
                        .next()
                        .ok_or(ReadError::Unterminated { what, offset })?;
                    out.push(match escape {
                        'n' if delim == '"' => '\n',
                        't' if delim == '"' => '\t',
                        'r' if delim == '"' => '\r',
                        '\\' => '\\',
                        c if c == delim => c,
                        escape => return Err(ReadError::InvalidEscape { escape, offset: at }),
                    });
                }
                c => out.push(c),
            }
        }
    }

    fn read_bare(&mut self, first: char) -> SExpr {
        let mut token = String::from(first);
        while let Some(&(_, c)) = self.chars.peek() {
            if is_delimiter(c) {
                break;
            }
            token.push(c);
            self.chars.next();
        }
        match token.parse::<i64>() {
            Ok(v) => SExpr::Int(v),
            Err(_) => SExpr::Atom(token),
        }
    }
}
