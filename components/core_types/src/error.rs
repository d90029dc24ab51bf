//! Lua parse error types.
//!
//! The core raises exactly two kinds of error: a lexical error when a
//! character matches no token pattern, and a syntactic error when the next
//! token does not fit the grammar. Both are raised eagerly and carry the raw
//! byte offset; the line/column [`Diagnostic`] is rendered only on demand.

use crate::{Diagnostic, SourcePosition};
use std::fmt;

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character in the source matches no token pattern
    UnexpectedSymbol,
    /// The next token does not belong to the grammar position's FIRST set,
    /// or an expected literal terminal is missing
    WrongToken,
}

/// A lexical or syntactic error with enough context to render a
/// caret-anchored diagnostic.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, LuaError};
///
/// let error = LuaError {
///     kind: ErrorKind::UnexpectedSymbol,
///     text: "@".to_string(),
///     offset: 0,
///     expected: None,
///     after: None,
/// };
///
/// assert_eq!(error.to_string(), "unexpected symbol: @");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaError {
    /// The type of error
    pub kind: ErrorKind,
    /// Text of the offending token or character
    pub text: String,
    /// Byte offset of the offending token in the source
    pub offset: usize,
    /// What the grammar expected at this position, if known
    pub expected: Option<String>,
    /// The construct after which the error occurred, if known
    pub after: Option<String>,
}

impl LuaError {
    /// Render the full line/column diagnostic against the source text that
    /// produced this error.
    pub fn diagnose(&self, source: &str) -> Diagnostic {
        let pos = SourcePosition::from_offset(source, self.offset);
        let line_text = source
            .split('\n')
            .nth(pos.line as usize - 1)
            .unwrap_or("")
            .trim_end_matches('\r')
            .to_string();
        Diagnostic {
            line: pos.line,
            column: pos.column,
            offending_text: self.text.clone(),
            message: self.to_string(),
            line_text,
        }
    }
}

impl fmt::Display for LuaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::UnexpectedSymbol => write!(f, "unexpected symbol: {}", self.text),
            ErrorKind::WrongToken => {
                write!(f, "wrong token: '{}' but ", self.text)?;
                match &self.expected {
                    Some(expected) => write!(f, "{} expected", expected)?,
                    None => write!(f, "something else expected")?,
                }
                if let Some(after) = &self.after {
                    write!(f, " after {}", after)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LuaError {}
