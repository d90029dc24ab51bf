//! Error constructors shared by the lexer and parser.

use core_types::{ErrorKind, LuaError};

use crate::lexer::Token;

/// A character (or unterminated literal opener) that matches no token
/// pattern.
pub fn unexpected_symbol(text: String, offset: usize) -> LuaError {
    LuaError {
        kind: ErrorKind::UnexpectedSymbol,
        text,
        offset,
        expected: None,
        after: None,
    }
}

/// A token that does not fit the grammar at its position.
///
/// `expected` names what the grammar wanted ("expression", "variable
/// name", "'end'"); `after` names the construct just parsed, quoted when
/// it is a literal terminal.
pub fn wrong_token(token: &Token, expected: &str, after: Option<&str>) -> LuaError {
    LuaError {
        kind: ErrorKind::WrongToken,
        text: token.text.clone(),
        offset: token.offset,
        expected: Some(expected.to_string()),
        after: after.map(|a| a.to_string()),
    }
}
