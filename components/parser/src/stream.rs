//! Buffered token stream with unbounded lookahead.
//!
//! The parser decides between productions by peeking a few tokens ahead
//! (and, for statement classification, arbitrarily far ahead across
//! balanced brackets). Peeked tokens are buffered so the lexer still runs
//! a single pass over the source.

use std::collections::VecDeque;

use core_types::LuaError;

use crate::lexer::{Lexer, Token};

/// A lexer wrapped with a lookahead buffer.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    buffer: VecDeque<Token>,
}

impl<'a> TokenStream<'a> {
    /// Create a stream over the given source.
    pub fn new(source: &'a str) -> Self {
        TokenStream {
            lexer: Lexer::new(source),
            buffer: VecDeque::new(),
        }
    }

    /// Look at the token `ahead` positions from the front without
    /// consuming anything. `peek(0)` is the next token.
    pub fn peek(&mut self, ahead: usize) -> Result<&Token, LuaError> {
        while self.buffer.len() <= ahead {
            let token = self.lexer.next_token()?;
            self.buffer.push_back(token);
        }
        Ok(&self.buffer[ahead])
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Result<Token, LuaError> {
        match self.buffer.pop_front() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    /// Given an opening bracket at lookahead position `index`, return the
    /// position just past its matching closing bracket, honoring nesting.
    ///
    /// If the token at `index` is not `open`, `index` is returned
    /// unchanged. If the input ends before the brackets balance, the
    /// position of the end-of-input token is returned; the caller then
    /// fails on whatever it finds there.
    pub fn skip_matching(
        &mut self,
        open: &str,
        close: &str,
        index: usize,
    ) -> Result<usize, LuaError> {
        if !self.peek(index)?.is(open) {
            return Ok(index);
        }
        let mut depth = 1usize;
        let mut index = index;
        while depth > 0 {
            index += 1;
            let token = self.peek(index)?;
            if token.is_eof() {
                return Ok(index);
            }
            if token.is(open) {
                depth += 1;
            } else if token.is(close) {
                depth -= 1;
            }
        }
        Ok(index + 1)
    }
}
