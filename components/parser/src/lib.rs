//! Lua parsing, scope analysis and identifier renaming.
//!
//! This component turns Lua 5.x source text into a round-trippable AST,
//! computes a frequency-ordered minimal renaming of its identifiers, and
//! serializes the result back to minified source.
//!
//! # Overview
//!
//! - [`lexer`] - Hand-written tokenizer producing positioned tokens
//! - [`stream`] - Buffered token stream with unbounded lookahead
//! - [`parser`] - Predictive recursive-descent parser
//! - [`ast`] - The AST node set plus the per-occurrence name table
//! - [`scope`] - Scope-tree construction and name resolution
//! - [`rename`] - Bucketed frequency renaming with generated short names
//! - [`emit`] - Token regeneration and minified serialization
//!
//! # Examples
//!
//! ```
//! let mut chunk = parser::parse("local value = 1\nprint(value)").unwrap();
//! parser::rename(&mut chunk);
//! assert_eq!(parser::serialize(&chunk), "local a=1 print(a)");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ast;
pub mod emit;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod rename;
pub mod scope;
pub mod stream;

pub use ast::{Chunk, NameId};
pub use lexer::{Lexer, Token, TokenKind};
pub use scope::{ScopeAnalyzer, ScopeTree, RESERVED_GLOBALS};
pub use stream::TokenStream;

use core_types::LuaError;

/// Parse a complete Lua chunk.
pub fn parse(source: &str) -> Result<Chunk, LuaError> {
    parser::Parser::new(source).parse_chunk()
}

/// Rename the chunk's identifiers in place, shortest names to the most
/// frequently used.
pub fn rename(chunk: &mut Chunk) {
    rename::rename_chunk(chunk);
}

/// Serialize a chunk to minified source text.
pub fn serialize(chunk: &Chunk) -> String {
    emit::serialize(chunk)
}
