//! Core error and source-location types for the Lua minifier.
//!
//! This crate provides the foundational types shared by the parser and the
//! CLI: the parse error representation and source position tracking.
//!
//! # Overview
//!
//! - [`LuaError`] - Lexical/syntactic errors with offending token and offset
//! - [`ErrorKind`] - The two error categories the core can raise
//! - [`SourcePosition`] - Source code location (line, column, byte offset)
//! - [`Diagnostic`] - Lazily rendered line/column diagnostic with caret line
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, LuaError};
//!
//! let error = LuaError {
//!     kind: ErrorKind::WrongToken,
//!     text: "=".to_string(),
//!     offset: 6,
//!     expected: Some("variable name".to_string()),
//!     after: Some("'local'".to_string()),
//! };
//!
//! let diag = error.diagnose("local = 1");
//! assert_eq!(diag.line, 1);
//! assert_eq!(diag.column, 7);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{ErrorKind, LuaError};
pub use source::{Diagnostic, SourcePosition};
