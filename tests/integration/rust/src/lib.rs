//! Integration test suite for the Lua minifier.
//!
//! This crate verifies the components work together correctly across
//! component boundaries: lexer to parser, parser to scope analysis and
//! renaming, and the CLI runtime on top of all of them.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use lua_cli;
    pub use parser;
}
