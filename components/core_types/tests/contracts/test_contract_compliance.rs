//! Contract compliance tests for core_types
//!
//! These tests verify the public API surface the parser and CLI
//! components build against: type shapes, method signatures, and the
//! traits each type implements.

use core_types::{Diagnostic, ErrorKind, LuaError, SourcePosition};

#[cfg(test)]
mod error_contract_tests {
    use super::*;

    /// Contract: ErrorKind must have exactly the lexical and syntactic
    /// variants
    #[test]
    fn test_error_kind_has_unexpected_symbol_variant() {
        let _: ErrorKind = ErrorKind::UnexpectedSymbol;
    }

    #[test]
    fn test_error_kind_has_wrong_token_variant() {
        let _: ErrorKind = ErrorKind::WrongToken;
    }

    /// Contract: LuaError exposes kind, text, offset, expected, after
    #[test]
    fn test_lua_error_field_types() {
        let error = LuaError {
            kind: ErrorKind::WrongToken,
            text: "=".to_string(),
            offset: 6,
            expected: Some("variable name".to_string()),
            after: Some("'local'".to_string()),
        };

        let _: ErrorKind = error.kind;
        let _: String = error.text;
        let _: usize = error.offset;
        let _: Option<String> = error.expected;
        let _: Option<String> = error.after;
    }

    /// Contract: LuaError must have diagnose(&str) -> Diagnostic
    #[test]
    fn test_lua_error_diagnose_signature() {
        let error = LuaError {
            kind: ErrorKind::UnexpectedSymbol,
            text: "@".to_string(),
            offset: 0,
            expected: None,
            after: None,
        };
        let _: Diagnostic = error.diagnose("@");
    }

    /// Contract: LuaError implements Display and std::error::Error
    #[test]
    fn test_lua_error_implements_error_trait() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<LuaError>();
    }
}

#[cfg(test)]
mod source_contract_tests {
    use super::*;

    /// Contract: SourcePosition exposes line, column, offset
    #[test]
    fn test_source_position_field_types() {
        let pos = SourcePosition::from_offset("local x = 1", 6);

        let _: u32 = pos.line;
        let _: u32 = pos.column;
        let _: usize = pos.offset;
    }

    /// Contract: Diagnostic exposes everything a renderer needs
    #[test]
    fn test_diagnostic_field_types() {
        let diag = Diagnostic {
            line: 1,
            column: 7,
            offending_text: "=".to_string(),
            message: "wrong token".to_string(),
            line_text: "local = 1".to_string(),
        };

        let _: u32 = diag.line;
        let _: u32 = diag.column;
        let _: String = diag.offending_text;
        let _: String = diag.message;
        let _: String = diag.line_text;
    }

    /// Contract: Diagnostic must have marker_line() -> String
    #[test]
    fn test_diagnostic_marker_line_signature() {
        let diag = Diagnostic {
            line: 1,
            column: 1,
            offending_text: "@".to_string(),
            message: "unexpected symbol: @".to_string(),
            line_text: "@".to_string(),
        };
        let _: String = diag.marker_line();
    }

    /// Contract: Diagnostic serializes with serde
    #[test]
    fn test_diagnostic_is_serializable() {
        fn assert_serialize<T: serde::Serialize>() {}
        assert_serialize::<Diagnostic>();
        assert_serialize::<SourcePosition>();
    }
}
