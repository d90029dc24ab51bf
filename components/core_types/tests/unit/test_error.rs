//! Unit tests for LuaError and ErrorKind

use core_types::{ErrorKind, LuaError};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_unexpected_symbol() {
        let kind = ErrorKind::UnexpectedSymbol;
        assert!(matches!(kind, ErrorKind::UnexpectedSymbol));
    }

    #[test]
    fn test_error_kind_wrong_token() {
        let kind = ErrorKind::WrongToken;
        assert!(matches!(kind, ErrorKind::WrongToken));
    }

    #[test]
    fn test_error_kind_copy() {
        let kind1 = ErrorKind::WrongToken;
        let kind2 = kind1;
        assert_eq!(kind1, kind2);
    }

    #[test]
    fn test_error_kind_debug() {
        let debug_str = format!("{:?}", ErrorKind::UnexpectedSymbol);
        assert!(debug_str.contains("UnexpectedSymbol"));
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::WrongToken, ErrorKind::WrongToken);
        assert_ne!(ErrorKind::WrongToken, ErrorKind::UnexpectedSymbol);
    }
}

#[cfg(test)]
mod lua_error_tests {
    use super::*;

    #[test]
    fn test_unexpected_symbol_display() {
        let error = LuaError {
            kind: ErrorKind::UnexpectedSymbol,
            text: "@".to_string(),
            offset: 4,
            expected: None,
            after: None,
        };

        assert_eq!(error.to_string(), "unexpected symbol: @");
    }

    #[test]
    fn test_wrong_token_display_with_expected() {
        let error = LuaError {
            kind: ErrorKind::WrongToken,
            text: "then".to_string(),
            offset: 10,
            expected: Some("'do'".to_string()),
            after: None,
        };

        assert_eq!(error.to_string(), "wrong token: 'then' but 'do' expected");
    }

    #[test]
    fn test_wrong_token_display_with_after() {
        let error = LuaError {
            kind: ErrorKind::WrongToken,
            text: "=".to_string(),
            offset: 6,
            expected: Some("variable name".to_string()),
            after: Some("'local'".to_string()),
        };

        assert_eq!(
            error.to_string(),
            "wrong token: '=' but variable name expected after 'local'"
        );
    }

    #[test]
    fn test_wrong_token_display_without_expected() {
        let error = LuaError {
            kind: ErrorKind::WrongToken,
            text: ")".to_string(),
            offset: 3,
            expected: None,
            after: None,
        };

        assert_eq!(error.to_string(), "wrong token: ')' but something else expected");
    }

    #[test]
    fn test_end_of_input_error_has_empty_text() {
        let error = LuaError {
            kind: ErrorKind::WrongToken,
            text: String::new(),
            offset: 8,
            expected: Some("'end'".to_string()),
            after: None,
        };

        assert_eq!(error.to_string(), "wrong token: '' but 'end' expected");
    }

    #[test]
    fn test_diagnose_first_line() {
        let error = LuaError {
            kind: ErrorKind::WrongToken,
            text: "=".to_string(),
            offset: 6,
            expected: Some("variable name".to_string()),
            after: Some("'local'".to_string()),
        };

        let diag = error.diagnose("local = 1");
        assert_eq!(diag.line, 1);
        assert_eq!(diag.column, 7);
        assert_eq!(diag.line_text, "local = 1");
        assert_eq!(diag.offending_text, "=");
        assert_eq!(
            diag.message,
            "wrong token: '=' but variable name expected after 'local'"
        );
    }

    #[test]
    fn test_diagnose_later_line() {
        let source = "print(1)\nlocal = 1\n";
        let error = LuaError {
            kind: ErrorKind::WrongToken,
            text: "=".to_string(),
            offset: 15,
            expected: Some("variable name".to_string()),
            after: None,
        };

        let diag = error.diagnose(source);
        assert_eq!(diag.line, 2);
        assert_eq!(diag.column, 7);
        assert_eq!(diag.line_text, "local = 1");
    }

    #[test]
    fn test_diagnose_strips_carriage_return() {
        let source = "x = @\r\ny = 1\r\n";
        let error = LuaError {
            kind: ErrorKind::UnexpectedSymbol,
            text: "@".to_string(),
            offset: 4,
            expected: None,
            after: None,
        };

        let diag = error.diagnose(source);
        assert_eq!(diag.line_text, "x = @");
    }

    #[test]
    fn test_lua_error_clone_and_equality() {
        let error1 = LuaError {
            kind: ErrorKind::UnexpectedSymbol,
            text: "$".to_string(),
            offset: 0,
            expected: None,
            after: None,
        };
        let error2 = error1.clone();

        assert_eq!(error1, error2);
    }

    #[test]
    fn test_lua_error_is_std_error() {
        let error = LuaError {
            kind: ErrorKind::UnexpectedSymbol,
            text: "@".to_string(),
            offset: 0,
            expected: None,
            after: None,
        };
        let boxed: Box<dyn std::error::Error> = Box::new(error);

        assert_eq!(boxed.to_string(), "unexpected symbol: @");
    }
}
