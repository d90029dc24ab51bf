//! Unit tests for SourcePosition and Diagnostic

use core_types::{Diagnostic, SourcePosition};

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_creation() {
        let pos = SourcePosition {
            line: 10,
            column: 5,
            offset: 150,
        };

        assert_eq!(pos.line, 10);
        assert_eq!(pos.column, 5);
        assert_eq!(pos.offset, 150);
    }

    #[test]
    fn test_from_offset_start_of_source() {
        let pos = SourcePosition::from_offset("local x = 1", 0);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_from_offset_mid_line() {
        let pos = SourcePosition::from_offset("local x = 1", 6);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 7);
    }

    #[test]
    fn test_from_offset_after_newline() {
        let pos = SourcePosition::from_offset("print(1)\nprint(2)\n", 9);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 1);
    }

    #[test]
    fn test_from_offset_counts_every_newline() {
        let source = "a\nb\nc\nd";
        let pos = SourcePosition::from_offset(source, 6);
        assert_eq!(pos.line, 4);
        assert_eq!(pos.column, 1);
    }

    #[test]
    fn test_from_offset_clamps_past_end() {
        let pos = SourcePosition::from_offset("x", 100);
        assert_eq!(pos.offset, 1);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_from_offset_empty_source() {
        let pos = SourcePosition::from_offset("", 0);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_source_position_clone() {
        let pos1 = SourcePosition {
            line: 42,
            column: 7,
            offset: 1000,
        };
        let pos2 = pos1.clone();

        assert_eq!(pos1, pos2);
    }

    #[test]
    fn test_source_position_debug() {
        let pos = SourcePosition {
            line: 1,
            column: 2,
            offset: 3,
        };
        let debug_str = format!("{:?}", pos);

        assert!(debug_str.contains("line"));
        assert!(debug_str.contains("column"));
        assert!(debug_str.contains("offset"));
    }

    #[test]
    fn test_source_position_equality() {
        let pos1 = SourcePosition {
            line: 10,
            column: 20,
            offset: 100,
        };
        let pos2 = SourcePosition {
            line: 10,
            column: 20,
            offset: 100,
        };
        let pos3 = SourcePosition {
            line: 11,
            column: 20,
            offset: 100,
        };

        assert_eq!(pos1, pos2);
        assert_ne!(pos1, pos3);
    }
}

#[cfg(test)]
mod diagnostic_tests {
    use super::*;

    fn sample() -> Diagnostic {
        Diagnostic {
            line: 1,
            column: 7,
            offending_text: "=".to_string(),
            message: "wrong token: '=' but variable name expected".to_string(),
            line_text: "local = 1".to_string(),
        }
    }

    #[test]
    fn test_diagnostic_creation() {
        let diag = sample();

        assert_eq!(diag.line, 1);
        assert_eq!(diag.column, 7);
        assert_eq!(diag.offending_text, "=");
        assert_eq!(diag.line_text, "local = 1");
    }

    #[test]
    fn test_marker_line_single_char() {
        assert_eq!(sample().marker_line(), "      ^");
    }

    #[test]
    fn test_marker_line_spans_token_width() {
        let diag = Diagnostic {
            line: 1,
            column: 4,
            offending_text: "until".to_string(),
            message: "wrong token".to_string(),
            line_text: "do until".to_string(),
        };
        assert_eq!(diag.marker_line(), "   ^^^^^");
    }

    #[test]
    fn test_marker_line_empty_offending_text() {
        // end-of-input errors have no token text but still get a caret
        let diag = Diagnostic {
            line: 1,
            column: 9,
            offending_text: String::new(),
            message: "wrong token".to_string(),
            line_text: "do do do".to_string(),
        };
        assert_eq!(diag.marker_line(), "        ^");
    }

    #[test]
    fn test_marker_line_preserves_tabs() {
        let diag = Diagnostic {
            line: 1,
            column: 3,
            offending_text: "@@".to_string(),
            message: "unexpected symbol".to_string(),
            line_text: "\tx@@".to_string(),
        };
        assert_eq!(diag.marker_line(), "\t ^^");
    }

    #[test]
    fn test_diagnostic_serializes_to_json() {
        let json = serde_json::to_string(&sample()).expect("serialize");

        assert!(json.contains("\"line\":1"));
        assert!(json.contains("\"column\":7"));
        assert!(json.contains("\"offending_text\":\"=\""));
        assert!(json.contains("\"line_text\":\"local = 1\""));
    }

    #[test]
    fn test_diagnostic_clone_and_equality() {
        let diag1 = sample();
        let diag2 = diag1.clone();
        assert_eq!(diag1, diag2);
    }
}
