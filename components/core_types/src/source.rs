//! Source position and diagnostic types for Lua parse error reporting.
//!
//! Offset-to-line/column translation is a pure function of the source text
//! and happens only here, never on the parsing hot path.

use serde::Serialize;

/// Represents a position in source code.
///
/// Used for error reporting to indicate where an issue occurred.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition {
///     line: 10,
///     column: 5,
///     offset: 150,
/// };
///
/// assert_eq!(pos.line, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed)
    pub column: u32,
    /// Byte offset from the start of the source
    pub offset: usize,
}

impl SourcePosition {
    /// Translate a byte offset into a line/column position within `source`.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.bytes().filter(|&b| b == b'\n').count() as u32 + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        Self {
            line,
            column: (offset - line_start) as u32 + 1,
            offset,
        }
    }
}

/// A fully rendered parse diagnostic.
///
/// Contains everything a caller needs to display a caret-style error
/// message without re-deriving position information from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Line number of the offending token (1-indexed)
    pub line: u32,
    /// Column number of the offending token (1-indexed)
    pub column: u32,
    /// Text of the offending token
    pub offending_text: String,
    /// One-line human-readable message
    pub message: String,
    /// Full text of the source line containing the error
    pub line_text: String,
}

impl Diagnostic {
    /// Render the marker line that underlines the offending token.
    ///
    /// Characters before the token are replaced with spaces (tabs are kept
    /// so the marker stays aligned under tab-indented lines), followed by
    /// one `^` per byte of the offending text, at least one.
    pub fn marker_line(&self) -> String {
        let prefix_len = (self.column as usize - 1).min(self.line_text.len());
        let mut marker: String = self.line_text[..prefix_len]
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let width = self.offending_text.len().max(1);
        marker.extend(std::iter::repeat('^').take(width));
        marker
    }
}
