//! Lua lexer - converts source text into positioned tokens.
//!
//! The scanner is hand-written and single-pass. Longer fixed lexemes win
//! over shorter ones (`...` over `..` over `.`), whole words are read
//! before keyword classification so `notx` stays an identifier, and
//! comments are skipped as trivia. String and numeral tokens keep their
//! raw source text verbatim, including quotes and long brackets, so that
//! serialization can re-emit them unchanged.

use core_types::LuaError;

use crate::error::unexpected_symbol;

/// Lua keywords that form their own token kind.
///
/// `and`, `or` and `not` are deliberately absent: they are operators and
/// lex as [`TokenKind::Operator`] so the expression parser can treat them
/// uniformly with the symbolic operators.
pub const KEYWORDS: &[&str] = &[
    "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "repeat", "return", "then", "true", "until", "while",
];

/// The category of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A reserved word such as `local` or `function`
    Keyword,
    /// A name: letters, digits and underscores, not starting with a digit
    Identifier,
    /// A short or long string literal, raw text included
    Str,
    /// An integer or float literal, raw text included
    Numeral,
    /// A symbolic operator, plus the word operators `and`, `or`, `not`
    Operator,
    /// A structural delimiter: `(` `)` `[` `]` `{` `}` `;` `,`
    Punct,
    /// The remaining symbols: `...`, `::`, `:` and `.`
    Other,
    /// End of input; returned perpetually once the source is exhausted
    Eof,
}

/// A single token with its raw text and byte offset in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Category of the token
    pub kind: TokenKind,
    /// Raw source text of the token (empty for [`TokenKind::Eof`])
    pub text: String,
    /// Byte offset of the first character in the source
    pub offset: usize,
}

impl Token {
    /// Check whether this token has exactly the given text.
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }

    /// Check whether this is the end-of-input token.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Streaming tokenizer over Lua source text.
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            position: 0,
        }
    }

    /// Produce the next token, skipping whitespace and comments.
    ///
    /// Once the end of input is reached this keeps returning
    /// [`TokenKind::Eof`] tokens, so lookahead past the end is safe.
    pub fn next_token(&mut self) -> Result<Token, LuaError> {
        self.skip_trivia()?;

        let start = self.position;
        let byte = match self.peek_byte(0) {
            Some(b) => b,
            None => return Ok(self.eof_token()),
        };

        match byte {
            b'"' | b'\'' => self.scan_short_string(byte),
            b'[' => {
                if self.long_bracket_level(self.position).is_some() {
                    self.scan_long_string()
                } else {
                    self.position += 1;
                    Ok(self.token(TokenKind::Punct, start))
                }
            }
            b'0'..=b'9' => self.scan_numeral(),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => Ok(self.scan_word()),
            b'.' => {
                if self.peek_byte(1) == Some(b'.') {
                    if self.peek_byte(2) == Some(b'.') {
                        self.position += 3;
                        Ok(self.token(TokenKind::Other, start))
                    } else {
                        self.position += 2;
                        Ok(self.token(TokenKind::Operator, start))
                    }
                } else {
                    self.position += 1;
                    Ok(self.token(TokenKind::Other, start))
                }
            }
            b':' => {
                let width = if self.peek_byte(1) == Some(b':') { 2 } else { 1 };
                self.position += width;
                Ok(self.token(TokenKind::Other, start))
            }
            b'<' | b'>' | b'/' | b'=' | b'~' => {
                let pair = self.scan_operator_pair(byte);
                self.position += pair;
                Ok(self.token(TokenKind::Operator, start))
            }
            b'+' | b'-' | b'*' | b'%' | b'^' | b'#' | b'&' | b'|' => {
                self.position += 1;
                Ok(self.token(TokenKind::Operator, start))
            }
            b'(' | b')' | b']' | b'{' | b'}' | b';' | b',' => {
                self.position += 1;
                Ok(self.token(TokenKind::Punct, start))
            }
            _ => {
                let text = self.current_char().to_string();
                Err(unexpected_symbol(text, start))
            }
        }
    }

    /// Skip whitespace, line comments and long-bracket comments.
    fn skip_trivia(&mut self) -> Result<(), LuaError> {
        loop {
            match self.peek_byte(0) {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => {
                    self.position += 1;
                }
                Some(b'-') if self.peek_byte(1) == Some(b'-') => {
                    let start = self.position;
                    self.position += 2;
                    if let Some(level) = self.long_bracket_level(self.position) {
                        self.skip_long_bracket(level, start)?;
                    } else {
                        while let Some(b) = self.peek_byte(0) {
                            if b == b'\n' {
                                break;
                            }
                            self.position += 1;
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// If an opening long bracket `[`, `[=`, `[==`... starts at `at`,
    /// return its level (the number of `=` signs).
    fn long_bracket_level(&self, at: usize) -> Option<usize> {
        if self.bytes.get(at) != Some(&b'[') {
            return None;
        }
        let mut level = 0;
        while self.bytes.get(at + 1 + level) == Some(&b'=') {
            level += 1;
        }
        if self.bytes.get(at + 1 + level) == Some(&b'[') {
            Some(level)
        } else {
            None
        }
    }

    /// Consume an opening long bracket and everything through the matching
    /// closing bracket of the same level.
    fn skip_long_bracket(&mut self, level: usize, open_offset: usize) -> Result<(), LuaError> {
        // past "[===["
        self.position += level + 2;
        while self.position < self.bytes.len() {
            if self.bytes[self.position] == b']' {
                let mut eq = 0;
                while self.bytes.get(self.position + 1 + eq) == Some(&b'=') {
                    eq += 1;
                }
                if eq == level && self.bytes.get(self.position + 1 + eq) == Some(&b']') {
                    self.position += level + 2;
                    return Ok(());
                }
            }
            self.position += 1;
        }
        let opener: String = self.source[open_offset..]
            .chars()
            .take(level + 2)
            .collect();
        Err(unexpected_symbol(opener, open_offset))
    }

    fn scan_long_string(&mut self) -> Result<Token, LuaError> {
        let start = self.position;
        let level = match self.long_bracket_level(start) {
            Some(level) => level,
            None => unreachable!("caller checked for an opening long bracket"),
        };
        self.skip_long_bracket(level, start)?;
        Ok(self.token(TokenKind::Str, start))
    }

    /// Scan a quoted string. A backslash always consumes the following
    /// character, so escaped quotes never terminate the literal. An
    /// unescaped newline or end of input before the closing quote is a
    /// lexical error reported at the opening quote.
    fn scan_short_string(&mut self, quote: u8) -> Result<Token, LuaError> {
        let start = self.position;
        self.position += 1;
        while let Some(b) = self.peek_byte(0) {
            match b {
                b'\\' => {
                    self.position += 2;
                }
                b'\n' => break,
                _ if b == quote => {
                    self.position += 1;
                    return Ok(self.token(TokenKind::Str, start));
                }
                _ => {
                    self.position += 1;
                }
            }
        }
        Err(unexpected_symbol((quote as char).to_string(), start))
    }

    /// Scan a numeral. Hex literals start with `0x`/`0X`; both forms take
    /// an optional fraction and an optional signed exponent. A trailing
    /// `.` with no digit after it is left for the next token. Sign
    /// characters never belong to the numeral itself.
    fn scan_numeral(&mut self) -> Result<Token, LuaError> {
        let start = self.position;
        let hex = self.peek_byte(0) == Some(b'0')
            && matches!(self.peek_byte(1), Some(b'x') | Some(b'X'));
        let is_digit: fn(u8) -> bool = if hex {
            |b| b.is_ascii_hexdigit()
        } else {
            |b| b.is_ascii_digit()
        };
        if hex {
            self.position += 2;
        }
        self.consume_while(is_digit);
        if self.peek_byte(0) == Some(b'.') && self.peek_byte(1).is_some_and(is_digit) {
            self.position += 1;
            self.consume_while(is_digit);
        }
        if matches!(
            self.peek_byte(0),
            Some(b'p') | Some(b'P') | Some(b'e') | Some(b'E')
        ) {
            let mut after = 1;
            if matches!(self.peek_byte(1), Some(b'+') | Some(b'-')) {
                after = 2;
            }
            if self.peek_byte(after).is_some_and(is_digit) {
                self.position += after;
                self.consume_while(is_digit);
            }
        }
        Ok(self.token(TokenKind::Numeral, start))
    }

    /// Scan an identifier or word-like token and classify it.
    fn scan_word(&mut self) -> Token {
        let start = self.position;
        self.consume_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let text = &self.source[start..self.position];
        let kind = if KEYWORDS.contains(&text) {
            TokenKind::Keyword
        } else if matches!(text, "and" | "or" | "not") {
            TokenKind::Operator
        } else {
            TokenKind::Identifier
        };
        self.token(kind, start)
    }

    /// Width of the operator starting with `first`: 2 when it pairs into
    /// `<<` `>>` `//` `==` `~=` `<=` `>=`, otherwise 1.
    fn scan_operator_pair(&self, first: u8) -> usize {
        match (first, self.peek_byte(1)) {
            (b'<', Some(b'<'))
            | (b'>', Some(b'>'))
            | (b'/', Some(b'/'))
            | (b'=', Some(b'='))
            | (b'~', Some(b'='))
            | (b'<', Some(b'='))
            | (b'>', Some(b'=')) => 2,
            _ => 1,
        }
    }

    fn consume_while(&mut self, test: fn(u8) -> bool) {
        while self.peek_byte(0).is_some_and(test) {
            self.position += 1;
        }
    }

    fn peek_byte(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.position + ahead).copied()
    }

    /// The full character at the current position, for error reporting on
    /// non-ASCII input.
    fn current_char(&self) -> char {
        self.source[self.position..].chars().next().unwrap_or('\0')
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            text: self.source[start..self.position].to_string(),
            offset: start,
        }
    }

    fn eof_token(&self) -> Token {
        Token {
            kind: TokenKind::Eof,
            text: String::new(),
            offset: self.source.len(),
        }
    }
}
