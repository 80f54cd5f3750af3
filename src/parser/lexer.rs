//! Lexer (tokenizer) for Ion source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The scan is a single forward pass with at most one character of lookahead:
//! two-character operators are chosen by maximal munch, identifier-like runs are
//! checked against the keyword table, and whitespace or unrecognized characters
//! are skipped without producing a token.
//!
//! The only fatal condition is an unterminated string literal.

use super::ast::SourceLocation;
use super::token::{KeywordTable, Token, TokenKind, KEYWORDS};
use std::fmt;
use tracing::{debug, instrument, trace, warn};

use TokenKind as T;

/// What went wrong while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// End of input reached before the closing `"`
    UnterminatedString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnterminatedString => write!(f, "unterminated string"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.kind
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for Ion source code
pub struct Lexer {
    input: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    start_location: SourceLocation,
    keywords: &'static KeywordTable,
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_location: SourceLocation::new(1, 1),
            keywords: &KEYWORDS,
        }
    }

    /// Tokenize the entire input.
    ///
    /// The returned sequence always ends with exactly one [`TokenKind::Eof`].
    #[instrument(skip_all)]
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.start = self.current;
            self.start_location = self.current_location();
            if let Some(token) = self.scan_token()? {
                tokens.push(token);
            }
        }

        tokens.push(Token::new(T::Eof, "", self.current_location()));
        debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Scan one lexeme starting at `self.start`.
    ///
    /// Returns `Ok(None)` when the consumed characters produce no token.
    fn scan_token(&mut self) -> Result<Option<Token>, LexError> {
        let Some(ch) = self.advance() else {
            return Ok(None);
        };

        let kind = match ch {
            '(' => T::LParen,
            ')' => T::RParen,
            '{' => T::LBrace,
            '}' => T::RBrace,
            '[' => T::LSquare,
            ']' => T::RSquare,
            ',' => T::Comma,
            '.' => T::Dot,
            ';' => T::Semicolon,
            '%' => T::Percent,
            '@' => T::At,
            '&' => T::Amp,

            ':' => self.either(':', T::ColonColon, T::Colon),
            '-' => self.either('=', T::MinusEq, T::Minus),
            '+' => self.either('=', T::PlusEq, T::Plus),
            '*' => self.either('=', T::StarEq, T::Star),
            '/' => {
                if self.peek() == Some('/') {
                    self.skip_line_comment();
                    return Ok(None);
                }
                self.either('=', T::SlashEq, T::Slash)
            }
            '!' => self.either('=', T::NotEq, T::Bang),
            '=' => self.either('=', T::EqEq, T::Assign),
            '<' => self.either('=', T::Le, T::Lt),
            '>' => self.either('=', T::Ge, T::Gt),

            '"' => return self.string_literal().map(Some),
            '\'' => return Ok(self.char_literal()),
            c if c.is_ascii_digit() => return Ok(Some(self.number_literal())),
            c if c.is_ascii_alphabetic() || c == '_' => {
                return Ok(self.identifier_or_keyword());
            }

            c if c.is_whitespace() => return Ok(None),
            other => {
                trace!(
                    ch = ?other,
                    line = self.start_location.line,
                    column = self.start_location.column,
                    "skipping unrecognized character"
                );
                return Ok(None);
            }
        };

        Ok(Some(self.make_token(kind)))
    }

    /// Two-character operator if the next character is `next`, else the
    /// one-character form.
    fn either(&mut self, next: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some(next) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Parse string literal; the token text keeps both quotes.
    ///
    /// A line break before the closing quote ends the literal there, without
    /// the closing quote. Only end of input is fatal.
    fn string_literal(&mut self) -> Result<Token, LexError> {
        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance(); // closing quote
                    return Ok(self.make_token(T::String));
                }
                '\n' => {
                    // the string ends at the line break, left for the main loop
                    warn!(
                        line = self.start_location.line,
                        column = self.start_location.column,
                        "string literal cut off at end of line"
                    );
                    return Ok(self.make_token(T::String));
                }
                _ => {
                    self.advance();
                }
            }
        }

        Err(LexError {
            kind: LexErrorKind::UnterminatedString,
            location: self.start_location,
        })
    }

    /// Parse character literal: exactly one character, no escapes
    fn char_literal(&mut self) -> Option<Token> {
        let Some(ch) = self.advance() else {
            warn!(
                line = self.start_location.line,
                column = self.start_location.column,
                "quote at end of input, no char literal emitted"
            );
            return None;
        };

        // optional closing quote
        if self.peek() == Some('\'') {
            self.advance();
        }

        Some(Token::new(T::Char, ch.to_string(), self.start_location))
    }

    /// Parse numeric literal: a run of digits and dots, kept as raw text
    fn number_literal(&mut self) -> Token {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.advance();
        }
        self.make_token(T::Number)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Option<Token> {
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = self.lexeme();
        if text.is_empty() {
            warn!(
                line = self.start_location.line,
                column = self.start_location.column,
                "empty identifier"
            );
            return None;
        }

        let kind = self.keywords.get(&text).unwrap_or(T::Identifier);
        Some(Token::new(kind, text, self.start_location))
    }

    /// Skip single-line comment (// ...), leaving the newline
    fn skip_line_comment(&mut self) {
        while matches!(self.peek(), Some(c) if c != '\n') {
            self.advance();
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), self.start_location)
    }

    /// Source text between `start` and `current`
    fn lexeme(&self) -> String {
        self.input[self.start..self.current].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
