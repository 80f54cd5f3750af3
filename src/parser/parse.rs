//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, token primitives, and coordination
//! - `declarations`: variable declarations and type expressions
//! - `statements`: blocks, `return`, `import`, `expand`, `use`, expression statements
//! - `expressions`: expressions by precedence climbing, postfix chains, calls
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! # Failure
//!
//! The first grammar violation aborts the parse with a positioned
//! [`ParseError`]. There is no recovery and no partial result.

use crate::config::MAX_NESTING_DEPTH;
use crate::parser::ast::*;
use crate::parser::lexer::{LexError, LexErrorKind, Lexer};
use crate::parser::token::{Token, TokenKind};
use std::fmt;
use tracing::{debug, instrument};

/// What went wrong while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// `expect` failed; `expected` is the caller's message
    UnexpectedToken { expected: String, found: String },
    /// Nothing in primary position starts an expression
    ExpectedExpression { found: String },
    /// Left of an assignment operator is not a bare variable
    InvalidAssignmentTarget { operator: String },
    /// A call has more than `max` arguments
    TooManyArguments { max: usize },
    /// Expressions, blocks or types nested deeper than `max` levels
    NestingTooDeep { max: usize },
    /// `,` directly followed by `)` in a call
    TrailingComma,
    /// Looked past the end of the token sequence
    TokenStreamExhausted,
    /// Token sequence handed to the parser does not end in end-of-file
    MissingEndOfFile,
    /// A type form the parser does not construct (generics)
    UnsupportedType { what: String },
    /// Lexing failed before parsing started
    Lex(LexErrorKind),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "Unexpected token {}: {}", found, expected)
            }
            ParseErrorKind::ExpectedExpression { found } => {
                write!(f, "Expected expression, got {}", found)
            }
            ParseErrorKind::InvalidAssignmentTarget { operator } => {
                write!(f, "Invalid assignment target for '{}'", operator)
            }
            ParseErrorKind::TooManyArguments { max } => {
                write!(f, "Maximum arguments reached (max. {})", max)
            }
            ParseErrorKind::NestingTooDeep { max } => {
                write!(f, "Nesting too deep (max. {} levels)", max)
            }
            ParseErrorKind::TrailingComma => {
                write!(f, "Trailing comma in function call")
            }
            ParseErrorKind::TokenStreamExhausted => {
                write!(f, "Peeked past the end of the token stream")
            }
            ParseErrorKind::MissingEndOfFile => {
                write!(f, "Token stream does not end with end of file")
            }
            ParseErrorKind::UnsupportedType { what } => {
                write!(f, "{} types are not supported", what)
            }
            ParseErrorKind::Lex(kind) => write!(f, "{}", kind),
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.kind
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            kind: ParseErrorKind::Lex(err.kind),
            location: err.location,
        }
    }
}

/// Recursive descent parser for Ion
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
}

impl Parser {
    /// Wrap an already lexed token sequence.
    ///
    /// The sequence must be non-empty and end with [`TokenKind::Eof`].
    pub fn new(tokens: Vec<Token>) -> Result<Self, ParseError> {
        match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => Ok(Self {
                tokens,
                position: 0,
                depth: 0,
            }),
            Some(last) => Err(ParseError::new(
                ParseErrorKind::MissingEndOfFile,
                last.location,
            )),
            None => Err(ParseError::new(
                ParseErrorKind::MissingEndOfFile,
                SourceLocation::default(),
            )),
        }
    }

    /// Lex `source` and wrap the resulting tokens.
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Self::new(tokens)
    }

    /// Parse the entire program: a sequence of statements up to end of file.
    #[instrument(skip_all)]
    pub fn parse(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_declaration()?);
        }

        debug!(count = statements.len(), "parsed program");
        Ok(statements)
    }

    /// Tokens this parser was built from.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    // ===== Helper methods =====

    /// Token `offset` places after the cursor.
    pub(crate) fn peek(&self, offset: usize) -> Result<&Token, ParseError> {
        self.tokens.get(self.position + offset).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::TokenStreamExhausted,
                self.current_location(),
            )
        })
    }

    /// Token under the cursor. The cursor never moves past end of file.
    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Consume the current token and return it.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// True if the current token has `kind`; always false at end of file.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.current().kind == kind
    }

    /// Consume the current token if it is any of `kinds`.
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.iter().any(|&kind| self.check(kind)) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(ParseErrorKind::UnexpectedToken {
                expected: message.to_string(),
                found: self.current().to_string(),
            }))
        }
    }

    pub(crate) fn expect_semicolon(
        &mut self,
        ctx: &str,
    ) -> Result<Token, ParseError> {
        self.expect(TokenKind::Semicolon, &format!("Expected ';' {ctx}"))
    }

    pub(crate) fn expect_identifier(
        &mut self,
        ctx: &str,
    ) -> Result<Token, ParseError> {
        self.expect(TokenKind::Identifier, ctx)
    }

    /// Run `rule` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`].
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_at_current(ParseErrorKind::NestingTooDeep {
                max: MAX_NESTING_DEPTH,
            }));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.tokens
            .get(self.position)
            .map(|t| t.location)
            .unwrap_or_default()
    }

    pub(crate) fn error_at_current(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current_location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    #[test]
    fn test_parse_empty_program() {
        let mut parser = Parser::from_source("").unwrap();
        assert!(parser.parse().unwrap().is_empty());

        let mut parser = Parser::from_source("  // nothing\n").unwrap();
        assert!(parser.parse().unwrap().is_empty());
    }

    #[test]
    fn test_parse_statement_sequence() {
        let mut parser =
            Parser::from_source("import io; a = 1; { b; } return a;").unwrap();
        let program = parser.parse().unwrap();

        assert_eq!(program.len(), 4);
        assert!(matches!(program[0], Stmt::Import { .. }));
        assert!(matches!(program[1], Stmt::Expression { .. }));
        assert!(matches!(program[2], Stmt::Block { ref body } if body.len() == 1));
        assert!(matches!(program[3], Stmt::Return { .. }));
    }

    #[test]
    fn test_new_requires_trailing_eof() {
        let err = Parser::new(Vec::new()).err().unwrap();
        assert_eq!(err.kind, ParseErrorKind::MissingEndOfFile);

        let mut tokens = tokenize("a;").unwrap();
        tokens.pop();
        let err = Parser::new(tokens).err().unwrap();
        assert_eq!(err.kind, ParseErrorKind::MissingEndOfFile);
        assert_eq!(err.location, SourceLocation::new(1, 2));
    }

    #[test]
    fn test_primitives() {
        let mut parser = Parser::new(tokenize("a + b").unwrap()).unwrap();
        assert_eq!(parser.tokens().len(), 4);

        assert!(parser.check(TokenKind::Identifier));
        assert_eq!(parser.peek(1).unwrap().kind, TokenKind::Plus);
        assert!(parser.peek(9).is_err());

        assert!(parser.match_any(&[TokenKind::Plus, TokenKind::Minus]).is_none());
        assert_eq!(parser.advance().text, "a");
        let plus = parser.match_any(&[TokenKind::Plus, TokenKind::Minus]);
        assert_eq!(plus.map(|t| t.kind), Some(TokenKind::Plus));

        let err = parser.expect(TokenKind::Semicolon, "Expected ';'").unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 5));

        parser.advance();
        assert!(parser.is_at_end());
        // end of file is never stepped over and never matches `check`
        assert_eq!(parser.advance().kind, TokenKind::Eof);
        assert!(!parser.check(TokenKind::Eof));
    }

    #[test]
    fn test_lex_error_becomes_parse_error() {
        let err = Parser::from_source("x = \"open").err().unwrap();
        assert_eq!(err.kind, ParseErrorKind::Lex(LexErrorKind::UnterminatedString));
        assert!(err.to_string().contains("unterminated string"));
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::new(
            ParseErrorKind::TrailingComma,
            SourceLocation::new(3, 7),
        );
        assert_eq!(
            err.to_string(),
            "Parse error at line 3, column 7: Trailing comma in function call"
        );
    }
}
