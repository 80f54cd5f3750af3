//! Statement parsing implementation
//!
//! This module handles parsing of all Ion statement types:
//!
//! - Blocks: `{ ... }`
//! - Keyword statements: `return`, `import`, `expand`, `use`, each followed by
//!   one expression and `;`
//! - Expression statements: assignments, calls, bare expressions
//!
//! # Grammar
//!
//! ```text
//! declaration ::= var_decl | statement
//! statement   ::= "{" block | return_stmt | import_stmt | expand_stmt
//!               | use_stmt | expr_stmt
//! block       ::= declaration* "}"
//! return_stmt ::= "return" expression ";"
//! expr_stmt   ::= expression ";"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;
use tracing::instrument;

impl Parser {
    /// Parse a declaration: a variable declaration or any statement
    #[instrument(skip_all)]
    pub(crate) fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        if self.check(TokenKind::Def) || self.check(TokenKind::Const) {
            return self.parse_variable_declaration();
        }

        self.parse_statement()
    }

    /// Parse a statement
    #[instrument(skip_all)]
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.peek(0)?.kind {
            TokenKind::LBrace => {
                self.advance();
                self.nested(Self::parse_block)
            }
            TokenKind::Return => {
                self.parse_keyword_statement("after return statement", Stmt::return_)
            }
            TokenKind::Expand => {
                self.parse_keyword_statement("after expand statement", Stmt::expand)
            }
            TokenKind::Import => {
                self.parse_keyword_statement("after import statement", Stmt::import)
            }
            TokenKind::Use => {
                self.parse_keyword_statement("after use statement", Stmt::use_)
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse block statements after the opening brace, including the closing one
    #[instrument(skip_all)]
    pub(crate) fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        let mut body = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            body.push(self.parse_declaration()?);
        }

        self.expect(TokenKind::RBrace, "Expected '}' after block")?;
        Ok(Stmt::block(body))
    }

    /// Parse `keyword expression ;`, wrapping the expression with `build`
    fn parse_keyword_statement(
        &mut self,
        ctx: &str,
        build: fn(Expr) -> Stmt,
    ) -> Result<Stmt, ParseError> {
        self.advance(); // keyword
        let value = self.parse_expression()?;
        self.expect_semicolon(ctx)?;
        Ok(build(value))
    }

    /// Parse expression statement: `expr ;`
    #[instrument(skip_all)]
    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression()?;
        self.expect_semicolon("after expression")?;
        Ok(Stmt::expression(expr))
    }
}
