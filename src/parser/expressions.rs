//! Expression parsing implementation
//!
//! This module handles parsing of Ion expressions using precedence climbing:
//! one method per precedence level, loosest first, each calling the next
//! tighter level for its operands.
//!
//! # Precedence (loosest to tightest)
//!
//! | Level      | Operators                     | Associativity |
//! |------------|-------------------------------|---------------|
//! | assignment | `=` `+=` `-=` `*=` `/=`       | right         |
//! | or         | `or`                          | left          |
//! | and        | `and`                         | left          |
//! | equality   | `==` `!=`                     | left          |
//! | comparison | `>` `<` `<=` `>=`             | left          |
//! | term       | `+` `-`                       | left          |
//! | factor     | `*` `/`                       | left          |
//! | unary      | `!` `&` `*` `-` (prefix)      | right         |
//! | postfix    | `.name` `(args)`              | left          |
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::config::MAX_CALL_ARGUMENTS;
use crate::parser::ast::*;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::token::TokenKind as T;
use tracing::instrument;

const ASSIGNMENT_OPERATORS: &[T] = &[T::Assign, T::PlusEq, T::MinusEq, T::StarEq, T::SlashEq];
const EQUALITY_OPERATORS: &[T] = &[T::NotEq, T::EqEq];
const COMPARISON_OPERATORS: &[T] = &[T::Gt, T::Lt, T::Le, T::Ge];
const TERM_OPERATORS: &[T] = &[T::Minus, T::Plus];
const FACTOR_OPERATORS: &[T] = &[T::Slash, T::Star];
const UNARY_OPERATORS: &[T] = &[T::Bang, T::Amp, T::Star, T::Minus];

impl Parser {
    /// Parse expression (top-level entry point)
    #[instrument(skip_all)]
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_assignment)
    }

    /// Parse assignment (right-associative); only a bare variable is a target
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_or()?;

        let Some(operator) = self.match_any(ASSIGNMENT_OPERATORS) else {
            return Ok(expr);
        };

        let Expr::Variable { name } = expr else {
            return Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget {
                    operator: operator.text,
                },
                operator.location,
            ));
        };

        let value = self.nested(Self::parse_assignment)?;
        Ok(Expr::assign(name, operator, value))
    }

    /// Parse logical OR (`or`)
    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while let Some(operator) = self.match_any(&[T::Or]) {
            let right = self.parse_and()?;
            left = Expr::logical(left, operator, right);
        }

        Ok(left)
    }

    /// Parse logical AND (`and`)
    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;

        while let Some(operator) = self.match_any(&[T::And]) {
            let right = self.parse_equality()?;
            left = Expr::logical(left, operator, right);
        }

        Ok(left)
    }

    /// Parse equality (`==`, `!=`)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(EQUALITY_OPERATORS, Self::parse_comparison)
    }

    /// Parse comparison (`>`, `<`, `<=`, `>=`)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(COMPARISON_OPERATORS, Self::parse_term)
    }

    /// Parse additive (`+`, `-`)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(TERM_OPERATORS, Self::parse_factor)
    }

    /// Parse multiplicative (`*`, `/`)
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(FACTOR_OPERATORS, Self::parse_unary)
    }

    /// Left-associative chain of `next` separated by any of `operators`
    fn parse_binary_level(
        &mut self,
        operators: &[T],
        next: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;

        while let Some(operator) = self.match_any(operators) {
            let right = next(self)?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse unary prefix operators (`!`, `&`, `*`, `-`)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(operator) = self.match_any(UNARY_OPERATORS) {
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::unary(operator, operand));
        }

        self.parse_primary()
    }

    /// Parse primary (literals, variables with postfix chains, groupings)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if self.match_any(&[T::False]).is_some() {
            return Ok(Expr::literal("false"));
        }

        if self.match_any(&[T::True]).is_some() {
            return Ok(Expr::literal("true"));
        }

        if let Some(token) = self.match_any(&[T::Number, T::String, T::Char]) {
            return Ok(Expr::literal(token.text));
        }

        if let Some(name) = self.match_any(&[T::Identifier]) {
            return self.parse_postfix(Expr::variable(name));
        }

        if self.match_any(&[T::LParen]).is_some() {
            let inner = self.parse_expression()?;
            self.expect(T::RParen, "Expected ')' after grouping expression")?;
            return Ok(Expr::grouping(inner));
        }

        Err(self.error_at_current(ParseErrorKind::ExpectedExpression {
            found: self.current().to_string(),
        }))
    }

    /// Parse postfix chain (`.name`, `(args)`) after a variable
    fn parse_postfix(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        loop {
            if self.match_any(&[T::Dot]).is_some() {
                let property =
                    self.expect_identifier("Expected property name after '.'")?;
                expr = Expr::get(expr, property);
            } else if self.check(T::LParen) {
                expr = self.parse_call(expr)?;
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse call suffix: `( expr, expr, ... )`
    #[instrument(skip_all)]
    fn parse_call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        self.expect(T::LParen, "Expected '(' after function name")?;
        let mut arguments = Vec::new();

        if !self.check(T::RParen) {
            loop {
                if arguments.len() >= MAX_CALL_ARGUMENTS {
                    return Err(self.error_at_current(
                        ParseErrorKind::TooManyArguments {
                            max: MAX_CALL_ARGUMENTS,
                        },
                    ));
                }
                arguments.push(self.parse_expression()?);

                if self.match_any(&[T::Comma]).is_none() {
                    break;
                }

                if self.check(T::RParen) {
                    return Err(
                        self.error_at_current(ParseErrorKind::TrailingComma)
                    );
                }
            }
        }

        let paren =
            self.expect(T::RParen, "Expected ')' after function arguments")?;
        Ok(Expr::call(callee, paren, arguments))
    }
}
