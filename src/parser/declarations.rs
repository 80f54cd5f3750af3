//! Declaration parsing implementation
//!
//! This module handles variable declarations and the type expressions they
//! carry:
//!
//! ```text
//! var_decl ::= ("def" | "const") datatype IDENT ("=" expression)? ";"
//! datatype ::= base "*"*
//! base     ::= IDENT
//!            | "(" datatype ("," datatype)* ")"
//!            | "[" datatype (";" NUMBER)? "]"
//! ```
//!
//! `def` declares a mutable binding, `const` an immutable one. Generic types
//! (`Name<...>`) are rejected with [`ParseErrorKind::UnsupportedType`].
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::token::TokenKind;
use tracing::instrument;

impl Parser {
    /// Parse variable declaration: `def int* p = &x;`
    #[instrument(skip_all)]
    pub(crate) fn parse_variable_declaration(
        &mut self,
    ) -> Result<Stmt, ParseError> {
        let keyword = self.advance(); // `def` or `const`
        let mutable = keyword.kind == TokenKind::Def;

        let datatype = self.parse_datatype()?;
        let name = self.expect_identifier("Expected variable name after type")?;

        let initializer = if self.match_any(&[TokenKind::Assign]).is_some() {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_semicolon("after variable declaration")?;
        Ok(Stmt::variable_decl(mutable, datatype, name, initializer))
    }

    /// Parse type: base [*]*
    pub(crate) fn parse_datatype(&mut self) -> Result<Datatype, ParseError> {
        let mut datatype = self.parse_base_datatype()?;

        while self.match_any(&[TokenKind::Star]).is_some() {
            datatype = Datatype::pointer(datatype);
        }

        Ok(datatype)
    }

    fn parse_base_datatype(&mut self) -> Result<Datatype, ParseError> {
        if let Some(name) = self.match_any(&[TokenKind::Identifier]) {
            if self.check(TokenKind::Lt) {
                return Err(self.error_at_current(
                    ParseErrorKind::UnsupportedType {
                        what: "Generic".to_string(),
                    },
                ));
            }
            return Ok(Datatype::basic(name.text));
        }

        if self.match_any(&[TokenKind::LParen]).is_some() {
            let mut elements = vec![self.nested(Self::parse_datatype)?];
            while self.match_any(&[TokenKind::Comma]).is_some() {
                elements.push(self.nested(Self::parse_datatype)?);
            }
            self.expect(TokenKind::RParen, "Expected ')' after tuple type")?;
            return Ok(Datatype::tuple(elements));
        }

        if self.match_any(&[TokenKind::LSquare]).is_some() {
            let element = self.nested(Self::parse_datatype)?;
            let size = if self.match_any(&[TokenKind::Semicolon]).is_some() {
                let size =
                    self.expect(TokenKind::Number, "Expected array size after ';'")?;
                Some(size.text)
            } else {
                None
            };
            self.expect(TokenKind::RSquare, "Expected ']' after array type")?;
            return Ok(Datatype::array(size, vec![element]));
        }

        Err(self.error_at_current(ParseErrorKind::UnexpectedToken {
            expected: "Expected type".to_string(),
            found: self.current().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::MAX_NESTING_DEPTH;
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseErrorKind, Parser};
    use pretty_assertions::assert_eq;

    fn parse_decl(source: &str) -> (bool, Datatype, String, Option<Expr>) {
        crate::test_support::init_tracing();
        let mut program = Parser::from_source(source).unwrap().parse().unwrap();
        match program.remove(0) {
            Stmt::VariableDecl {
                mutable,
                datatype,
                name,
                initializer,
            } => (mutable, datatype, name.text, initializer),
            other => panic!("Expected variable declaration, got {:?}", other),
        }
    }

    fn parse_err(source: &str) -> ParseErrorKind {
        Parser::from_source(source).unwrap().parse().unwrap_err().kind
    }

    #[test]
    fn test_mutable_declaration() {
        let (mutable, datatype, name, init) = parse_decl("def int x = 1 + 2;");
        assert!(mutable);
        assert_eq!(datatype, Datatype::basic("int"));
        assert_eq!(name, "x");
        assert!(matches!(init, Some(Expr::Binary { .. })));
    }

    #[test]
    fn test_const_declaration_without_initializer() {
        let (mutable, datatype, name, init) = parse_decl("const Point origin;");
        assert!(!mutable);
        assert_eq!(datatype, Datatype::basic("Point"));
        assert_eq!(name, "origin");
        assert_eq!(init, None);
    }

    #[test]
    fn test_pointer_types() {
        let (_, datatype, _, init) = parse_decl("def char** argv = &args;");
        assert_eq!(
            datatype,
            Datatype::pointer(Datatype::pointer(Datatype::basic("char")))
        );
        assert!(matches!(init, Some(Expr::Unary { .. })));
    }

    #[test]
    fn test_tuple_and_array_types() {
        let (_, datatype, _, _) = parse_decl("def (int, [char; 16]*) pair;");
        assert_eq!(
            datatype,
            Datatype::tuple(vec![
                Datatype::basic("int"),
                Datatype::pointer(Datatype::array(
                    Some("16".to_string()),
                    vec![Datatype::basic("char")],
                )),
            ])
        );

        let (_, datatype, _, _) = parse_decl("const [u8] bytes;");
        assert_eq!(datatype, Datatype::array(None, vec![Datatype::basic("u8")]));
    }

    #[test]
    fn test_declarations_inside_blocks() {
        let program = Parser::from_source("{ def int i = 0; i += 1; }")
            .unwrap()
            .parse()
            .unwrap();
        match &program[0] {
            Stmt::Block { body } => {
                assert!(matches!(body[0], Stmt::VariableDecl { mutable: true, .. }));
                assert!(matches!(body[1], Stmt::Expression { .. }));
            }
            other => panic!("Expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_types_are_rejected() {
        assert_eq!(
            parse_err("def List<int> xs;"),
            ParseErrorKind::UnsupportedType {
                what: "Generic".to_string()
            }
        );
    }

    #[test]
    fn test_deeply_nested_types() {
        let source = format!("def {}int{} x;", "[".repeat(10_000), "]".repeat(10_000));
        assert_eq!(
            parse_err(&source),
            ParseErrorKind::NestingTooDeep {
                max: MAX_NESTING_DEPTH
            }
        );
    }

    #[test]
    fn test_malformed_declarations() {
        assert!(matches!(
            parse_err("def = 1;"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse_err("def int = 1;"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse_err("const int x = 1"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse_err("def [int; n] xs;"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
    }
}
