//! # Introduction
//!
//! Ion is a small curly-brace, C-like language. This crate is its front end:
//! it turns source text into an abstract syntax tree and stops there.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → (printer / driver)
//! ```
//!
//! 1. [`parser`]: tokenizes the source and builds the AST.
//! 2. [`printer`]: renders the AST as parenthesized prefix text for debugging.
//! 3. [`driver`]: REPL and file front door used by the `ion` binary.
//! 4. [`config`]: command-line options and shared constants.
//!
//! ## Example
//!
//! ```
//! let program = ion::parse_source("a = b = 1;").unwrap();
//! assert_eq!(ion::printer::print_program(&program), "(expr (= a (= b 1)))");
//! ```
//!
//! Errors are fail-fast: the first lex or parse error is returned with its
//! source position and no partial tree.

pub mod config;
pub mod driver;
pub mod parser;
pub mod printer;

use parser::{ParseError, Parser, Stmt};

/// Lex and parse `source` into its top-level statements.
pub fn parse_source(source: &str) -> Result<Vec<Stmt>, ParseError> {
    Parser::from_source(source)?.parse()
}
