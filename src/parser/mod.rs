//! Ion source code parser
//!
//! This module transforms Ion source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token model and keyword table
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state, primitives and errors (tokens → AST)
//! - [`ast`]: AST node definitions and visitor traits
//!
//! # Language Subset
//!
//! - Statements: blocks, `return`, `import`, `expand`, `use`, expression
//!   statements, `def` / `const` variable declarations
//! - Expressions: assignment (plain and compound), `and` / `or`, equality,
//!   comparison, arithmetic, prefix `! & * -`, member access, calls
//! - Types: named, pointer, tuple, array
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod token;

pub use ast::{Datatype, Expr, SourceLocation, Stmt};
pub use lexer::{tokenize, LexError, LexErrorKind, Lexer};
pub use parse::{ParseError, ParseErrorKind, Parser};
pub use token::{Token, TokenKind};
