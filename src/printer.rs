//! Debug AST printer
//!
//! Renders the AST as parenthesized prefix text, one top-level statement per
//! line: `1 + 2 * 3;` prints as `(expr (+ 1 (* 2 3)))`. The printer only reads
//! the tree; it is an ordinary consumer of the [`ExprVisitor`] and
//! [`StmtVisitor`] traits.

use crate::parser::ast::{Datatype, Expr, ExprVisitor, Stmt, StmtVisitor};
use crate::parser::token::Token;

/// Visitor that accumulates printed statements in a buffer
#[derive(Debug, Default)]
pub struct AstPrinter {
    out: String,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print one expression.
    pub fn expr(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    /// Print one statement and append it to the buffer.
    pub fn stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    /// Take the buffered output, leaving the printer empty.
    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.out)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut text = format!("({}", name);
        for expr in exprs {
            text.push(' ');
            text.push_str(&expr.accept(self));
        }
        text.push(')');
        text
    }

    /// Statements render like expressions but into the buffer.
    fn emit(&mut self, text: String) {
        self.out.push_str(&text);
    }

    fn render_stmt(&mut self, stmt: &Stmt) -> String {
        let saved = std::mem::take(&mut self.out);
        stmt.accept(self);
        std::mem::replace(&mut self.out, saved)
    }
}

impl ExprVisitor for AstPrinter {
    type Output = String;

    fn visit_literal(&mut self, value: &str) -> String {
        value.to_string()
    }

    fn visit_variable(&mut self, name: &Token) -> String {
        name.text.clone()
    }

    fn visit_unary(&mut self, operator: &Token, operand: &Expr) -> String {
        self.parenthesize(&operator.text, &[operand])
    }

    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.text, &[left, right])
    }

    fn visit_logical(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.text, &[left, right])
    }

    fn visit_grouping(&mut self, inner: &Expr) -> String {
        self.parenthesize("group", &[inner])
    }

    fn visit_assign(&mut self, name: &Token, operator: &Token, value: &Expr) -> String {
        format!("({} {} {})", operator.text, name.text, value.accept(self))
    }

    fn visit_get(&mut self, object: &Expr, property: &Token) -> String {
        format!("(. {} {})", object.accept(self), property.text)
    }

    fn visit_call(&mut self, callee: &Expr, _paren: &Token, arguments: &[Expr]) -> String {
        let mut exprs = Vec::with_capacity(arguments.len() + 1);
        exprs.push(callee);
        exprs.extend(arguments);
        self.parenthesize("call", &exprs)
    }
}

impl StmtVisitor for AstPrinter {
    fn visit_expression(&mut self, expr: &Expr) {
        let text = self.parenthesize("expr", &[expr]);
        self.emit(text);
    }

    fn visit_block(&mut self, body: &[Stmt]) {
        let mut text = String::from("(block");
        for stmt in body {
            text.push(' ');
            text.push_str(&self.render_stmt(stmt));
        }
        text.push(')');
        self.emit(text);
    }

    fn visit_return(&mut self, value: &Expr) {
        let text = self.parenthesize("return", &[value]);
        self.emit(text);
    }

    fn visit_import(&mut self, value: &Expr) {
        let text = self.parenthesize("import", &[value]);
        self.emit(text);
    }

    fn visit_expand(&mut self, value: &Expr) {
        let text = self.parenthesize("expand", &[value]);
        self.emit(text);
    }

    fn visit_use(&mut self, value: &Expr) {
        let text = self.parenthesize("use", &[value]);
        self.emit(text);
    }

    fn visit_variable_decl(
        &mut self,
        mutable: bool,
        datatype: &Datatype,
        name: &Token,
        initializer: Option<&Expr>,
    ) {
        let keyword = if mutable { "def" } else { "const" };
        let mut text = format!("({} {} {}", keyword, datatype, name.text);
        if let Some(init) = initializer {
            text.push(' ');
            text.push_str(&init.accept(self));
        }
        text.push(')');
        self.emit(text);
    }
}

/// Print a single expression.
pub fn print_expr(expr: &Expr) -> String {
    AstPrinter::new().expr(expr)
}

/// Print a program, one top-level statement per line.
pub fn print_program(statements: &[Stmt]) -> String {
    let mut printer = AstPrinter::new();
    statements
        .iter()
        .map(|stmt| printer.render_stmt(stmt))
        .collect::<Vec<_>>()
        .join("\n")
}
