// AST (Abstract Syntax Tree) definitions for the Ion front end

use super::token::Token;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Type expression attached to a variable declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datatype {
    /// A named type such as `int` or `Point`
    Basic { name: String },
    /// `T*`
    Pointer { referent: Box<Datatype> },
    /// `[T]` or `[T; N]`; `size` is the raw number literal
    Array {
        size: Option<String>,
        elements: Vec<Datatype>,
    },
    /// `(T, U, ...)`
    Tuple { elements: Vec<Datatype> },
}

impl Datatype {
    pub fn basic(name: impl Into<String>) -> Self {
        Datatype::Basic { name: name.into() }
    }

    pub fn pointer(referent: Datatype) -> Self {
        Datatype::Pointer {
            referent: Box::new(referent),
        }
    }

    pub fn array(size: Option<String>, elements: Vec<Datatype>) -> Self {
        Datatype::Array { size, elements }
    }

    pub fn tuple(elements: Vec<Datatype>) -> Self {
        Datatype::Tuple { elements }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datatype::Basic { name } => write!(f, "{}", name),
            Datatype::Pointer { referent } => write!(f, "{}*", referent),
            Datatype::Array { size, elements } => {
                write!(f, "[")?;
                write_list(f, elements)?;
                if let Some(size) = size {
                    write!(f, "; {}", size)?;
                }
                write!(f, "]")
            }
            Datatype::Tuple { elements } => {
                write!(f, "(")?;
                write_list(f, elements)?;
                write!(f, ")")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Datatype]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Expressions. Each node owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Raw literal text: `42`, `"hi"` (quotes kept), `x` for a char, `true`
    Literal { value: String },
    Variable { name: Token },
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    /// Short-circuiting `and` / `or`
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Grouping { inner: Box<Expr> },
    /// `name = value` and the compound forms (`+=`, `-=`, `*=`, `/=`)
    Assign {
        name: Token,
        operator: Token,
        value: Box<Expr>,
    },
    /// `object.property`
    Get { object: Box<Expr>, property: Token },
    /// `callee(arguments)`; `paren` is the closing `)`
    Call {
        callee: Box<Expr>,
        paren: Token,
        arguments: Vec<Expr>,
    },
}

impl Expr {
    pub fn literal(value: impl Into<String>) -> Self {
        Expr::Literal {
            value: value.into(),
        }
    }

    pub fn variable(name: Token) -> Self {
        Expr::Variable { name }
    }

    pub fn unary(operator: Token, operand: Expr) -> Self {
        Expr::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn logical(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Logical {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping {
            inner: Box::new(inner),
        }
    }

    pub fn assign(name: Token, operator: Token, value: Expr) -> Self {
        Expr::Assign {
            name,
            operator,
            value: Box::new(value),
        }
    }

    pub fn get(object: Expr, property: Token) -> Self {
        Expr::Get {
            object: Box::new(object),
            property,
        }
    }

    pub fn call(callee: Expr, paren: Token, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        }
    }

    /// Dispatch to the visitor method matching this variant.
    pub fn accept<V: ExprVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Literal { value } => visitor.visit_literal(value),
            Expr::Variable { name } => visitor.visit_variable(name),
            Expr::Unary { operator, operand } => {
                visitor.visit_unary(operator, operand)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => visitor.visit_binary(left, operator, right),
            Expr::Logical {
                left,
                operator,
                right,
            } => visitor.visit_logical(left, operator, right),
            Expr::Grouping { inner } => visitor.visit_grouping(inner),
            Expr::Assign {
                name,
                operator,
                value,
            } => visitor.visit_assign(name, operator, value),
            Expr::Get { object, property } => {
                visitor.visit_get(object, property)
            }
            Expr::Call {
                callee,
                paren,
                arguments,
            } => visitor.visit_call(callee, paren, arguments),
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Expr::Variable { .. })
    }
}

/// Statements. Each node owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Expression { expr: Expr },
    Block { body: Vec<Stmt> },
    Return { value: Expr },
    Import { value: Expr },
    Expand { value: Expr },
    Use { value: Expr },
    /// `def T name = init;` (mutable) or `const T name = init;`
    VariableDecl {
        mutable: bool,
        datatype: Datatype,
        name: Token,
        initializer: Option<Expr>,
    },
}

impl Stmt {
    pub fn expression(expr: Expr) -> Self {
        Stmt::Expression { expr }
    }

    pub fn block(body: Vec<Stmt>) -> Self {
        Stmt::Block { body }
    }

    pub fn return_(value: Expr) -> Self {
        Stmt::Return { value }
    }

    pub fn import(value: Expr) -> Self {
        Stmt::Import { value }
    }

    pub fn expand(value: Expr) -> Self {
        Stmt::Expand { value }
    }

    pub fn use_(value: Expr) -> Self {
        Stmt::Use { value }
    }

    pub fn variable_decl(
        mutable: bool,
        datatype: Datatype,
        name: Token,
        initializer: Option<Expr>,
    ) -> Self {
        Stmt::VariableDecl {
            mutable,
            datatype,
            name,
            initializer,
        }
    }

    /// Dispatch to the visitor method matching this variant.
    pub fn accept<V: StmtVisitor>(&self, visitor: &mut V) {
        match self {
            Stmt::Expression { expr } => visitor.visit_expression(expr),
            Stmt::Block { body } => visitor.visit_block(body),
            Stmt::Return { value } => visitor.visit_return(value),
            Stmt::Import { value } => visitor.visit_import(value),
            Stmt::Expand { value } => visitor.visit_expand(value),
            Stmt::Use { value } => visitor.visit_use(value),
            Stmt::VariableDecl {
                mutable,
                datatype,
                name,
                initializer,
            } => visitor.visit_variable_decl(
                *mutable,
                datatype,
                name,
                initializer.as_ref(),
            ),
        }
    }
}

/// One handler per expression variant; expressions evaluate to a value.
pub trait ExprVisitor {
    type Output;

    fn visit_literal(&mut self, value: &str) -> Self::Output;
    fn visit_variable(&mut self, name: &Token) -> Self::Output;
    fn visit_unary(&mut self, operator: &Token, operand: &Expr) -> Self::Output;
    fn visit_binary(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> Self::Output;
    fn visit_logical(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> Self::Output;
    fn visit_grouping(&mut self, inner: &Expr) -> Self::Output;
    fn visit_assign(
        &mut self,
        name: &Token,
        operator: &Token,
        value: &Expr,
    ) -> Self::Output;
    fn visit_get(&mut self, object: &Expr, property: &Token) -> Self::Output;
    fn visit_call(
        &mut self,
        callee: &Expr,
        paren: &Token,
        arguments: &[Expr],
    ) -> Self::Output;
}

/// One handler per statement variant; statements run for effect.
pub trait StmtVisitor {
    fn visit_expression(&mut self, expr: &Expr);
    fn visit_block(&mut self, body: &[Stmt]);
    fn visit_return(&mut self, value: &Expr);
    fn visit_import(&mut self, value: &Expr);
    fn visit_expand(&mut self, value: &Expr);
    fn visit_use(&mut self, value: &Expr);
    fn visit_variable_decl(
        &mut self,
        mutable: bool,
        datatype: &Datatype,
        name: &Token,
        initializer: Option<&Expr>,
    );
}
