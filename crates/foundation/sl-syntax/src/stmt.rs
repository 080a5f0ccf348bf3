//! Statement nodes

use crate::{Expr, Ident, ResolvedType};
use serde::{Deserialize, Serialize};
use sl_span::Span;
use std::fmt;

/// Statement node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stmt {
    /// Source location
    #[serde(default)]
    pub span: Span,
    /// Node shape
    #[serde(flatten)]
    pub kind: StmtKind,
}

impl Stmt {
    /// Create a statement node
    #[must_use]
    pub const fn new(kind: StmtKind, span: Span) -> Self {
        Self { span, kind }
    }
}

/// Brace-delimited statement list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Statements in order
    #[serde(default)]
    pub statements: Vec<Stmt>,
}

impl Block {
    /// Create a block
    #[must_use]
    pub const fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

/// One declarator of a variable statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    /// Declared name
    pub name: Ident,
    /// Resolved type of the variable
    #[serde(rename = "type", default)]
    pub ty: Option<ResolvedType>,
    /// Initializer expression
    #[serde(default)]
    pub initializer: Option<Expr>,
    /// Source location
    #[serde(default)]
    pub span: Span,
}

/// Initializer clause of a `for` or `for-of` loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForInitializer {
    /// `let a = 0` (possibly with several declarators)
    Declarations(Vec<VariableDeclaration>),
    /// A bare expression such as `i = 0`
    Expression(Expr),
}

/// Statement shapes produced by the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StmtKind {
    /// `if (condition) then_branch else else_branch`
    If {
        /// Condition
        condition: Expr,
        /// Taken branch, braced or bare
        then_branch: Box<Stmt>,
        /// Alternative branch
        #[serde(default)]
        else_branch: Option<Box<Stmt>>,
    },
    /// `return expression;`
    Return {
        /// Returned value
        #[serde(default)]
        expression: Option<Expr>,
    },
    /// `throw expression;`
    Throw {
        /// Thrown value
        expression: Expr,
    },
    /// `expression;`
    Expression {
        /// Evaluated expression
        expression: Expr,
    },
    /// `let a = 1, b = 2;`
    Variable {
        /// Declarators in order
        declarations: Vec<VariableDeclaration>,
    },
    /// `while (condition) body`
    While {
        /// Loop condition
        condition: Expr,
        /// Loop body
        body: Box<Stmt>,
    },
    /// `for (initializer of expression) body`
    ForOf {
        /// Item variable declaration
        initializer: ForInitializer,
        /// Iterated collection
        expression: Expr,
        /// Loop body
        body: Box<Stmt>,
    },
    /// `for (initializer; condition; incrementor) body`
    For {
        /// Loop initializer
        #[serde(default)]
        initializer: Option<ForInitializer>,
        /// Loop condition
        #[serde(default)]
        condition: Option<Expr>,
        /// Step expression
        #[serde(default)]
        incrementor: Option<Expr>,
        /// Loop body
        body: Box<Stmt>,
    },
    /// `{ statements }`
    Block(Block),
    /// `do body while (condition);`
    DoWhile,
    /// `for (key in object) body`
    ForIn,
    /// `switch (value) { ... }`
    Switch,
    /// `try { ... } catch { ... }`
    Try,
    /// `break;`
    Break,
    /// `continue;`
    Continue,
    /// `label: statement`
    Labeled,
    /// `;`
    Empty,
    /// Construct the front end has no dedicated shape for
    Other {
        /// Name of the construct
        construct: String,
    },
}

impl fmt::Display for StmtKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::If { .. } => "if",
            Self::Return { .. } => "return",
            Self::Throw { .. } => "throw",
            Self::Expression { .. } => "expression",
            Self::Variable { .. } => "variable",
            Self::While { .. } => "while",
            Self::ForOf { .. } => "for_of",
            Self::For { .. } => "for",
            Self::Block(_) => "block",
            Self::DoWhile => "do_while",
            Self::ForIn => "for_in",
            Self::Switch => "switch",
            Self::Try => "try",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Labeled => "labeled",
            Self::Empty => "empty",
            Self::Other { construct } => return write!(formatter, "{construct}"),
        };
        formatter.write_str(name)
    }
}
