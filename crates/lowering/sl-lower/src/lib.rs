//! Schema lowering - converts resolved syntax trees to language-neutral schemas
//!
//! This crate handles:
//! - Identifier normalization to `snake_case`
//! - Type lowering to the closed schema type set
//! - Expression and statement lowering with graceful degradation
//! - Assembly of enums and classes into a [`SchemaFile`]
//!
//! Lowering never rejects a file for using constructs outside the supported
//! grammar. Those are reported through a [`DiagnosticSink`] and left out of
//! the output. Only a tree that breaks its resolution contract produces a
//! [`LowerError`].

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod expr;
pub mod names;
pub mod schema;
pub mod stmt;
pub mod types;

pub use context::LoweringContext;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics};
pub use error::LowerError;
pub use expr::lower_expression;
pub use names::normalize;
pub use schema::build_schema;
pub use stmt::{lower_block, lower_loop_initializer, lower_statement, lower_statements};
pub use types::lower_type;

pub use sl_schema::SchemaFile;

#[cfg(test)]
pub(crate) mod test_support {
    use sl_span::Span;
    use sl_syntax::{Expr, ExprKind, Ident, Stmt, StmtKind, VariableDeclaration};

    pub fn expr(kind: ExprKind) -> Expr {
        Expr::new(kind, Span::default())
    }

    pub fn ident(name: &str) -> Expr {
        expr(ExprKind::Identifier { name: name.to_string() })
    }

    pub fn num(text: &str) -> Expr {
        expr(ExprKind::NumericLiteral { text: text.to_string() })
    }

    pub fn stmt(kind: StmtKind) -> Stmt {
        Stmt::new(kind, Span::default())
    }

    pub fn declaration(name: &str, initializer: Option<Expr>) -> VariableDeclaration {
        VariableDeclaration {
            name: Ident::new(name, Span::default()),
            ty: None,
            initializer,
            span: Span::default(),
        }
    }
}
