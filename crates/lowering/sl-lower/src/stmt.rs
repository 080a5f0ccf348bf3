//! Statement lowering
//!
//! Statements lower to zero or more schema statements: multi-declarator
//! variable statements fan out, unsupported statements vanish after being
//! reported. Every branch and loop body becomes a [`Block`].

use crate::context::LoweringContext;
use crate::diagnostics::DiagnosticKind;
use crate::error::LowerError;
use crate::expr::lower_expression;
use sl_schema::{Block, Statement, Variable};
use sl_span::Span;
use sl_syntax::{self as syntax, Expr, ExprKind, ForInitializer, Stmt, StmtKind, VariableDeclaration};

/// Lower one statement
///
/// # Errors
///
/// Propagates fatal errors from nested expressions.
pub fn lower_statement(ctx: &mut LoweringContext<'_>, stmt: &Stmt) -> Result<Vec<Statement>, LowerError> {
    let lowered = match &stmt.kind {
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let condition = lower_expression(ctx, Some(condition))?;
            let then_block = lower_block(ctx, then_branch)?;
            let else_block = match else_branch {
                Some(branch) => Some(lower_block(ctx, branch)?),
                None => None,
            };
            Statement::If {
                condition,
                then_block,
                else_block,
            }
        }
        StmtKind::Return { expression } => Statement::Return {
            expression: lower_expression(ctx, expression.as_ref())?,
        },
        StmtKind::Throw { expression } => Statement::Throw {
            expression: lower_expression(ctx, Some(expression))?,
        },
        StmtKind::Expression { expression } => Statement::ExpressionStatement {
            expression: lower_expression(ctx, Some(expression))?,
        },
        StmtKind::Variable { declarations } => {
            return declarations
                .iter()
                .map(|declaration| Ok(Statement::Variable(lower_variable(ctx, declaration)?)))
                .collect();
        }
        StmtKind::While { condition, body } => Statement::While {
            condition: lower_expression(ctx, Some(condition))?,
            body: lower_block(ctx, body)?,
        },
        StmtKind::ForOf {
            initializer,
            expression,
            body,
        } => {
            Statement::Foreach {
                item_variable: lower_loop_initializer(ctx, initializer, stmt.span)?,
                items: lower_expression(ctx, Some(expression))?,
                body: lower_block(ctx, body)?,
            }
        }
        StmtKind::For {
            initializer,
            condition,
            incrementor,
            body,
        } => {
            let item_variable = match initializer {
                Some(initializer) => lower_loop_initializer(ctx, initializer, stmt.span)?,
                None => None,
            };
            Statement::For {
                item_variable,
                condition: lower_expression(ctx, condition.as_ref())?,
                incrementor: lower_expression(ctx, incrementor.as_ref())?,
                body: lower_block(ctx, body)?,
            }
        }
        StmtKind::Block(_)
        | StmtKind::DoWhile
        | StmtKind::ForIn
        | StmtKind::Switch
        | StmtKind::Try
        | StmtKind::Break
        | StmtKind::Continue
        | StmtKind::Labeled
        | StmtKind::Empty
        | StmtKind::Other { .. } => {
            ctx.report(
                DiagnosticKind::UnexpectedStatement,
                format!("Unexpected statement kind: {}", stmt.kind),
                stmt.span,
            );
            return Ok(Vec::new());
        }
    };

    Ok(vec![lowered])
}

/// Lower a branch or loop body
///
/// A braced block is lowered statement by statement; any other statement is
/// lowered and wrapped.
///
/// # Errors
///
/// Propagates fatal errors from nested expressions.
pub fn lower_block(ctx: &mut LoweringContext<'_>, stmt: &Stmt) -> Result<Block, LowerError> {
    match &stmt.kind {
        StmtKind::Block(block) => lower_statements(ctx, block),
        _ => Ok(Block::new(lower_statement(ctx, stmt)?)),
    }
}

/// Lower a statement list, flattening the results in order
///
/// # Errors
///
/// Propagates fatal errors from nested expressions.
pub fn lower_statements(ctx: &mut LoweringContext<'_>, block: &syntax::Block) -> Result<Block, LowerError> {
    let mut statements = Vec::with_capacity(block.statements.len());
    for stmt in &block.statements {
        statements.extend(lower_statement(ctx, stmt)?);
    }
    Ok(Block::new(statements))
}

/// Lower the initializer of a `for` or `for-of` loop to its item variable
///
/// A declaration list with exactly one declarator, or a bare identifier as in
/// `for (item of items)`, is fully supported. Extra declarators are reported
/// and ignored. An empty list or any other expression is reported and yields
/// `None`.
///
/// # Errors
///
/// Propagates fatal errors from the declarator's initializer.
pub fn lower_loop_initializer(
    ctx: &mut LoweringContext<'_>,
    initializer: &ForInitializer,
    span: Span,
) -> Result<Option<Variable>, LowerError> {
    match initializer {
        ForInitializer::Declarations(declarations) => {
            let Some(first) = declarations.first() else {
                ctx.report(
                    DiagnosticKind::UnsupportedLoopInitializer,
                    "Loop initializer declares no variable",
                    span,
                );
                return Ok(None);
            };
            if declarations.len() > 1 {
                ctx.report(
                    DiagnosticKind::UnsupportedLoopInitializer,
                    format!(
                        "Loop initializer declares {} variables; only `{}` is kept",
                        declarations.len(),
                        first.name.text
                    ),
                    span,
                );
            }
            lower_variable(ctx, first).map(Some)
        }
        ForInitializer::Expression(Expr {
            kind: ExprKind::Identifier { name },
            span: name_span,
        }) => Ok(Some(Variable::named(ctx.normalize(name, *name_span)))),
        ForInitializer::Expression(expression) => {
            ctx.report(
                DiagnosticKind::UnsupportedLoopInitializer,
                format!(
                    "Unsupported loop initializer: {} expression",
                    expression.kind
                ),
                expression.span,
            );
            Ok(None)
        }
    }
}

/// Lower a single declarator
///
/// # Errors
///
/// Propagates fatal errors from the initializer.
pub fn lower_variable(
    ctx: &mut LoweringContext<'_>,
    declaration: &VariableDeclaration,
) -> Result<Variable, LowerError> {
    Ok(Variable {
        variable_name: ctx.normalize(&declaration.name.text, declaration.name.span),
        initializer: lower_expression(ctx, declaration.initializer.as_ref())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::test_support::{declaration, expr, ident, num, stmt};
    use pretty_assertions::assert_eq;
    use sl_schema::{Expression, LiteralType};
    use sl_span::FileId;
    use sl_syntax::{Ident, SourceFile};

    fn lower(stmt: &Stmt) -> (Vec<Statement>, Diagnostics) {
        let file = SourceFile::new(FileId(0), "stmt.ts", "");
        let mut diagnostics = Diagnostics::new();
        let mut ctx = LoweringContext::new(&file, &mut diagnostics);
        let lowered = lower_statement(&mut ctx, stmt).unwrap();
        (lowered, diagnostics)
    }

    fn block(statements: Vec<Stmt>) -> Stmt {
        stmt(StmtKind::Block(syntax::Block::new(statements)))
    }

    fn call(name: &str) -> Stmt {
        stmt(StmtKind::Expression {
            expression: expr(ExprKind::Call {
                callee: Box::new(ident(name)),
                arguments: vec![],
            }),
        })
    }

    fn lowered_call(name: &str) -> Statement {
        Statement::ExpressionStatement {
            expression: Some(Expression::Call {
                method: Some(Box::new(Expression::identifier(name))),
                arguments: vec![],
            }),
        }
    }

    #[test]
    fn test_for_of_becomes_foreach() {
        // for (const item of items) { use(item); }
        let loop_stmt = stmt(StmtKind::ForOf {
            initializer: ForInitializer::Declarations(vec![declaration("item", None)]),
            expression: ident("items"),
            body: Box::new(block(vec![call("use")])),
        });

        let (lowered, diagnostics) = lower(&loop_stmt);
        assert!(diagnostics.is_empty());
        assert_eq!(
            lowered,
            vec![Statement::Foreach {
                item_variable: Some(Variable::named("item")),
                items: Some(Expression::identifier("items")),
                body: Block::new(vec![lowered_call("use")]),
            }]
        );
    }

    #[test]
    fn test_multi_declarator_variable_fans_out() {
        // let a = 1, b = 2;
        let declarations = stmt(StmtKind::Variable {
            declarations: vec![declaration("a", Some(num("1"))), declaration("b", Some(num("2")))],
        });

        let (lowered, _) = lower(&declarations);
        assert_eq!(
            lowered,
            vec![
                Statement::Variable(Variable {
                    variable_name: "a".to_string(),
                    initializer: Some(Expression::literal(LiteralType::Numeric, "1")),
                }),
                Statement::Variable(Variable {
                    variable_name: "b".to_string(),
                    initializer: Some(Expression::literal(LiteralType::Numeric, "2")),
                }),
            ]
        );
    }

    #[test]
    fn test_bare_branch_is_wrapped() {
        // if (ready) go(); else { stop(); }
        let branch = stmt(StmtKind::If {
            condition: ident("ready"),
            then_branch: Box::new(call("go")),
            else_branch: Some(Box::new(block(vec![call("stop")]))),
        });

        let (lowered, _) = lower(&branch);
        assert_eq!(
            lowered,
            vec![Statement::If {
                condition: Some(Expression::identifier("ready")),
                then_block: Block::new(vec![lowered_call("go")]),
                else_block: Some(Block::new(vec![lowered_call("stop")])),
            }]
        );
    }

    #[test]
    fn test_unsupported_statement_dropped_with_diagnostic() {
        let body = block(vec![call("first"), stmt(StmtKind::Break), call("second")]);
        let loop_stmt = stmt(StmtKind::While {
            condition: ident("running"),
            body: Box::new(body),
        });

        let (lowered, diagnostics) = lower(&loop_stmt);
        assert_eq!(diagnostics.count(DiagnosticKind::UnexpectedStatement), 1);
        assert_eq!(
            diagnostics.diagnostics()[0].message,
            "Unexpected statement kind: break"
        );
        assert_eq!(
            lowered,
            vec![Statement::While {
                condition: Some(Expression::identifier("running")),
                body: Block::new(vec![lowered_call("first"), lowered_call("second")]),
            }]
        );
    }

    #[test]
    fn test_nested_bare_block_is_unsupported() {
        let outer = block(vec![block(vec![call("inner")])]);
        let file = SourceFile::new(FileId(0), "stmt.ts", "");
        let mut diagnostics = Diagnostics::new();
        let mut ctx = LoweringContext::new(&file, &mut diagnostics);

        let lowered = lower_block(&mut ctx, &outer).unwrap();
        assert_eq!(lowered, Block::default());
        assert_eq!(diagnostics.count(DiagnosticKind::UnexpectedStatement), 1);
    }

    #[test]
    fn test_for_loop_keeps_first_declarator() {
        // for (let i = 0, j = 1; i < n; i++) {}
        let loop_stmt = stmt(StmtKind::For {
            initializer: Some(ForInitializer::Declarations(vec![
                declaration("i", Some(num("0"))),
                declaration("j", Some(num("1"))),
            ])),
            condition: Some(expr(ExprKind::Binary {
                left: Box::new(ident("i")),
                operator: "<".to_string(),
                right: Box::new(ident("n")),
            })),
            incrementor: Some(expr(ExprKind::PostfixUnary {
                operator: "++".to_string(),
                operand: Box::new(ident("i")),
            })),
            body: Box::new(block(vec![])),
        });

        let (lowered, diagnostics) = lower(&loop_stmt);
        assert_eq!(diagnostics.count(DiagnosticKind::UnsupportedLoopInitializer), 1);

        let [Statement::For { item_variable, .. }] = lowered.as_slice() else {
            panic!("expected a single for statement, got {lowered:?}");
        };
        assert_eq!(
            item_variable.as_ref().map(|variable| variable.variable_name.as_str()),
            Some("i")
        );
    }

    #[test]
    fn test_for_without_initializer_is_silent() {
        let loop_stmt = stmt(StmtKind::For {
            initializer: None,
            condition: None,
            incrementor: None,
            body: Box::new(block(vec![])),
        });

        let (lowered, diagnostics) = lower(&loop_stmt);
        assert!(diagnostics.is_empty());
        assert_eq!(
            lowered,
            vec![Statement::For {
                item_variable: None,
                condition: None,
                incrementor: None,
                body: Block::default(),
            }]
        );
    }

    #[test]
    fn test_for_of_with_identifier_initializer() {
        // for (item of items) { sum += item; }
        let loop_stmt = stmt(StmtKind::ForOf {
            initializer: ForInitializer::Expression(ident("item")),
            expression: ident("items"),
            body: Box::new(block(vec![stmt(StmtKind::Expression {
                expression: expr(ExprKind::Binary {
                    left: Box::new(ident("sum")),
                    operator: "+=".to_string(),
                    right: Box::new(ident("item")),
                }),
            })])),
        });

        let (lowered, diagnostics) = lower(&loop_stmt);
        assert!(diagnostics.is_empty());
        assert_eq!(
            lowered,
            vec![Statement::Foreach {
                item_variable: Some(Variable::named("item")),
                items: Some(Expression::identifier("items")),
                body: Block::new(vec![Statement::ExpressionStatement {
                    expression: Some(Expression::Binary {
                        left: Some(Box::new(Expression::identifier("sum"))),
                        operator: "+=".to_string(),
                        right: Some(Box::new(Expression::identifier("item"))),
                    }),
                }]),
            }]
        );
    }

    #[test]
    fn test_for_of_with_unsupported_initializer_keeps_loop() {
        // for (this.current of items) { use(); }
        let loop_stmt = stmt(StmtKind::ForOf {
            initializer: ForInitializer::Expression(expr(ExprKind::PropertyAccess {
                object: Box::new(expr(ExprKind::This)),
                name: Ident::new("current", Span::default()),
            })),
            expression: ident("items"),
            body: Box::new(block(vec![call("use")])),
        });

        let (lowered, diagnostics) = lower(&loop_stmt);
        assert_eq!(diagnostics.count(DiagnosticKind::UnsupportedLoopInitializer), 1);
        assert_eq!(
            lowered,
            vec![Statement::Foreach {
                item_variable: None,
                items: Some(Expression::identifier("items")),
                body: Block::new(vec![lowered_call("use")]),
            }]
        );
    }

    #[test]
    fn test_return_without_value() {
        let (lowered, _) = lower(&stmt(StmtKind::Return { expression: None }));
        assert_eq!(lowered, vec![Statement::Return { expression: None }]);
    }
}
