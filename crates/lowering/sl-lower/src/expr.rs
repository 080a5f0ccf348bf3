//! Expression lowering

use crate::context::LoweringContext;
use crate::diagnostics::DiagnosticKind;
use crate::error::LowerError;
use crate::types::lower_declared_type;
use sl_schema::{Expression, LiteralType, UnaryType};
use sl_syntax::{Expr, ExprKind};

/// Lower an optional expression
///
/// An absent node lowers to `None`. So does a node outside the supported
/// grammar, after reporting it; its siblings lower independently.
///
/// # Errors
///
/// Returns a [`LowerError`] only when the tree breaks its resolution
/// contract, e.g. a `new` expression without a resolved type.
pub fn lower_expression(
    ctx: &mut LoweringContext<'_>,
    expr: Option<&Expr>,
) -> Result<Option<Expression>, LowerError> {
    let Some(expr) = expr else {
        return Ok(None);
    };

    let lowered = match &expr.kind {
        ExprKind::Call { callee, arguments } => Expression::Call {
            method: lower_boxed(ctx, callee)?,
            arguments: lower_list(ctx, arguments)?,
        },
        ExprKind::Binary {
            left,
            operator,
            right,
        } => Expression::Binary {
            left: lower_boxed(ctx, left)?,
            right: lower_boxed(ctx, right)?,
            operator: operator.clone(),
        },
        ExprKind::PropertyAccess { object, name } => {
            let object = lower_boxed(ctx, object)?;
            let property = ctx.normalize(&name.text, name.span);
            Expression::PropertyAccess {
                object,
                property_name: Some(Box::new(Expression::identifier(property))),
            }
        }
        ExprKind::ElementAccess { object, index } => Expression::PropertyAccess {
            object: lower_boxed(ctx, object)?,
            property_name: lower_boxed(ctx, index)?,
        },
        ExprKind::Identifier { name } => Expression::identifier(ctx.normalize(name, expr.span)),
        ExprKind::New { ty, arguments } => Expression::New {
            class: lower_declared_type(ctx, ty.as_ref(), || "`new` expression".to_string(), expr.span)?,
            arguments: lower_list(ctx, arguments)?,
        },
        ExprKind::Conditional {
            condition,
            when_true,
            when_false,
        } => Expression::Conditional {
            condition: lower_boxed(ctx, condition)?,
            when_true: lower_boxed(ctx, when_true)?,
            when_false: lower_boxed(ctx, when_false)?,
        },
        ExprKind::StringLiteral { value } => Expression::literal(LiteralType::String, value.as_str()),
        ExprKind::NumericLiteral { text } => Expression::literal(LiteralType::Numeric, text.as_str()),
        ExprKind::BooleanLiteral { value } => {
            Expression::literal(LiteralType::Boolean, if *value { "true" } else { "false" })
        }
        ExprKind::NullLiteral => Expression::literal(LiteralType::Null, "null"),
        ExprKind::Parenthesized { expression } => Expression::Parenthesized {
            expression: lower_boxed(ctx, expression)?,
        },
        ExprKind::PrefixUnary { operator, operand } => Expression::Unary {
            unary_type: UnaryType::Prefix,
            operator: operator.clone(),
            operand: lower_boxed(ctx, operand)?,
        },
        ExprKind::PostfixUnary { operator, operand } => Expression::Unary {
            unary_type: UnaryType::Postfix,
            operator: operator.clone(),
            operand: lower_boxed(ctx, operand)?,
        },
        ExprKind::ArrayLiteral { elements } => Expression::ArrayLiteral {
            items: lower_list(ctx, elements)?,
        },
        ExprKind::This => Expression::identifier("this"),
        ExprKind::Super => Expression::identifier("super"),
        ExprKind::Spread { .. }
        | ExprKind::ArrowFunction
        | ExprKind::FunctionExpression
        | ExprKind::ObjectLiteral
        | ExprKind::TemplateLiteral
        | ExprKind::RegexLiteral
        | ExprKind::TypeAssertion { .. }
        | ExprKind::Await { .. }
        | ExprKind::TypeOf { .. }
        | ExprKind::Delete { .. }
        | ExprKind::Other { .. } => {
            ctx.report(
                DiagnosticKind::UnexpectedExpression,
                format!("Unexpected expression kind: {}", expr.kind),
                expr.span,
            );
            return Ok(None);
        }
    };

    Ok(Some(lowered))
}

fn lower_boxed(ctx: &mut LoweringContext<'_>, expr: &Expr) -> Result<Option<Box<Expression>>, LowerError> {
    Ok(lower_expression(ctx, Some(expr))?.map(Box::new))
}

fn lower_list(ctx: &mut LoweringContext<'_>, exprs: &[Expr]) -> Result<Vec<Option<Expression>>, LowerError> {
    exprs.iter().map(|expr| lower_expression(ctx, Some(expr))).collect()
}
