//! Expression nodes

use crate::{Ident, ResolvedType};
use serde::{Deserialize, Serialize};
use sl_span::Span;
use std::fmt;

/// Expression node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    /// Source location
    #[serde(default)]
    pub span: Span,
    /// Node shape
    #[serde(flatten)]
    pub kind: ExprKind,
}

impl Expr {
    /// Create an expression node
    #[must_use]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Self { span, kind }
    }
}

/// Expression shapes produced by the front end
///
/// The set is closed: constructs the lowering does not support still get
/// their own variant so that handling them is a visible decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExprKind {
    /// `callee(arguments)`
    Call {
        /// Called expression
        callee: Box<Expr>,
        /// Arguments in order
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    /// `left operator right`, including assignments
    Binary {
        /// Left operand
        left: Box<Expr>,
        /// Operator token text
        operator: String,
        /// Right operand
        right: Box<Expr>,
    },
    /// `object.name`
    PropertyAccess {
        /// Accessed object
        object: Box<Expr>,
        /// Member name
        name: Ident,
    },
    /// `object[index]`
    ElementAccess {
        /// Accessed object
        object: Box<Expr>,
        /// Index expression
        index: Box<Expr>,
    },
    /// Identifier reference
    Identifier {
        /// Identifier text
        name: String,
    },
    /// `new Class(arguments)`
    New {
        /// Resolved type of the constructed instance
        #[serde(rename = "type", default)]
        ty: Option<ResolvedType>,
        /// Constructor arguments
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    /// `condition ? when_true : when_false`
    Conditional {
        /// Condition
        condition: Box<Expr>,
        /// Value when the condition holds
        when_true: Box<Expr>,
        /// Value otherwise
        when_false: Box<Expr>,
    },
    /// String literal
    StringLiteral {
        /// Unquoted content
        value: String,
    },
    /// Numeric literal
    NumericLiteral {
        /// Literal text as written
        text: String,
    },
    /// `true` or `false`
    BooleanLiteral {
        /// Literal value
        value: bool,
    },
    /// `null`
    NullLiteral,
    /// `(expression)`
    Parenthesized {
        /// Inner expression
        expression: Box<Expr>,
    },
    /// `operator operand`
    PrefixUnary {
        /// Operator token text
        operator: String,
        /// Operand
        operand: Box<Expr>,
    },
    /// `operand operator`
    PostfixUnary {
        /// Operator token text
        operator: String,
        /// Operand
        operand: Box<Expr>,
    },
    /// `[elements]`
    ArrayLiteral {
        /// Elements in order
        #[serde(default)]
        elements: Vec<Expr>,
    },
    /// `this`
    This,
    /// `super`
    Super,
    /// `...expression`
    Spread {
        /// Spread operand
        expression: Box<Expr>,
    },
    /// `(params) => body`
    ArrowFunction,
    /// `function (params) { ... }`
    FunctionExpression,
    /// `{ key: value }`
    ObjectLiteral,
    /// `` `text ${value}` ``
    TemplateLiteral,
    /// `/pattern/flags`
    RegexLiteral,
    /// `expression as T` or `<T>expression`
    TypeAssertion {
        /// Asserted expression
        expression: Box<Expr>,
    },
    /// `await expression`
    Await {
        /// Awaited expression
        expression: Box<Expr>,
    },
    /// `typeof expression`
    TypeOf {
        /// Operand
        expression: Box<Expr>,
    },
    /// `delete expression`
    Delete {
        /// Operand
        expression: Box<Expr>,
    },
    /// Construct the front end has no dedicated shape for
    Other {
        /// Name of the construct
        construct: String,
    },
}

impl fmt::Display for ExprKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Call { .. } => "call",
            Self::Binary { .. } => "binary",
            Self::PropertyAccess { .. } => "property_access",
            Self::ElementAccess { .. } => "element_access",
            Self::Identifier { .. } => "identifier",
            Self::New { .. } => "new",
            Self::Conditional { .. } => "conditional",
            Self::StringLiteral { .. } => "string_literal",
            Self::NumericLiteral { .. } => "numeric_literal",
            Self::BooleanLiteral { .. } => "boolean_literal",
            Self::NullLiteral => "null_literal",
            Self::Parenthesized { .. } => "parenthesized",
            Self::PrefixUnary { .. } => "prefix_unary",
            Self::PostfixUnary { .. } => "postfix_unary",
            Self::ArrayLiteral { .. } => "array_literal",
            Self::This => "this",
            Self::Super => "super",
            Self::Spread { .. } => "spread",
            Self::ArrowFunction => "arrow_function",
            Self::FunctionExpression => "function_expression",
            Self::ObjectLiteral => "object_literal",
            Self::TemplateLiteral => "template_literal",
            Self::RegexLiteral => "regex_literal",
            Self::TypeAssertion { .. } => "type_assertion",
            Self::Await { .. } => "await",
            Self::TypeOf { .. } => "typeof",
            Self::Delete { .. } => "delete",
            Self::Other { construct } => return write!(formatter, "{construct}"),
        };
        formatter.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_flattened_kind() {
        let json = r#"{
            "kind": "call",
            "span": { "start": 0, "end": 6 },
            "callee": { "kind": "identifier", "name": "log" },
            "arguments": [
                { "kind": "numeric_literal", "text": "1" },
                { "kind": "this" }
            ]
        }"#;
        let expr: Expr = serde_json::from_str(json).unwrap();
        assert_eq!(expr.span, Span::new(0, 6));

        let ExprKind::Call { callee, arguments } = expr.kind else {
            panic!("expected call");
        };
        assert_eq!(
            callee.kind,
            ExprKind::Identifier {
                name: "log".to_string()
            }
        );
        assert_eq!(arguments[1].kind, ExprKind::This);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ExprKind::ObjectLiteral.to_string(), "object_literal");
        assert_eq!(
            ExprKind::Other {
                construct: "yield".to_string()
            }
            .to_string(),
            "yield"
        );
    }
}
