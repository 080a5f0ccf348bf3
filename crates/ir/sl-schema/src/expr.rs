//! Schema expressions
//!
//! Child slots are optional: a child that could not be lowered is kept as
//! `None` (`null` when serialized) so that its siblings stay in place.

use crate::Type;
use serde::{Deserialize, Serialize};

/// Kind of literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralType {
    /// Quoted text
    String,
    /// Number as written in the source
    Numeric,
    /// `true` or `false`
    Boolean,
    /// `null`
    Null,
}

/// Position of a unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryType {
    /// `-x`, `!x`, `++x`
    Prefix,
    /// `x++`, `x--`
    Postfix,
}

/// Expression tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Expression {
    /// Invocation of `method` with `arguments`
    Call {
        /// Invoked expression
        method: Option<Box<Expression>>,
        /// Arguments in order
        arguments: Vec<Option<Expression>>,
    },
    /// Binary operation, including assignment
    Binary {
        /// Left operand
        left: Option<Box<Expression>>,
        /// Right operand
        right: Option<Box<Expression>>,
        /// Operator token text
        operator: String,
    },
    /// Member or index access
    #[serde(rename_all = "camelCase")]
    PropertyAccess {
        /// Accessed object
        object: Option<Box<Expression>>,
        /// Member name or index expression
        property_name: Option<Box<Expression>>,
    },
    /// Name reference, including `this` and `super`
    Identifier {
        /// Normalized name
        text: String,
    },
    /// Instance creation
    New {
        /// Instantiated type
        class: Type,
        /// Constructor arguments
        arguments: Vec<Option<Expression>>,
    },
    /// Ternary conditional
    #[serde(rename_all = "camelCase")]
    Conditional {
        /// Condition
        condition: Option<Box<Expression>>,
        /// Value when the condition holds
        when_true: Option<Box<Expression>>,
        /// Value otherwise
        when_false: Option<Box<Expression>>,
    },
    /// Literal value
    #[serde(rename_all = "camelCase")]
    Literal {
        /// Kind of literal
        literal_type: LiteralType,
        /// Literal text
        value: String,
    },
    /// Explicit grouping
    Parenthesized {
        /// Grouped expression
        expression: Option<Box<Expression>>,
    },
    /// Unary operation
    #[serde(rename_all = "camelCase")]
    Unary {
        /// Operator position
        unary_type: UnaryType,
        /// Operator token text
        operator: String,
        /// Operand
        operand: Option<Box<Expression>>,
    },
    /// Array literal
    ArrayLiteral {
        /// Elements in order
        items: Vec<Option<Expression>>,
    },
}

impl Expression {
    /// Identifier with the given text
    #[must_use]
    pub fn identifier(text: impl Into<String>) -> Self {
        Self::Identifier { text: text.into() }
    }

    /// Literal of the given kind
    #[must_use]
    pub fn literal(literal_type: LiteralType, value: impl Into<String>) -> Self {
        Self::Literal {
            literal_type,
            value: value.into(),
        }
    }

    /// Member or index access
    #[must_use]
    pub fn property_access(object: Self, property_name: Self) -> Self {
        Self::PropertyAccess {
            object: Some(Box::new(object)),
            property_name: Some(Box::new(property_name)),
        }
    }

    /// Binary operation
    #[must_use]
    pub fn binary(left: Self, operator: impl Into<String>, right: Self) -> Self {
        Self::Binary {
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
            operator: operator.into(),
        }
    }
}
