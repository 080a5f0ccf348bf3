//! Schema statements

use crate::Expression;
use serde::{Deserialize, Serialize};

/// Statement list; every branch and loop body is one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Statements in order
    pub statements: Vec<Statement>,
}

impl Block {
    /// Create a block
    #[must_use]
    pub const fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// Local variable declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Normalized variable name
    pub variable_name: String,
    /// Initial value
    pub initializer: Option<Expression>,
}

impl Variable {
    /// Declaration without initializer
    #[must_use]
    pub fn named(variable_name: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            initializer: None,
        }
    }
}

/// Statement tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Statement {
    /// Conditional branch
    If {
        /// Condition
        condition: Option<Expression>,
        /// Taken branch
        #[serde(rename = "then")]
        then_block: Block,
        /// Alternative branch
        #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
        else_block: Option<Block>,
    },
    /// Return, with or without value
    Return {
        /// Returned value
        expression: Option<Expression>,
    },
    /// Throw
    Throw {
        /// Thrown value
        expression: Option<Expression>,
    },
    /// Expression evaluated for its effect
    ExpressionStatement {
        /// Evaluated expression
        expression: Option<Expression>,
    },
    /// Local variable declaration
    Variable(Variable),
    /// Pre-tested loop
    While {
        /// Loop condition
        condition: Option<Expression>,
        /// Loop body
        body: Block,
    },
    /// Iteration over a collection
    #[serde(rename_all = "camelCase")]
    Foreach {
        /// Per-item variable, absent when the loop header names none
        item_variable: Option<Variable>,
        /// Iterated collection
        items: Option<Expression>,
        /// Loop body
        body: Block,
    },
    /// Counting loop
    #[serde(rename_all = "camelCase")]
    For {
        /// Loop variable
        item_variable: Option<Variable>,
        /// Loop condition
        condition: Option<Expression>,
        /// Step expression
        incrementor: Option<Expression>,
        /// Loop body
        body: Block,
    },
}
