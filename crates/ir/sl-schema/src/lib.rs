//! Neutral schema produced by lowering
//!
//! A [`SchemaFile`] describes the enums and classes of one source file in a
//! language-independent form. It is built once by the lowering pass and then
//! only read, typically after being serialized and handed to a code
//! generator. Field names serialize in camelCase and every tagged variant
//! carries an explicit discriminator (`type` for types, `kind` for
//! expressions and statements).

pub mod expr;
pub mod stmt;

pub use expr::{Expression, LiteralType, UnaryType};
pub use stmt::{Block, Statement, Variable};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema of one source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Enums keyed by normalized name
    pub enums: IndexMap<String, Enum>,
    /// Classes keyed by normalized name
    pub classes: IndexMap<String, Class>,
}

/// Enum definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    /// Members in declaration order
    pub values: Vec<EnumValue>,
}

/// Enum member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Normalized member name
    pub name: String,
}

/// Class definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Instance fields keyed by normalized name
    pub fields: IndexMap<String, Field>,
    /// Instance methods keyed by normalized name
    pub methods: IndexMap<String, Method>,
    /// First declared constructor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Constructor>,
}

/// Field accessibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Visible everywhere
    Public,
    /// Visible to subclasses
    Protected,
    /// Visible inside the class only
    Private,
}

/// Instance field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field type
    #[serde(rename = "type")]
    pub ty: Type,
    /// Accessibility
    pub visibility: Visibility,
    /// Initializer source text, unevaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Normalized parameter name
    pub name: String,
    /// Parameter type
    #[serde(rename = "type")]
    pub ty: Type,
}

/// Instance method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Parameters in order
    pub parameters: Vec<Parameter>,
    /// Return type
    pub returns: Type,
    /// Method body
    pub body: Block,
}

/// Constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    /// Parameters in order
    pub parameters: Vec<Parameter>,
    /// Constructor body
    pub body: Block,
}

/// Closed type vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Type {
    /// 32-bit signed integer
    Int32,
    /// Text
    String,
    /// Truth value
    Boolean,
    /// No value
    Void,
    /// Growable array
    #[serde(rename_all = "camelCase")]
    Array {
        /// Element type arguments
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        type_arguments: Vec<Type>,
    },
    /// Reference to a class
    #[serde(rename_all = "camelCase")]
    Class {
        /// Normalized class name
        class_name: String,
        /// Generic arguments
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        type_arguments: Vec<Type>,
    },
}

impl Type {
    /// A non-generic class reference
    #[must_use]
    pub fn class(class_name: impl Into<String>) -> Self {
        Self::Class {
            class_name: class_name.into(),
            type_arguments: Vec::new(),
        }
    }

    /// Generic arguments of an array or class type
    #[must_use]
    pub fn type_arguments(&self) -> &[Self] {
        match self {
            Self::Array { type_arguments } | Self::Class { type_arguments, .. } => type_arguments,
            Self::Int32 | Self::String | Self::Boolean | Self::Void => &[],
        }
    }
}
