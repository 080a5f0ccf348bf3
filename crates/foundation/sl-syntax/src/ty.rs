//! Resolved type descriptors

use serde::{Deserialize, Serialize};

/// Name of a resolved type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeName {
    /// Built-in type known to the checker (`number`, `string`, `void`, ...)
    Intrinsic(String),
    /// Declared type, named by its symbol (`Array`, `Map`, user classes)
    Symbol(String),
}

/// A type as resolved by the upstream checker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedType {
    /// Canonical name
    pub name: TypeName,
    /// Generic arguments in declared order
    #[serde(default)]
    pub type_arguments: Vec<ResolvedType>,
}

impl ResolvedType {
    /// An intrinsic type without arguments
    #[must_use]
    pub fn intrinsic(name: impl Into<String>) -> Self {
        Self {
            name: TypeName::Intrinsic(name.into()),
            type_arguments: Vec::new(),
        }
    }

    /// A declared type without arguments
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self {
            name: TypeName::Symbol(name.into()),
            type_arguments: Vec::new(),
        }
    }

    /// A declared generic type
    #[must_use]
    pub fn generic(name: impl Into<String>, type_arguments: Vec<Self>) -> Self {
        Self {
            name: TypeName::Symbol(name.into()),
            type_arguments,
        }
    }

    /// Intrinsic name for built-in types, symbol name otherwise
    #[must_use]
    pub fn canonical_name(&self) -> &str {
        match &self.name {
            TypeName::Intrinsic(name) | TypeName::Symbol(name) => name,
        }
    }
}
