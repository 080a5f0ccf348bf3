//! Resolved syntax tree for class-based source files
//!
//! The upstream parser and type checker hand over one [`SourceFile`] per
//! input. Every declaration already carries its resolved type and visibility,
//! so consumers never bind symbols themselves. The tree is plain data and
//! deserializes from JSON, which is how external front ends deliver it.

pub mod expr;
pub mod stmt;
pub mod ty;

pub use expr::{Expr, ExprKind};
pub use stmt::{Block, ForInitializer, Stmt, StmtKind, VariableDeclaration};
pub use ty::{ResolvedType, TypeName};

use serde::{Deserialize, Serialize};
use sl_span::{FileId, FileSpan, Span};

/// One resolved source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// File identifier used in source references
    #[serde(default)]
    pub id: FileId,
    /// Path the file was read from, for display only
    #[serde(default)]
    pub path: String,
    /// Full source text; spans index into it
    pub text: String,
    /// Top-level declarations in source order
    #[serde(default)]
    pub items: Vec<Item>,
}

impl SourceFile {
    /// Create a file with no items
    #[must_use]
    pub fn new(id: FileId, path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            text: text.into(),
            items: Vec::new(),
        }
    }

    /// Source text covered by `span`, if the span lies inside the file
    #[must_use]
    pub fn text_at(&self, span: Span) -> Option<&str> {
        if span.start > span.end {
            return None;
        }
        self.text.get(span.range())
    }

    /// Attach this file's ID to a span
    #[must_use]
    pub const fn file_span(&self, span: Span) -> FileSpan {
        FileSpan::new(self.id, span)
    }
}

/// An identifier as written in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    /// Identifier text
    pub text: String,
    /// Source location
    #[serde(default)]
    pub span: Span,
}

impl Ident {
    /// Create an identifier
    #[must_use]
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    /// Enum declaration
    Enum(EnumDecl),
    /// Class declaration
    Class(ClassDecl),
    /// Any other declaration (functions, interfaces, type aliases, ...)
    Other {
        /// Name of the construct, e.g. `interface`
        construct: String,
        /// Source location
        #[serde(default)]
        span: Span,
    },
}

/// Enum declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    /// Enum name
    pub name: Ident,
    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<EnumMemberDecl>,
    /// Source location
    #[serde(default)]
    pub span: Span,
}

/// Enum member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMemberDecl {
    /// Member name
    pub name: Ident,
    /// Explicit value, if any
    #[serde(default)]
    pub initializer: Option<Expr>,
}

/// Class declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Class name
    pub name: Ident,
    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<ClassMember>,
    /// Source location
    #[serde(default)]
    pub span: Span,
}

/// Class member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassMember {
    /// Property declaration
    Property(PropertyDecl),
    /// Method declaration
    Method(MethodDecl),
    /// Constructor declaration
    Constructor(ConstructorDecl),
    /// Accessors, index signatures and other members
    Other {
        /// Name of the construct, e.g. `get_accessor`
        construct: String,
        /// Source location
        #[serde(default)]
        span: Span,
    },
}

/// Declared accessibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
}

/// Modifiers on members and parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Explicit accessibility modifier
    pub visibility: Option<Visibility>,
    /// `static`
    pub is_static: bool,
    /// `readonly`
    pub readonly: bool,
}

/// Property declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDecl {
    /// Property name
    pub name: Ident,
    /// Resolved property type
    #[serde(rename = "type", default)]
    pub ty: Option<ResolvedType>,
    /// Modifiers
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Initializer expression
    #[serde(default)]
    pub initializer: Option<Expr>,
    /// Source location
    #[serde(default)]
    pub span: Span,
}

/// Parameter of a method or constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    /// Parameter name
    pub name: Ident,
    /// Resolved parameter type
    #[serde(rename = "type", default)]
    pub ty: Option<ResolvedType>,
    /// Modifiers; an accessibility or `readonly` modifier promotes the
    /// parameter to a field
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Source location
    #[serde(default)]
    pub span: Span,
}

impl ParamDecl {
    /// Whether the parameter also declares a field
    #[must_use]
    pub const fn is_promoted(&self) -> bool {
        self.modifiers.visibility.is_some() || self.modifiers.readonly
    }
}

/// Method declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Method name
    pub name: Ident,
    /// Parameters in order
    #[serde(default)]
    pub parameters: Vec<ParamDecl>,
    /// Resolved return type
    #[serde(default)]
    pub return_type: Option<ResolvedType>,
    /// Modifiers
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Method body
    #[serde(default)]
    pub body: Option<Block>,
    /// Source location
    #[serde(default)]
    pub span: Span,
}

/// Constructor declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    /// Parameters in order
    #[serde(default)]
    pub parameters: Vec<ParamDecl>,
    /// Constructor body
    #[serde(default)]
    pub body: Option<Block>,
    /// Source location
    #[serde(default)]
    pub span: Span,
}
