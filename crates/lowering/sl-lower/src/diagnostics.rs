//! Non-fatal diagnostics collected during lowering

use serde::{Deserialize, Serialize};
use sl_span::FileSpan;
use std::fmt;

/// Category of a lowering diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Identifier contained characters outside the allowed set
    InvalidName,
    /// Expression shape outside the supported grammar
    UnexpectedExpression,
    /// Statement shape outside the supported grammar
    UnexpectedStatement,
    /// Loop initializer that is not a single variable declaration
    UnsupportedLoopInitializer,
    /// Constructor after the first one
    MultipleConstructors,
}

impl DiagnosticKind {
    /// Stable code used in reports
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidName => "invalid-name",
            Self::UnexpectedExpression => "unexpected-expression",
            Self::UnexpectedStatement => "unexpected-statement",
            Self::UnsupportedLoopInitializer => "unsupported-loop-initializer",
            Self::MultipleConstructors => "multiple-constructors",
        }
    }
}

/// A lowering diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Category
    pub kind: DiagnosticKind,
    /// Human-readable message
    pub message: String,
    /// Source location, when known
    pub source: Option<FileSpan>,
}

impl Diagnostic {
    /// Create a diagnostic
    #[must_use]
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, source: Option<FileSpan>) -> Self {
        Self {
            kind,
            message: message.into(),
            source,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Some(source) => write!(formatter, "{} ({})", self.message, source),
            None => formatter.write_str(&self.message),
        }
    }
}

/// Receiver of lowering diagnostics
pub trait DiagnosticSink {
    /// Record a diagnostic
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Append-only diagnostic collector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected diagnostics in report order
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of collected diagnostics
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether nothing was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics of one kind
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.kind == kind)
            .count()
    }

    /// Take all diagnostics
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(code = diagnostic.kind.code(), "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }
}
