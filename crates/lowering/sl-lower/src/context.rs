//! Lowering context threaded through every lowering function

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::LowerError;
use crate::names;
use sl_span::{FileSpan, Span};
use sl_syntax::SourceFile;

/// Context for lowering one source file
pub struct LoweringContext<'a> {
    /// File being lowered
    file: &'a SourceFile,
    /// Receiver of non-fatal diagnostics
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> LoweringContext<'a> {
    /// Create a context for `file`, reporting into `sink`
    pub fn new(file: &'a SourceFile, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { file, sink }
    }

    /// File being lowered
    #[must_use]
    pub const fn file(&self) -> &'a SourceFile {
        self.file
    }

    /// Create file span from a node span
    #[must_use]
    pub const fn file_span(&self, span: Span) -> FileSpan {
        self.file.file_span(span)
    }

    /// Report a diagnostic located at `span`
    pub fn report(&mut self, kind: DiagnosticKind, message: impl Into<String>, span: Span) {
        let source = Some(self.file_span(span));
        self.sink.report(Diagnostic::new(kind, message, source));
    }

    /// Normalize an identifier found at `span`
    pub fn normalize(&mut self, name: &str, span: Span) -> String {
        let source = Some(self.file_span(span));
        names::normalize(name, source, &mut *self.sink)
    }

    /// Exact source text covered by `span`
    ///
    /// # Errors
    ///
    /// Returns [`LowerError::SpanOutOfBounds`] when the span does not lie
    /// inside the source text.
    pub fn source_text(&self, span: Span) -> Result<String, LowerError> {
        self.file
            .text_at(span)
            .map(str::to_string)
            .ok_or_else(|| LowerError::SpanOutOfBounds {
                path: self.file.path.clone(),
                span: self.file_span(span),
                len: self.file.text.len(),
            })
    }
}
