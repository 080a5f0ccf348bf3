//! Fatal lowering errors
//!
//! These mean the input tree broke its contract (it is not fully resolved),
//! so lowering of the file stops. Recoverable problems go to the diagnostic
//! sink instead.

use miette::Diagnostic;
use sl_span::FileSpan;
use thiserror::Error;

/// Precondition violation in the input tree
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LowerError {
    /// A declaration or `new` expression carries no resolved type
    #[error("missing type information for {owner} at {span}")]
    #[diagnostic(
        code(lower::missing_type),
        help("the front end must attach a resolved type to every declaration")
    )]
    MissingType {
        /// What the type belongs to
        owner: String,
        /// Location of the owner
        span: FileSpan,
    },

    /// A method or constructor has no body
    #[error("missing body for {owner} at {span}")]
    #[diagnostic(
        code(lower::missing_body),
        help("abstract and overload-only declarations are not supported")
    )]
    MissingBody {
        /// Method or constructor description
        owner: String,
        /// Location of the declaration
        span: FileSpan,
    },

    /// A span points outside the file's source text
    #[error("span {span} is outside the {len} bytes of source text in `{path}`")]
    #[diagnostic(code(lower::span_out_of_bounds))]
    SpanOutOfBounds {
        /// File path as given in the tree
        path: String,
        /// Offending span
        span: FileSpan,
        /// Length of the source text
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_span::{FileId, Span};

    #[test]
    fn test_error_messages() {
        let span = FileSpan::new(FileId(0), Span::new(4, 8));

        let missing = LowerError::MissingType {
            owner: "field `count`".to_string(),
            span,
        };
        assert_eq!(missing.to_string(), "missing type information for field `count` at file 0@4..8");

        let body = LowerError::MissingBody {
            owner: "method `run`".to_string(),
            span,
        };
        assert_eq!(body.to_string(), "missing body for method `run` at file 0@4..8");
        assert_eq!(
            body.code().map(|code| code.to_string()),
            Some("lower::missing_body".to_string())
        );
    }
}
