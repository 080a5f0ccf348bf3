//! Identifier normalization to `snake_case`

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use sl_span::FileSpan;

/// Word separator in normalized names
pub const SEPARATOR: char = '_';

/// Normalize an identifier to lowercase words joined by [`SEPARATOR`]
///
/// Uppercase ASCII letters start a new word. Lowercase letters, digits and
/// the separator are kept. Every other character is dropped and reported
/// once per occurrence. Normalizing a normalized name returns it unchanged.
pub fn normalize(name: &str, source: Option<FileSpan>, sink: &mut dyn DiagnosticSink) -> String {
    let mut normalized = String::with_capacity(name.len() + 4);

    for character in name.chars() {
        if character.is_ascii_uppercase() {
            if !normalized.is_empty() {
                normalized.push(SEPARATOR);
            }
            normalized.push(character.to_ascii_lowercase());
        } else if character.is_ascii_lowercase() || character.is_ascii_digit() || character == SEPARATOR {
            normalized.push(character);
        } else {
            sink.report(Diagnostic::new(
                DiagnosticKind::InvalidName,
                format!("Invalid character in name: {character:?} in `{name}`"),
                source,
            ));
        }
    }

    normalized
}
