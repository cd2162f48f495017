//! Miette diagnostic wrapper for catalog JSON errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::fs::read_to_string;
use std::path::Path;

use miette::{miette, Diagnostic, NamedSource, Report, SourceSpan};
use phrasebook::LoadError;
use thiserror::Error;

/// A miette-compatible diagnostic for catalog syntax errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid catalog: {message}")]
#[diagnostic(code(phrasebook::json))]
pub struct CatalogDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl CatalogDiagnostic {
    /// Create a diagnostic pointing at a 1-based line and column.
    pub fn at(path: &Path, content: &str, line: usize, column: usize, message: String) -> Self {
        let offset = byte_offset(content, line, column);
        CatalogDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message,
            help: Some("catalog files hold a JSON object of phrases, plural objects and nested objects".into()),
        }
    }
}

/// Convert a load error into a report, with a source span when the error
/// is a JSON syntax error in a readable file.
pub fn load_error_report(err: LoadError) -> Report {
    if let (LoadError::Json { path, source }, Some((line, column))) = (&err, err.json_position()) {
        if line > 0 {
            if let Ok(content) = read_to_string(path) {
                return CatalogDiagnostic::at(path, &content, line, column, source.to_string()).into();
            }
        }
    }
    miette!("{err}")
}

/// Convert line:column to a byte offset, clamped to the content length.
///
/// Sum of (line_length + 1) for lines before the error line, plus column.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let offset = content
        .lines()
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + column.saturating_sub(1);
    offset.min(content.len().saturating_sub(1))
}
