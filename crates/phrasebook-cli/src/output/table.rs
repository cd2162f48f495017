//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Coverage data for a single locale.
pub struct LocaleCoverage {
    /// Locale code (e.g., "es", "fr").
    pub locale: String,
    /// Number of source keys translated.
    pub translated: usize,
    /// Source keys with no translation.
    pub missing: Vec<String>,
    /// Keys that are not in the source, with typo suggestions.
    pub unknown: Vec<(String, Vec<String>)>,
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LocaleCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Locale", "Coverage", "Missing", "Unknown"]);

    for entry in coverage {
        table.add_row(vec![
            entry.locale.clone(),
            format!("{}/{}", entry.translated, source_count),
            entry.missing.len().to_string(),
            entry.unknown.len().to_string(),
        ]);
    }

    table
}
