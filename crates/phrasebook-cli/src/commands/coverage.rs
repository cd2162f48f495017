//! Coverage command implementation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::Args;
use miette::{IntoDiagnostic, Result};
use phrasebook::{Engine, Tree};
use serde::Serialize;

use crate::catalog::{compute_suggestions, flatten};
use crate::output::load_error_report;
use crate::output::table::{format_coverage_table, LocaleCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Source locale catalog (e.g., en.json).
    #[arg(long)]
    pub source: PathBuf,

    /// Locales to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Directory containing translation files. Defaults to source file directory.
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Separator used to join nested keys.
    #[arg(long, default_value = ".")]
    pub separator: String,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    locale: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
    unknown: Vec<UnknownJson>,
}

#[derive(Debug, Serialize)]
struct UnknownJson {
    key: String,
    suggestions: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let source_tree = load_tree(&args.source)?;
    let source_keys = translated_keys(&source_tree, &args.separator);
    let source_count = source_keys.len();

    // Determine base directory for translation files
    let base_dir = args
        .translations
        .clone()
        .or_else(|| args.source.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut coverage_data: Vec<LocaleCoverage> = Vec::new();
    for locale in &args.lang {
        let locale_file = base_dir.join(format!("{locale}.json"));
        let keys = if locale_file.exists() {
            translated_keys(&load_tree(&locale_file)?, &args.separator)
        } else {
            // File doesn't exist - all phrases are missing
            BTreeSet::new()
        };
        coverage_data.push(compare(locale, &source_keys, &keys));
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                locale: c.locale.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
                unknown: c
                    .unknown
                    .iter()
                    .map(|(key, suggestions)| UnknownJson {
                        key: key.clone(),
                        suggestions: suggestions.clone(),
                    })
                    .collect(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{table}");

        for entry in &coverage_data {
            if !entry.missing.is_empty() {
                println!("\nMissing in {}:", entry.locale);
                for key in &entry.missing {
                    println!("  - {key}");
                }
            }
            if !entry.unknown.is_empty() {
                println!("\nUnknown in {}:", entry.locale);
                for (key, suggestions) in &entry.unknown {
                    if suggestions.is_empty() {
                        println!("  - {key}");
                    } else {
                        println!("  - {key} (did you mean {}?)", suggestions.join(", "));
                    }
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn load_tree(path: &Path) -> Result<Tree> {
    let mut engine = Engine::new();
    engine
        .load_locale_file("coverage", path)
        .map_err(load_error_report)?;
    Ok(engine.catalog(Some("coverage")).cloned().unwrap_or_default())
}

/// Flattened keys whose phrase is non-empty.
fn translated_keys(tree: &Tree, separator: &str) -> BTreeSet<String> {
    flatten(tree, separator)
        .into_iter()
        .filter(|entry| entry.node.is_present())
        .map(|entry| entry.key)
        .collect()
}

/// Compare a locale's keys with the source keys.
fn compare(locale: &str, source: &BTreeSet<String>, keys: &BTreeSet<String>) -> LocaleCoverage {
    let missing: Vec<String> = source.difference(keys).cloned().collect();
    let unknown = keys
        .difference(source)
        .map(|key| (key.clone(), compute_suggestions(key, source.iter())))
        .collect();
    LocaleCoverage {
        locale: locale.to_string(),
        translated: source.intersection(keys).count(),
        missing,
        unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn compare_reports_missing_and_unknown() {
        let source = keys(&["menu.open", "menu.quit", "title"]);
        let translated = keys(&["menu.open", "titel"]);
        let coverage = compare("de", &source, &translated);

        assert_eq!(coverage.translated, 1);
        assert_eq!(coverage.missing, vec!["menu.quit", "title"]);
        assert_eq!(
            coverage.unknown,
            vec![("titel".to_string(), vec!["title".to_string()])]
        );
    }

    #[test]
    fn empty_phrases_are_untranslated() {
        let tree: Tree = serde_json::from_str(r#"{ "a": "A", "b": "", "c": { "d": "D" } }"#).unwrap();
        assert_eq!(translated_keys(&tree, "."), keys(&["a", "c.d"]));
    }
}
