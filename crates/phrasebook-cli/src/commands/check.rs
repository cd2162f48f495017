//! Implementation of the `phrasebook check` command.

use std::path::{Path, PathBuf};

use miette::IntoDiagnostic;
use owo_colors::{OwoColorize, Stream};
use phrasebook::interval::validate_segment;
use phrasebook::{Engine, LoadError, Node, Tree};
use serde::Serialize;

use crate::catalog::flatten;
use crate::output::load_error_report;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Catalog files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Separator used to report nested keys
    #[arg(long, default_value = ".")]
    pub separator: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// A problem found in one phrase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub key: String,
    pub message: String,
}

/// JSON output for one checked file.
#[derive(Serialize)]
struct FileReport {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    issues: Vec<Issue>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::with_capacity(args.files.len());
    let mut all_valid = true;

    for path in &args.files {
        let report = match load(path) {
            Ok(tree) => {
                let issues = check_tree(&tree, &args.separator);
                FileReport {
                    file: path.display().to_string(),
                    valid: issues.is_empty(),
                    error: None,
                    issues,
                }
            }
            Err(err) => {
                let message = err.to_string();
                if !args.json {
                    eprintln!("{:?}", load_error_report(err));
                }
                FileReport {
                    file: path.display().to_string(),
                    valid: false,
                    error: Some(message),
                    issues: Vec::new(),
                }
            }
        };
        all_valid &= report.valid;
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    } else {
        for report in &reports {
            if report.valid {
                println!("{} {}", "✓".if_supports_color(Stream::Stdout, |t| t.green()), report.file);
            } else {
                println!("{} {}", "✗".if_supports_color(Stream::Stdout, |t| t.red()), report.file);
                for issue in &report.issues {
                    println!(
                        "  {}: {}",
                        issue.key.if_supports_color(Stream::Stdout, |t| t.bold()),
                        issue.message
                    );
                }
            }
        }
    }

    if all_valid {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}

fn load(path: &Path) -> Result<Tree, LoadError> {
    let mut engine = Engine::new();
    engine.load_locale_file("check", path)?;
    Ok(engine.catalog(Some("check")).cloned().unwrap_or_default())
}

/// Find malformed interval prefixes and plural values without an `other`
/// form.
pub fn check_tree(tree: &Tree, separator: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    for entry in flatten(tree, separator) {
        match entry.node {
            Node::Text(text) => check_text(&entry.key, text, &mut issues),
            Node::Map(forms) if entry.node.is_plural() => {
                if !forms.contains_key("other") {
                    issues.push(Issue {
                        key: entry.key.clone(),
                        message: "plural value has no 'other' form".to_string(),
                    });
                }
                for text in forms.values().filter_map(Node::as_text) {
                    check_text(&entry.key, text, &mut issues);
                }
            }
            Node::Map(_) => {}
        }
    }
    issues
}

/// Report segments of a `|` phrase that open with a bracket but do not
/// start with a well-formed interval.
fn check_text(key: &str, text: &str, issues: &mut Vec<Issue>) {
    if !text.contains('|') {
        return;
    }
    for segment in text.split('|') {
        if let Err(err) = validate_segment(segment) {
            issues.push(Issue {
                key: key.to_string(),
                message: err.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn tree(json: &str) -> Tree {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn valid_catalog_has_no_issues() {
        let tree = tree(
            r#"{
                "cats": "[0] no cats|[1] one cat|[2,] %s cats",
                "dog": { "one": "%s dog", "other": "%s dogs" },
                "menu": { "open": "Open" }
            }"#,
        );
        assert!(check_tree(&tree, ".").is_empty());
    }

    #[test]
    fn malformed_interval_is_reported() {
        let tree = tree(r#"{ "menu": { "cats": "[0 no cats|many" } }"#);
        let issues = check_tree(&tree, ".");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "menu.cats");
    }

    #[test]
    fn bracket_text_without_pipe_is_ignored() {
        let tree = tree(r#"{ "draft": "[Draft] title" }"#);
        assert!(check_tree(&tree, ".").is_empty());
    }

    #[test]
    fn load_reports_json_errors() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("en.json");
        let bad = dir.path().join("de.json");
        fs::write(&good, r#"{ "Hello": "Hello" }"#).unwrap();
        fs::write(&bad, "{ \"Hello\": }").unwrap();

        assert_eq!(load(&good).unwrap().len(), 1);
        assert!(matches!(load(&bad), Err(LoadError::Json { .. })));
    }

    #[test]
    fn plural_without_other_is_reported() {
        let tree = tree(r#"{ "cat": { "one": "cat", "few": "cats" } }"#);
        let issues = check_tree(&tree, ".");
        assert_eq!(
            issues,
            vec![Issue {
                key: "cat".to_string(),
                message: "plural value has no 'other' form".to_string(),
            }]
        );
    }
}
