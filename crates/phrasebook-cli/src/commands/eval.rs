//! Implementation of the `phrasebook eval` command.

use std::path::PathBuf;

use miette::{miette, IntoDiagnostic};
use phrasebook::{Engine, EngineConfig, NamedValues, ObjectNotation, PhraseRequest, PluralRequest, Value};
use serde::Serialize;
use tracing::info;

use crate::catalog::{parse_key_val, parse_value};
use crate::output::load_error_report;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Phrase key, or the singular key of a plural phrase
    pub phrase: String,

    /// Directory holding one <locale>.json catalog per locale
    #[arg(long)]
    pub catalogs: Option<PathBuf>,

    /// Engine configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Locale to translate into (defaults to the configured default locale)
    #[arg(long)]
    pub locale: Option<String>,

    /// Plural key; selects plural translation
    #[arg(long)]
    pub plural: Option<String>,

    /// Count for plural selection and substitution; selects plural translation
    #[arg(short = 'n', long)]
    pub count: Option<String>,

    /// Enable nested keys: "true" for ".", or a custom separator
    #[arg(long)]
    pub object_notation: Option<String>,

    /// Named values in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Positional values for % placeholders (repeatable)
    #[arg(long = "arg")]
    pub args: Vec<String>,

    /// Write catalogs back, including phrases seeded by this lookup
    #[arg(long, requires = "catalogs")]
    pub update: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub locale: String,
    pub result: String,
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let mut engine = build_engine(&args)?;

    let named: NamedValues = args
        .params
        .iter()
        .map(|(k, v)| (k.clone(), parse_value(v)))
        .collect();
    let params: Vec<Value> = args.args.iter().map(|v| parse_value(v)).collect();

    let result = if args.plural.is_some() || args.count.is_some() {
        let request = PluralRequest::builder()
            .singular(args.phrase.clone())
            .maybe_plural(args.plural.clone())
            .maybe_count(args.count.as_deref().map(parse_value))
            .maybe_locale(args.locale.clone())
            .named(named)
            .params(params)
            .build();
        engine.translate_plural(&request)
    } else {
        let request = PhraseRequest::builder()
            .phrase(args.phrase.clone())
            .maybe_locale(args.locale.clone())
            .named(named)
            .params(params)
            .build();
        engine.translate_phrase(&request)
    };
    let locale = engine.resolve_locale(args.locale.as_deref());

    if args.update {
        for code in engine.locales() {
            let path = engine.save_locale(&code).map_err(load_error_report)?;
            info!(locale = %code, path = %path.display(), "catalog updated");
        }
    }

    if args.json {
        let output = EvalResult { locale, result };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", result);
    }
    Ok(exitcode::OK)
}

/// Build an engine from the configuration file, catalog directory and
/// object-notation flag, in that order.
fn build_engine(args: &EvalArgs) -> miette::Result<Engine> {
    let mut engine = match &args.config {
        Some(path) => Engine::from_config(EngineConfig::from_path(path).map_err(load_error_report)?),
        None => Engine::new(),
    };

    if let Some(dir) = &args.catalogs {
        let locales = engine.load_catalog_dir(dir).map_err(load_error_report)?;
        if locales.is_empty() {
            return Err(miette!("no .json catalogs found in {}", dir.display()));
        }
        if args.config.is_none() && !locales.iter().any(|l| l == engine.locale()) {
            engine.set_locale(&locales[0]);
        }
    }

    if let Some(notation) = &args.object_notation {
        let notation = match notation.as_str() {
            "true" => ObjectNotation::Enabled(true),
            "false" => ObjectNotation::Enabled(false),
            separator => ObjectNotation::from(separator),
        };
        engine.set_object_notation(notation.separator());
    }

    Ok(engine)
}
