//! Implementation of `jsoncmp compare <expected> <actual>`.
//!
//! Loads both documents (plus optional config, weights, and ignore-rules
//! files), runs the scored comparison, and writes the result to stdout.
//!
//! Exit codes:
//! - 0 = the documents match
//! - 1 = differences found
//! - 2 = an input file could not be read or parsed

use std::path::{Path, PathBuf};

use jsoncmp_core::{Compare, Config, DiffReport, Value, WeightSpec, diff_to_json, render};

use crate::OutputFormat;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `compare` command.
///
/// # Errors
///
/// - [`CliError::ReadFailed`] / [`CliError::ParseFailed`] — an argument file
///   is unreadable or not valid JSON.
/// - [`CliError::InvalidWeights`] — the weight specification is malformed.
/// - [`CliError::ReportWriteFailed`] — the configured report file could not
///   be written.
/// - [`CliError::DifferencesFound`] — the comparison found differences.
pub fn run(
    expected_path: &Path,
    actual_path: &Path,
    config_path: Option<&PathBuf>,
    weights_path: Option<&PathBuf>,
    rules_path: Option<&PathBuf>,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let expected = load_value(expected_path)?;
    let actual = load_value(actual_path)?;

    let config = match config_path {
        Some(path) => Config::from_value(&load_value(path)?),
        None => Config::default(),
    };
    let weights = match weights_path {
        Some(path) => WeightSpec::from_value(&load_value(path)?)
            .map_err(|e| CliError::InvalidWeights {
                detail: e.to_string(),
            })?,
        None => WeightSpec::EMPTY,
    };
    let rules = match rules_path {
        Some(path) => load_value(path)?,
        None => Value::Object(Default::default()),
    };

    let engine = Compare::with_config(config).rules(rules).weights(weights);
    let report = engine.score(&expected, &actual);

    // Honor the config's file output before printing anything.
    jsoncmp_core::write_file(&report.diff, &engine.config().output.file).map_err(|e| {
        CliError::ReportWriteFailed {
            detail: e.to_string(),
        }
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => write_human(&mut out, &report, engine.config()),
        OutputFormat::Json => write_json(&mut out, &report),
    }
    .map_err(|e| CliError::IoError {
        detail: e.to_string(),
    })?;

    if report.is_match() {
        Ok(())
    } else {
        Err(CliError::DifferencesFound)
    }
}

fn load_value(path: &Path) -> Result<Value, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::ReadFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let json: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| CliError::ParseFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
    Ok(Value::from(json))
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Writes the human-readable summary: metrics first, then warnings, then the
/// rendered diff when the config asks for console output.
fn write_human<W: std::io::Write>(
    w: &mut W,
    report: &DiffReport,
    config: &Config,
) -> std::io::Result<()> {
    writeln!(w, "similarity: {:.4}", report.similarity)?;
    writeln!(
        w,
        "failed: {} of {} attributes (weighted {:.2} of {:.2})",
        report.failed, report.count, report.weighted_failed, report.weighted_count
    )?;
    for warning in &report.warnings {
        writeln!(w, "warning: {warning}")?;
    }
    if config.output.console && !report.diff.is_empty() {
        writeln!(w, "{}", render(&report.diff, config.output.file.indent))?;
    }
    Ok(())
}

/// Writes the full report as a single JSON object.
fn write_json<W: std::io::Write>(w: &mut W, report: &DiffReport) -> std::io::Result<()> {
    let json = serde_json::json!({
        "similarity": report.similarity,
        "count": report.count,
        "failed": report.failed,
        "weighted_count": report.weighted_count,
        "weighted_failed": report.weighted_failed,
        "warnings": report.warnings,
        "diff": diff_to_json(&report.diff),
    });
    writeln!(w, "{json:#}")
}
