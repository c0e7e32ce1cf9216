use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::pipeline::{
    DOC_ID_FIELD, PipelineConfig, SOURCE_FIELD, ValidationOutcome, ValidationReport,
    validate_and_clean,
};
use crate::util::{file_name_string, read_json_value, write_json_pretty};

pub fn run(args: ValidateArgs) -> Result<()> {
    let config = args.pipeline.to_config();

    info!(input = %args.input.display(), "reading raw record");
    let processed = process_file(&args.input, &args.output_dir, &config, args.dry_run)?;

    write_report_banner(processed.outcome.report())?;

    match &processed.output_path {
        Some(path) => info!(path = %path.display(), "saved validated record"),
        None if args.dry_run => info!("dry-run; validated record not written"),
        None => warn!(
            input = %args.input.display(),
            "validation failed with critical errors; output file not saved"
        ),
    }

    if let Some(report_path) = args.report_path.as_deref() {
        if args.dry_run {
            info!(path = %report_path.display(), "dry-run; report not written");
        } else {
            write_json_pretty(report_path, processed.outcome.report())?;
            info!(path = %report_path.display(), "wrote validation report");
        }
    }

    Ok(())
}

pub struct ProcessedFile {
    pub doc_id: Option<String>,
    pub output_path: Option<PathBuf>,
    pub outcome: ValidationOutcome,
}

pub fn process_file(
    input: &Path,
    output_dir: &Path,
    config: &PipelineConfig,
    dry_run: bool,
) -> Result<ProcessedFile> {
    let raw = read_json_value(input)?;
    process_record(input, &raw, output_dir, config, dry_run)
}

/// Runs the pipeline on an already decoded record and writes the cleaned
/// record to `output_dir` under the input's file name unless the report is
/// an error or `dry_run` is set.
pub fn process_record(
    input: &Path,
    raw: &Value,
    output_dir: &Path,
    config: &PipelineConfig,
    dry_run: bool,
) -> Result<ProcessedFile> {
    let source = source_filename(raw, input)?;
    let outcome = validate_and_clean(raw, &source, config);

    let doc_id = outcome
        .record()
        .get(DOC_ID_FIELD)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    let report = outcome.report();
    info!(
        input = %input.display(),
        source = %source,
        doc_id = %doc_id.as_deref().unwrap_or_default(),
        status = report.status.as_str(),
        warnings = report.warnings.len(),
        errors = report.errors.len(),
        "validated record"
    );

    let output_path = if outcome.is_persistable() && !dry_run {
        let path = output_dir.join(file_name_string(input)?);
        write_json_pretty(&path, outcome.record())?;
        Some(path)
    } else {
        None
    };

    Ok(ProcessedFile {
        doc_id,
        output_path,
        outcome,
    })
}

/// The record's own `source` names the original document; the input file
/// name is the fallback.
fn source_filename(raw: &Value, input: &Path) -> Result<String> {
    match raw.get(SOURCE_FIELD).and_then(Value::as_str) {
        Some(source) if !source.trim().is_empty() => Ok(source.to_string()),
        _ => file_name_string(input),
    }
}

fn write_report_banner(report: &ValidationReport) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "{} VALIDATION REPORT {}", "=".repeat(20), "=".repeat(20))?;
    serde_json::to_writer_pretty(&mut output, report)
        .context("failed to serialize validation report")?;
    writeln!(output)?;
    writeln!(output, "{}", "=".repeat(59))?;
    output.flush()?;
    Ok(())
}
