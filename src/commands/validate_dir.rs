use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::ValidateDirArgs;
use crate::commands::validate::process_record;
use crate::model::{FileStatus, FileValidationEntry, ValidationCounts, ValidationRunManifest};
use crate::pipeline::PipelineConfig;
use crate::util::{now_utc_string, read_json_value, utc_compact_string, write_json_pretty};

pub fn run(args: ValidateDirArgs) -> Result<()> {
    let started_ts = Utc::now();
    let run_id = format!("run-{}", utc_compact_string(started_ts));
    let config = args.pipeline.to_config();

    info!(
        input_dir = %args.input_dir.display(),
        output_dir = %args.output_dir.display(),
        run_id = %run_id,
        "starting directory validation"
    );

    let manifest = build_manifest(
        &args.input_dir,
        &args.output_dir,
        &config,
        &run_id,
        args.dry_run,
    )?;

    info!(
        files_total = manifest.counts.files_total,
        success = manifest.counts.success,
        success_with_warnings = manifest.counts.success_with_warnings,
        error = manifest.counts.error,
        unreadable = manifest.counts.unreadable,
        "directory validation complete"
    );

    if args.dry_run {
        info!("dry-run; run manifest not written");
        return Ok(());
    }

    let manifest_path = args.manifest_path.unwrap_or_else(|| {
        args.output_dir.join(format!(
            "validation_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote validation run manifest");

    Ok(())
}

pub fn build_manifest(
    input_dir: &Path,
    output_dir: &Path,
    config: &PipelineConfig,
    run_id: &str,
    dry_run: bool,
) -> Result<ValidationRunManifest> {
    let mut json_paths = discover_json_files(input_dir)?;
    json_paths.sort();

    if json_paths.is_empty() {
        bail!("no JSON files found in {}", input_dir.display());
    }

    let mut counts = ValidationCounts::default();
    let mut files = Vec::with_capacity(json_paths.len());

    for path in json_paths {
        let entry = match read_json_value(&path) {
            Ok(raw) => {
                let processed = process_record(&path, &raw, output_dir, config, dry_run)?;
                let report = processed.outcome.report();
                FileValidationEntry {
                    input_path: path.display().to_string(),
                    doc_id: processed.doc_id.clone(),
                    status: report.status.into(),
                    output_path: processed
                        .output_path
                        .as_ref()
                        .map(|output| output.display().to_string()),
                    warnings: report.warnings.clone(),
                    errors: report.errors.clone(),
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable record");
                FileValidationEntry {
                    input_path: path.display().to_string(),
                    doc_id: None,
                    status: FileStatus::Unreadable,
                    output_path: None,
                    warnings: Vec::new(),
                    errors: err.chain().map(|cause| cause.to_string()).collect(),
                }
            }
        };

        counts.record(entry.status);
        files.push(entry);
    }

    Ok(ValidationRunManifest {
        manifest_version: 1,
        run_id: run_id.to_string(),
        generated_at: now_utc_string(),
        input_directory: input_dir.display().to_string(),
        output_directory: output_dir.display().to_string(),
        dry_run,
        counts,
        files,
    })
}

fn discover_json_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read {}", input_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", input_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            paths.push(path);
        }
    }

    Ok(paths)
}
