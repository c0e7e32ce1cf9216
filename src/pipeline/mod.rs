//! Validation and normalization of one extracted document record.
//!
//! The pipeline works on its own clone of the raw record and walks the
//! stages in a fixed order. Only the required-field gate can stop it early;
//! every other finding is accumulated in the [`ValidationReport`].

use serde_json::Value;
use tracing::debug;

mod clean;
mod dates;
mod identity;
mod report;
mod required_fields;
mod sections;
#[cfg(test)]
mod tests;

pub use identity::generate_doc_id;
pub use report::{ValidationReport, ValidationStatus};

use clean::trim_all_strings;
use dates::normalize_date_field;
use identity::assign_doc_id;
use required_fields::find_missing_required_field;
use sections::check_sections;

pub const DOC_ID_FIELD: &str = "doc_id";
pub const SOURCE_FIELD: &str = "source";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PipelineConfig {
    pub required_fields: Vec<String>,
    pub date_field: String,
    pub sections_field: String,
    pub heading_field: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            required_fields: vec!["title".to_string(), "sections".to_string()],
            date_field: "pbac_meeting_date".to_string(),
            sections_field: "sections".to_string(),
            heading_field: "heading".to_string(),
        }
    }
}

/// `Failed` is only produced by the required-field gate. A `Done` outcome
/// may still carry an error status, so persistence decisions go through
/// [`ValidationOutcome::is_persistable`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Done {
        record: Value,
        report: ValidationReport,
    },
    Failed {
        record: Value,
        report: ValidationReport,
    },
}

impl ValidationOutcome {
    pub fn record(&self) -> &Value {
        match self {
            Self::Done { record, .. } | Self::Failed { record, .. } => record,
        }
    }

    pub fn report(&self) -> &ValidationReport {
        match self {
            Self::Done { report, .. } | Self::Failed { report, .. } => report,
        }
    }

    pub fn is_persistable(&self) -> bool {
        !self.report().is_error()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Stage {
    Cleaning,
    Validating,
    Normalizing,
    Checking,
    Done,
    Failed,
}

pub fn validate_and_clean(
    raw: &Value,
    source_filename: &str,
    config: &PipelineConfig,
) -> ValidationOutcome {
    let mut record = raw.clone();
    let mut report = ValidationReport::default();
    let mut stage = Stage::Cleaning;

    loop {
        debug!(stage = ?stage, "entering pipeline stage");
        stage = match stage {
            Stage::Cleaning => {
                if let Some(doc_id) = assign_doc_id(&mut record, source_filename) {
                    debug!(doc_id = %doc_id, source = source_filename, "assigned doc id");
                }
                record = trim_all_strings(record);
                Stage::Validating
            }
            Stage::Validating => {
                match find_missing_required_field(
                    &record,
                    &config.required_fields,
                    &config.sections_field,
                ) {
                    Some(message) => {
                        report.errors.push(message);
                        Stage::Failed
                    }
                    None => Stage::Normalizing,
                }
            }
            Stage::Normalizing => {
                normalize_date_field(&mut record, &config.date_field, &mut report);
                Stage::Checking
            }
            Stage::Checking => {
                check_sections(
                    &record,
                    &config.sections_field,
                    &config.heading_field,
                    &mut report,
                );
                Stage::Done
            }
            Stage::Done => {
                report.finalize();
                return ValidationOutcome::Done { record, report };
            }
            Stage::Failed => {
                report.finalize();
                return ValidationOutcome::Failed { record, report };
            }
        };
    }
}
