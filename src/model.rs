use serde::{Deserialize, Serialize};

use crate::pipeline::ValidationStatus;

/// Status of one file in a directory run. `Unreadable` covers inputs that
/// never reached the pipeline.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Success,
    SuccessWithWarnings,
    Error,
    Unreadable,
}

impl From<ValidationStatus> for FileStatus {
    fn from(status: ValidationStatus) -> Self {
        match status {
            ValidationStatus::Success => Self::Success,
            ValidationStatus::SuccessWithWarnings => Self::SuccessWithWarnings,
            ValidationStatus::Error => Self::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileValidationEntry {
    pub input_path: String,
    pub doc_id: Option<String>,
    pub status: FileStatus,
    pub output_path: Option<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationCounts {
    pub files_total: usize,
    pub success: usize,
    pub success_with_warnings: usize,
    pub error: usize,
    pub unreadable: usize,
}

impl ValidationCounts {
    pub fn record(&mut self, status: FileStatus) {
        self.files_total += 1;
        match status {
            FileStatus::Success => self.success += 1,
            FileStatus::SuccessWithWarnings => self.success_with_warnings += 1,
            FileStatus::Error => self.error += 1,
            FileStatus::Unreadable => self.unreadable += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub input_directory: String,
    pub output_directory: String,
    pub dry_run: bool,
    pub counts: ValidationCounts,
    pub files: Vec<FileValidationEntry>,
}
