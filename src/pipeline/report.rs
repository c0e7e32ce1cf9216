use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    #[default]
    Success,
    SuccessWithWarnings,
    Error,
}

impl ValidationStatus {
    pub fn from_findings(warnings: &[String], errors: &[String]) -> Self {
        if !errors.is_empty() {
            Self::Error
        } else if !warnings.is_empty() {
            Self::SuccessWithWarnings
        } else {
            Self::Success
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::SuccessWithWarnings => "success_with_warnings",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Recomputes `status` from the accumulated findings.
    pub fn finalize(&mut self) {
        self.status = ValidationStatus::from_findings(&self.warnings, &self.errors);
    }

    pub fn is_error(&self) -> bool {
        self.status == ValidationStatus::Error
    }
}
