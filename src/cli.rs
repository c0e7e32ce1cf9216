use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::pipeline::PipelineConfig;

#[derive(Parser, Debug)]
#[command(
    name = "docvalidate",
    version,
    about = "Validate and normalize extracted document records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and clean a single extracted JSON record.
    Validate(ValidateArgs),
    /// Validate every JSON record in a directory and write a run manifest.
    ValidateDir(ValidateDirArgs),
    /// Print the document id derived from one or more source filenames.
    DocId(DocIdArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    #[arg(long = "required-field", default_values = ["title", "sections"])]
    pub required_fields: Vec<String>,

    #[arg(long, default_value = "pbac_meeting_date")]
    pub date_field: String,

    #[arg(long, default_value = "sections")]
    pub sections_field: String,

    #[arg(long, default_value = "heading")]
    pub heading_field: String,
}

impl PipelineArgs {
    pub fn to_config(&self) -> PipelineConfig {
        let mut required_fields = self.required_fields.clone();
        if !required_fields.contains(&self.sections_field) {
            required_fields.push(self.sections_field.clone());
        }

        PipelineConfig {
            required_fields,
            date_field: self.date_field.clone(),
            sections_field: self.sections_field.clone(),
            heading_field: self.heading_field.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateDirArgs {
    #[arg(long)]
    pub input_dir: PathBuf,

    #[arg(long)]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Args, Debug, Clone)]
pub struct DocIdArgs {
    #[arg(long = "filename", required = true)]
    pub filenames: Vec<String>,
}
