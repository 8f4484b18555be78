use clap::{Parser, Subcommand};
use std::path::PathBuf;

use diffused::application::dto::OutputFormat;

/// Show which vulnerabilities were fixed between two releases
#[derive(Parser, Debug)]
#[command(name = "diffused")]
#[command(version)]
#[command(
    about = "Show which vulnerabilities were fixed between two SBOMs or container images",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./diffused.config.yml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the vulnerability diff between two SBOMs
    SbomDiff {
        /// SBOM from the previous container image
        #[arg(short = 'p', long, value_name = "FILE")]
        previous_sbom: PathBuf,

        /// SBOM from the next container image
        #[arg(short = 'n', long, value_name = "FILE")]
        next_sbom: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Show the vulnerability diff between two container images
    ImageDiff {
        /// Reference of the previous container image
        #[arg(short = 'p', long, value_name = "IMAGE")]
        previous_image: String,

        /// Reference of the next container image
        #[arg(short = 'n', long, value_name = "IMAGE")]
        next_image: String,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Print the version of the installed scan backend
    ScannerVersion,
}

/// Options shared by the diff commands
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct ReportArgs {
    /// Output the affected packages and their versions for each vulnerability
    #[arg(short = 'a', long)]
    pub all_info: bool,

    /// Output format: rich or json
    #[arg(short = 'o', long)]
    pub output: Option<OutputFormat>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
