mod cli;

use clap::CommandFactory;
use cli::{Args, Commands, ReportArgs};
use diffused::adapters::outbound::console::StderrProgressReporter;
use diffused::adapters::outbound::filesystem::{FileSystemReader, FileSystemWriter, StdoutPresenter};
use diffused::adapters::outbound::process::TokioCommandRunner;
use diffused::adapters::outbound::scanners::{ScannerSettings, TrivyScanner};
use diffused::application::factories::FormatterFactory;
use diffused::application::release::ReleaseRole;
use diffused::application::use_cases::VulnerabilityDiffer;
use diffused::config::{self, ConfigFile};
use diffused::ports::outbound::{OutputPresenter, ProgressReporter};
use diffused::shared::error::{DiffusedError, ExitCode};
use diffused::shared::Result;
use diffused::vulnerability_diff::domain::ScanSubject;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

/// Routes diagnostics to stderr; `RUST_LOG` takes precedence over `--verbose`
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "diffused=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    let config = load_config(args.config.as_deref())?.unwrap_or_default();
    let settings = config.scanner_settings();

    match command {
        Commands::ScannerVersion => {
            let version = TrivyScanner::probe_version(&TokioCommandRunner::new(), &settings).await;
            create_presenter(args.output_file).present(&format!("{}\n", version))
        }
        Commands::SbomDiff {
            previous_sbom,
            next_sbom,
            report,
        } => {
            validate_sbom_path(&previous_sbom)?;
            validate_sbom_path(&next_sbom)?;

            let previous = ScanSubject::from_sbom(previous_sbom)?;
            let next = ScanSubject::from_sbom(next_sbom)?;
            run_diff(previous, next, report, &config, settings, args.output_file).await
        }
        Commands::ImageDiff {
            previous_image,
            next_image,
            report,
        } => {
            validate_image_reference(&previous_image, &next_image)?;

            let previous = ScanSubject::from_image(previous_image)?;
            let next = ScanSubject::from_image(next_image)?;
            run_diff(previous, next, report, &config, settings, args.output_file).await
        }
    }
}

/// Loads the explicit config file, or the one discovered in the working directory
fn load_config(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    let (config, path) = match explicit {
        Some(path) => (
            Some(config::load_config_from_path(path)?),
            path.to_path_buf(),
        ),
        None => {
            let dir = std::env::current_dir()?;
            (
                config::discover_config(&dir)?,
                dir.join(config::CONFIG_FILENAME),
            )
        }
    };

    if config.is_some() {
        eprintln!("📋 Loaded config from: {}", path.display());
    }
    Ok(config)
}

async fn run_diff(
    previous: ScanSubject,
    next: ScanSubject,
    report: ReportArgs,
    config: &ConfigFile,
    settings: ScannerSettings,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let format = match report.output {
        Some(format) => format,
        None => config.output_format()?.unwrap_or_default(),
    };
    let all_info = report.all_info || config.all_info.unwrap_or(false);
    let colored = output_file.is_none() && std::io::stdout().is_terminal();

    let progress_reporter = StderrProgressReporter::new();
    progress_reporter.report(&format!(
        "🔍 Comparing {} with {} (scanner: {})",
        describe_subject(&previous),
        describe_subject(&next),
        settings.binary
    ));

    let mut differ = VulnerabilityDiffer::new(
        TrivyScanner::new(previous, settings.clone()),
        TrivyScanner::new(next, settings),
        FileSystemReader::new(),
        progress_reporter,
    );

    let formatter = FormatterFactory::create(format, colored);
    let rendered = if all_info {
        formatter.format_changes(differ.vulnerabilities_diff_all_info().await?)?
    } else {
        formatter.format_fixed(differ.vulnerabilities_diff().await?)?
    };

    let reporter = differ.progress_reporter();
    reporter.report_completion("✅ Comparison complete");
    for (role, error) in differ.errors() {
        reporter.report_warning(&release_warning(role, error));
    }

    create_presenter(output_file).present(&rendered)
}

fn release_warning(role: ReleaseRole, error: &str) -> String {
    format!("{} release: {}", role, error)
}

fn describe_subject(subject: &ScanSubject) -> String {
    match (subject.image(), subject.sbom()) {
        (Some(image), _) => image.to_string(),
        (None, Some(sbom)) => sbom.display().to_string(),
        (None, None) => String::new(),
    }
}

fn create_presenter(output_file: Option<PathBuf>) -> Box<dyn OutputPresenter> {
    match output_file {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    }
}

fn validate_sbom_path(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(DiffusedError::InvalidInput {
            message: format!("Could not find {}", path.display()),
            hint: "Check the SBOM path, or use image-diff to compare container images".to_string(),
        }
        .into());
    }
    Ok(())
}

fn validate_image_reference(previous: &str, next: &str) -> Result<()> {
    if Path::new(previous).is_file() || Path::new(next).is_file() {
        return Err(DiffusedError::InvalidInput {
            message: "image-diff: The 'previous-image' or 'next-image' option seems to be a file"
                .to_string(),
            hint: "Provide a valid container image reference, or use the sbom-diff command for SBOM files"
                .to_string(),
        }
        .into());
    }
    Ok(())
}
