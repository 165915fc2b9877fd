//! CLI entrypoint for enkf-iter
//!
//! This is the main binary that wires together all layers: it loads the
//! configuration, binds a library backend, pushes the settings into a
//! record and runs the requested command against it.

use anyhow::{Context, Result, bail};
use clap::Parser;
use enkf_iter_application::{
    AnalysisConfig, ApplySettingsUseCase, IterConfigBackend, PlanIterationsUseCase,
    SnapshotUseCase,
};
use enkf_iter_domain::{
    ConfigIssue, IterField, IterSettings, OutputFormat, Severity, has_errors,
};
use enkf_iter_infrastructure::{BackendKind, InMemoryIterConfigBackend, IterConfigLoader};
use enkf_iter_presentation::{BackendChoice, Cli, Command, ConsoleFormatter, OutputFormatter};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => EnvFilter::new("error"),
        (false, 0) => EnvFilter::new("warn"),
        (false, 1) => EnvFilter::new("info"),
        (false, 2) => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        IterConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let mut loaded =
        IterConfigLoader::load_all(cli.config.as_ref(), cli.no_config, cli.ert_config.as_deref())
            .context("Failed to load configuration")?;
    loaded.add_overrides(&cli.set).context("Invalid --set")?;

    if let Some(choice) = cli.backend {
        loaded.file.backend.kind = match choice {
            BackendChoice::Memory => BackendKind::Memory,
            BackendChoice::Native => BackendKind::Native,
        };
    }

    if !loaded.file.output.color {
        colored::control::set_override(false);
    }

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(loaded.file.output.format)
        .unwrap_or_default();
    let formatter = ConsoleFormatter::new(format);

    let settings = loaded.settings().context("Invalid --set")?;
    let issues = loaded.validate().context("Invalid --set")?;
    let command = cli.command();

    if command == Command::Check {
        println!("{}", formatter.format_issues(&issues));
        return Ok(if has_errors(&issues) {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    report_issues(&issues);

    let kind = loaded.file.backend.kind;
    info!("Using {} backend", kind);

    let output = match kind {
        BackendKind::Memory => run(
            Arc::new(InMemoryIterConfigBackend::new()),
            &settings,
            &command,
            &formatter,
        )?,
        BackendKind::Native => run_native(&settings, &command, &formatter)?,
    };

    println!("{}", output);

    Ok(ExitCode::SUCCESS)
}

/// Log configuration issues; the record accepts them, so none are fatal here.
fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        match issue.severity {
            Severity::Error => warn!("Configuration error: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
}

#[cfg(feature = "native")]
fn run_native(
    settings: &IterSettings,
    command: &Command,
    formatter: &ConsoleFormatter,
) -> Result<String> {
    let backend = Arc::new(enkf_iter_infrastructure::NativeIterConfigBackend::bind());
    run(backend, settings, command, formatter)
}

#[cfg(not(feature = "native"))]
fn run_native(
    _settings: &IterSettings,
    _command: &Command,
    _formatter: &ConsoleFormatter,
) -> Result<String> {
    bail!("The native backend is not available; rebuild with `--features native`")
}

/// Allocate a record on `backend`, apply the resolved settings, and render
/// the command's result. The record is released when the parent drops.
fn run<B: IterConfigBackend>(
    backend: Arc<B>,
    settings: &IterSettings,
    command: &Command,
    formatter: &ConsoleFormatter,
) -> Result<String> {
    let parent = AnalysisConfig::new(backend).context("Failed to allocate iteration record")?;
    let config = parent.iter_config();

    ApplySettingsUseCase::execute(&config, settings).context("Failed to apply settings")?;

    let output = match command {
        Command::Show => formatter.format_snapshot(&SnapshotUseCase::execute(&config)?),
        Command::Get { key } => {
            let field: IterField = key.parse()?;
            formatter.format_value(field, config.get_field(field)?.as_ref())
        }
        Command::Keys => formatter.format_keys(&IterField::ALL),
        Command::Plan => formatter.format_plan(&PlanIterationsUseCase::execute(&config)?),
        Command::Check => bail!("check does not bind a backend"),
    };

    Ok(output)
}
