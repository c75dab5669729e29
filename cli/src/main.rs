//! CLI entrypoint for groupgo
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use groupgo_application::{EngineContext, StartConsensusInput};
use groupgo_domain::config::known_keys;
use groupgo_domain::config::validation::has_errors;
use groupgo_infrastructure::{
    ConfigLoader, FileConfig, InMemoryBallotRepository, JsonlConsensusLogger, ScenarioFile,
    ScenarioProvider, ScenarioRecommendations,
};
use groupgo_presentation::{
    Cli, Command, ConsoleFormatter, ProgressReporter, SimulationRunner, TripArgs, formatter_for,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        let config = load_config(&cli)?;
        println!("\nEffective configuration:\n");
        println!("{}", toml::to_string_pretty(&config)?);
        println!("Settings:");
        for info in known_keys() {
            if info.valid_values.is_empty() {
                println!("  {:<34} {}", info.key, info.description);
            } else {
                println!(
                    "  {:<34} {} [{}]",
                    info.key,
                    info.description,
                    info.valid_values.join(", ")
                );
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    let _log_guard = init_tracing(cli.verbose, config.logging.file.as_deref())?;

    info!("Starting groupgo");

    let issues = config.validate();
    if !issues.is_empty() {
        eprintln!("{}", ConsoleFormatter::format_issues(&issues));
    }
    if has_errors(&issues) {
        bail!("Invalid configuration");
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let format = config.output.resolve_format(cli.output.map(Into::into));
    if !config.output.color {
        colored::control::set_override(false);
    }
    let formatter = formatter_for(format);
    let progress = ProgressReporter::new(
        !cli.quiet && format == groupgo_domain::OutputFormat::Text,
    );

    let trip = match &command {
        Command::Generate { trip } | Command::Simulate { trip, .. } => trip,
    };
    let (runner, input) = build_runner(&config, trip).await?;

    progress.start("Generating options...");
    let rendered = match &command {
        Command::Generate { .. } => runner
            .generate(input)
            .await
            .map(|slate| formatter.format_slate(&slate)),
        Command::Simulate { steps, .. } => runner
            .run(input, steps)
            .await
            .map(|report| formatter.format_report(&report)),
    };
    progress.finish();

    match rendered {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            warn!("Command failed: {}", e);
            eprintln!("{}", formatter.format_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")
}

/// Stderr logging by verbosity, plus an optional plain-text log file
fn init_tracing(verbose: u8, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );

    let Some(path) = file else {
        registry.init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    registry
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Ok(Some(guard))
}

/// Wire the scenario adapters, store and event log into one engine
async fn build_runner(
    config: &FileConfig,
    trip: &TripArgs,
) -> Result<(SimulationRunner, StartConsensusInput)> {
    let scenario = ScenarioFile::load(&trip.scenario).await?;
    let recommendations = ScenarioRecommendations::from_scenario(&scenario);
    let provider = Arc::new(ScenarioProvider::new(scenario));

    let mut input = StartConsensusInput::new(provider.group_id().clone());
    if let Some(range) = trip.date_range() {
        input = input.with_dates(range);
    }

    let mut ctx = EngineContext::new(
        provider.clone(),
        provider.clone(),
        provider,
        Arc::new(InMemoryBallotRepository::new()),
        config.to_engine_config(),
    );
    if let Some(service) = recommendations {
        ctx = ctx.with_recommendations(Arc::new(service));
    }
    if let Some(path) = &config.logging.event_log {
        match JsonlConsensusLogger::new(path) {
            Some(logger) => {
                info!("Writing consensus events to {}", logger.path().display());
                ctx = ctx.with_event_logger(Arc::new(logger));
            }
            None => warn!("Consensus event log disabled"),
        }
    }

    Ok((SimulationRunner::new(Arc::new(ctx)), input))
}
