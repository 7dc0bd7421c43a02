//! Talent Matcher - candidate to department persona matching
//!
//! Entry point for the `talent-matcher` binary. Scores candidates on four
//! personality traits and assigns each the department whose persona is
//! nearest, then reports distances as a table, chart or JSON.

mod batch;
mod cli;
mod config;
mod error;
mod logging;
mod matcher;
mod persona;
mod report;
mod version;

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Cli, Commands, ConfigSubcommand, PersonasSubcommand};
use crate::config::{MatcherConfig, OutputFormat};
use crate::error::Result;
use crate::matcher::Candidate;
use crate::persona::{PersonaRegistry, BUNDLED_PERSONAS_TOML};

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // Commands that don't need full logging
    match cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config { ref subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone(), cli.config.as_deref());
        }
        _ => {}
    }

    let config = MatcherConfig::load(cli.config.as_deref())?;

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::build_info();
    debug!(
        version = %build.full_version(),
        target = %build.target,
        profile = %build.profile,
        "Starting Talent Matcher"
    );

    match cli.command {
        Commands::Match {
            candidates,
            input,
            format,
            no_chart,
        } => {
            let registry = config.persona_registry()?;
            run_match(
                &config,
                &registry,
                &candidates,
                input,
                format.unwrap_or(config.output.format),
                no_chart,
                cli.quiet,
            )
        }
        Commands::Personas { format, subcommand } => match subcommand {
            Some(PersonasSubcommand::Export { path, force }) => {
                export_personas(path.as_deref(), force)
            }
            None => {
                let registry = config.persona_registry()?;
                show_personas(&config, &registry, format.unwrap_or(config.output.format))
            }
        },
        Commands::Version | Commands::Config { .. } => {
            // Already handled above
            unreachable!();
        }
    }
}

/// Match a batch and print the report.
///
/// Invalid candidates are reported, never turned into a failing exit.
fn run_match(
    config: &MatcherConfig,
    registry: &PersonaRegistry,
    from_args: &[Candidate],
    input: Option<PathBuf>,
    format: OutputFormat,
    no_chart: bool,
    quiet: bool,
) -> Result<()> {
    let candidates = batch::gather_candidates(
        input.as_deref(),
        from_args,
        config.default_candidate(),
        config.batch.max_candidates,
    )?;

    let report = batch::match_all(&candidates, registry);

    match format {
        OutputFormat::Json => {
            let value = report::results_json(&report)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            print!(
                "{}",
                report::results_table(&report, config.output.precision)
            );
            if config.output.chart && !no_chart {
                if let Some(chart) = report::distance_chart(
                    &report,
                    config.output.chart_width,
                    config.output.precision,
                ) {
                    println!();
                    print!("{}", chart);
                }
            }
        }
    }

    if !quiet {
        eprint!("{}", report::warning_lines(&report.warnings()));
    }

    info!(
        candidates = report.rows().len(),
        invalid = report.invalid_count(),
        "Match complete"
    );

    Ok(())
}

fn show_personas(
    config: &MatcherConfig,
    registry: &PersonaRegistry,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report::personas_json(registry))?
            );
        }
        OutputFormat::Table => {
            print!(
                "{}",
                report::personas_table(registry, config.output.precision)
            );
        }
    }
    Ok(())
}

/// Write the bundled personas file so it can be edited and pointed at
/// with `registry.personas_file`.
fn export_personas(path: Option<&str>, force: bool) -> Result<()> {
    let default = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".talent-matcher")
        .join("personas.toml");

    let written = config::write_new_file(path, default, BUNDLED_PERSONAS_TOML, force)?;
    info!(path = %written.display(), "Personas file exported");
    println!("Personas written to {}", written.display());
    Ok(())
}

/// Handle config subcommands
fn handle_config_command(subcommand: ConfigSubcommand, config_path: Option<&str>) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = MatcherConfig::load(config_path)?;
            print!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration written to {}", written.display());
        }
        ConfigSubcommand::Validate => {
            let cfg = MatcherConfig::load(config_path)?;
            let registry = cfg.persona_registry()?;
            println!(
                "Configuration is valid ({} personas: {}).",
                registry.len(),
                registry.departments().collect::<Vec<_>>().join(", ")
            );
        }
    }

    Ok(())
}
