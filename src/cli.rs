//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the talent matcher.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;
use crate::matcher::Candidate;

/// Talent Matcher - match candidate trait profiles to department personas
///
/// Scores each candidate on four traits (diplomatic, balanced, sociable,
/// innovative) and assigns the department whose ideal persona is nearest.
#[derive(Parser, Debug)]
#[command(name = "talent-matcher")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, env = "TALENT_MATCHER_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match candidates against the department personas
    Match {
        /// Candidate scores as DIPLOMATIC,BALANCED,SOCIABLE,INNOVATIVE (repeatable)
        #[arg(short, long = "candidate", value_name = "D,B,S,I", allow_hyphen_values = true)]
        candidates: Vec<Candidate>,

        /// TOML file of [[candidate]] tables, matched before -c candidates
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format (defaults to output.format from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Skip the distance chart
        #[arg(long)]
        no_chart: bool,
    },

    /// Show the department personas
    Personas {
        /// Output format (defaults to output.format from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[command(subcommand)]
        subcommand: Option<PersonasSubcommand>,
    },

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Persona subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PersonasSubcommand {
    /// Write the bundled personas file for editing
    Export {
        /// Where to write the personas file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration and the personas it points at
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_match_defaults() {
        let cli = Cli::parse_from(["talent-matcher", "match"]);
        match cli.command {
            Commands::Match {
                candidates,
                input,
                format,
                no_chart,
            } => {
                assert!(candidates.is_empty());
                assert!(input.is_none());
                assert!(format.is_none());
                assert!(!no_chart);
            }
            _ => panic!("Expected Match command"),
        }
    }

    #[test]
    fn test_match_with_candidates() {
        let cli = Cli::parse_from([
            "talent-matcher",
            "match",
            "-c",
            "85,90,75,80",
            "--candidate",
            "0, 0, 0, 0",
            "--format",
            "json",
            "--no-chart",
        ]);
        match cli.command {
            Commands::Match {
                candidates,
                format,
                no_chart,
                ..
            } => {
                assert_eq!(
                    candidates,
                    vec![
                        Candidate::new(85.0, 90.0, 75.0, 80.0),
                        Candidate::new(0.0, 0.0, 0.0, 0.0)
                    ]
                );
                assert_eq!(format, Some(OutputFormat::Json));
                assert!(no_chart);
            }
            _ => panic!("Expected Match command"),
        }
    }

    #[test]
    fn test_match_rejects_malformed_candidate() {
        let result = Cli::try_parse_from(["talent-matcher", "match", "-c", "85,90,75"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_match_negative_score_reaches_matcher() {
        let cli = Cli::parse_from(["talent-matcher", "match", "-c", "-5,50,50,50", "--no-chart"]);
        match cli.command {
            Commands::Match {
                candidates,
                no_chart,
                ..
            } => {
                assert_eq!(candidates, vec![Candidate::new(-5.0, 50.0, 50.0, 50.0)]);
                assert!(no_chart);
            }
            _ => panic!("Expected Match command"),
        }
    }

    #[test]
    fn test_match_with_input_file() {
        let cli = Cli::parse_from(["talent-matcher", "match", "-i", "batch.toml"]);
        match cli.command {
            Commands::Match { input, .. } => {
                assert_eq!(input, Some(PathBuf::from("batch.toml")));
            }
            _ => panic!("Expected Match command"),
        }
    }

    #[test]
    fn test_personas() {
        let cli = Cli::parse_from(["talent-matcher", "personas", "-f", "json"]);
        match cli.command {
            Commands::Personas { format, subcommand } => {
                assert_eq!(format, Some(OutputFormat::Json));
                assert!(subcommand.is_none());
            }
            _ => panic!("Expected Personas command"),
        }
    }

    #[test]
    fn test_personas_export() {
        let cli = Cli::parse_from(["talent-matcher", "personas", "export", "--force"]);
        match cli.command {
            Commands::Personas {
                subcommand: Some(PersonasSubcommand::Export { path, force }),
                ..
            } => {
                assert!(path.is_none());
                assert!(force);
            }
            _ => panic!("Expected Personas Export command"),
        }
    }

    #[test]
    fn test_verbose_flags() {
        let cli = Cli::parse_from(["talent-matcher", "-vv", "version"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::parse_from(["talent-matcher", "--quiet", "version"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["talent-matcher", "config", "show", "--config", "/tmp/m.toml"]);
        assert_eq!(cli.config, Some("/tmp/m.toml".to_string()));
        assert!(matches!(
            cli.command,
            Commands::Config {
                subcommand: ConfigSubcommand::Show
            }
        ));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["talent-matcher", "config", "init", "--force"]);
        match cli.command {
            Commands::Config {
                subcommand: ConfigSubcommand::Init { path, force },
            } => {
                assert!(path.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
