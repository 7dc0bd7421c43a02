//! Configuration system for Talent Matcher
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (TALENT_MATCHER_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::matcher::{Candidate, SCORE_MAX, SCORE_MIN};
use crate::persona::{PersonaRegistry, TraitVector};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Where personas come from
    pub registry: RegistrySettings,

    /// Batch limits and defaults
    pub batch: BatchSettings,

    /// Report rendering
    pub output: OutputSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Persona registry source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Personas TOML file (unset = bundled reference personas)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personas_file: Option<String>,
}

/// Batch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Maximum candidates per run
    pub max_candidates: usize,

    /// Profile matched when no candidate is given
    pub default_scores: TraitVector,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

/// Report rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default output format
    pub format: OutputFormat,

    /// Decimal places shown in tables
    pub precision: usize,

    /// Draw the grouped bar chart after the table
    pub chart: bool,

    /// Width in columns of the longest chart bar
    pub chart_width: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_candidates: 5,
            default_scores: TraitVector::new(85.0, 90.0, 75.0, 80.0),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 2,
            chart: true,
            chart_width: 40,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_files: 5,
            json_format: false,
        }
    }
}

impl MatcherConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| Error::config_parse(&path, e))?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        config.apply_env_overrides();
        config.expand_paths();
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            return if path.exists() {
                Ok(Some(path))
            } else {
                Err(Error::config_not_found(path))
            };
        }

        let search_paths = [
            Some(PathBuf::from("talent-matcher.toml")),
            dirs::config_dir().map(|p| p.join("talent-matcher").join("config.toml")),
            dirs::home_dir().map(|p| p.join(".talent-matcher").join("config.toml")),
        ];

        for path in search_paths.into_iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("TALENT_MATCHER_PERSONAS_FILE") {
            self.registry.personas_file = Some(val);
        }

        if let Ok(val) = std::env::var("TALENT_MATCHER_MAX_CANDIDATES") {
            if let Ok(n) = val.parse() {
                self.batch.max_candidates = n;
            }
        }

        if let Ok(val) = std::env::var("TALENT_MATCHER_FORMAT") {
            match val.to_lowercase().as_str() {
                "table" => self.output.format = OutputFormat::Table,
                "json" => self.output.format = OutputFormat::Json,
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("TALENT_MATCHER_PRECISION") {
            if let Ok(n) = val.parse() {
                self.output.precision = n;
            }
        }
        if let Ok(val) = std::env::var("TALENT_MATCHER_CHART") {
            self.output.chart = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("TALENT_MATCHER_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("TALENT_MATCHER_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("TALENT_MATCHER_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        if let Some(ref file) = self.registry.personas_file {
            self.registry.personas_file = Some(expand_path(file));
        }
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.batch.max_candidates == 0 {
            return Err(Error::config_field_invalid(
                "batch.max_candidates",
                "max_candidates must be at least 1",
            ));
        }

        for (t, score) in self.batch.default_scores.iter() {
            if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
                return Err(Error::config_field_invalid(
                    format!("batch.default_scores.{}", t.key()),
                    format!("default {} score {} is outside 0-100", t, score),
                ));
            }
        }

        if self.output.precision > 10 {
            return Err(Error::config_field_invalid(
                "output.precision",
                "precision must be between 0 and 10",
            ));
        }

        if self.output.chart_width == 0 {
            return Err(Error::config_field_invalid(
                "output.chart_width",
                "chart_width must be at least 1",
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Build the persona registry this configuration points at.
    pub fn persona_registry(&self) -> Result<PersonaRegistry> {
        match self.registry.personas_file {
            Some(ref file) => PersonaRegistry::load(&PathBuf::from(file)),
            None => {
                debug!("Using bundled reference personas");
                Ok(PersonaRegistry::reference())
            }
        }
    }

    /// Candidate matched when none is supplied.
    pub fn default_candidate(&self) -> Candidate {
        self.batch.default_scores.into()
    }
}

/// Expand ~ and environment variables in paths
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or(std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Default location for `config init`
fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".talent-matcher")
        .join("config.toml")
}

/// Write `content` to `path` (or `default`), refusing to overwrite unless `force`.
pub fn write_new_file(
    path: Option<&str>,
    default: PathBuf,
    content: &str,
    force: bool,
) -> Result<PathBuf> {
    let target = path.map(|p| PathBuf::from(expand_path(p))).unwrap_or(default);

    if target.exists() && !force {
        return Err(Error::FileExists { path: target });
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&target, content).map_err(|e| Error::IoWrite {
        path: target.clone(),
        source: e,
    })?;

    Ok(target)
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let written = write_new_file(path, default_config_path(), DEFAULT_CONFIG, force)?;
    info!(path = %written.display(), "Configuration file created");
    Ok(written)
}

/// Default configuration content with comments
const DEFAULT_CONFIG: &str = r#"# Talent Matcher Configuration

[registry]
# Personas TOML file. Comment out to use the bundled reference personas.
# Run 'talent-matcher personas export' to get a file to start from.
# personas_file = "~/.talent-matcher/personas.toml"

[batch]
# Maximum candidates matched per run
max_candidates = 5

# Profile matched when no candidate is given
[batch.default_scores]
diplomatic = 85.0
balanced = 90.0
sociable = 75.0
innovative = 80.0

[output]
# Output format: table, json
format = "table"

# Decimal places shown in tables
precision = 2

# Draw a grouped bar chart of distances after the table
chart = true

# Width in columns of the longest chart bar
chart_width = 40

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.talent-matcher/logs/matcher.log"

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#;
