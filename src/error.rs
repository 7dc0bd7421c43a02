//! Error types for Talent Matcher
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for CLI
//!
//! Invalid candidate scores are *not* errors: they are ordinary match
//! outcomes (see `matcher`). Only problems that stop the process from
//! producing a report end up here.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for matcher operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,
    IoAlreadyExists = 204,

    // Persona registry errors (3xx)
    RegistryEmpty = 300,
    RegistryDuplicate = 301,
    RegistryMissingTrait = 302,
    RegistryUnknownTrait = 303,
    RegistryReservedName = 304,

    // Candidate input errors (4xx)
    InputMalformed = 400,
    InputTooManyCandidates = 401,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10,
            200..=299 => 20,
            300..=399 => 30,
            400..=499 => 40,
            900..=999 => 90,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Refusing to overwrite an existing file
    #[error("{path} already exists")]
    FileExists { path: PathBuf },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Persona Registry Errors
    // ─────────────────────────────────────────────────────────────

    /// Registry defines no personas
    #[error("Persona registry is empty")]
    RegistryEmpty,

    /// Two personas share a department name
    #[error("Duplicate persona for department '{department}'")]
    DuplicatePersona { department: String },

    /// A persona lacks one of the four matching traits
    #[error("Persona '{department}' is missing trait '{trait_name}'")]
    MissingTrait {
        department: String,
        trait_name: String,
    },

    /// A persona declares a trait that is not one of the four
    #[error("Persona '{department}' declares unknown trait '{trait_name}'")]
    UnknownTrait {
        department: String,
        trait_name: String,
    },

    /// A department name collides with a result column
    #[error("Department name '{department}' is reserved")]
    ReservedDepartment { department: String },

    // ─────────────────────────────────────────────────────────────
    // Candidate Input Errors
    // ─────────────────────────────────────────────────────────────

    /// Candidate scores could not be parsed
    #[error("Malformed candidate '{input}': {reason}")]
    MalformedCandidate { input: String, reason: String },

    /// More candidates than the configured batch limit
    #[error("Too many candidates: got {count}, maximum is {max}")]
    TooManyCandidates { count: usize, max: usize },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::FileExists { .. } => ErrorCode::IoAlreadyExists,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,
            Error::Json(_) => ErrorCode::InternalError,

            Error::RegistryEmpty => ErrorCode::RegistryEmpty,
            Error::DuplicatePersona { .. } => ErrorCode::RegistryDuplicate,
            Error::MissingTrait { .. } => ErrorCode::RegistryMissingTrait,
            Error::UnknownTrait { .. } => ErrorCode::RegistryUnknownTrait,
            Error::ReservedDepartment { .. } => ErrorCode::RegistryReservedName,

            Error::MalformedCandidate { .. } => ErrorCode::InputMalformed,
            Error::TooManyCandidates { .. } => ErrorCode::InputTooManyCandidates,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'talent-matcher config init' to create a default configuration file.",
            ),
            Error::ConfigParse { .. } => Some(
                "Check the file syntax. Run 'talent-matcher config validate' to see details.",
            ),
            Error::ConfigValidation { .. } => {
                Some("Review the configuration file and fix the invalid values.")
            }
            Error::RegistryEmpty => {
                Some("Define at least one [[persona]] table in the personas file.")
            }
            Error::DuplicatePersona { .. } => {
                Some("Department names must be unique across the personas file.")
            }
            Error::MissingTrait { .. } | Error::UnknownTrait { .. } => Some(
                "Each persona needs exactly the traits diplomatic, balanced, sociable and innovative.",
            ),
            Error::FileExists { .. } => {
                Some("Pass --force to overwrite it, or choose another path with --path.")
            }
            Error::ReservedDepartment { .. } => Some(
                "'Candidate', 'Best Department' and 'Message' name result columns; rename the department.",
            ),
            Error::MalformedCandidate { .. } => Some(
                "Pass four comma-separated scores in the order diplomatic,balanced,sociable,innovative (e.g. -c 85,90,75,80).",
            ),
            Error::TooManyCandidates { .. } => Some(
                "Match fewer candidates per run or raise 'batch.max_candidates' in the configuration.",
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let mut output = format!("\x1b[31mError [{}]\x1b[0m: {}\n", self.code(), self);

        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create a parse error for a TOML file
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Error::ConfigParse {
            path: path.into(),
            message: source.message().to_string(),
            source: Some(source),
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a malformed candidate error
    pub fn malformed_candidate(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedCandidate {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::RegistryMissingTrait.as_str(), "E302");
        assert_eq!(ErrorCode::InputTooManyCandidates.as_str(), "E401");
        assert_eq!(ErrorCode::InternalError.as_str(), "E900");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::RegistryEmpty.exit_code(), 30);
        assert_eq!(ErrorCode::InputMalformed.exit_code(), 40);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_error_codes() {
        let err = Error::config_not_found("/test");
        assert_eq!(err.code(), ErrorCode::ConfigNotFound);

        let err = Error::MissingTrait {
            department: "Sales".into(),
            trait_name: "sociable".into(),
        };
        assert_eq!(err.code(), ErrorCode::RegistryMissingTrait);
        assert!(err.to_string().contains("Sales"));
        assert!(err.to_string().contains("sociable"));

        let err = Error::TooManyCandidates { count: 7, max: 5 };
        assert_eq!(err.code(), ErrorCode::InputTooManyCandidates);
        assert_eq!(err.exit_code(), 40);
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::config_not_found("/test");
        assert!(err.suggestion().unwrap().contains("config init"));

        let err = Error::malformed_candidate("1,2", "expected 4 scores");
        assert!(err.suggestion().unwrap().contains("-c 85,90,75,80"));

        assert!(Error::Internal("boom".into()).suggestion().is_none());
    }

    #[test]
    fn test_format_for_terminal() {
        let formatted = Error::config_not_found("/test/config.toml").format_for_terminal();
        assert!(formatted.contains("E100"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_file_exists_is_io_class() {
        let err = Error::FileExists {
            path: "/tmp/personas.toml".into(),
        };
        assert_eq!(err.code(), ErrorCode::IoAlreadyExists);
        assert_eq!(err.exit_code(), 20);
        assert!(err.suggestion().unwrap().contains("--force"));
        assert!(!err.suggestion().unwrap().contains("configuration"));
    }

    #[test]
    fn test_reserved_department_is_registry_class() {
        let err = Error::ReservedDepartment {
            department: "Candidate".into(),
        };
        assert_eq!(err.code().as_str(), "E304");
        assert_eq!(err.exit_code(), 30);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert_eq!(err.code(), ErrorCode::IoNotFound);
    }

    #[test]
    fn test_config_parse_keeps_message() {
        let source = toml::from_str::<toml::Table>("a = ").unwrap_err();
        let err = Error::config_parse("/tmp/x.toml", source);
        assert_eq!(err.code(), ErrorCode::ConfigParseError);
        assert!(err.to_string().contains("/tmp/x.toml"));
    }
}
