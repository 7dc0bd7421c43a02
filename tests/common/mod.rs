//! Common test utilities and fixtures

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// A `talent-matcher` command isolated from the user's environment.
///
/// Runs inside a fresh temp directory with HOME and XDG_CONFIG_HOME pointed
/// at it, so no stray config file is picked up. Keep the returned
/// `TempDir` alive for as long as the command is used.
pub fn matcher_cmd() -> (Command, TempDir) {
    let home = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("talent-matcher").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    for var in [
        "TALENT_MATCHER_CONFIG",
        "TALENT_MATCHER_PERSONAS_FILE",
        "TALENT_MATCHER_MAX_CANDIDATES",
        "TALENT_MATCHER_FORMAT",
        "TALENT_MATCHER_PRECISION",
        "TALENT_MATCHER_CHART",
        "TALENT_MATCHER_LOG_LEVEL",
        "TALENT_MATCHER_LOG_FILE",
        "TALENT_MATCHER_LOG_JSON",
    ] {
        cmd.env_remove(var);
    }
    (cmd, home)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_exist() {
        for name in [
            "candidates.toml",
            "personas.toml",
            "personas_missing_trait.toml",
            "valid_config.toml",
            "invalid_config.toml",
        ] {
            assert!(fixture_path(name).exists(), "missing fixture {name}");
        }
    }
}
