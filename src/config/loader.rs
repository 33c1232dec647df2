//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let path = write_temp(
            "rate_gate_valid.toml",
            r#"
            [rate_limit]
            requests_per_window = 20
            window_minutes = 2.5
            "#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.rate_limit.requests_per_window, 20);
        assert_eq!(config.rate_limit.window_minutes, 2.5);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let path = write_temp(
            "rate_gate_invalid.toml",
            r#"
            [rate_limit]
            requests_per_window = 0
            "#,
        );
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/rate_gate.toml");
        assert!(matches!(load_config(path), Err(ConfigError::Io(_))));
    }
}
