//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RelayConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<RelayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from a TOML file without validating it.
///
/// Callers apply their overrides and then run
/// [`validate_config`](crate::config::validate_config).
pub fn read_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"
            path = "/upload"

            [upstream]
            url = "http://ingest.internal/upload"
            connect_timeout_secs = 3
            use_system_proxy = false
            auth_header = { name = "Authorization", value = "Basic abc" }

            [observability]
            json_logs = true
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.listener.path, "/upload");
        assert_eq!(config.upstream.url, "http://ingest.internal/upload");
        assert_eq!(config.upstream.connect_timeout_secs, Some(3));
        assert!(!config.upstream.use_system_proxy);
        assert_eq!(config.upstream.auth_header.unwrap().name, "Authorization");
        assert!(config.observability.json_logs);
    }

    #[test]
    fn reports_syntax_errors() {
        let err = parse_config("[listener\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_config(Path::new("/nonexistent/upload-relay.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn validation_errors_are_joined() {
        let err = ConfigError::Validation(vec![
            ValidationError::Path("x".into()),
            ValidationError::Zero("limits.max_body_bytes"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: listener.path `x` must start with '/', \
             limits.max_body_bytes must be greater than zero"
        );
    }
}
