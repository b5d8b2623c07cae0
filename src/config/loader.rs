//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::TapConfig;
use crate::config::validation::{validate_config, ValidationError};

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

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<TapConfig, ConfigError> {
    let config: TapConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<TapConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), TapConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = parse_config(
            r#"
            [http]
            strict = true
            "#,
        )
        .unwrap();
        assert!(config.http.strict);
        assert_eq!(config.http.bind_address, "0.0.0.0:8888");
    }

    #[test]
    fn invalid_address_is_rejected() {
        let err = parse_config(
            r#"
            [http]
            bind_address = "nowhere"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("nowhere"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"[http]\nbind_address = \"127.0.0.1:9999\"\n[observability]\nlog_filter = \"debug\"\n",
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.http.bind_address, "127.0.0.1:9999");
        assert_eq!(config.observability.log_filter, "debug");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(parse_config("[http"), Err(ConfigError::Parse(_))));
    }
}
