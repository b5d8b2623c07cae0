//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address parses as a socket address
//! - Reject an empty log filter
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TapConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use crate::config::schema::TapConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("http.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),
    #[error("observability.log_filter must not be empty")]
    EmptyLogFilter,
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &TapConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.http.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.http.bind_address.clone(),
        ));
    }

    if config.observability.log_filter.trim().is_empty() {
        errors.push(ValidationError::EmptyLogFilter);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&TapConfig::default()), Ok(()));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = TapConfig::default();
        config.http.bind_address = "localhost".into();
        config.observability.log_filter = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("localhost".into()),
                ValidationError::EmptyLogFilter,
            ]
        );
    }
}
