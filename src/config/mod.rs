//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! TapConfig::default()            (binary: no file, no flags)
//! config file (TOML)              (library callers)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → TapConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{HttpConfig, ObservabilityConfig, TapConfig, DEFAULT_HTTP_PORT};
pub use validation::{validate_config, ValidationError};
