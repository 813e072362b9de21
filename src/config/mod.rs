//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (RelayConfig::default)
//!     → loader.rs (optional TOML file)
//!     → CLI / environment overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an absent config file is valid
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{parse_config, read_config, ConfigError};
pub use schema::{
    AuthHeaderConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, RelayConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
