//! Command-line interface and configuration resolution.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{read_config, validate_config, ConfigError, RelayConfig};

#[derive(Parser, Debug, Default)]
#[command(name = "upload-relay", version)]
#[command(about = "Relays file uploads to an upstream ingestion endpoint", long_about = None)]
pub struct Cli {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long, env = "UPLOAD_RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long, env = "UPLOAD_RELAY_BIND")]
    pub bind: Option<String>,

    /// Override upstream.url
    #[arg(short, long, env = "UPLOAD_RELAY_UPSTREAM")]
    pub upstream: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Defaults, then the config file, then overrides, then validation.
    pub fn resolve_config(&self) -> Result<RelayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => RelayConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(upstream) = &self.upstream {
            config.upstream.url = upstream.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

/// Render the effective config with credentials masked.
pub fn render_config(config: &RelayConfig) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    if let Some(auth) = shown.upstream.auth_header.as_mut() {
        auth.value = "<redacted>".to_string();
    }
    toml::to_string_pretty(&shown)
}
