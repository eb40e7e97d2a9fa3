//! Explicit runtime configuration.
//!
//! Components receive their settings at construction; nothing reads the
//! environment except the loader used by the server binary.

use crate::draft::domain::Source;
use crate::ingest::domain::ScanSettings;
use std::net::SocketAddr;
use thiserror::Error;

/// Default bind address for the API server.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8090";

/// Default per-scan fetch bound.
const DEFAULT_BATCH_LIMIT: usize = 50;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// An environment variable holds an unparseable value.
    #[error("invalid value for environment variable {name}: {value}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// OAuth connect URLs presented by the integration connect endpoints.
#[derive(Debug, Clone)]
pub struct ConnectUrls {
    /// Gmail OAuth consent URL.
    pub gmail: String,
    /// Slack OAuth consent URL.
    pub slack: String,
    /// Telegram bot link URL.
    pub telegram: String,
}

impl ConnectUrls {
    /// Returns the connect URL for one source.
    #[must_use]
    pub fn for_source(&self, source: Source) -> &str {
        match source {
            Source::Gmail => &self.gmail,
            Source::Slack => &self.slack,
            Source::Telegram => &self.telegram,
        }
    }
}

/// Complete runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct TaskFlowConfig {
    /// Address the API server binds to.
    pub bind_addr: SocketAddr,
    /// Shared secret for signing API tokens.
    pub token_secret: String,
    /// Endpoint URL of the remote task store.
    pub store_base_url: String,
    /// Bearer token for the remote task store.
    pub store_token: String,
    /// URL of the classification endpoint.
    pub classifier_endpoint: String,
    /// Bearer token for the classification endpoint.
    pub classifier_token: String,
    /// OAuth connect URLs per source.
    pub connect_urls: ConnectUrls,
    /// Scan settings applied to newly connected integrations.
    pub default_scan_settings: ScanSettings,
    /// Upper bound on messages fetched per scan.
    pub batch_limit: usize,
}

impl TaskFlowConfig {
    /// Loads configuration from environment variables.
    ///
    /// Secrets and endpoints are required; the bind address, scan
    /// settings, and batch bound fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] for absent required variables
    /// and [`ConfigError::InvalidVar`] for unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_bind = optional_var("TASKFLOW_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr: SocketAddr = raw_bind.parse().map_err(|_| ConfigError::InvalidVar {
            name: "TASKFLOW_BIND_ADDR",
            value: raw_bind.clone(),
        })?;

        let batch_limit = match optional_var("TASKFLOW_BATCH_LIMIT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "TASKFLOW_BATCH_LIMIT",
                value: raw.clone(),
            })?,
            None => DEFAULT_BATCH_LIMIT,
        };

        Ok(Self {
            bind_addr,
            token_secret: required_var("TASKFLOW_TOKEN_SECRET")?,
            store_base_url: required_var("TASKFLOW_STORE_URL")?,
            store_token: required_var("TASKFLOW_STORE_TOKEN")?,
            classifier_endpoint: required_var("TASKFLOW_CLASSIFIER_URL")?,
            classifier_token: required_var("TASKFLOW_CLASSIFIER_TOKEN")?,
            connect_urls: ConnectUrls {
                gmail: required_var("TASKFLOW_GMAIL_CONNECT_URL")?,
                slack: required_var("TASKFLOW_SLACK_CONNECT_URL")?,
                telegram: required_var("TASKFLOW_TELEGRAM_CONNECT_URL")?,
            },
            default_scan_settings: ScanSettings::DEFAULT,
            batch_limit,
        })
    }
}

fn optional_var(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    optional_var(name).ok_or(ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connect_urls_map_sources() {
        let urls = ConnectUrls {
            gmail: "https://accounts.google.com/o/oauth2/auth".to_owned(),
            slack: "https://slack.com/oauth/v2/authorize".to_owned(),
            telegram: "https://t.me/taskflow_bot".to_owned(),
        };

        assert!(urls.for_source(Source::Gmail).contains("google"));
        assert!(urls.for_source(Source::Slack).contains("slack"));
        assert!(urls.for_source(Source::Telegram).contains("t.me"));
    }
}
