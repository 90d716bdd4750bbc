// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Sink configuration: one typed structure, validated once before any
//! network activity.

use thiserror::Error;

/// Default logs intake host.
pub const DEFAULT_INTAKE_URL: &str = "http-intake.logs.datadoghq.com";

/// Uncompressed payload cap documented for the logs intake API.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Entry cap per payload documented for the logs intake API.
pub const DEFAULT_MAX_BATCH_ENTRIES: usize = 1_000;

/// Default hard deadline for a single intake request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("api key must not be empty")]
    EmptyApiKey,
    #[error("intake url must not be empty")]
    EmptyUrl,
    #[error("intake port must not be zero")]
    InvalidPort,
    #[error("compression level must be between 1 and 9, got {0}")]
    InvalidCompressionLevel(u32),
    #[error("max payload bytes must be at least 2, got {0}")]
    InvalidMaxPayloadBytes(usize),
    #[error("max batch entries must be at least 1")]
    InvalidMaxBatchEntries,
    #[error("request timeout must be at least 1 second")]
    InvalidRequestTimeout,
    #[error("api key contains characters that cannot be sent in a header")]
    ApiKeyNotHeaderSafe,
    #[error("failed to build intake client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP proxy between the sink and the intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
}

/// Everything the sink needs, supplied by the host at task construction.
///
/// `Default` carries the production intake endpoint and limits; hosts
/// override fields and the constructors run [`SinkConfig::validate`] before
/// anything touches the network.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub api_key: String,
    /// Intake host, without scheme or port.
    pub url: String,
    pub port: u16,
    pub use_ssl: bool,
    /// Older intake generation carried the API key as a URL path segment
    /// instead of the `DD-API-KEY` header.
    pub api_key_in_url: bool,
    pub proxy: Option<ProxyConfig>,
    /// `ddsource` envelope field; omitted from envelopes when `None`.
    pub source: Option<String>,
    /// Static tags appended after the `topic:<key>` tag, in order.
    pub tags: Vec<String>,
    /// `hostname` envelope field; omitted from envelopes when `None`.
    pub hostname: Option<String>,
    /// `service` envelope field; omitted from envelopes when `None`.
    pub service: Option<String>,
    pub max_payload_bytes: usize,
    pub max_batch_entries: usize,
    /// Retries per failing flush before the error turns fatal.
    pub retry_max: u32,
    /// Base of the exponential backoff ceiling.
    pub retry_backoff_ms: u64,
    pub compression_enabled: bool,
    /// Gzip level, 1 to 9.
    pub compression_level: u32,
    /// Hard deadline for a single intake request.
    pub request_timeout_secs: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        SinkConfig {
            api_key: String::new(),
            url: DEFAULT_INTAKE_URL.to_string(),
            port: 443,
            use_ssl: true,
            api_key_in_url: false,
            proxy: None,
            source: Some("kafka-connect".to_string()),
            tags: Vec::new(),
            hostname: None,
            service: None,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            max_batch_entries: DEFAULT_MAX_BATCH_ENTRIES,
            retry_max: 5,
            retry_backoff_ms: 3000,
            compression_enabled: true,
            compression_level: 6,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl SinkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if self.url.is_empty() {
            return Err(ConfigError::EmptyUrl);
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if !(1..=9).contains(&self.compression_level) {
            return Err(ConfigError::InvalidCompressionLevel(self.compression_level));
        }
        // An array of even one empty envelope needs room for the brackets.
        if self.max_payload_bytes < 2 {
            return Err(ConfigError::InvalidMaxPayloadBytes(self.max_payload_bytes));
        }
        if self.max_batch_entries == 0 {
            return Err(ConfigError::InvalidMaxBatchEntries);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidRequestTimeout);
        }
        Ok(())
    }

    /// Static tags pre-joined for envelope composition, `None` when empty.
    #[must_use]
    pub fn static_tags(&self) -> Option<String> {
        if self.tags.is_empty() {
            None
        } else {
            Some(self.tags.join(","))
        }
    }
}
