// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! HTTP delivery to the logs intake: header management, optional gzip
//! compression, and response classification.

use crate::config::{ConfigError, SinkConfig};
use crate::serializer::Payload;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use std::io::Write;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// `DD-EVP-ORIGIN` reported to the intake.
const EVP_ORIGIN: &str = "kafka-connect";

/// `User-Agent` reported to the intake.
const SINK_USER_AGENT: &str = concat!("kafka-connect-logs/", env!("CARGO_PKG_VERSION"));

/// Characters of the rejected payload echoed into the error log.
const PAYLOAD_PREVIEW_CHARS: usize = 512;

/// A payload failed to reach the intake or was turned away by it.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to compress payload: {0}")]
    Compress(#[from] std::io::Error),
    #[error("failed to reach the logs intake: {0}")]
    Http(#[from] reqwest::Error),
    #[error("logs intake rejected the payload with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Client for one logs intake endpoint.
///
/// The endpoint URL and request headers are fixed at construction, so
/// [`IntakeClient::deliver`] only encodes and posts. Construction validates
/// the configuration; a built client can always reach the wire.
#[derive(Debug)]
pub struct IntakeClient {
    client: reqwest::Client,
    url: String,
    headers: HeaderMap,
    /// Gzip level when compression is on.
    compression: Option<u32>,
}

impl IntakeClient {
    pub fn new(config: &SinkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(IntakeClient {
            client: build_client(config)?,
            url: intake_url(config),
            headers: build_headers(config)?,
            compression: config
                .compression_enabled
                .then_some(config.compression_level),
        })
    }

    /// Posts one payload, gzipped when compression is on.
    ///
    /// Any non-2xx response is an error carrying the status and whatever
    /// body the intake sent back.
    pub async fn deliver(&self, payload: &Payload) -> Result<(), DeliveryError> {
        let body = self.encode(payload)?;
        debug!(
            "posting {} entries ({} bytes on the wire) to the intake",
            payload.entries,
            body.len()
        );

        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("intake accepted the payload: {status}");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            "intake rejected the payload ({status}): {body}, payload prefix: {}",
            preview(&payload.body)
        );
        Err(DeliveryError::Rejected { status, body })
    }

    fn encode(&self, payload: &Payload) -> Result<Vec<u8>, DeliveryError> {
        match self.compression {
            Some(level) => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
                encoder.write_all(payload.body.as_bytes())?;
                Ok(encoder.finish()?)
            }
            None => Ok(payload.body.as_bytes().to_vec()),
        }
    }
}

fn intake_url(config: &SinkConfig) -> String {
    let scheme = if config.use_ssl { "https" } else { "http" };
    let mut url = format!("{scheme}://{}:{}/v1/input", config.url, config.port);
    if config.api_key_in_url {
        url.push('/');
        url.push_str(&config.api_key);
    }
    url
}

fn build_client(config: &SinkConfig) -> Result<reqwest::Client, ConfigError> {
    let mut builder =
        reqwest::Client::builder().timeout(Duration::from_secs(config.request_timeout_secs));
    if let Some(proxy) = &config.proxy {
        let proxy_url = format!("http://{}:{}", proxy.host, proxy.port);
        builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
    }
    Ok(builder.build()?)
}

fn build_headers(config: &SinkConfig) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    if config.compression_enabled {
        headers.insert("Content-Encoding", HeaderValue::from_static("gzip"));
    }
    if !config.api_key_in_url {
        let api_key = config
            .api_key
            .parse()
            .map_err(|_| ConfigError::ApiKeyNotHeaderSafe)?;
        headers.insert("DD-API-KEY", api_key);
    }
    headers.insert("DD-EVP-ORIGIN", HeaderValue::from_static(EVP_ORIGIN));
    headers.insert(
        "DD-EVP-ORIGIN-VERSION",
        HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
    );
    headers.insert("User-Agent", HeaderValue::from_static(SINK_USER_AGENT));
    Ok(headers)
}

/// Cuts the payload on a character boundary for log lines.
fn preview(body: &str) -> &str {
    match body.char_indices().nth(PAYLOAD_PREVIEW_CHARS) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}
