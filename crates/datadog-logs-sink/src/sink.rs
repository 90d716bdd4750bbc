// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The sink task: at-least-once delivery with a bounded, jittered retry
//! budget.

use crate::config::{ConfigError, SinkConfig};
use crate::intake::DeliveryError;
use crate::record::SinkRecord;
use crate::retry;
use crate::writer::LogsApiWriter;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// A flush cycle failed.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The failure may be transient. The host should wait out `wait` and
    /// call [`LogsSinkTask::write`] again with the same records.
    #[error("delivery failed, retry after {wait:?}: {source}")]
    Retriable {
        wait: Duration,
        #[source]
        source: DeliveryError,
    },
    /// The retry budget is spent. The host decides whether to surface the
    /// error or drop the batch.
    #[error("delivery failed after {retries} retries: {source}")]
    Fatal {
        retries: u32,
        #[source]
        source: DeliveryError,
    },
    /// Rebuilding the intake client for a retry failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Sink task around a [`LogsApiWriter`].
///
/// The task owns the retry budget but never sleeps on its own: hosts call
/// [`write`] with the records of one put cycle and, after a
/// [`Retriable`] failure, redeliver the same records once the returned wait
/// has passed. Delivery is at-least-once; a cycle that fails halfway is
/// resent whole.
///
/// [`write`]: LogsSinkTask::write
/// [`Retriable`]: SinkError::Retriable
#[derive(Debug)]
pub struct LogsSinkTask {
    config: SinkConfig,
    writer: LogsApiWriter,
    remaining_retries: u32,
}

impl LogsSinkTask {
    /// Validates the configuration and opens the intake client.
    pub fn new(config: SinkConfig) -> Result<Self, ConfigError> {
        let writer = LogsApiWriter::new(&config)?;
        let last_ceiling =
            retry::backoff_ceiling_ms(config.retry_max.saturating_sub(1), config.retry_backoff_ms);
        if config.retry_max > 0 && last_ceiling >= retry::MAX_BACKOFF_MS {
            warn!(
                "retry_max {} with retry_backoff_ms {} will hit the {} ms backoff ceiling",
                config.retry_max,
                config.retry_backoff_ms,
                retry::MAX_BACKOFF_MS
            );
        }
        Ok(LogsSinkTask {
            remaining_retries: config.retry_max,
            config,
            writer,
        })
    }

    /// Delivers one cycle of records.
    ///
    /// An empty slice is a no-op. Success resets the retry budget; failure
    /// rebuilds the writer and tells the caller how long to wait before
    /// redelivering, until the budget runs out.
    pub async fn write(&mut self, records: &[SinkRecord]) -> Result<(), SinkError> {
        if records.is_empty() {
            return Ok(());
        }

        let first = &records[0];
        debug!(
            "writing {} records starting at {}-{}@{}",
            records.len(),
            first.topic,
            first.partition,
            first.offset
        );

        match self.writer.write(records).await {
            Ok(()) => {
                self.remaining_retries = self.config.retry_max;
                Ok(())
            }
            Err(source) => {
                warn!(
                    "failed to write {} records, {} retries left: {source}",
                    records.len(),
                    self.remaining_retries
                );
                self.retry_or_give_up(source)
            }
        }
    }

    fn retry_or_give_up(&mut self, source: DeliveryError) -> Result<(), SinkError> {
        if self.remaining_retries == 0 {
            return Err(SinkError::Fatal {
                retries: self.config.retry_max,
                source,
            });
        }

        self.writer = LogsApiWriter::new(&self.config)?;

        let attempts = self.config.retry_max - self.remaining_retries;
        let wait = retry::jittered_backoff(attempts, self.config.retry_backoff_ms);
        self.remaining_retries -= 1;
        Err(SinkError::Retriable { wait, source })
    }
}
