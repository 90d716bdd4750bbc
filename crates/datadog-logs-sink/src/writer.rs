// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! One flush cycle: group records by topic, serialize each group into
//! bounded payloads, post every payload.

use crate::batcher::RecordBatcher;
use crate::config::{ConfigError, SinkConfig};
use crate::intake::{DeliveryError, IntakeClient};
use crate::record::SinkRecord;
use crate::serializer::RecordSerializer;
use tracing::debug;

/// Writes batches of records to the logs intake.
///
/// Payloads are posted sequentially, topic by topic, and the first failure
/// aborts the cycle. The task above owns redelivery, so an aborted cycle
/// simply means the same records come back on the next call.
#[derive(Debug)]
pub struct LogsApiWriter {
    batcher: RecordBatcher,
    serializer: RecordSerializer,
    client: IntakeClient,
}

impl LogsApiWriter {
    pub fn new(config: &SinkConfig) -> Result<Self, ConfigError> {
        Ok(LogsApiWriter {
            batcher: RecordBatcher::new(),
            serializer: RecordSerializer::new(config),
            client: IntakeClient::new(config)?,
        })
    }

    /// Sends every record to the intake, one request per bounded payload.
    ///
    /// Success means the intake accepted every payload of every topic.
    pub async fn write(&mut self, records: &[SinkRecord]) -> Result<(), DeliveryError> {
        for record in records {
            self.batcher.add(record.clone());
        }

        let groups = self.batcher.drain();
        debug!("flushing {} topic batches", groups.len());
        for (topic, batch) in groups {
            self.send_batch(&topic, &batch).await?;
        }
        Ok(())
    }

    async fn send_batch(&self, topic: &str, batch: &[SinkRecord]) -> Result<(), DeliveryError> {
        let payloads = self.serializer.serialize(topic, batch)?;
        if payloads.is_empty() {
            debug!("no serializable records for topic {topic}, skipping the request");
            return Ok(());
        }

        debug!(
            "sending {} records for topic {topic} in {} payloads",
            batch.len(),
            payloads.len()
        );
        for payload in &payloads {
            self.client.deliver(payload).await?;
        }
        Ok(())
    }
}
