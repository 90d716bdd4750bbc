// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Envelope serialization and payload splitting.
//!
//! Each record value is wrapped in an intake envelope, and the envelopes for
//! one topic are packed into JSON array payloads that stay under the
//! configured byte and entry limits. Splitting happens in the same streaming
//! pass that serializes, so a batch never materializes as one unbounded
//! string first.

use crate::config::SinkConfig;
use crate::record::SinkRecord;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// One size-bounded JSON array of envelopes, sent as a single request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub body: String,
    pub entries: usize,
}

/// Intake envelope for one record value. Optional fields are omitted from
/// the JSON entirely, not serialized as null.
#[derive(Serialize)]
struct Envelope<'a> {
    message: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    ddsource: Option<&'a str>,
    ddtags: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hostname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service: Option<&'a str>,
}

/// Turns one topic's records into ready-to-post payloads.
#[derive(Debug)]
pub struct RecordSerializer {
    source: Option<String>,
    static_tags: Option<String>,
    hostname: Option<String>,
    service: Option<String>,
    max_payload_bytes: usize,
    max_batch_entries: usize,
}

impl RecordSerializer {
    #[must_use]
    pub fn new(config: &SinkConfig) -> Self {
        RecordSerializer {
            source: config.source.clone(),
            static_tags: config.static_tags(),
            hostname: config.hostname.clone(),
            service: config.service.clone(),
            max_payload_bytes: config.max_payload_bytes,
            max_batch_entries: config.max_batch_entries,
        }
    }

    /// Serializes one topic's records into ordered payloads.
    ///
    /// Records without a value are skipped. Payload boundaries are chosen so
    /// that concatenating the payloads' envelopes reproduces the input order
    /// exactly and no payload exceeds the byte budget or the entry count,
    /// with one exception: an envelope that alone exceeds the byte budget
    /// still ships as its own payload rather than being dropped.
    pub fn serialize(
        &self,
        topic: &str,
        records: &[SinkRecord],
    ) -> Result<Vec<Payload>, serde_json::Error> {
        let ddtags = match &self.static_tags {
            Some(tags) => format!("topic:{topic},{tags}"),
            None => format!("topic:{topic}"),
        };

        let mut payloads = Vec::new();
        let mut body = String::from("[");
        let mut entries = 0usize;

        for record in records {
            let Some(value) = record.value.as_ref() else {
                continue;
            };
            let envelope = serde_json::to_string(&Envelope {
                message: value,
                ddsource: self.source.as_deref(),
                ddtags: &ddtags,
                hostname: self.hostname.as_deref(),
                service: self.service.as_deref(),
            })?;

            // Projected final payload length: buffer so far, a separator if
            // the payload is non-empty, the envelope, the closing bracket.
            let projected = body.len() + usize::from(entries > 0) + envelope.len() + 1;
            if entries > 0
                && (projected > self.max_payload_bytes || entries >= self.max_batch_entries)
            {
                body.push(']');
                payloads.push(Payload { body, entries });
                body = String::from("[");
                entries = 0;
            }

            if entries == 0 && envelope.len() + 2 > self.max_payload_bytes {
                warn!(
                    "envelope of {} bytes for topic {} exceeds the {} byte payload limit, sending it alone",
                    envelope.len() + 2,
                    topic,
                    self.max_payload_bytes
                );
            }

            if entries > 0 {
                body.push(',');
            }
            body.push_str(&envelope);
            entries += 1;
        }

        if entries > 0 {
            body.push(']');
            payloads.push(Payload { body, entries });
        }
        Ok(payloads)
    }
}
