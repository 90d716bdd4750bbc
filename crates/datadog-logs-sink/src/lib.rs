// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Kafka Connect sink for Datadog logs.
//!
//! The pipeline groups records by topic and serializes each group into
//! gzipped JSON array payloads that stay under the intake limits. A
//! [`sink::LogsSinkTask`] drives it behind a single `write` call with an
//! at-least-once contract: after a retriable failure the host waits out the
//! returned backoff and redelivers the same records.

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_copy_implementations)]
#![deny(missing_debug_implementations)]
// TODO: Remove these lints over time as documentation is completed
#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

/// Grouping of records by topic
pub mod batcher;

/// Sink configuration and validation
pub mod config;

/// HTTP delivery to the logs intake
pub mod intake;

/// The record shape handed over by the host
pub mod record;

/// Backoff arithmetic for the retry budget
pub mod retry;

/// Envelope serialization and payload splitting
pub mod serializer;

/// The sink task and its retry state machine
pub mod sink;

/// One flush cycle, from grouped records to posted payloads
pub mod writer;

pub use config::{ConfigError, ProxyConfig, SinkConfig};
pub use intake::{DeliveryError, IntakeClient};
pub use record::SinkRecord;
pub use serializer::Payload;
pub use sink::{LogsSinkTask, SinkError};
pub use writer::LogsApiWriter;
