// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

/// One record handed to the sink by the host framework.
///
/// The value arrives already converted to JSON by the host's converter; a
/// record with no value is skipped by the pipeline without error. Partition
/// and offset are carried for diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkRecord {
    /// Source topic, used as the grouping key.
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: Option<String>,
    pub value: Option<Value>,
}

impl SinkRecord {
    #[must_use]
    pub fn new(
        topic: impl Into<String>,
        partition: i32,
        key: Option<String>,
        value: Option<Value>,
        offset: i64,
    ) -> Self {
        SinkRecord {
            topic: topic.into(),
            partition,
            offset,
            key,
            value,
        }
    }
}
