// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Groups incoming records by topic before serialization.

use crate::record::SinkRecord;
use std::collections::HashMap;

/// Key→batch map filled while records are distributed, drained once per
/// flush cycle.
///
/// Arrival order is preserved within a topic. The batcher never flushes on
/// its own; the writer drains every accumulated group at the end of each
/// cycle, so after a cycle the map is always empty.
#[derive(Debug, Default)]
pub struct RecordBatcher {
    batches: HashMap<String, Vec<SinkRecord>>,
}

impl RecordBatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: SinkRecord) {
        self.batches
            .entry(record.topic.clone())
            .or_default()
            .push(record);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Takes every accumulated (topic, batch) pair, leaving the map empty.
    pub fn drain(&mut self) -> Vec<(String, Vec<SinkRecord>)> {
        self.batches.drain().collect()
    }
}
