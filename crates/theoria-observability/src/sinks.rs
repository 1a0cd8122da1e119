//! Instrumentation sinks for retrieval spans.

use std::collections::VecDeque;
use std::sync::Mutex;

use theoria_core::errors::{InstrumentationError, TheoriaResult};
use theoria_core::models::SpanRecord;
use theoria_core::traits::IInstrumentationSink;

/// Forwards every span to the `tracing` subscriber as a single event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl IInstrumentationSink for TracingSink {
    fn record_span(&self, span: &SpanRecord) -> TheoriaResult<()> {
        let attributes = serde_json::to_string(&span.attributes)?;
        tracing::info!(
            event = "span_recorded",
            span = %span.name,
            attributes = %attributes,
            "retrieval span"
        );
        Ok(())
    }
}

/// Keeps recorded spans in memory, oldest first.
///
/// Bounded: once `max_spans` is reached the oldest span is evicted.
#[derive(Debug)]
pub struct RecordingSink {
    spans: Mutex<VecDeque<SpanRecord>>,
    max_spans: usize,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    /// Create with a custom capacity.
    pub fn with_capacity(max_spans: usize) -> Self {
        Self {
            spans: Mutex::new(VecDeque::new()),
            max_spans: max_spans.max(1),
        }
    }

    /// Snapshot of every retained span.
    pub fn spans(&self) -> Vec<SpanRecord> {
        match self.spans.lock() {
            Ok(spans) => spans.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Retained spans with the given name.
    pub fn spans_named(&self, name: &str) -> Vec<SpanRecord> {
        self.spans().into_iter().filter(|s| s.name == name).collect()
    }

    pub fn len(&self) -> usize {
        self.spans().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut spans) = self.spans.lock() {
            spans.clear();
        }
    }
}

impl IInstrumentationSink for RecordingSink {
    fn record_span(&self, span: &SpanRecord) -> TheoriaResult<()> {
        let mut spans = self
            .spans
            .lock()
            .map_err(|e| InstrumentationError::SinkRejected {
                span: span.name.clone(),
                reason: e.to_string(),
            })?;
        if spans.len() >= self.max_spans {
            spans.pop_front();
        }
        spans.push_back(span.clone());
        tracing::debug!(
            event = "span_recorded",
            span = %span.name,
            retained = spans.len(),
            "span recorded"
        );
        Ok(())
    }
}
