//! Structured log events for retrieval operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a completed hybrid search.
pub fn search_completed(backend: &str, result_count: usize, latency_ms: f64) {
    tracing::info!(
        event = "search_completed",
        backend = %backend,
        result_count = result_count,
        latency_ms = latency_ms,
        "hybrid search completed"
    );
}

/// Log a span the instrumentation sink refused.
pub fn span_dropped(span: &str, reason: &str) {
    tracing::warn!(
        event = "span_dropped",
        span = %span,
        reason = %reason,
        "instrumentation span dropped"
    );
}

/// Log a storage session opening.
pub fn session_opened(backend: &str, native_hybrid: bool) {
    tracing::info!(
        event = "session_opened",
        backend = %backend,
        native_hybrid = native_hybrid,
        "search session opened"
    );
}

/// Log a capability probe that failed; the session reports no native support.
pub fn capability_check_failed(backend: &str, reason: &str) {
    tracing::warn!(
        event = "capability_check_failed",
        backend = %backend,
        reason = %reason,
        "native capability check failed, falling back"
    );
}
