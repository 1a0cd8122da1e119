//! Span records handed to the instrumentation sink.
//!
//! Delivery is best effort: a sink failure is logged and never reaches the
//! caller.

use theoria_core::constants::CACHE_STATUS_MISS;
use theoria_core::models::{SearchRequest, SpanRecord};
use theoria_core::traits::IInstrumentationSink;
use theoria_observability::tracing_setup::events;
use theoria_observability::tracing_setup::spans::names;

use crate::search::SearchBackend;

/// The dispatcher span for one request. Absent request fields are omitted.
pub fn request_span(
    request: &SearchRequest,
    backend: SearchBackend,
    result_count: usize,
    latency_ms: f64,
) -> SpanRecord {
    let mut span = SpanRecord::new(names::HYBRID_SEARCH);
    span.set("backend", backend.as_str());
    span.set("cache_status", CACHE_STATUS_MISS);
    span.set("k", request.k);
    span.set_opt("limit", request.limit);
    span.set_opt("cursor", request.cursor.as_deref());
    span.set_opt("mode", request.mode.map(|m| m.as_str()));
    span.set_opt("query", request.query.as_deref());
    span.set_opt("osis", request.osis.as_deref());
    for (name, value) in request.filters.active() {
        span.set(format!("filter.{name}"), value);
    }
    span.set("result_count", result_count);
    span.set("latency_ms", latency_ms);
    span
}

/// The engine-level span: how many hits the engine produced and how long it took.
pub fn engine_span(backend: SearchBackend, hit_count: usize, latency_ms: f64) -> SpanRecord {
    let mut span = SpanRecord::new(backend.span_name());
    span.set("hit_count", hit_count);
    span.set("latency_ms", latency_ms);
    span
}

/// Hand `span` to the sink, logging and discarding any failure.
pub fn emit(sink: Option<&dyn IInstrumentationSink>, span: &SpanRecord) {
    let Some(sink) = sink else {
        return;
    };
    if let Err(error) = sink.record_span(span) {
        events::span_dropped(&span.name, &error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theoria_core::models::{AttributeValue, SearchFilters, SearchMode};

    #[test]
    fn request_span_omits_absent_fields() {
        let request = SearchRequest::for_query("grace");
        let span = request_span(&request, SearchBackend::Fallback, 2, 1.5);
        assert_eq!(span.name, names::HYBRID_SEARCH);
        let keys: Vec<&str> = span.attributes.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["backend", "cache_status", "k", "latency_ms", "query", "result_count"]
        );
        assert_eq!(span.get("backend"), Some(&AttributeValue::Str("fallback".into())));
        assert_eq!(span.get("cache_status"), Some(&AttributeValue::Str("miss".into())));
    }

    #[test]
    fn request_span_records_every_present_field() {
        let request = SearchRequest::for_query("grace")
            .with_osis("John.3.16")
            .with_mode(SearchMode::Semantic)
            .with_page(Some("p1".into()), Some(5))
            .with_filters(SearchFilters {
                collection: Some("Patristics".into()),
                topic_domain: Some("soteriology".into()),
                ..Default::default()
            });
        let span = request_span(&request, SearchBackend::Native, 0, 0.0);
        assert_eq!(span.get("limit"), Some(&AttributeValue::Int(5)));
        assert_eq!(span.get("cursor"), Some(&AttributeValue::Str("p1".into())));
        assert_eq!(span.get("mode"), Some(&AttributeValue::Str("semantic".into())));
        assert_eq!(span.get("osis"), Some(&AttributeValue::Str("John.3.16".into())));
        assert_eq!(
            span.get("filter.collection"),
            Some(&AttributeValue::Str("Patristics".into()))
        );
        assert_eq!(
            span.get("filter.topic_domain"),
            Some(&AttributeValue::Str("soteriology".into()))
        );
        assert!(span.get("filter.author").is_none());
    }

    #[test]
    fn engine_span_is_named_by_backend() {
        let span = engine_span(SearchBackend::Native, 3, 2.0);
        assert_eq!(span.name, names::NATIVE_SEARCH);
        assert_eq!(span.get("hit_count"), Some(&AttributeValue::Int(3)));
        assert_eq!(span.attributes.len(), 2);
    }
}
