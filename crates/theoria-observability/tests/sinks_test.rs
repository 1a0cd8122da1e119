use theoria_core::models::{AttributeValue, SpanRecord};
use theoria_core::traits::IInstrumentationSink;
use theoria_observability::tracing_setup::spans::names;
use theoria_observability::{RecordingSink, TracingSink};

fn span(name: &str, hits: usize) -> SpanRecord {
    let mut span = SpanRecord::new(name);
    span.set("hit_count", hits);
    span
}

#[test]
fn recording_sink_keeps_spans_in_order() {
    let sink = RecordingSink::new();
    sink.record_span(&span(names::FALLBACK_SEARCH, 1)).unwrap();
    sink.record_span(&span(names::HYBRID_SEARCH, 2)).unwrap();

    let spans = sink.spans();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].name, names::FALLBACK_SEARCH);
    assert_eq!(spans[1].get("hit_count"), Some(&AttributeValue::Int(2)));
    assert_eq!(sink.spans_named(names::HYBRID_SEARCH).len(), 1);
}

#[test]
fn recording_sink_evicts_oldest_at_capacity() {
    let sink = RecordingSink::with_capacity(2);
    for hits in 0..3 {
        sink.record_span(&span(names::NATIVE_SEARCH, hits)).unwrap();
    }
    let retained: Vec<_> = sink
        .spans()
        .iter()
        .map(|s| s.get("hit_count").cloned())
        .collect();
    assert_eq!(
        retained,
        vec![Some(AttributeValue::Int(1)), Some(AttributeValue::Int(2))]
    );
}

#[test]
fn recording_sink_clear_empties() {
    let sink = RecordingSink::new();
    sink.record_span(&span(names::NATIVE_SEARCH, 1)).unwrap();
    assert!(!sink.is_empty());
    sink.clear();
    assert!(sink.is_empty());
}

#[test]
fn tracing_sink_accepts_spans() {
    let sink = TracingSink;
    assert!(sink.record_span(&span(names::HYBRID_SEARCH, 0)).is_ok());
}

#[test]
fn tracing_init_is_idempotent() {
    theoria_observability::tracing_setup::init_tracing_with_filter("debug");
    theoria_observability::tracing_setup::init_tracing_with_filter("info");
}
