use theoria_core::errors::*;

#[test]
fn storage_error_converts_to_theoria_error() {
    let storage_err = StorageError::SqliteError {
        message: "disk full".into(),
    };
    let err: TheoriaError = storage_err.into();
    assert!(matches!(err, TheoriaError::StorageError(_)));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn embedding_error_converts_to_theoria_error() {
    let emb_err = EmbeddingError::DimensionMismatch {
        expected: 256,
        actual: 384,
    };
    let err: TheoriaError = emb_err.into();
    assert!(matches!(err, TheoriaError::EmbeddingError(_)));
    let msg = err.to_string();
    assert!(msg.contains("256"));
    assert!(msg.contains("384"));
}

#[test]
fn unsupported_query_names_backend_and_query() {
    let err = StorageError::UnsupportedQuery {
        backend: "sqlite".into(),
        query: "vector".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("sqlite"));
    assert!(msg.contains("vector"));
}

#[test]
fn instrumentation_error_carries_span_name() {
    let err: TheoriaError = InstrumentationError::SinkRejected {
        span: "retriever.hybrid_search".into(),
        reason: "exporter offline".into(),
    }
    .into();
    assert!(err.to_string().contains("retriever.hybrid_search"));
}

#[test]
fn annotation_error_converts_to_theoria_error() {
    let err: TheoriaError = AnnotationError::StoreUnavailable {
        reason: "timeout".into(),
    }
    .into();
    assert!(matches!(err, TheoriaError::AnnotationError(_)));
}
