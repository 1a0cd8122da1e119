use crate::errors::TheoriaResult;
use crate::models::SpanRecord;

/// Destination for retrieval spans. Errors are logged by the caller, never propagated.
pub trait IInstrumentationSink: Send + Sync {
    fn record_span(&self, span: &SpanRecord) -> TheoriaResult<()>;
}
