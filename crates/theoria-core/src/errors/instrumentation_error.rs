/// Instrumentation sink errors. Never surfaced to search callers.
#[derive(Debug, thiserror::Error)]
pub enum InstrumentationError {
    #[error("sink rejected span {span}: {reason}")]
    SinkRejected { span: String, reason: String },
}
