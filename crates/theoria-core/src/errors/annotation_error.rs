/// Annotation store errors.
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("annotation store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("malformed annotation {annotation_id}: {reason}")]
    Malformed { annotation_id: String, reason: String },
}
