use std::collections::HashMap;

use crate::errors::TheoriaResult;
use crate::models::Annotation;

/// Read access to user annotations.
pub trait IAnnotationStore: Send + Sync {
    /// Annotations grouped by document id. Documents without annotations may be absent.
    fn load_for_documents(
        &self,
        document_ids: &[String],
    ) -> TheoriaResult<HashMap<String, Vec<Annotation>>>;
}
