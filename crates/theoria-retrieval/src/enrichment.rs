//! Annotation enrichment: one batched store lookup per search, keyed by the
//! documents that survived truncation.

use std::collections::HashMap;

use theoria_core::constants::META_ANNOTATIONS;
use theoria_core::errors::TheoriaResult;
use theoria_core::models::{Annotation, SearchResult};
use theoria_core::traits::IAnnotationStore;
use tracing::debug;

/// Attaches annotations to ranked results.
pub struct AnnotationEnricher<'a> {
    store: Option<&'a dyn IAnnotationStore>,
}

impl<'a> AnnotationEnricher<'a> {
    pub fn new(store: Option<&'a dyn IAnnotationStore>) -> Self {
        Self { store }
    }

    /// Annotations for the given documents, grouped by document id.
    pub fn load_for_documents(
        &self,
        document_ids: &[String],
    ) -> TheoriaResult<HashMap<String, Vec<Annotation>>> {
        match self.store {
            Some(store) if !document_ids.is_empty() => store.load_for_documents(document_ids),
            _ => Ok(HashMap::new()),
        }
    }

    /// Set `meta["annotations"]` on every result whose passage has annotations.
    /// Results without annotations get no key at all.
    pub fn enrich(&self, results: &mut [SearchResult]) -> TheoriaResult<()> {
        if self.store.is_none() || results.is_empty() {
            return Ok(());
        }

        let mut document_ids: Vec<String> = Vec::new();
        for result in results.iter() {
            if !document_ids.contains(&result.document_id) {
                document_ids.push(result.document_id.clone());
            }
        }

        let by_document = self.load_for_documents(&document_ids)?;
        let by_passage = index_by_passage(&by_document);
        debug!(
            documents = document_ids.len(),
            annotated_passages = by_passage.len(),
            "loaded annotations"
        );

        for result in results.iter_mut() {
            let Some(passage_id) = result.passage_id.as_deref() else {
                continue;
            };
            if let Some(annotations) = by_passage.get(passage_id) {
                result.meta.insert(
                    META_ANNOTATIONS.to_string(),
                    serde_json::to_value(annotations)?,
                );
            }
        }
        Ok(())
    }
}

/// Regroup per-document annotations by passage id. An annotation attached to
/// several passages appears under each of them. Each list is ordered by
/// creation time, then id.
pub fn index_by_passage(
    mapping: &HashMap<String, Vec<Annotation>>,
) -> HashMap<String, Vec<Annotation>> {
    let mut index: HashMap<String, Vec<Annotation>> = HashMap::new();
    for annotations in mapping.values() {
        for annotation in annotations {
            for passage_id in &annotation.passage_ids {
                index
                    .entry(passage_id.clone())
                    .or_default()
                    .push(annotation.clone());
            }
        }
    }
    for annotations in index.values_mut() {
        annotations.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        annotations.dedup_by(|a, b| a.id == b.id);
    }
    index
}
