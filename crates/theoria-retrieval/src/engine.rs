//! RetrievalEngine: the entry point. Picks a backend per request, times it,
//! and reports both spans.

use std::time::Instant;

use theoria_core::config::RetrievalConfig;
use theoria_core::constants::CACHE_STATUS_MISS;
use theoria_core::errors::TheoriaResult;
use theoria_core::models::{Page, SearchRequest, SearchResult};
use theoria_core::traits::{
    IAnnotationStore, IEmbeddingService, IInstrumentationSink, ISearchSession,
};
use theoria_observability::tracing_setup::events;
use tracing::field::Empty;
use tracing::{info_span, warn};

use crate::instrumentation;
use crate::ranking::paginate;
use crate::search::{FallbackSearchEngine, NativeSearchEngine, SearchBackend};

/// Dispatches hybrid search requests to the native or fallback engine.
///
/// Holds no per-request state: the same engine may serve any number of
/// sessions concurrently.
pub struct RetrievalEngine<'a> {
    config: RetrievalConfig,
    embeddings: Option<&'a dyn IEmbeddingService>,
    annotations: Option<&'a dyn IAnnotationStore>,
    sink: Option<&'a dyn IInstrumentationSink>,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(config: RetrievalConfig) -> Self {
        Self {
            config,
            embeddings: None,
            annotations: None,
            sink: None,
        }
    }

    pub fn with_embeddings(mut self, embeddings: &'a dyn IEmbeddingService) -> Self {
        self.embeddings = Some(embeddings);
        self
    }

    pub fn with_annotations(mut self, annotations: &'a dyn IAnnotationStore) -> Self {
        self.annotations = Some(annotations);
        self
    }

    pub fn with_sink(mut self, sink: &'a dyn IInstrumentationSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run `request` against `session` and return the ranked results.
    ///
    /// Storage, embedding and annotation failures propagate unchanged.
    /// Instrumentation is best effort.
    pub fn hybrid_search(
        &self,
        session: &dyn ISearchSession,
        request: &SearchRequest,
    ) -> TheoriaResult<Vec<SearchResult>> {
        let backend = SearchBackend::for_session(session);
        let filters = &request.filters;
        let span = info_span!(
            "retriever.hybrid_search",
            backend = backend.as_str(),
            cache_status = CACHE_STATUS_MISS,
            k = request.k,
            limit = request.limit,
            cursor = request.cursor.as_deref(),
            mode = request.mode.map(|m| m.as_str()),
            query = request.query.as_deref(),
            osis = request.osis.as_deref(),
            filter.collection = filters.collection.as_deref(),
            filter.author = filters.author.as_deref(),
            filter.source_type = filters.source_type.as_deref(),
            filter.theological_tradition = filters.theological_tradition.as_deref(),
            filter.topic_domain = filters.topic_domain.as_deref(),
            result_count = Empty,
            latency_ms = Empty
        );
        let _guard = span.enter();

        let started = Instant::now();
        let outcome = match backend {
            SearchBackend::Native => {
                NativeSearchEngine::new(&self.config, self.embeddings, self.annotations)
                    .search(session, request)
            }
            SearchBackend::Fallback => {
                FallbackSearchEngine::new(&self.config, self.annotations).search(session, request)
            }
        };
        let latency_ms = started.elapsed().as_secs_f64() * 1_000.0;

        let results = match outcome {
            Ok(results) => results,
            Err(error) => {
                warn!(backend = backend.as_str(), error = %error, "hybrid search failed");
                return Err(error);
            }
        };

        span.record("result_count", results.len());
        span.record("latency_ms", latency_ms);
        instrumentation::emit(
            self.sink,
            &instrumentation::engine_span(backend, results.len(), latency_ms),
        );
        instrumentation::emit(
            self.sink,
            &instrumentation::request_span(request, backend, results.len(), latency_ms),
        );
        events::search_completed(backend.as_str(), results.len(), latency_ms);

        Ok(results)
    }

    /// [`hybrid_search`](Self::hybrid_search) followed by cursor pagination
    /// using the request's `cursor` and `limit`.
    pub fn hybrid_search_page(
        &self,
        session: &dyn ISearchSession,
        request: &SearchRequest,
    ) -> TheoriaResult<Page> {
        let results = self.hybrid_search(session, request)?;
        Ok(paginate(
            results,
            request.cursor.as_deref(),
            request.limit,
        ))
    }
}
