mod annotation_store;
mod embedding;
mod instrumentation;
mod search_session;

pub use annotation_store::IAnnotationStore;
pub use embedding::IEmbeddingService;
pub use instrumentation::IInstrumentationSink;
pub use search_session::ISearchSession;
