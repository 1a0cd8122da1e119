mod annotation;
mod candidate;
mod request;
mod result;
mod span_record;

pub use annotation::Annotation;
pub use candidate::{Candidate, Document, KeywordQuery, Passage};
pub use request::{SearchFilters, SearchMode, SearchRequest};
pub use result::{Page, SearchResult};
pub use span_record::{AttributeValue, SpanRecord};
