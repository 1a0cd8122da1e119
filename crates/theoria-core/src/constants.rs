/// Theoria system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cache status reported by retrieval instrumentation. The engine never caches.
pub const CACHE_STATUS_MISS: &str = "miss";

/// Key under which annotations are attached to `SearchResult::meta`.
pub const META_ANNOTATIONS: &str = "annotations";

/// Key under which the document title is attached to `SearchResult::meta`.
pub const META_TITLE: &str = "title";

/// Ellipsis marker appended to truncated snippets.
pub const ELLIPSIS: &str = "...";
