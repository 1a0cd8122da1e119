// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "theoria.db";
pub const DEFAULT_NATIVE_HYBRID: bool = true;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_CACHE_SIZE: i64 = -64_000; // 64 MB (negative = KB)

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashing";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;

// --- Retrieval ---
pub const DEFAULT_K: usize = 10;
pub const DEFAULT_SNIPPET_MAX_LENGTH: usize = 240;
pub const DEFAULT_HIGHLIGHT_WINDOW: usize = 160;
pub const DEFAULT_MAX_HIGHLIGHTS: usize = 3;
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 4;
pub const DEFAULT_KEYWORD_MATCH_WEIGHT: f64 = 0.5;
pub const DEFAULT_FALLBACK_OSIS_BONUS: f64 = 5.0;
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.55;
pub const DEFAULT_LEXICAL_WEIGHT: f64 = 0.35;
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.10;
pub const DEFAULT_NATIVE_OSIS_BONUS: f64 = 0.2;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
