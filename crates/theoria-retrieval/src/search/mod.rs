//! Search backends: the native hybrid engine (storage-side vector, full-text
//! and keyword queries fused in memory) and the fallback engine (full scan,
//! in-memory scoring).

pub mod fallback;
pub mod native;

pub use fallback::FallbackSearchEngine;
pub use native::NativeSearchEngine;

use theoria_core::osis::{self, PositionSet};
use theoria_core::models::Candidate;
use theoria_core::traits::ISearchSession;
use theoria_observability::tracing_setup::spans::names;

/// Which engine serves a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchBackend {
    Native,
    Fallback,
}

impl SearchBackend {
    /// Native when the session can run vector and full-text queries right now.
    pub fn for_session(session: &dyn ISearchSession) -> Self {
        if session.supports_native_hybrid() {
            Self::Native
        } else {
            Self::Fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Fallback => "fallback",
        }
    }

    /// Name of the engine-level span.
    pub fn span_name(&self) -> &'static str {
        match self {
            Self::Native => names::NATIVE_SEARCH,
            Self::Fallback => names::FALLBACK_SEARCH,
        }
    }
}

/// OSIS filter shared by both engines. `None` means the candidate is dropped;
/// `Some(None)` means no anchor was requested.
pub(crate) fn osis_filter(candidate: &Candidate, anchor: Option<&PositionSet>) -> Option<Option<f64>> {
    let Some(anchor) = anchor else {
        return Some(None);
    };
    let passage_set = osis::expand(candidate.passage.osis_ref.as_deref()?);
    if !passage_set.intersects(anchor) {
        return None;
    }
    Some(Some(passage_set.distance_to(anchor)))
}
