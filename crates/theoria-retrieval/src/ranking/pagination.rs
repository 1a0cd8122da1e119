//! Cursor pagination over one ranked result set.

use theoria_core::models::{Page, SearchResult};

/// Slice `results` into a page.
///
/// `cursor` is the id of the last item of the previous page and the page
/// starts right after it. An unknown cursor yields an empty page. `limit`
/// defaults to everything that remains. Ranks are never renumbered.
pub fn paginate(results: Vec<SearchResult>, cursor: Option<&str>, limit: Option<usize>) -> Page {
    let start = match cursor {
        None => 0,
        Some(cursor) => match results.iter().position(|r| r.id == cursor) {
            Some(index) => index + 1,
            None => {
                return Page {
                    items: Vec::new(),
                    next_cursor: None,
                }
            }
        },
    };

    let remaining = results.len().saturating_sub(start);
    let take = limit.map_or(remaining, |l| l.min(remaining));
    let items: Vec<SearchResult> = results.into_iter().skip(start).take(take).collect();

    let next_cursor = if take > 0 && take < remaining {
        items.last().map(|r| r.id.clone())
    } else {
        None
    };

    Page { items, next_cursor }
}
