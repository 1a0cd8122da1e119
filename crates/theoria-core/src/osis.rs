//! OSIS reference resolution: verse-position sets, intersection, and distance.
//!
//! A position is `book * 1_000_000 + chapter * 1_000 + verse`, which orders every
//! verse canonically without a versification table. A reference expands to a
//! sorted list of inclusive position intervals, so a chapter-spanning range
//! like `John.3.16-John.4.2` is a single interval.
//!
//! Malformed references expand to the empty set. Nothing here returns an error:
//! references arrive as user free text and only ever act as filters.

use std::ops::RangeInclusive;

/// A verse position in canonical order.
pub type Position = u64;

const BOOK_STRIDE: Position = 1_000_000;
const CHAPTER_STRIDE: Position = 1_000;
const MAX_CHAPTER: u32 = 999;
const MAX_VERSE: u32 = 999;

/// OSIS book identifiers in canonical order (Protestant canon).
const BOOKS: &[&str] = &[
    "Gen", "Exod", "Lev", "Num", "Deut", "Josh", "Judg", "Ruth", "1Sam", "2Sam", "1Kgs", "2Kgs",
    "1Chr", "2Chr", "Ezra", "Neh", "Esth", "Job", "Ps", "Prov", "Eccl", "Song", "Isa", "Jer",
    "Lam", "Ezek", "Dan", "Hos", "Joel", "Amos", "Obad", "Jonah", "Mic", "Nah", "Hab", "Zeph",
    "Hag", "Zech", "Mal", "Matt", "Mark", "Luke", "John", "Acts", "Rom", "1Cor", "2Cor", "Gal",
    "Eph", "Phil", "Col", "1Thess", "2Thess", "1Tim", "2Tim", "Titus", "Phlm", "Heb", "Jas",
    "1Pet", "2Pet", "1John", "2John", "3John", "Jude", "Rev",
];

/// The set of verse positions covered by a reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionSet {
    /// Sorted, non-overlapping, non-adjacent intervals.
    ranges: Vec<RangeInclusive<Position>>,
}

impl PositionSet {
    fn from_ranges(mut ranges: Vec<RangeInclusive<Position>>) -> Self {
        ranges.sort_by_key(|r| *r.start());
        let mut merged: Vec<RangeInclusive<Position>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if *range.start() <= last.end().saturating_add(1) => {
                    if range.end() > last.end() {
                        *last = *last.start()..=*range.end();
                    }
                }
                _ => merged.push(range),
            }
        }
        Self { ranges: merged }
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.ranges.iter().any(|r| r.contains(&position))
    }

    pub fn ranges(&self) -> &[RangeInclusive<Position>] {
        &self.ranges
    }

    /// Lowest and highest covered positions.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let first = self.ranges.first()?;
        let last = self.ranges.last()?;
        Some((*first.start(), *last.end()))
    }

    pub fn intersects(&self, other: &PositionSet) -> bool {
        self.ranges.iter().any(|a| {
            other
                .ranges
                .iter()
                .any(|b| a.start() <= b.end() && b.start() <= a.end())
        })
    }

    /// Smallest positional gap between the two sets: `Some(0)` when they
    /// intersect, `None` when either is empty.
    pub fn gap(&self, other: &PositionSet) -> Option<Position> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let mut best = Position::MAX;
        for a in &self.ranges {
            for b in &other.ranges {
                let gap = if a.end() < b.start() {
                    b.start() - a.end()
                } else if b.end() < a.start() {
                    a.start() - b.end()
                } else {
                    0
                };
                best = best.min(gap);
            }
        }
        Some(best)
    }

    /// 0.0 on intersection, otherwise the gap measured in chapters
    /// (verse steps count a thousandth). Infinite when either set is empty.
    pub fn distance_to(&self, other: &PositionSet) -> f64 {
        match self.gap(other) {
            Some(gap) => gap as f64 / CHAPTER_STRIDE as f64,
            None => f64::INFINITY,
        }
    }
}

/// A single parsed endpoint: book index, chapter, optional verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    book: usize,
    chapter: Option<u32>,
    verse: Option<u32>,
}

impl Anchor {
    fn first(&self) -> Position {
        position(
            self.book,
            self.chapter.unwrap_or(1),
            self.verse.unwrap_or(1),
        )
    }

    fn last(&self) -> Position {
        position(
            self.book,
            self.chapter.unwrap_or(MAX_CHAPTER),
            self.verse.unwrap_or(MAX_VERSE),
        )
    }
}

fn position(book: usize, chapter: u32, verse: u32) -> Position {
    (book as Position + 1) * BOOK_STRIDE
        + Position::from(chapter) * CHAPTER_STRIDE
        + Position::from(verse)
}

fn book_index(name: &str) -> Option<usize> {
    BOOKS.iter().position(|b| b.eq_ignore_ascii_case(name))
}

fn parse_number(raw: &str, max: u32) -> Option<u32> {
    let n: u32 = raw.parse().ok()?;
    (1..=max).contains(&n).then_some(n)
}

/// Parse `Book`, `Book.C` or `Book.C.V`, ignoring an optional `Work:` prefix
/// and any `!grain` suffix.
fn parse_anchor(raw: &str) -> Option<Anchor> {
    let raw = raw.rsplit(':').next().unwrap_or(raw);
    let raw = raw.split('!').next().unwrap_or(raw);
    let mut parts = raw.split('.');
    let book = book_index(parts.next()?)?;
    let chapter = match parts.next() {
        Some(c) => Some(parse_number(c, MAX_CHAPTER)?),
        None => None,
    };
    let verse = match parts.next() {
        Some(v) => Some(parse_number(v, MAX_VERSE)?),
        None => None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Anchor {
        book,
        chapter,
        verse,
    })
}

/// Parse the end of a range. Accepts a full anchor or a short form relative to
/// `start`: `18` (verse, or chapter when `start` has no verse) or `4.2`.
fn parse_range_end(raw: &str, start: &Anchor) -> Option<Anchor> {
    if let Some(anchor) = parse_anchor(raw) {
        return Some(anchor);
    }
    let numbers: Vec<&str> = raw.split('.').collect();
    match numbers.as_slice() {
        [n] if start.verse.is_some() => Some(Anchor {
            verse: Some(parse_number(n, MAX_VERSE)?),
            ..*start
        }),
        [n] if start.chapter.is_some() => Some(Anchor {
            chapter: Some(parse_number(n, MAX_CHAPTER)?),
            verse: None,
            ..*start
        }),
        [c, v] => Some(Anchor {
            book: start.book,
            chapter: Some(parse_number(c, MAX_CHAPTER)?),
            verse: Some(parse_number(v, MAX_VERSE)?),
        }),
        _ => None,
    }
}

fn parse_segment(segment: &str) -> Option<RangeInclusive<Position>> {
    match segment.split_once('-') {
        None => {
            let anchor = parse_anchor(segment)?;
            Some(anchor.first()..=anchor.last())
        }
        Some((from, to)) => {
            let start = parse_anchor(from)?;
            let end = parse_range_end(to, &start)?;
            let (lo, hi) = (start.first(), end.last());
            (lo <= hi).then_some(lo..=hi)
        }
    }
}

/// Expand a reference (verse, chapter, book, range, or a list of those
/// separated by whitespace, commas or semicolons) into its position set.
///
/// A list is only valid if every segment parses; otherwise the set is empty.
pub fn expand(reference: &str) -> PositionSet {
    let segments: Vec<&str> = reference
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|s| !s.is_empty())
        .collect();
    let ranges: Option<Vec<_>> = segments.iter().map(|s| parse_segment(s)).collect();
    match ranges {
        Some(ranges) => PositionSet::from_ranges(ranges),
        None => PositionSet::default(),
    }
}

/// Whether two references share at least one verse.
pub fn intersects(a: &str, b: &str) -> bool {
    expand(a).intersects(&expand(b))
}

/// 0.0 when the references intersect, positive and growing with separation otherwise.
pub fn distance(a: &str, b: &str) -> f64 {
    expand(a).distance_to(&expand(b))
}
