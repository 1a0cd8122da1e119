//! Text utilities shared by both engines: tokenization, term-count scoring,
//! snippets and highlight windows.

pub mod highlights;
pub mod tokenizer;

pub use highlights::{build_highlights, snippet};
pub use tokenizer::{lexical_score, tokenize};
