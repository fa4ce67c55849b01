//! Text splitting strategies used before embedding.
//!
//! Two strategies are available: `recursive` walks a list of separators
//! (paragraph, line, word, character) until every piece fits, and `char`
//! splits on blank lines and only falls back to word boundaries for
//! paragraphs that are too long. Both share the same greedy merge step,
//! which keeps up to `overlap` characters of context between neighbours.
//!
//! Sizes are counted in characters, not bytes.

mod helpers;
mod strategies;
mod types;

pub use strategies::{CharacterSplitter, RecursiveSplitter, TextSplitter};
pub use types::TextSplitterKind;
