//! Splitting strategies: recursive (separator cascade) and char (blank lines).

use embedkit_core::ExtractError;

use super::helpers::{char_len, merge_splits, split_keep_separator, split_words};
use super::types::TextSplitterKind;

/// Separators tried in order by the recursive strategy. The empty separator
/// means "split into characters".
const RECURSIVE_SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

/// Fixed separator of the char strategy, kept on the following paragraph.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

// ── Dispatch ────────────────────────────────────────────────────────────────

/// A configured splitter, selected by `TextSplitterKind`.
#[derive(Debug, Clone)]
pub enum TextSplitter {
    Char(CharacterSplitter),
    Recursive(RecursiveSplitter),
}

impl TextSplitter {
    /// Build the strategy named by `kind`. `chunk_size` must be positive and
    /// at least `overlap`.
    pub fn new(
        kind: TextSplitterKind,
        chunk_size: usize,
        overlap: usize,
    ) -> Result<Self, ExtractError> {
        if chunk_size == 0 {
            return Err(ExtractError::UnsupportedConfig(
                "chunk_size must be greater than zero".into(),
            ));
        }
        if overlap > chunk_size {
            return Err(ExtractError::UnsupportedConfig(format!(
                "overlap ({overlap}) is larger than chunk_size ({chunk_size})"
            )));
        }
        Ok(match kind {
            TextSplitterKind::Char => TextSplitter::Char(CharacterSplitter { chunk_size, overlap }),
            TextSplitterKind::Recursive => {
                TextSplitter::Recursive(RecursiveSplitter { chunk_size, overlap })
            }
        })
    }

    pub fn kind(&self) -> TextSplitterKind {
        match self {
            TextSplitter::Char(_) => TextSplitterKind::Char,
            TextSplitter::Recursive(_) => TextSplitterKind::Recursive,
        }
    }

    /// Split `text` into ordered, trimmed, non-empty chunks.
    pub fn split(&self, text: &str) -> Vec<String> {
        match self {
            TextSplitter::Char(s) => s.split(text),
            TextSplitter::Recursive(s) => s.split(text),
        }
    }
}

// ── Recursive strategy ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl RecursiveSplitter {
    pub fn split(&self, text: &str) -> Vec<String> {
        self.split_with(text, RECURSIVE_SEPARATORS)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // Use the first separator that occurs in the text; finer ones are
        // kept for pieces that are still too long.
        let mut separator = separators.last().copied().unwrap_or("");
        let mut finer: &[&str] = &[];
        for (i, &sep) in separators.iter().enumerate() {
            if sep.is_empty() {
                separator = sep;
                break;
            }
            if text.contains(sep) {
                separator = sep;
                finer = &separators[i + 1..];
                break;
            }
        }

        let mut chunks = Vec::new();
        let mut fitting: Vec<String> = Vec::new();

        for piece in split_keep_separator(text, separator) {
            if char_len(&piece) < self.chunk_size {
                fitting.push(piece);
                continue;
            }
            if !fitting.is_empty() {
                chunks.extend(merge_splits(&fitting, "", self.chunk_size, self.overlap));
                fitting.clear();
            }
            if finer.is_empty() {
                let trimmed = piece.trim();
                if !trimmed.is_empty() {
                    chunks.push(trimmed.to_string());
                }
            } else {
                chunks.extend(self.split_with(&piece, finer));
            }
        }

        if !fitting.is_empty() {
            chunks.extend(merge_splits(&fitting, "", self.chunk_size, self.overlap));
        }
        chunks
    }
}

// ── Char strategy ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CharacterSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl CharacterSplitter {
    pub fn split(&self, text: &str) -> Vec<String> {
        let paragraphs = split_keep_separator(text, PARAGRAPH_SEPARATOR);
        let mut chunks = Vec::new();
        let mut fitting: Vec<&str> = Vec::new();

        for paragraph in &paragraphs {
            if char_len(paragraph) <= self.chunk_size {
                fitting.push(paragraph);
                continue;
            }
            // Paragraph too long on its own: flush what we have, then fall
            // back to word boundaries for this paragraph.
            if !fitting.is_empty() {
                chunks.extend(merge_splits(&fitting, "", self.chunk_size, self.overlap));
                fitting.clear();
            }
            let words = split_words(paragraph, self.chunk_size);
            chunks.extend(merge_splits(&words, "", self.chunk_size, self.overlap));
        }

        if !fitting.is_empty() {
            chunks.extend(merge_splits(&fitting, "", self.chunk_size, self.overlap));
        }
        chunks
    }
}
