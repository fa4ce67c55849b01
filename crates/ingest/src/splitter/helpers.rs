//! Splitting and merging primitives shared by the strategies.

use std::collections::VecDeque;

use tracing::debug;

/// Length in characters.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split `text` on `separator`, keeping each separator attached to the start
/// of the piece that follows it. An empty separator yields one piece per
/// character. Empty pieces are dropped.
pub(crate) fn split_keep_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices(separator) {
        if idx > start {
            pieces.push(text[start..idx].to_string());
        }
        start = idx;
    }
    if start < text.len() {
        pieces.push(text[start..].to_string());
    }
    pieces
}

/// Break `text` into words, each keeping the whitespace in front of it, so
/// the pieces concatenate back to `text`. A piece longer than `max_len`
/// characters has its leading whitespace split off and its word cut every
/// `max_len` characters.
pub(crate) fn split_words(text: &str, max_len: usize) -> Vec<&str> {
    let max_len = max_len.max(1);
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_word = false;
    for (idx, c) in text.char_indices() {
        let is_space = c.is_whitespace();
        if is_space && in_word {
            push_word(&mut pieces, &text[start..idx], max_len);
            start = idx;
        }
        in_word = !is_space;
    }
    if start < text.len() {
        push_word(&mut pieces, &text[start..], max_len);
    }
    pieces
}

fn push_word<'a>(pieces: &mut Vec<&'a str>, piece: &'a str, max_len: usize) {
    if char_len(piece) <= max_len {
        pieces.push(piece);
        return;
    }

    let word_start = piece
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(piece.len());
    if word_start > 0 {
        pieces.push(&piece[..word_start]);
    }

    let word = &piece[word_start..];
    let mut cut = 0;
    for (n, (idx, _)) in word.char_indices().enumerate() {
        if n > 0 && n % max_len == 0 {
            pieces.push(&word[cut..idx]);
            cut = idx;
        }
    }
    if cut < word.len() {
        pieces.push(&word[cut..]);
    }
}

/// Separator cost of appending one more piece to a chunk of `pieces` pieces.
fn joiner_len(pieces: usize, separator_len: usize) -> usize {
    if pieces > 0 { separator_len } else { 0 }
}

/// Join pieces with `separator` and trim; `None` if nothing is left.
fn join_pieces(pieces: &VecDeque<&str>, separator: &str) -> Option<String> {
    let joined = pieces.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Greedily combine `splits` (joined by `separator`) into chunks of at most
/// `chunk_size` characters. After a chunk is emitted, pieces are dropped from
/// its front until at most `overlap` characters remain and the next piece
/// fits, so consecutive chunks share that tail.
///
/// A single piece longer than `chunk_size` is emitted on its own.
pub(crate) fn merge_splits<S: AsRef<str>>(
    splits: &[S],
    separator: &str,
    chunk_size: usize,
    overlap: usize,
) -> Vec<String> {
    let separator_len = char_len(separator);
    let mut chunks = Vec::new();
    let mut current: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for split in splits {
        let split = split.as_ref();
        let len = char_len(split);

        if total + len + joiner_len(current.len(), separator_len) > chunk_size {
            if total > chunk_size {
                debug!(total, chunk_size, "emitting chunk longer than chunk_size");
            }
            if !current.is_empty() {
                if let Some(chunk) = join_pieces(&current, separator) {
                    chunks.push(chunk);
                }
                while total > overlap
                    || (total > 0
                        && total + len + joiner_len(current.len(), separator_len) > chunk_size)
                {
                    let Some(first) = current.pop_front() else {
                        break;
                    };
                    total = total
                        .saturating_sub(char_len(first) + joiner_len(current.len(), separator_len));
                }
            }
        }

        current.push_back(split);
        total += len + joiner_len(current.len() - 1, separator_len);
    }

    if let Some(chunk) = join_pieces(&current, separator) {
        chunks.push(chunk);
    }
    chunks
}
