//! Chunk assembly from detected boundaries, plus the small-chunk merge pass.

use unicode_segmentation::UnicodeSegmentation;

use crate::types::{SegmentedChunk, Sentence};

/// Word count used by the merge criterion.
pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

/// Groups sentences between boundaries into chunks.
///
/// Each boundary `b` starts a new chunk at sentence `b`; the final chunk
/// runs to the end. Sentences are joined with single spaces and trimmed.
/// Empty chunks cannot occur with strictly increasing boundaries but are
/// dropped if they somehow do.
pub fn assemble_chunks(sentences: &[Sentence], boundaries: &[usize]) -> Vec<SegmentedChunk> {
    let end = sentences.len();
    let mut chunks = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0usize;
    for boundary in boundaries.iter().copied().chain(std::iter::once(end)) {
        let text = sentences[start..boundary]
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();
        if !text.is_empty() {
            let word_count = word_count(&text);
            chunks.push(SegmentedChunk { text, word_count });
        }
        start = boundary;
    }
    chunks
}

/// Folds undersized chunks into their predecessor.
///
/// One left-to-right pass: a chunk after the first whose own word count is
/// below `min_words` is appended onto the previous *output* chunk. The
/// first chunk is always emitted standalone (no predecessor to fold into).
/// A chunk's size is judged exactly once, against its own word count, and a
/// predecessor grown by folding is never re-examined — so a run of
/// undersized chunks after the first all collapses into one successor.
/// That single-pass behavior is intentional; do not iterate to a fixed
/// point here without changing the documented contract.
///
/// Returns the merged chunks plus the number of chunks folded away.
pub fn merge_small_chunks(
    chunks: Vec<SegmentedChunk>,
    min_words: usize,
) -> (Vec<SegmentedChunk>, usize) {
    let mut merged: Vec<SegmentedChunk> = Vec::with_capacity(chunks.len());
    let mut folded = 0usize;
    for chunk in chunks {
        match merged.last_mut() {
            Some(previous) if chunk.word_count < min_words => {
                previous.text.push(' ');
                previous.text.push_str(&chunk.text);
                previous.word_count += chunk.word_count;
                folded += 1;
            }
            _ => merged.push(chunk),
        }
    }
    (merged, folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(texts: &[&str]) -> Vec<Sentence> {
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| Sentence {
                index,
                text: text.to_string(),
            })
            .collect()
    }

    fn chunk_of(words: usize) -> SegmentedChunk {
        let text = vec!["word"; words].join(" ");
        SegmentedChunk {
            text,
            word_count: words,
        }
    }

    #[test]
    fn no_boundaries_yields_single_chunk() {
        let sentences = sentences(&["Alpha one.", "Beta two.", "Gamma three."]);
        let chunks = assemble_chunks(&sentences, &[]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Alpha one. Beta two. Gamma three.");
    }

    #[test]
    fn boundaries_split_into_half_open_ranges() {
        let sentences = sentences(&["A one.", "B two.", "C three.", "D four."]);
        let chunks = assemble_chunks(&sentences, &[1, 3]);
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["A one.", "B two. C three.", "D four."]);
    }

    #[test]
    fn word_counts_use_unicode_words() {
        let sentences = sentences(&["Hello, world!", "Second — sentence."]);
        let chunks = assemble_chunks(&sentences, &[]);
        assert_eq!(chunks[0].word_count, 4);
    }

    #[test]
    fn undersized_middle_chunk_folds_into_predecessor() {
        let (merged, folded) =
            merge_small_chunks(vec![chunk_of(200), chunk_of(10), chunk_of(300)], 150);
        assert_eq!(merged.len(), 2);
        assert_eq!(folded, 1);
        assert_eq!(merged[0].word_count, 210);
        assert_eq!(merged[1].word_count, 300);
    }

    #[test]
    fn first_chunk_is_never_merged_away() {
        let (merged, folded) = merge_small_chunks(vec![chunk_of(10), chunk_of(200)], 150);
        assert_eq!(merged.len(), 2);
        assert_eq!(folded, 0);
        assert_eq!(merged[0].word_count, 10);
    }

    #[test]
    fn undersized_run_collapses_into_one_successor() {
        // Single pass: each small chunk folds onto the growing predecessor;
        // nothing is re-evaluated after merging.
        let (merged, folded) = merge_small_chunks(
            vec![chunk_of(200), chunk_of(10), chunk_of(20), chunk_of(30)],
            150,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(folded, 3);
        assert_eq!(merged[0].word_count, 260);
    }

    #[test]
    fn merged_text_joins_with_single_space() {
        let a = SegmentedChunk {
            text: "First part.".to_string(),
            word_count: 2,
        };
        let b = SegmentedChunk {
            text: "Second part.".to_string(),
            word_count: 2,
        };
        let (merged, _) = merge_small_chunks(vec![a, b], 150);
        assert_eq!(merged[0].text, "First part. Second part.");
    }

    #[test]
    fn merge_preserves_total_word_count() {
        let input = vec![chunk_of(40), chunk_of(10), chunk_of(160), chunk_of(5)];
        let total: usize = input.iter().map(|c| c.word_count).sum();
        let (merged, _) = merge_small_chunks(input, 150);
        let merged_total: usize = merged.iter().map(|c| c.word_count).sum();
        assert_eq!(total, merged_total);
    }
}
