//! Sentence segmentation for punctuation-delimited transcripts.
//!
//! The boundary heuristic is deliberately conservative: a sentence ends at
//! `.`, `!`, or `?` followed by whitespace *and* an upper-case letter.
//! Under-splitting beats over-splitting here, since downstream chunks merge
//! anyway.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Sentence;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence break pattern is valid"));

/// Splits a transcript into ordered, trimmed sentences.
///
/// Empty and whitespace-only fragments are discarded; surviving text is not
/// normalized beyond trimming. Sentence indices are contiguous from zero.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    for found in SENTENCE_BREAK.find_iter(text) {
        // `regex` has no lookahead, so the upper-case requirement is
        // checked on the character right after the whitespace run.
        let follows_upper = text[found.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase());
        if !follows_upper {
            continue;
        }
        // The punctuation mark is a single ASCII byte; keep it with the
        // sentence it terminates.
        push_fragment(&mut sentences, &text[start..found.start() + 1]);
        start = found.end();
    }
    push_fragment(&mut sentences, &text[start..]);
    sentences
}

fn push_fragment(sentences: &mut Vec<Sentence>, fragment: &str) {
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        return;
    }
    let index = sentences.len();
    sentences.push(Sentence {
        index,
        text: trimmed.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(sentences: &[Sentence]) -> Vec<&str> {
        sentences.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn splits_on_terminal_punctuation_before_uppercase() {
        let sentences = split_sentences("First point here. Second point there! Third one? Done");
        assert_eq!(
            texts(&sentences),
            vec![
                "First point here.",
                "Second point there!",
                "Third one?",
                "Done"
            ]
        );
    }

    #[test]
    fn lowercase_continuation_does_not_split() {
        let sentences = split_sentences("We shipped v2.1 yesterday. it went fine. Next topic now");
        assert_eq!(
            texts(&sentences),
            vec!["We shipped v2.1 yesterday. it went fine.", "Next topic now"]
        );
    }

    #[test]
    fn punctuation_without_whitespace_does_not_split() {
        let sentences = split_sentences("See example.Com for details");
        assert_eq!(texts(&sentences), vec!["See example.Com for details"]);
    }

    #[test]
    fn indices_are_contiguous_positions() {
        let sentences = split_sentences("One. Two. Three. Four.");
        let indices: Vec<usize> = sentences.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn whitespace_only_fragments_are_dropped() {
        assert!(split_sentences("   ").is_empty());
        assert!(split_sentences("").is_empty());
        let sentences = split_sentences("Trailing spaces here.   ");
        assert_eq!(texts(&sentences), vec!["Trailing spaces here."]);
    }

    #[test]
    fn multiline_whitespace_counts_as_separator() {
        let sentences = split_sentences("End of thought.\n\nNew paragraph starts");
        assert_eq!(
            texts(&sentences),
            vec!["End of thought.", "New paragraph starts"]
        );
    }
}
