//! Answer grading against reference text.
//! This module normalizes text for comparison and scores a learner's
//! typed answer with edit distance against an accuracy threshold.

use serde::{Deserialize, Serialize};
use tracing::trace;

pub mod diff;

/// Verdict for one grading attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    /// Whether the answer met the accuracy threshold.
    pub is_correct: bool,
    /// Percentage similarity between the normalized strings.
    pub accuracy: u32,
}

/// Canonicalize text for whole-string comparison.
/// Lowercases, strips punctuation ("don't" becomes "dont"), collapses
/// whitespace runs to single spaces and trims the ends.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonicalize one already-split token for word comparison.
pub fn normalize_word(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Classic two-row Levenshtein distance over characters.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Grade `input` against `reference` at the given accuracy threshold.
/// This function should normalize both sides, score them with edit
/// distance and round the final percentage half up.
pub fn grade(reference: &str, input: &str, threshold_percent: u32) -> Grade {
    trace!("grade threshold={}", threshold_percent);
    let canonical_reference = normalize(reference);
    let canonical_input = normalize(input);
    if canonical_reference == canonical_input {
        return Grade {
            is_correct: true,
            accuracy: 100,
        };
    }
    let max_len = canonical_reference
        .chars()
        .count()
        .max(canonical_input.chars().count());
    // Both sides empty after normalization count as a full match.
    let accuracy = if max_len == 0 {
        100
    } else {
        let distance = levenshtein(&canonical_reference, &canonical_input);
        (((max_len - distance) as f64 / max_len as f64) * 100.0).round() as u32
    };
    Grade {
        is_correct: accuracy >= threshold_percent,
        accuracy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Normalization lowercases, strips punctuation and collapses spaces.
    #[test]
    fn normalizes_text() {
        assert_eq!(normalize("Don't  stop!"), "dont stop");
        assert_eq!(normalize("  Well-known,  fact.  "), "wellknown fact");
        assert_eq!(normalize("...  ..."), "");
    }

    /// Token normalization strips punctuation without touching spacing.
    #[test]
    fn normalizes_words() {
        assert_eq!(normalize_word("Don't"), "dont");
        assert_eq!(normalize_word("fox."), "fox");
        assert_eq!(normalize_word("--"), "");
    }

    /// Sanity-check the edit distance on known pairs.
    #[test]
    fn computes_edit_distance() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    /// An answer equal to the reference is always a full match.
    #[test]
    fn identical_answers_pass() {
        let verdict = grade("The quick brown fox", "The quick brown fox", 100);
        assert!(verdict.is_correct);
        assert_eq!(verdict.accuracy, 100);
    }

    /// Case and punctuation differences do not cost accuracy.
    #[test]
    fn grading_is_case_insensitive() {
        let verdict = grade("The quick brown fox", "the quick brown fox", 90);
        assert!(verdict.is_correct);
        assert_eq!(verdict.accuracy, 100);
    }

    /// A missing trailing word scores the exact edit-distance percentage.
    #[test]
    fn missing_word_scores_below_threshold() {
        // "the quick brown fox" vs "the quick brown": 4 of 19 chars off.
        let verdict = grade("The quick brown fox", "The quick brown", 90);
        assert!(!verdict.is_correct);
        assert_eq!(verdict.accuracy, 79);
    }

    /// Raising the threshold can only flip a verdict from pass to fail.
    #[test]
    fn threshold_is_monotonic() {
        let mut previous = true;
        for threshold in 0..=100 {
            let verdict = grade("The quick brown fox", "The quick brown", threshold);
            assert!(previous || !verdict.is_correct);
            previous = verdict.is_correct;
        }
    }

    /// Inputs that normalize to nothing are a full match, not a crash.
    #[test]
    fn empty_after_normalization_is_full_match() {
        let verdict = grade("...", "!!!", 90);
        assert!(verdict.is_correct);
        assert_eq!(verdict.accuracy, 100);
    }

    /// A completely wrong answer still yields a bounded percentage.
    #[test]
    fn wrong_answer_stays_in_range() {
        let verdict = grade("hello world", "zzzzzzzz", 90);
        assert!(!verdict.is_correct);
        assert!(verdict.accuracy <= 100);
    }
}
