//! Word-level comparison for feedback rendering.
//! The diff explains a failed attempt token by token; it never decides
//! correctness on its own.

use super::normalize_word;
use serde::{Deserialize, Serialize};

/// One entry of the word-by-word comparison.
/// `word` is empty for a missing reference word and `expected` is empty
/// for an extra learner token; a substitution sets both and no flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordComparison {
    /// The token the learner typed.
    pub word: String,
    /// The reference token this entry is judged against.
    pub expected: String,
    pub is_correct: bool,
    pub is_missing: bool,
    pub is_extra: bool,
}

impl WordComparison {
    fn correct(word: &str, expected: &str) -> Self {
        Self {
            word: word.into(),
            expected: expected.into(),
            is_correct: true,
            is_missing: false,
            is_extra: false,
        }
    }

    fn missing(expected: &str) -> Self {
        Self {
            word: String::new(),
            expected: expected.into(),
            is_correct: false,
            is_missing: true,
            is_extra: false,
        }
    }

    fn extra(word: &str) -> Self {
        Self {
            word: word.into(),
            expected: String::new(),
            is_correct: false,
            is_missing: false,
            is_extra: true,
        }
    }

    fn substitution(word: &str, expected: &str) -> Self {
        Self {
            word: word.into(),
            expected: expected.into(),
            is_correct: false,
            is_missing: false,
            is_extra: false,
        }
    }
}

/// Compare learner input against reference text token by token.
/// The way this works is by walking both token lists with a one-token
/// lookahead to tell extra words from missing words; anything the
/// lookahead cannot resolve is a one-for-one substitution. Tokens are
/// compared in normalized form but emitted in their original spelling.
pub fn diff_words(reference: &str, input: &str) -> Vec<WordComparison> {
    let expected: Vec<&str> = reference.split_whitespace().collect();
    let typed: Vec<&str> = input.split_whitespace().collect();
    let mut entries = Vec::new();
    let mut i = 0;
    let mut j = 0;
    while i < expected.len() || j < typed.len() {
        if i == expected.len() {
            entries.push(WordComparison::extra(typed[j]));
            j += 1;
        } else if j == typed.len() {
            entries.push(WordComparison::missing(expected[i]));
            i += 1;
        } else if normalize_word(expected[i]) == normalize_word(typed[j]) {
            entries.push(WordComparison::correct(typed[j], expected[i]));
            i += 1;
            j += 1;
        } else if j + 1 < typed.len() && normalize_word(typed[j + 1]) == normalize_word(expected[i])
        {
            // The learner typed a spurious word before the right one.
            entries.push(WordComparison::extra(typed[j]));
            j += 1;
        } else if i + 1 < expected.len()
            && normalize_word(expected[i + 1]) == normalize_word(typed[j])
        {
            // The learner skipped this reference word.
            entries.push(WordComparison::missing(expected[i]));
            i += 1;
        } else {
            entries.push(WordComparison::substitution(typed[j], expected[i]));
            i += 1;
            j += 1;
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A matching answer marks every token correct.
    #[test]
    fn all_correct() {
        let entries = diff_words("the quick fox", "The quick fox.");
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.is_correct));
        assert_eq!(entries[0].word, "The");
        assert_eq!(entries[0].expected, "the");
    }

    /// A spurious inserted word is flagged extra and the rest still match.
    #[test]
    fn flags_extra_word() {
        let entries = diff_words("the quick fox", "the very quick fox");
        assert_eq!(entries.len(), 4);
        assert!(entries[1].is_extra);
        assert_eq!(entries[1].word, "very");
        assert_eq!(entries[1].expected, "");
        assert!(entries[2].is_correct);
        assert!(entries[3].is_correct);
    }

    /// A skipped reference word is flagged missing and the rest still match.
    #[test]
    fn flags_missing_word() {
        let entries = diff_words("the quick brown fox", "the quick fox");
        assert_eq!(entries.len(), 4);
        assert!(entries[2].is_missing);
        assert_eq!(entries[2].expected, "brown");
        assert_eq!(entries[2].word, "");
        assert!(entries[3].is_correct);
    }

    /// A wrong word in place is a substitution with no flags set.
    #[test]
    fn flags_substitution() {
        let entries = diff_words("the quick fox", "the slow fox");
        assert_eq!(entries.len(), 3);
        let sub = &entries[1];
        assert_eq!(sub.word, "slow");
        assert_eq!(sub.expected, "quick");
        assert!(!sub.is_correct && !sub.is_missing && !sub.is_extra);
    }

    /// Leftover input tokens past the reference are all extra.
    #[test]
    fn trailing_input_is_extra() {
        let entries = diff_words("stop", "stop right there now");
        assert_eq!(entries.len(), 4);
        assert!(entries[0].is_correct);
        assert!(entries[1..].iter().all(|e| e.is_extra));
    }

    /// An empty answer marks every reference word missing.
    #[test]
    fn empty_input_is_all_missing() {
        let entries = diff_words("all gone now", "");
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.is_missing));
    }

    /// Every reference and input token appears exactly once in the output.
    #[test]
    fn accounts_for_every_token() {
        let reference = "one two three four five";
        let input = "one too three extra four";
        let entries = diff_words(reference, input);
        let expected: Vec<&str> = entries
            .iter()
            .filter(|e| !e.expected.is_empty())
            .map(|e| e.expected.as_str())
            .collect();
        let typed: Vec<&str> = entries
            .iter()
            .filter(|e| !e.word.is_empty())
            .map(|e| e.word.as_str())
            .collect();
        assert_eq!(expected, vec!["one", "two", "three", "four", "five"]);
        assert_eq!(typed, vec!["one", "too", "three", "extra", "four"]);
        assert!(entries.len() >= 5);
    }
}
