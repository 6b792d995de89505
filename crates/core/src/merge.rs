//! Segment merging for practice-sized units.
//! This module combines adjacent short cues until a minimum word count is
//! met, carrying any aligned translation text along.

use crate::srt::Segment;
use tracing::trace;

/// Count whitespace-delimited words in `text`, ignoring empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Merge adjacent segments until each unit holds at least `min_words` words.
/// The way this works is by accumulating left to right and flushing the
/// accumulator once it is long enough; the trailing accumulator is always
/// flushed, so the last unit may fall short of the minimum.
pub fn merge(segments: Vec<Segment>, min_words: usize) -> Vec<Segment> {
    trace!("merge segments={} min_words={}", segments.len(), min_words);
    let mut rest = segments.into_iter();
    let mut acc = match rest.next() {
        Some(first) => first,
        None => return Vec::new(),
    };
    let mut merged = Vec::new();
    for segment in rest {
        if word_count(&acc.text) >= min_words {
            merged.push(acc);
            acc = segment;
            continue;
        }
        acc.text = format!("{} {}", acc.text, segment.text);
        acc.translation = match (acc.translation.take(), segment.translation) {
            (Some(a), Some(b)) => Some(format!("{a} {b}")),
            (a, b) => a.or(b),
        };
        // A merged unit spans to the end of its last cue, absorbing gaps.
        acc.duration = segment.start + segment.duration - acc.start;
    }
    merged.push(acc);
    merged
}
