//! Approximate time alignment of a translated subtitle track.
//! The join runs before merging so merged practice units carry both
//! languages.

use crate::srt::Segment;
use std::collections::HashMap;
use tracing::trace;

/// Round a start time to the nearest half-second tick.
fn tick(start: f64) -> i64 {
    (start * 2.0).round() as i64
}

/// Annotate `primary` segments with translation text from `secondary`.
/// The way this works is by keying the secondary track on half-second
/// ticks and probing each primary start at its own tick, then half a
/// second earlier, then half a second later. Unmatched lines simply keep
/// no translation.
pub fn align_translation(primary: Vec<Segment>, secondary: &[Segment]) -> Vec<Segment> {
    trace!(
        "align_translation primary={} secondary={}",
        primary.len(),
        secondary.len()
    );
    let mut lookup: HashMap<i64, &str> = HashMap::new();
    for segment in secondary {
        // Later cues on the same tick overwrite earlier ones.
        lookup.insert(tick(segment.start), segment.text.as_str());
    }
    primary
        .into_iter()
        .map(|mut segment| {
            let key = tick(segment.start);
            let hit = lookup
                .get(&key)
                .or_else(|| lookup.get(&(key - 1)))
                .or_else(|| lookup.get(&(key + 1)));
            if let Some(text) = hit {
                segment.translation = Some((*text).to_string());
            }
            segment
        })
        .collect()
}
