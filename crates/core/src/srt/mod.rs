//! This module is responsible for SRT parsing and timestamp handling.
//! It exposes helpers to read subtitle text into timed segments and to
//! write segments back out while preserving timing.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A timed span of reference text derived from one or more subtitle cues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Seconds from video start.
    pub start: f64,
    /// Seconds this segment spans.
    pub duration: f64,
    /// Primary-language transcript text.
    pub text: String,
    /// Aligned translation text, when a bilingual match was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

/// Parse `HH:MM:SS,mmm` or `HH:MM:SS.mmm` into seconds.
/// Returns `None` when the text does not match the pattern, so callers can
/// tell a failed parse apart from a legitimate zero timestamp.
pub fn parse_timestamp(text: &str) -> Option<f64> {
    let text = text.trim().replace(',', ".");
    let mut clock = text.split(':');
    let hours: u32 = clock.next()?.parse().ok()?;
    let minutes: u32 = clock.next()?.parse().ok()?;
    let rest = clock.next()?;
    if clock.next().is_some() {
        return None;
    }
    let mut second_parts = rest.split('.');
    let seconds: u32 = second_parts.next()?.parse().ok()?;
    let millis: u32 = second_parts.next()?.parse().ok()?;
    if second_parts.next().is_some() {
        return None;
    }
    Some(
        f64::from(hours) * 3600.0
            + f64::from(minutes) * 60.0
            + f64::from(seconds)
            + f64::from(millis) / 1000.0,
    )
}

/// Truncate seconds to whole milliseconds.
/// The nudge keeps values parsed from exact millisecond timestamps from
/// landing a hair under the integer.
fn to_millis(seconds: f64) -> u64 {
    (seconds * 1000.0 + 1e-6) as u64
}

/// Format seconds as a `MM:SS.mmm` playback clock, truncating sub-unit
/// components. Minutes are not wrapped at sixty.
pub fn format_clock(seconds: f64) -> String {
    let ms = to_millis(seconds);
    let m = ms / 60_000;
    let s = (ms % 60_000) / 1000;
    let ms = ms % 1000;
    format!("{m:02}:{s:02}.{ms:03}")
}

/// Format seconds back to an SRT `HH:MM:SS,mmm` timestamp, truncating
/// milliseconds.
pub fn format_srt_timestamp(seconds: f64) -> String {
    let ms = to_millis(seconds);
    let h = ms / 3_600_000;
    let m = (ms % 3_600_000) / 60_000;
    let s = (ms % 60_000) / 1000;
    let ms = ms % 1000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Parse raw SRT text into timed segments.
/// Malformed blocks are skipped silently; an entirely unparseable input
/// yields an empty list.
pub fn parse_raw(input: &str) -> Vec<Segment> {
    trace!("parse_raw len={}", input.len());
    let mut segments = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    for line in input.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if let Some(segment) = parse_block(&block) {
                segments.push(segment);
            }
            block.clear();
        } else {
            block.push(line);
        }
    }
    segments
}

/// Parse SRT text, treating an empty result as a hard error.
/// This is the entry point hosts use when a subtitle source is required.
pub fn parse(input: &str) -> Result<Vec<Segment>> {
    let segments = parse_raw(input);
    if segments.is_empty() {
        return Err(anyhow!("could not parse subtitles"));
    }
    Ok(segments)
}

/// Parse one blank-line delimited block into a segment.
/// Lines before the `-->` marker (the cue index) are ignored and the text
/// lines after it are joined with a single space.
fn parse_block(lines: &[&str]) -> Option<Segment> {
    let arrow = lines.iter().position(|l| l.contains("-->"))?;
    let mut times = lines[arrow].split("-->");
    let start = parse_timestamp(times.next()?)?;
    let end = parse_timestamp(times.next()?)?;
    let text = lines[arrow + 1..]
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();
    let duration = end - start;
    if text.is_empty() || duration <= 0.0 {
        return None;
    }
    Some(Segment {
        start,
        duration,
        text,
        translation: None,
    })
}

/// Format segments back to SRT text with fresh 1-based indices.
/// The way this works is by writing each segment sequentially with blank lines.
pub fn format(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_srt_timestamp(segment.start),
            format_srt_timestamp(segment.start + segment.duration),
            segment.text
        ));
    }
    out
}
