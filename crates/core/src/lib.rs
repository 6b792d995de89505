//! Core library for dictation practice over video subtitles.
//! It parses SRT text into timed segments, merges them into practice-sized
//! units, optionally aligns a translated track, and grades typed answers
//! against the reference text.

pub mod align;
pub mod grade;
pub mod merge;
pub mod srt;
