//! Binary entry point for the dictation practice toolkit.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use dicta_core::align::align_translation;
use dicta_core::grade::{diff::diff_words, grade};
use dicta_core::merge::merge;
use dicta_core::srt::{self, format_clock, Segment};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Default minimum word count for a practice segment.
const DEFAULT_MIN_WORDS: usize = 8;

/// Command line options for the binary.
#[derive(Parser)]
struct Cli {
    /// Enable verbose debug and trace logs.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print merged practice segments from a subtitle file.
    Segments {
        /// Path to the SRT file to practice from.
        input: PathBuf,

        /// Translated SRT to align onto the primary track.
        #[arg(long)]
        translation: Option<PathBuf>,

        /// Minimum words per practice segment.
        #[arg(long, default_value_t = DEFAULT_MIN_WORDS)]
        min_words: usize,

        /// Emit segments as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Grade a typed answer against one practice segment.
    Grade {
        /// Path to the SRT file to practice from.
        input: PathBuf,

        /// 1-based practice segment to grade against.
        #[arg(long)]
        line: usize,

        /// Minimum words per practice segment.
        #[arg(long, default_value_t = DEFAULT_MIN_WORDS)]
        min_words: usize,

        /// Accuracy percentage required to pass.
        #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u32).range(0..=100))]
        threshold: u32,

        /// The transcription the learner typed.
        answer: String,
    },

    /// Merge a subtitle file and write it back out as SRT text.
    Export {
        /// Path to the SRT file to re-serialize.
        input: PathBuf,

        /// Minimum words per practice segment.
        #[arg(long, default_value_t = DEFAULT_MIN_WORDS)]
        min_words: usize,
    },
}

/// Read and parse a subtitle file into raw segments.
fn load_segments(path: &Path) -> Result<Vec<Segment>> {
    let content = fs::read_to_string(path)?;
    srt::parse(&content)
}

/// Application entry point which parses CLI args and performs actions.
/// This function should initialize logging and delegate to the core library.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.debug {
        EnvFilter::default()
            .add_directive("dicta=trace".parse().unwrap())
            .add_directive("dicta_core=trace".parse().unwrap())
            .add_directive("info".parse().unwrap())
    } else {
        EnvFilter::default()
            .add_directive("dicta=info".parse().unwrap())
            .add_directive("dicta_core=info".parse().unwrap())
            .add_directive("warn".parse().unwrap())
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    match cli.command {
        Command::Segments {
            input,
            translation,
            min_words,
            json,
        } => {
            let mut segments = load_segments(&input)?;
            if let Some(path) = translation {
                let secondary = load_segments(&path)?;
                segments = align_translation(segments, &secondary);
            }
            let merged = merge(segments, min_words);
            if json {
                println!("{}", serde_json::to_string_pretty(&merged)?);
            } else {
                for (i, segment) in merged.iter().enumerate() {
                    println!(
                        "{:>3} [{} - {}] {}",
                        i + 1,
                        format_clock(segment.start),
                        format_clock(segment.start + segment.duration),
                        segment.text
                    );
                    if let Some(text) = &segment.translation {
                        println!("      {text}");
                    }
                }
            }
        }
        Command::Grade {
            input,
            line,
            min_words,
            threshold,
            answer,
        } => {
            let merged = merge(load_segments(&input)?, min_words);
            let segment = line
                .checked_sub(1)
                .and_then(|i| merged.get(i))
                .ok_or_else(|| anyhow!("line {} out of range (1-{})", line, merged.len()))?;
            let verdict = grade(&segment.text, &answer, threshold);
            if verdict.is_correct {
                println!("correct ({}%)", verdict.accuracy);
            } else {
                println!("incorrect ({}% < {}%)", verdict.accuracy, threshold);
                for entry in diff_words(&segment.text, &answer) {
                    if entry.is_correct {
                        println!("  ok       {}", entry.word);
                    } else if entry.is_missing {
                        println!("  missing  {}", entry.expected);
                    } else if entry.is_extra {
                        println!("  extra    {}", entry.word);
                    } else {
                        println!("  wrong    {} (expected {})", entry.word, entry.expected);
                    }
                }
            }
        }
        Command::Export { input, min_words } => {
            let merged = merge(load_segments(&input)?, min_words);
            print!("{}", srt::format(&merged));
        }
    }
    Ok(())
}
