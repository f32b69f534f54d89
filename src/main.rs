// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::Serialize;

use crate::tracklist_parser::{parse_tracklist, ParseOptions, Track};

mod errors;
mod pattern_compiler;
mod title_sanitizer;
mod tracklist_parser;

/// CLI wrapper for log levels to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// tracksplit - split album rips into tagged tracks
///
/// Parses a tracklist as popular under music-compilation videos and emits
/// a JSON split plan for the external download/slice/tag pipeline.
#[derive(Parser, Debug)]
#[command(name = "tracksplit")]
#[command(version = "1.0.0")]
#[command(about = "Turns pasted tracklists into track boundaries and titles")]
#[command(long_about = r#"tracksplit parses a free-form tracklist (the kind users paste under
music-compilation videos) into ordered track boundaries and sanitized
titles, and emits them as a JSON split plan for the external
download/slice/tag pipeline.

EXAMPLES:
    tracksplit -t < tracklist.txt               # Dry-run: print parsed titles only
    tracksplit -f tracklist.txt URL             # Emit a split plan for URL
    tracksplit -i "Artist" -a "Album" URL       # Set tags passed through to the tagger
    tracksplit -s '\n. \m:\s - \t' -f list URL  # Parse with a structure template
    tracksplit -x ';' -l 'A - 0:00;B - 2:10' URL

STRUCTURE TEMPLATES:
    A template describes the layout of one tracklist entry with these
    placeholders, each separated from the next by constant literal text:

        \h : hours
        \m : minutes
        \s : seconds
        \t : trackname
        \n : tracknumber

    A title equal to !junk! marks an entry (e.g. an intro) for exclusion
    without shifting the boundaries of the surrounding tracks."#)]
struct CommandLineOptions {
    /// Url of the source audio, recorded in the emitted plan
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Tracklist like popular on youtube. If not provided uses stdin
    #[arg(short = 'l', long)]
    tracklist: Option<String>,

    /// Tracklist file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// String that gives the structure of the tracklist
    #[arg(short, long)]
    structure: Option<String>,

    /// Delimiter of the different tracks in the tracklist (defaults to newline)
    #[arg(short = 'x', long, default_value = "\n", hide_default_value = true)]
    delimiter: String,

    /// Keep leading track numbers instead of stripping them from titles
    #[arg(short, long)]
    keep_index: bool,

    /// Interpret/Artist tag for the album
    #[arg(short, long, default_value = "Unknown")]
    interpret: String,

    /// Album name
    #[arg(short, long, default_value = "Unknown")]
    album: String,

    /// Only print titles parsed from the tracklist. Used to check for
    /// errors in parsing before anything is downloaded or sliced
    #[arg(short, long)]
    test: bool,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Everything the external download/slice/tag collaborator needs: where
/// the audio lives, the tags to embed and where to cut
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SplitPlan {
    url: String,
    artist: String,
    album: String,
    tracks: Vec<Track>,
}

// @struct: Stderr logger with timestamps and per-level colors
struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(StderrLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    let cli = CommandLineOptions::parse();
    let level = cli.log_level.map_or(LevelFilter::Info, LevelFilter::from);
    StderrLogger::init(level)?;

    let tracklist = read_tracklist(&cli)?;

    let options = ParseOptions {
        structure: cli.structure.clone(),
        delimiter: cli.delimiter.clone(),
        kill_index: !cli.keep_index,
    };
    let tracks = parse_tracklist(&tracklist, &options)?;
    info!("Parsed {} track(s) from tracklist", tracks.len());

    if cli.test {
        for track in &tracks {
            println!("{}", track.title);
        }
        return Ok(());
    }

    let url = cli
        .url
        .ok_or_else(|| anyhow!("no URL provided; pass one, or use -t to only check the tracklist"))?;

    let plan = SplitPlan {
        url,
        artist: cli.interpret,
        album: cli.album,
        tracks,
    };
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}

// Tracklist acquisition: explicit text wins, then a file, then stdin
fn read_tracklist(cli: &CommandLineOptions) -> Result<String> {
    if let Some(text) = &cli.tracklist {
        return Ok(text.clone());
    }

    if let Some(path) = &cli.file {
        debug!("Reading tracklist from file {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tracklist file: {}", path.display()))?;
        return Ok(content.trim().to_string());
    }

    debug!("Reading tracklist from stdin");
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read tracklist from stdin")?;
    Ok(buffer.trim().to_string())
}
