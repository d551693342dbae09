use clap::Parser;
use std::path::PathBuf;

use crate::dataset::{DEFAULT_BANDS_PATH, DEFAULT_SONGS_PATH};
use crate::filter::BandFilter;
use crate::lyrics::LyricsMode;
use crate::wiki::DEFAULT_WIKI_URL;

#[derive(Parser, Debug)]
#[command(
    name = "bandscope",
    about = "Descriptive statistics and chart data over a song/band dataset",
    version,
    long_about = None
)]
pub struct Args {
    /// Semicolon-separated song table
    #[arg(long, env = "BANDSCOPE_SONGS", default_value = DEFAULT_SONGS_PATH)]
    pub songs: PathBuf,

    /// Semicolon-separated band table
    #[arg(long, env = "BANDSCOPE_BANDS", default_value = DEFAULT_BANDS_PATH)]
    pub bands: PathBuf,

    /// Analyze a single artist instead of the whole collection
    #[arg(short, long)]
    pub artist: Option<String>,

    /// Keep only these bands (repeatable)
    #[arg(short, long)]
    pub include: Vec<String>,

    /// Drop these bands (repeatable)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Number of entries in top-N charts
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Number of words kept for the word cloud
    #[arg(long, default_value_t = crate::lyrics::DEFAULT_MAX_WORDS)]
    pub max_words: usize,

    /// Build the word cloud from full lyrics, repeated lines included
    #[arg(long)]
    pub keep_repeated_lines: bool,

    /// Fetch the artist description from Wikipedia
    #[arg(long)]
    pub describe: bool,

    /// Wikipedia base URL
    #[arg(long, env = "BANDSCOPE_WIKI_URL", default_value = DEFAULT_WIKI_URL)]
    pub wiki_url: String,

    /// List the artists of the song table and exit
    #[arg(long)]
    pub list: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of worker threads
    #[arg(short, long)]
    pub workers: Option<usize>,
}

impl Args {
    /// Flags that were not given leave their axis unfiltered.
    pub fn band_filter(&self) -> BandFilter {
        BandFilter {
            include: (!self.include.is_empty()).then(|| self.include.clone()),
            exclude: (!self.exclude.is_empty()).then(|| self.exclude.clone()),
        }
    }

    pub fn lyrics_mode(&self) -> LyricsMode {
        if self.keep_repeated_lines {
            LyricsMode::Full
        } else {
            LyricsMode::Deduplicated
        }
    }
}
