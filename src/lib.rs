pub mod args;
pub mod artist;
pub mod collection;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod lyrics;
pub mod palette;
pub mod report;
pub mod stats;
pub mod utils;
pub mod wiki;

pub use args::Args;
pub use artist::ArtistExpert;
pub use collection::CollectionExpert;
pub use dataset::{Band, Dataset, Song};
pub use error::{Error, Result};
pub use filter::{BandFilter, HasBand};
pub use lyrics::LyricsMode;
pub use crate::palette::Palette;
pub use stats::{ArtistKpis, BarChart, BoxSummary, DatasetKpis, SentimentCounts, WordCloudInput, YearSeries};
