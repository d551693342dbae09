use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::info;

use crate::dataset::{Band, Dataset, Song};
use crate::filter::{BandFilter, HasBand};
use crate::palette::Palette;
use crate::stats::{Bar, BarChart, BoxSummary, DatasetKpis, Sentiment, SentimentCounts};

/// Share of a band's songs a sentiment score must exceed.
pub const SENTIMENT_THRESHOLD: f64 = 0.7;

/// Collection-wide KPIs and charts, narrowed by a [`BandFilter`].
pub struct CollectionExpert<'a> {
    dataset: &'a Dataset,
    palette: Palette,
}

impl<'a> CollectionExpert<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        let start_time = Instant::now();
        let palette = Palette::new(dataset.unique_artists());
        info!(
            action = "complete",
            component = "palette",
            color_count = palette.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Band colors assigned"
        );
        Self { dataset, palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn list_artists(&self) -> Vec<&'a str> {
        self.dataset.unique_artists()
    }

    pub fn apply_filter<'t, T: HasBand>(&self, rows: &'t [T], filter: &BandFilter) -> Vec<&'t T> {
        filter.apply(rows)
    }

    fn color_of(&self, band_name: &str) -> Option<String> {
        self.palette.color(band_name).map(str::to_string)
    }

    pub fn dataset_kpis(&self, filter: &BandFilter) -> DatasetKpis {
        let songs = self.apply_filter(&self.dataset.songs, filter);
        let bands: HashSet<&str> = songs.iter().map(|song| song.band_name.as_str()).collect();
        let dates = songs.iter().filter_map(|song| song.release_date);

        let kpis = DatasetKpis {
            band_count: bands.len(),
            song_count: songs.len(),
            oldest_song: dates.clone().min(),
            most_recent_song: dates.max(),
        };
        info!(
            action = "complete",
            component = "dataset_kpis",
            band_count = kpis.band_count,
            song_count = kpis.song_count,
            filtered = filter.is_active(),
            "Dataset KPIs computed"
        );
        kpis
    }

    pub fn top_bands_by_song_count(&self, filter: &BandFilter, n: usize) -> BarChart {
        let mut bands: Vec<&Band> = self.apply_filter(&self.dataset.bands, filter);
        // Stable, so ties keep table order
        bands.sort_by(|a, b| b.song_count.cmp(&a.song_count));

        let mut chart = BarChart::new("Band with most songs");
        chart.bars = bands
            .into_iter()
            .take(n)
            .map(|band| Bar {
                label: band.band_name.clone(),
                value: u64::from(band.song_count),
                color: self.color_of(&band.band_name),
                hover: vec![
                    ("Band".to_string(), band.band_name.clone()),
                    ("Number of songs written".to_string(), band.song_count.to_string()),
                ],
            })
            .collect();
        chart
    }

    pub fn top_songs_by_views(&self, filter: &BandFilter, n: usize) -> BarChart {
        let mut songs: Vec<&Song> = self.apply_filter(&self.dataset.songs, filter);
        songs.sort_by(|a, b| b.lyrics_view.cmp(&a.lyrics_view));

        let mut chart = BarChart::new("Most popular songs");
        chart.bars = songs
            .into_iter()
            .take(n)
            .map(|song| Bar {
                label: song.song_title.clone(),
                value: song.lyrics_view,
                color: self.color_of(&song.band_name),
                hover: vec![
                    ("Band".to_string(), song.band_name.clone()),
                    ("Song title".to_string(), song.song_title.clone()),
                    ("Number of views".to_string(), song.lyrics_view.to_string()),
                ],
            })
            .collect();
        chart
    }

    /// Buckets every band of the unfiltered band table.
    pub fn sentiment_distribution(&self) -> SentimentCounts {
        let mut lyrics_per_band: HashMap<&str, usize> = HashMap::new();
        for song in self.dataset.songs.iter().filter(|song| song.lyrics.is_some()) {
            *lyrics_per_band.entry(song.band_name.as_str()).or_insert(0) += 1;
        }

        let mut counts = SentimentCounts::default();
        for band in &self.dataset.bands {
            let song_count = lyrics_per_band.get(band.band_name.as_str()).copied().unwrap_or(0);
            match classify_sentiment(band.positive, band.negative, song_count) {
                Sentiment::Positive => counts.positive += 1,
                Sentiment::Negative => counts.negative += 1,
                Sentiment::Neutral => counts.neutral += 1,
            }
        }

        info!(
            action = "complete",
            component = "sentiment_distribution",
            positive = counts.positive,
            negative = counts.negative,
            neutral = counts.neutral,
            "Sentiment distribution computed"
        );
        counts
    }

    pub fn release_date_distribution(&self, filter: &BandFilter) -> Vec<NaiveDate> {
        self.apply_filter(&self.dataset.songs, filter)
            .into_iter()
            .filter_map(|song| song.release_date)
            .collect()
    }

    pub fn release_date_summary(&self, filter: &BandFilter) -> Option<BoxSummary> {
        BoxSummary::from_dates(&self.release_date_distribution(filter))
    }
}

/// A score counts when it exceeds the threshold share of `song_count`.
///
/// When both scores exceed it the larger one wins and a tie is neutral.
pub fn classify_sentiment(positive: u32, negative: u32, song_count: usize) -> Sentiment {
    let threshold = song_count as f64 * SENTIMENT_THRESHOLD;
    let is_positive = f64::from(positive) > threshold;
    let is_negative = f64::from(negative) > threshold;

    match (is_positive, is_negative) {
        (true, false) => Sentiment::Positive,
        (false, true) => Sentiment::Negative,
        (true, true) if positive > negative => Sentiment::Positive,
        (true, true) if negative > positive => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}
