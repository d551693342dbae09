use chrono::Datelike;
use std::collections::{BTreeMap, HashSet};
use std::time::Instant;
use tracing::{info, warn};

use crate::dataset::{Dataset, Song};
use crate::error::{Error, Result};
use crate::lyrics::{self, LyricsMode};
use crate::stats::{ArtistKpis, Bar, BarChart, WordCloudInput, YearSeries};
use crate::wiki::{self, DescriptionLookup};

/// KPIs and chart series about one artist.
///
/// The artist is passed to every call; nothing about the selection is stored.
pub struct ArtistExpert<'a> {
    dataset: &'a Dataset,
}

impl<'a> ArtistExpert<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn list_artists(&self) -> Vec<&'a str> {
        self.dataset.unique_artists()
    }

    fn songs(&self, artist: &'a str) -> Vec<&'a Song> {
        self.dataset.songs_of(artist).collect()
    }

    pub fn artist_kpis(&self, artist: &str) -> Result<ArtistKpis> {
        let band = self.dataset.band(artist);
        let songs: Vec<&Song> = self.dataset.songs_of(artist).collect();

        if band.is_none() && songs.is_empty() {
            warn!(action = "lookup", component = "artist_kpis", artist = artist, "Artist has no rows");
            return Err(Error::ArtistNotFound(artist.to_string()));
        }

        // Both ends from one source, first <= last
        let (first_song_date, last_song_date) = match band.map(|b| (b.smallest_date, b.biggest_date)) {
            Some((Some(first), Some(last))) if first <= last => (Some(first), Some(last)),
            _ => {
                let dated = songs.iter().filter_map(|song| song.release_date);
                (dated.clone().min(), dated.max())
            }
        };

        let distinct_song_count = songs
            .iter()
            .map(|song| song.song_title.as_str())
            .collect::<HashSet<_>>()
            .len();

        Ok(ArtistKpis {
            artist: artist.to_string(),
            first_song_date,
            last_song_date,
            album_count: band.map_or(0, |b| b.num_album),
            distinct_song_count,
            example_popular_song: songs.first().map(|song| song.song_title.clone()),
        })
    }

    /// The first `n` songs of the artist in stored table order.
    ///
    /// Rows are not sorted by views; the song table is expected to be
    /// pre-sorted when a true top-N is wanted.
    pub fn top_songs_by_views(&self, artist: &'a str, n: usize) -> BarChart {
        let mut chart = BarChart::new(format!("Top {} most popular songs of {}", n, artist));
        chart.bars = self
            .songs(artist)
            .into_iter()
            .take(n)
            .map(|song| Bar {
                label: song.song_title.clone(),
                value: song.lyrics_view,
                color: None,
                hover: vec![
                    ("Band".to_string(), song.band_name.clone()),
                    ("Song title".to_string(), song.song_title.clone()),
                    ("Number of views".to_string(), song.lyrics_view.to_string()),
                ],
            })
            .collect();
        chart
    }

    pub fn lyrics_wordcloud_input(
        &self,
        artist: &'a str,
        mode: LyricsMode,
        max_words: usize,
    ) -> WordCloudInput {
        let texts: Vec<String> = self
            .songs(artist)
            .into_iter()
            .filter_map(|song| song.lyrics.as_deref())
            .map(|text| match mode {
                LyricsMode::Deduplicated => lyrics::dedup_lines(text),
                LyricsMode::Full => text.to_string(),
            })
            .collect();

        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let frequencies = lyrics::word_frequencies(&refs, max_words);

        WordCloudInput {
            artist: artist.to_string(),
            text: texts.join(" "),
            frequencies,
        }
    }

    pub fn songs_per_year(&self, artist: &'a str) -> Result<YearSeries> {
        let start_time = Instant::now();

        let mut per_year: BTreeMap<i32, u64> = BTreeMap::new();
        for date in self.songs(artist).iter().filter_map(|song| song.release_date) {
            *per_year.entry(date.year()).or_insert(0) += 1;
        }

        let (first, last) = match (per_year.keys().next(), per_year.keys().next_back()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(Error::NoDatedSongs(artist.to_string())),
        };

        let points: Vec<(i32, u64)> = (first..=last)
            .map(|year| (year, per_year.get(&year).copied().unwrap_or(0)))
            .collect();

        info!(
            action = "complete",
            component = "songs_per_year",
            artist = artist,
            first_year = first,
            last_year = last,
            duration_ms = start_time.elapsed().as_millis(),
            "Year series built"
        );
        Ok(YearSeries {
            name: artist.to_string(),
            points,
        })
    }

    pub fn describe(&self, artist: &str, lookup: &dyn DescriptionLookup) -> Result<String> {
        lookup.summary(&wiki::band_page_title(artist))
    }
}
