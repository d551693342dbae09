use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::artist::ArtistExpert;
use crate::collection::CollectionExpert;
use crate::error::{Error, Result};
use crate::filter::BandFilter;
use crate::lyrics::LyricsMode;
use crate::stats::{
    ArtistKpis, BarChart, BoxSummary, DatasetKpis, SentimentCounts, WordCloudInput, YearSeries,
};
use crate::utils::format_number;
use crate::wiki::DescriptionLookup;

const NO_DATA: &str = "No data available";

#[derive(Debug, Serialize)]
pub struct ArtistReport {
    pub description: Option<String>,
    pub kpis: ArtistKpis,
    pub top_songs: BarChart,
    pub word_cloud: WordCloudInput,
    pub songs_per_year: Option<YearSeries>,
}

#[derive(Debug, Serialize)]
pub struct CollectionReport {
    pub filter: BandFilter,
    pub kpis: DatasetKpis,
    pub top_bands: BarChart,
    pub top_songs: BarChart,
    pub sentiment: SentimentCounts,
    pub release_dates: Vec<NaiveDate>,
    pub release_date_summary: Option<BoxSummary>,
}

pub struct ArtistOptions<'l> {
    pub top: usize,
    pub max_words: usize,
    pub lyrics_mode: LyricsMode,
    pub lookup: Option<&'l dyn DescriptionLookup>,
}

pub fn build_artist_report<'a>(
    expert: &ArtistExpert<'a>,
    artist: &'a str,
    options: &ArtistOptions<'_>,
) -> Result<ArtistReport> {
    let kpis = expert.artist_kpis(artist)?;
    let description = options
        .lookup
        .map(|lookup| expert.describe(artist, lookup))
        .transpose()?;

    let songs_per_year = match expert.songs_per_year(artist) {
        Ok(series) => Some(series),
        Err(Error::NoDatedSongs(_)) => {
            warn!(action = "skip", component = "songs_per_year", artist = artist, "Artist has no dated songs");
            None
        }
        Err(e) => return Err(e),
    };

    Ok(ArtistReport {
        description,
        kpis,
        top_songs: expert.top_songs_by_views(artist, options.top),
        word_cloud: expert.lyrics_wordcloud_input(artist, options.lyrics_mode, options.max_words),
        songs_per_year,
    })
}

pub fn build_collection_report(
    expert: &CollectionExpert<'_>,
    filter: &BandFilter,
    top: usize,
) -> CollectionReport {
    CollectionReport {
        filter: filter.clone(),
        kpis: expert.dataset_kpis(filter),
        top_bands: expert.top_bands_by_song_count(filter, top),
        top_songs: expert.top_songs_by_views(filter, top),
        sentiment: expert.sentiment_distribution(),
        release_dates: expert.release_date_distribution(filter),
        release_date_summary: expert.release_date_summary(filter),
    }
}

fn date_or_missing(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| NO_DATA.to_string(), |d| d.format("%B %-d, %Y").to_string())
}

fn print_bar_chart(chart: &BarChart) {
    println!("\n{}:", chart.title);
    if chart.is_empty() {
        println!("- {}", NO_DATA);
    }
    for bar in &chart.bars {
        match &bar.color {
            Some(color) => println!("- {}: {} [{}]", bar.label, format_number(bar.value), color),
            None => println!("- {}: {}", bar.label, format_number(bar.value)),
        }
    }
}

pub fn print_artist_report(report: &ArtistReport) {
    let kpis = &report.kpis;
    println!("\n--- {} Analysis ---", kpis.artist);

    if let Some(description) = &report.description {
        println!("\n{}", description);
    }

    println!("\nFirst song date: {}", date_or_missing(kpis.first_song_date));
    println!("Last song date: {}", date_or_missing(kpis.last_song_date));
    println!("Number of albums / EPs: {}", format_number(u64::from(kpis.album_count)));
    println!(
        "Most popular song: {}",
        kpis.example_popular_song.as_deref().unwrap_or(NO_DATA)
    );
    println!("Number of songs: {}", format_number(kpis.distinct_song_count as u64));

    print_bar_chart(&report.top_songs);

    println!("\nWhat is this group about?");
    if report.word_cloud.frequencies.is_empty() {
        println!("- {}", NO_DATA);
    }
    for (word, count) in &report.word_cloud.frequencies {
        println!("- {}: {}", word, format_number(*count as u64));
    }

    println!("\nNumber of songs per year (undated songs ignored):");
    match &report.songs_per_year {
        Some(series) => {
            for (year, count) in &series.points {
                println!("- {}: {}", year, count);
            }
        }
        None => println!("- {}", NO_DATA),
    }
}

pub fn print_collection_report(report: &CollectionReport) {
    let kpis = &report.kpis;
    println!("\n--- Collection Analysis ---");
    println!("Number of bands: {}", format_number(kpis.band_count as u64));
    println!("Number of songs: {}", format_number(kpis.song_count as u64));
    println!("Oldest song date: {}", date_or_missing(kpis.oldest_song));
    println!("Most recent song date: {}", date_or_missing(kpis.most_recent_song));

    print_bar_chart(&report.top_bands);
    print_bar_chart(&report.top_songs);

    let sentiment = &report.sentiment;
    println!("\nSentiment of bands (more than 70% of songs):");
    println!("- NEGATIVE: {}", format_number(sentiment.negative as u64));
    println!("- NEUTRAL: {}", format_number(sentiment.neutral as u64));
    println!("- POSITIVE: {}", format_number(sentiment.positive as u64));

    println!("\nRelease dates (undated songs excluded):");
    match &report.release_date_summary {
        Some(summary) => {
            println!("- Songs: {}", format_number(summary.count as u64));
            println!("- Min: {}", summary.min);
            println!("- Q1: {}", summary.q1);
            println!("- Median: {}", summary.median);
            println!("- Q3: {}", summary.q3);
            println!("- Max: {}", summary.max);
        }
        None => println!("- {}", NO_DATA),
    }
}

pub fn print_artists(artists: &[&str]) {
    for artist in artists {
        println!("{}", artist);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, Song};

    fn dataset() -> Dataset {
        let song = |title: &str, views: u64| Song {
            band_name: "Blur".to_string(),
            song_title: title.to_string(),
            lyrics: Some("woo hoo\nwoo hoo".to_string()),
            lyrics_view: views,
            release_date: None,
        };
        Dataset::new(vec![song("Song 2", 700), song("Parklife", 300)], Vec::new())
    }

    #[test]
    fn artist_report_tolerates_undated_artist() {
        let data = dataset();
        let expert = ArtistExpert::new(&data);
        let options = ArtistOptions {
            top: 1,
            max_words: 10,
            lyrics_mode: LyricsMode::Deduplicated,
            lookup: None,
        };
        let report = build_artist_report(&expert, "Blur", &options).expect("report");
        assert!(report.songs_per_year.is_none());
        assert_eq!(report.top_songs.labels(), vec!["Song 2"]);
        assert_eq!(report.description, None);
        assert_eq!(
            report.word_cloud.frequencies,
            vec![("hoo".to_string(), 2), ("woo".to_string(), 2)]
        );
    }

    #[test]
    fn artist_report_for_unknown_artist_fails() {
        let data = dataset();
        let expert = ArtistExpert::new(&data);
        let options = ArtistOptions {
            top: 10,
            max_words: 10,
            lyrics_mode: LyricsMode::Full,
            lookup: None,
        };
        assert!(matches!(
            build_artist_report(&expert, "Nobody", &options),
            Err(Error::ArtistNotFound(_))
        ));
    }

    #[test]
    fn collection_report_serializes() {
        let data = dataset();
        let expert = CollectionExpert::new(&data);
        let report = build_collection_report(&expert, &BandFilter::none(), 10);
        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["kpis"]["song_count"], 2);
        assert_eq!(json["top_songs"]["bars"][0]["value"], 700);
        assert!(json["release_date_summary"].is_null());
    }

    #[test]
    fn missing_date_prints_placeholder() {
        assert_eq!(date_or_missing(None), NO_DATA);
        assert_eq!(
            date_or_missing(NaiveDate::from_ymd_opt(2020, 1, 1)),
            "January 1, 2020"
        );
    }
}
