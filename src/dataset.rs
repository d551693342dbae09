use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::error::{Error, Result};
use crate::filter::HasBand;

pub const DEFAULT_SONGS_PATH: &str = "data/all_songs_df.csv";
pub const DEFAULT_BANDS_PATH: &str = "data/group_df.csv";

const DELIMITER: u8 = b';';

/// One row of the song table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Song {
    pub band_name: String,
    pub song_title: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub lyrics: Option<String>,
    #[serde(deserialize_with = "count")]
    pub lyrics_view: u64,
    #[serde(default, deserialize_with = "optional_date")]
    pub release_date: Option<NaiveDate>,
}

/// One row of the band table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Band {
    pub band_name: String,
    #[serde(default, deserialize_with = "optional_date")]
    pub smallest_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    pub biggest_date: Option<NaiveDate>,
    #[serde(deserialize_with = "count")]
    pub num_album: u32,
    /// Total song count; the column is named `song_title` in the source file.
    #[serde(rename = "song_title", deserialize_with = "count")]
    pub song_count: u32,
    #[serde(rename = "POSITIVE", deserialize_with = "count")]
    pub positive: u32,
    #[serde(rename = "NEGATIVE", deserialize_with = "count")]
    pub negative: u32,
}

impl HasBand for Song {
    fn band_name(&self) -> &str {
        &self.band_name
    }
}

impl HasBand for Band {
    fn band_name(&self) -> &str {
        &self.band_name
    }
}

/// Both tables, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub songs: Vec<Song>,
    pub bands: Vec<Band>,
}

impl Dataset {
    pub fn new(songs: Vec<Song>, bands: Vec<Band>) -> Self {
        Self { songs, bands }
    }

    pub fn load(songs_path: &Path, bands_path: &Path) -> Result<Self> {
        let start_time = Instant::now();
        info!(action = "start", component = "dataset_load", songs = ?songs_path, bands = ?bands_path, "Loading tables");

        let songs = load_table(songs_path)?;
        let bands = load_table(bands_path)?;

        info!(
            action = "complete",
            component = "dataset_load",
            song_count = songs.len(),
            band_count = bands.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Tables loaded"
        );
        Ok(Self { songs, bands })
    }

    /// Distinct band names of the song table, in order of first appearance.
    pub fn unique_artists(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.songs
            .iter()
            .map(|song| song.band_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn band(&self, name: &str) -> Option<&Band> {
        self.bands.iter().find(|band| band.band_name == name)
    }

    pub fn songs_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Song> + 'a {
        self.songs.iter().filter(move |song| song.band_name == name)
    }
}

fn load_table<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let load_error = |source| Error::Load {
        path: path.to_path_buf(),
        source,
    };
    let reader = csv_reader().from_path(path).map_err(load_error)?;
    let rows = read_rows(reader).map_err(load_error)?;
    info!(action = "loaded", component = "table", path = ?path, row_count = rows.len(), "Table parsed");
    Ok(rows)
}

/// Parses a semicolon-separated table from any reader.
pub fn parse_table<T: for<'de> Deserialize<'de>, R: Read>(input: R) -> Result<Vec<T>> {
    read_rows(csv_reader().from_reader(input)).map_err(|source| Error::Load {
        path: PathBuf::from("<reader>"),
        source,
    })
}

fn csv_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(DELIMITER).flexible(false);
    builder
}

fn read_rows<T: for<'de> Deserialize<'de>, R: Read>(
    mut reader: csv::Reader<R>,
) -> std::result::Result<Vec<T>, csv::Error> {
    reader.deserialize().collect()
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|text| !text.trim().is_empty()))
}

fn optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("NaT") | Some("nan") => Ok(None),
        Some(text) => parse_date(text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", text))),
    }
}

fn count<'de, D, N>(deserializer: D) -> std::result::Result<N, D::Error>
where
    D: Deserializer<'de>,
    N: TryFrom<u64>,
{
    let raw = String::deserialize(deserializer)?;
    let value = parse_count(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid count '{}'", raw)))?;
    N::try_from(value).map_err(|_| serde::de::Error::custom(format!("count out of range '{}'", raw)))
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part after a space or `T`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let day = text.get(..10)?;
    let rest = &text[10..];
    if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('T')) {
        return None;
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Accepts non-negative integers and integral floats such as `12.0`.
pub fn parse_count(text: &str) -> Option<u64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<u64>() {
        return Some(value);
    }
    let value = text.parse::<f64>().ok()?;
    (value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64).then_some(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SONGS: &str = "\
;band_name;song_title;lyrics;lyrics_view;release_date
0;BandX;Intro;\"la la\nla la\";100;
1;BandX;Outro;;200.0;2019-05-01 00:00:00
2;BandY;Song;words;5;2020-01-01
";

    const BANDS: &str = "\
band_name;smallest_date;biggest_date;num_album;song_title;POSITIVE;NEGATIVE
BandX;2019-05-01;2019-05-01;2;2;1;0
BandY;;;1;1.0;0;1
";

    #[test]
    fn parses_song_rows_with_nulls() {
        let songs: Vec<Song> = parse_table(SONGS.as_bytes()).expect("songs");
        assert_eq!(songs.len(), 3);
        assert_eq!(songs[0].lyrics.as_deref(), Some("la la\nla la"));
        assert_eq!(songs[0].release_date, None);
        assert_eq!(songs[1].lyrics, None);
        assert_eq!(songs[1].lyrics_view, 200);
        assert_eq!(songs[1].release_date, NaiveDate::from_ymd_opt(2019, 5, 1));
    }

    #[test]
    fn parses_band_rows_with_renamed_columns() {
        let bands: Vec<Band> = parse_table(BANDS.as_bytes()).expect("bands");
        assert_eq!(bands[0].song_count, 2);
        assert_eq!(bands[0].positive, 1);
        assert_eq!(bands[1].song_count, 1);
        assert_eq!(bands[1].smallest_date, None);
    }

    #[test]
    fn rejects_malformed_dates() {
        let input = "band_name;song_title;lyrics;lyrics_view;release_date\nA;B;;1;yesterday\n";
        let result: Result<Vec<Song>> = parse_table(input.as_bytes());
        assert!(matches!(result, Err(Error::Load { .. })));
    }

    #[test]
    fn date_suffix_must_be_a_time_part() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert_eq!(parse_date("2020-01-01"), expected);
        assert_eq!(parse_date("2020-01-01 12:30:00"), expected);
        assert_eq!(parse_date("2020-01-01T12:30:00"), expected);
        assert_eq!(parse_date("2020-01-01garbage"), None);
        assert_eq!(parse_date("2020-01"), None);

        let input = "band_name;song_title;lyrics;lyrics_view;release_date\nA;B;;1;2020-01-01garbage\n";
        let result: Result<Vec<Song>> = parse_table(input.as_bytes());
        assert!(matches!(result, Err(Error::Load { .. })));
    }

    #[test]
    fn rejects_negative_counts() {
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("2.5"), None);
        assert_eq!(parse_count("7"), Some(7));
    }

    #[test]
    fn unique_artists_keeps_first_appearance() {
        let songs: Vec<Song> = parse_table(SONGS.as_bytes()).expect("songs");
        let dataset = Dataset::new(songs, Vec::new());
        assert_eq!(dataset.unique_artists(), vec!["BandX", "BandY"]);
    }
}
