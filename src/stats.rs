use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistKpis {
    pub artist: String,
    pub first_song_date: Option<NaiveDate>,
    pub last_song_date: Option<NaiveDate>,
    pub album_count: u32,
    pub distinct_song_count: usize,
    /// First song of the artist in table order; not necessarily the most viewed.
    pub example_popular_song: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetKpis {
    pub band_count: usize,
    pub song_count: usize,
    pub oldest_song: Option<NaiveDate>,
    pub most_recent_song: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: u64,
    pub color: Option<String>,
    /// Ordered `(field, value)` pairs shown on hover.
    pub hover: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bars: Vec::new(),
        }
    }

    pub fn values(&self) -> Vec<u64> {
        self.bars.iter().map(|bar| bar.value).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|bar| bar.label.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Songs per year, dense from the first to the last year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSeries {
    pub name: String,
    pub points: Vec<(i32, u64)>,
}

impl YearSeries {
    pub fn total(&self) -> u64 {
        self.points.iter().map(|(_, count)| count).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
}

impl SentimentCounts {
    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloudInput {
    pub artist: String,
    pub text: String,
    pub frequencies: Vec<(String, usize)>,
}

/// Five-number summary of a date distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxSummary {
    pub min: NaiveDate,
    pub q1: NaiveDate,
    pub median: NaiveDate,
    pub q3: NaiveDate,
    pub max: NaiveDate,
    pub count: usize,
}

impl BoxSummary {
    pub fn from_dates(dates: &[NaiveDate]) -> Option<Self> {
        let mut days: Vec<i32> = dates.iter().map(|d| d.num_days_from_ce()).collect();
        days.sort_unstable();
        let (&first, &last) = (days.first()?, days.last()?);

        let at = |q: f64| -> Option<NaiveDate> {
            let position = q * (days.len() - 1) as f64;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let value = days[lower] as f64 + (days[upper] - days[lower]) as f64 * (position - lower as f64);
            NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
        };

        Some(Self {
            min: NaiveDate::from_num_days_from_ce_opt(first)?,
            q1: at(0.25)?,
            median: at(0.5)?,
            q3: at(0.75)?,
            max: NaiveDate::from_num_days_from_ce_opt(last)?,
            count: days.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn box_summary_of_empty_is_none() {
        assert_eq!(BoxSummary::from_dates(&[]), None);
    }

    #[test]
    fn box_summary_interpolates_quartiles() {
        let dates = [date(2000, 1, 5), date(2000, 1, 1), date(2000, 1, 3)];
        let summary = BoxSummary::from_dates(&dates).expect("summary");
        assert_eq!(summary.min, date(2000, 1, 1));
        assert_eq!(summary.q1, date(2000, 1, 2));
        assert_eq!(summary.median, date(2000, 1, 3));
        assert_eq!(summary.q3, date(2000, 1, 4));
        assert_eq!(summary.max, date(2000, 1, 5));
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn single_date_collapses_box() {
        let summary = BoxSummary::from_dates(&[date(2020, 1, 1)]).expect("summary");
        assert_eq!(summary.min, summary.max);
        assert_eq!(summary.median, date(2020, 1, 1));
    }

    #[test]
    fn year_series_total_sums_counts() {
        let series = YearSeries {
            name: "X".into(),
            points: vec![(2000, 2), (2001, 0), (2002, 3)],
        };
        assert_eq!(series.total(), 5);
    }
}
