use rayon::prelude::*;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::info;

// Embedded at compile time
const STOPWORDS: &str = include_str!("../stopwords.txt");

pub const DEFAULT_MAX_WORDS: usize = 200;

/// Which lyrics text feeds the word cloud.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LyricsMode {
    /// Repeated lines (choruses) are kept once per song.
    #[default]
    Deduplicated,
    /// Lyrics exactly as stored.
    Full,
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w[\w']*").expect("static word pattern"))
}

pub fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        STOPWORDS
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    })
}

/// Keeps the first occurrence of every line.
pub fn dedup_lines(text: &str) -> String {
    let mut seen = HashSet::new();
    text.lines()
        .filter(|line| seen.insert(*line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercased words of `text` that count towards a word cloud.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    let stop = stopwords();
    word_pattern().find_iter(text).filter_map(move |m| {
        let lower = m.as_str().to_lowercase();
        if stop.contains(lower.as_str()) {
            return None;
        }
        let word = lower.strip_suffix("'s").unwrap_or(&lower);
        if word.chars().count() < 2
            || word.chars().all(|c| c.is_ascii_digit())
            || stop.contains(word)
        {
            return None;
        }
        Some(word.to_string())
    })
}

/// Counts words across `texts`, most frequent first, ties broken alphabetically.
pub fn word_frequencies(texts: &[&str], max_words: usize) -> Vec<(String, usize)> {
    let start_time = Instant::now();

    let counts = texts
        .par_iter()
        .fold(HashMap::new, |mut acc: HashMap<String, usize>, text| {
            for word in tokenize(text) {
                *acc.entry(word).or_insert(0) += 1;
            }
            acc
        })
        .reduce(HashMap::new, |mut merged, partial| {
            for (word, count) in partial {
                *merged.entry(word).or_insert(0) += count;
            }
            merged
        });

    let mut frequencies: Vec<(String, usize)> = counts.into_iter().collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    frequencies.truncate(max_words);

    info!(
        action = "complete",
        component = "word_frequencies",
        text_count = texts.len(),
        word_count = frequencies.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Word frequencies computed"
    );
    frequencies
}
