//! Console report over the CSV export.
//!
//! Two views: how many headlines each source contributed, and which words
//! dominate the headlines at each point of the scale.

use crate::models::{HeadlineRecord, Scale};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Alphabetic}+(?:'\p{Alphabetic}+)*").expect("static regex"));

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // English
        "the", "and", "of", "in", "to", "a", "on", "for", "with", "at", "from", "by", "an", "is",
        "as", "it", "that", "this", "was", "be", "are", "but", "or", "have", "has", "had", "their",
        "its", "they", "them", "his", "her", "he", "she", "we", "you", "i", "who", "what", "which",
        "will", "can", "all", "not", "been", "were", "also", "more", "after", "one", "new",
        "about", "would", "could", "just", "into", "over", "than", "when", "out", "up", "no", "so",
        "if", "do", "did", "may", "me", "us", "our", "because", "it's", "they're", "we're",
        "that's", "don't", "isn't", "you're", "i'm", "he's", "she's", "says", "said",
        // Spanish
        "el", "la", "los", "las", "de", "del", "en", "y", "un", "una", "con", "por", "para",
        "al", "que", "es", "más", "su", "sus", "como", "se", "ha", "han", "lo", "o", "este",
        "esta", "sin", "sobre", "entre", "tras",
    ]
    .into_iter()
    .collect()
});

/// Minimum word length (in characters) for the frequency view.
const MIN_WORD_CHARS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCount {
    pub source: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleWords {
    pub scale: Scale,
    pub headlines: usize,
    pub top_words: Vec<(String, usize)>,
}

/// Both report views, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub total: usize,
    pub by_source: Vec<SourceCount>,
    pub by_scale: Vec<ScaleWords>,
}

impl Report {
    /// Compute both views over `records`, keeping `top` words per scale.
    pub fn build(records: &[HeadlineRecord], top: usize) -> Self {
        Self {
            total: records.len(),
            by_source: count_by_source(records),
            by_scale: top_words_by_scale(records, top),
        }
    }
}

/// Headline count per source, largest first, ties by name.
///
/// # Examples
///
/// ```
/// use titulares::analysis::count_by_source;
/// use titulares::models::{HeadlineRecord, PublishedDate, SourceDescriptor};
///
/// let rt = SourceDescriptor::new("RT", "https://www.rt.com/rss/", 1)?;
/// let record = |t: &str| {
///     HeadlineRecord::from_descriptor(&rt, PublishedDate::Unknown, t.into(), String::new())
/// };
/// let counts = count_by_source(&[record("a"), record("b")]);
/// assert_eq!(counts[0].source, "RT");
/// assert_eq!(counts[0].count, 2);
/// # Ok::<(), titulares::ConfigError>(())
/// ```
pub fn count_by_source(records: &[HeadlineRecord]) -> Vec<SourceCount> {
    records
        .iter()
        .map(|r| r.source_name.as_str())
        .counts()
        .into_iter()
        .map(|(source, count)| SourceCount {
            source: source.to_string(),
            count,
        })
        .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.source.cmp(&b.source)))
        .collect()
}

/// Lowercased words of a headline that are worth counting.
///
/// A word is a run of letters, optionally joined by apostrophes
/// (`kyiv's`). Words shorter than four characters and common English and
/// Spanish function words are dropped.
///
/// # Examples
///
/// ```
/// use titulares::analysis::significant_words;
///
/// assert_eq!(significant_words("Rusia y Ucrania negocian"), ["rusia", "ucrania", "negocian"]);
/// ```
pub fn significant_words(title: &str) -> Vec<String> {
    let lower = title.to_lowercase().replace('’', "'");
    WORD.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() >= MIN_WORD_CHARS && !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// The `top` most frequent words for every scale present, scales ascending.
pub fn top_words_by_scale(records: &[HeadlineRecord], top: usize) -> Vec<ScaleWords> {
    records
        .iter()
        .into_group_map_by(|r| r.scale)
        .into_iter()
        .sorted_by_key(|(scale, _)| *scale)
        .map(|(scale, group)| {
            let top_words = group
                .iter()
                .flat_map(|r| significant_words(&r.title))
                .counts()
                .into_iter()
                .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
                .take(top)
                .collect();
            ScaleWords {
                scale,
                headlines: group.len(),
                top_words,
            }
        })
        .collect()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Headlines by source ({} total)", self.total)?;
        writeln!(f, "{}", "-".repeat(45))?;
        for row in &self.by_source {
            writeln!(f, "  {:<25}: {:>4} headlines", row.source, row.count)?;
        }
        writeln!(f, "{}", "-".repeat(45))?;

        writeln!(f, "\nMost used words by scale")?;
        for scale in &self.by_scale {
            writeln!(f, "\nScale {} ({} headlines)", scale.scale, scale.headlines)?;
            if scale.top_words.is_empty() {
                writeln!(f, "  no significant words")?;
                continue;
            }
            for (word, count) in &scale.top_words {
                writeln!(f, "  {word:<18} {count:>3}")?;
            }
        }
        Ok(())
    }
}
