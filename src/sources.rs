//! Built-in source registry.
//!
//! Eight outlets ordered along the scale, from 1 (most pro-Russian editorial
//! line) to 8 (most anti-Russian). A config file can replace the list.

use crate::error::ConfigError;
use crate::models::SourceDescriptor;

const DEFAULT_SOURCES: &[(&str, &str, i64)] = &[
    ("RT", "https://www.rt.com/rss/", 1),
    (
        "Sputnik News",
        "https://sputnikglobe.com/export/rss2/archive/index.xml",
        2,
    ),
    ("Al Jazeera", "https://www.aljazeera.com/xml/rss/all.xml", 3),
    ("Reuters", "https://www.reuters.com/tools/rss", 4),
    (
        "The New York Times",
        "https://rss.nytimes.com/services/xml/rss/nyt/World.xml",
        5,
    ),
    ("BBC News", "http://feeds.bbci.co.uk/news/world/rss.xml", 6),
    ("The Guardian", "https://www.theguardian.com/world/rss", 7),
    ("Kyiv Independent", "https://kyivindependent.com/feed/", 8),
];

/// The default descriptors, validated.
pub fn default_sources() -> Result<Vec<SourceDescriptor>, ConfigError> {
    DEFAULT_SOURCES
        .iter()
        .map(|(name, url, scale)| SourceDescriptor::new(name, url, *scale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_cover_the_scale() {
        let sources = default_sources().unwrap();
        assert_eq!(sources.len(), 8);
        let scales: Vec<u8> = sources.iter().map(|s| s.scale.get()).collect();
        assert_eq!(scales, (1..=8).collect::<Vec<u8>>());
        assert_eq!(sources[5].name, "BBC News");
    }
}
