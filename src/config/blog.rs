//! `[blog]` section configuration.
//!
//! Knobs the renderers used to hard-code: how many related/popular articles
//! to show, how many tags fit the sidebar, when search kicks in, and which
//! popularity policy applies.

use super::defaults;
use affineur_blog::PopularityKind;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[blog]` section in affineur.toml.
///
/// # Example
/// ```toml
/// [blog]
/// related_count = 3
/// popular_count = 4
/// popularity = "curated"
/// popular = ["ripening-ai", "defects-top-5"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BlogConfig {
    /// Related articles shown under an article.
    #[serde(default = "defaults::blog::related_count")]
    #[educe(Default = defaults::blog::related_count())]
    pub related_count: usize,

    /// Entries in the "popular" list.
    #[serde(default = "defaults::blog::popular_count")]
    #[educe(Default = defaults::blog::popular_count())]
    pub popular_count: usize,

    /// Entries of the tag table shown in the sidebar.
    #[serde(default = "defaults::blog::sidebar_tags")]
    #[educe(Default = defaults::blog::sidebar_tags())]
    pub sidebar_tags: usize,

    /// Shorter queries are not searched.
    #[serde(default = "defaults::blog::search_min_chars")]
    #[educe(Default = defaults::blog::search_min_chars())]
    pub search_min_chars: usize,

    #[serde(default)]
    pub popularity: PopularityKind,

    /// Curated slugs, most popular first. Used by `popularity = "curated"`.
    #[serde(default)]
    pub popular: Vec<String>,
}

impl BlogConfig {
    /// Whether `query` is long enough to be searched (counted in characters).
    pub fn is_searchable(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.search_min_chars
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use affineur_blog::PopularityKind;

    #[test]
    fn test_blog_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.blog.related_count, 3);
        assert_eq!(config.blog.popular_count, 4);
        assert_eq!(config.blog.sidebar_tags, 10);
        assert_eq!(config.blog.search_min_chars, 2);
        assert_eq!(config.blog.popularity, PopularityKind::Curated);
        assert!(config.blog.popular.is_empty());
    }

    #[test]
    fn test_blog_config_custom() {
        let config = r#"
            [blog]
            related_count = 2
            popularity = "featured_first"
            popular = ["a", "b"]
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.blog.related_count, 2);
        assert_eq!(config.blog.popularity, PopularityKind::FeaturedFirst);
        assert_eq!(config.blog.popular, vec!["a", "b"]);
    }

    #[test]
    fn test_is_searchable_counts_chars() {
        let config: SiteConfig = toml::from_str("").unwrap();

        // Cyrillic letters are two bytes each but count as one character
        assert!(!config.blog.is_searchable("с"));
        assert!(config.blog.is_searchable("сы"));
        assert!(!config.blog.is_searchable("  с  "));
        assert!(!config.blog.is_searchable(""));
    }
}
