//! `[content]` section configuration.
//!
//! Where the blog sources live and how strictly they are checked.

use super::defaults;
use affineur_blog::IntegrityPolicy;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in affineur.toml.
///
/// `categories` and `articles` are relative to `dir`; `dir` is relative to
/// the project root.
///
/// # Example
/// ```toml
/// [content]
/// dir = "content"
/// categories = "categories.toml"
/// articles = "articles"
/// integrity = "lenient"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    #[serde(default = "defaults::content::dir")]
    #[educe(Default = defaults::content::dir())]
    pub dir: PathBuf,

    /// Category table file.
    #[serde(default = "defaults::content::categories")]
    #[educe(Default = defaults::content::categories())]
    pub categories: PathBuf,

    /// Directory scanned recursively for `*.md` articles.
    #[serde(default = "defaults::content::articles")]
    #[educe(Default = defaults::content::articles())]
    pub articles: PathBuf,

    /// `strict` refuses articles pointing at unknown categories,
    /// `lenient` loads them and leaves the report to `affineur check`.
    #[serde(default)]
    pub integrity: IntegrityPolicy,
}

impl ContentConfig {
    pub fn categories_path(&self) -> PathBuf {
        self.dir.join(&self.categories)
    }

    pub fn articles_dir(&self) -> PathBuf {
        self.dir.join(&self.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use affineur_blog::IntegrityPolicy;
    use std::path::PathBuf;

    #[test]
    fn test_content_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.content.dir, PathBuf::from("content"));
        assert_eq!(
            config.content.categories_path(),
            PathBuf::from("content/categories.toml")
        );
        assert_eq!(config.content.articles_dir(), PathBuf::from("content/articles"));
        assert_eq!(config.content.integrity, IntegrityPolicy::Strict);
    }

    #[test]
    fn test_content_config_custom() {
        let config = r#"
            [content]
            dir = "blog"
            categories = "meta/categories.toml"
            articles = "posts"
            integrity = "lenient"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(
            config.content.categories_path(),
            PathBuf::from("blog/meta/categories.toml")
        );
        assert_eq!(config.content.articles_dir(), PathBuf::from("blog/posts"));
        assert_eq!(config.content.integrity, IntegrityPolicy::Lenient);
    }

    #[test]
    fn test_invalid_integrity_rejected() {
        let config = r#"
            [content]
            integrity = "sometimes"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
