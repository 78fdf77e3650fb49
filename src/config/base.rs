//! `[base]` section configuration.
//!
//! Contains basic site information like title, description and URL.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in affineur.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Digital Affineur"
/// description = "ИИ-технолог для созревания сыра"
/// url = "https://airipening.ru"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, shown in the CLI banner and API index.
    pub title: String,

    pub description: String,

    /// Public base URL, used to print absolute article links.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code of the content.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}

impl BaseConfig {
    /// Absolute URL of an article page, if a base URL is configured.
    pub fn article_url(&self, slug: &str) -> Option<String> {
        self.url
            .as_deref()
            .map(|url| format!("{}/blog/{slug}", url.trim_end_matches('/')))
    }
}
