//! Article files: `+++` fenced TOML front matter followed by markdown.
//!
//! ```text
//! +++
//! title = "ИИ-технолог для созревания сыра"
//! description = "Как нейросеть следит за камерой созревания"
//! date = 2024-07-01
//! category = "technology"
//! author = { name = "Анна Петрова", role = "Технолог" }
//! tags = ["ИИ", "сыр"]
//! featured = true
//! icon = "🤖"
//! +++
//!
//! # Markdown body
//! ```

use affineur_blog::{Article, Author, Category, CategoryRef};
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, de};
use std::path::Path;

use super::error::ContentError;

/// Average reading speed used for the read-time estimate.
const WORDS_PER_MINUTE: usize = 200;

const DEFAULT_ICON: &str = "📄";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrontMatter {
    title: String,
    description: String,
    #[serde(deserialize_with = "deserialize_date")]
    date: NaiveDate,
    /// Category slug
    category: String,
    author: Author,
    #[serde(default)]
    tags: Vec<String>,
    /// Defaults to the file stem
    slug: Option<String>,
    /// Defaults to the slug
    id: Option<String>,
    /// Defaults to an estimate from the body length
    read_time: Option<String>,
    #[serde(default)]
    featured: bool,
    icon: Option<String>,
}

/// Accept both a TOML date (`date = 2024-07-01`) and a string (`date = "2024-07-01"`).
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    match toml::Value::deserialize(deserializer)? {
        toml::Value::String(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|e| de::Error::custom(format!("invalid date `{s}`: {e}"))),
        toml::Value::Datetime(dt) => dt
            .date
            .and_then(|d| NaiveDate::from_ymd_opt(d.year.into(), d.month.into(), d.day.into()))
            .ok_or_else(|| de::Error::custom(format!("invalid date `{dt}`"))),
        other => Err(de::Error::custom(format!(
            "expected a date, found {}",
            other.type_str()
        ))),
    }
}

/// Split `text` into (front matter, body). `None` if there is no fenced block.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = text.strip_prefix("+++")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "+++" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// "N мин", at least one minute.
pub fn estimate_read_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    format!("{} мин", words.div_ceil(WORDS_PER_MINUTE).max(1))
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Parse one article file.
///
/// The category name is taken from `categories`; an unknown category keeps
/// its slug as name and is left for the dataset's integrity policy to judge.
pub fn parse_article(
    path: &Path,
    text: &str,
    categories: &FxHashMap<&str, &Category>,
) -> Result<Article, ContentError> {
    let (meta, body) =
        split_front_matter(text).ok_or_else(|| ContentError::MissingFrontMatter(path.to_path_buf()))?;
    let meta: FrontMatter =
        toml::from_str(meta).map_err(|err| ContentError::Toml(path.to_path_buf(), err))?;

    let slug = match meta.slug {
        Some(slug) => slug,
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    if !is_valid_slug(&slug) {
        return Err(ContentError::InvalidSlug(path.to_path_buf(), slug));
    }

    let category = match categories.get(meta.category.as_str()) {
        Some(category) => category.to_ref(),
        None => CategoryRef {
            name: meta.category.clone(),
            slug: meta.category,
        },
    };

    let body = body.trim_start_matches(['\r', '\n']);
    Ok(Article {
        id: meta.id.unwrap_or_else(|| slug.clone()),
        slug,
        title: meta.title,
        description: meta.description,
        read_time: meta.read_time.unwrap_or_else(|| estimate_read_time(body)),
        content: body.to_string(),
        date: meta.date,
        category,
        author: meta.author,
        tags: meta.tags,
        featured: meta.featured,
        icon: meta.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
    })
}
