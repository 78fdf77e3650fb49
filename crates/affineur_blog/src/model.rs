//! Content records served by the query layer.
//!
//! Records are plain data: they are built once by the loader, frozen inside a
//! [`Dataset`](crate::Dataset) and only ever handed out by reference.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier (used as a list key by renderers)
    pub id: String,

    /// URL key, unique across the collection
    pub slug: String,

    pub title: String,

    /// Short summary shown on cards and in search results
    pub description: String,

    /// Markdown body
    pub content: String,

    /// Publication date
    pub date: NaiveDate,

    pub category: CategoryRef,

    pub author: Author,

    /// Tags as authored. Matching against them is case-insensitive.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Human readable reading time, e.g. "5 мин"
    pub read_time: String,

    #[serde(default)]
    pub featured: bool,

    /// Emoji shown next to the title
    pub icon: String,
}

impl Article {
    /// Check whether the article carries `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

/// Denormalized reference from an article to its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A topical grouping of articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub icon: String,

    /// Accent color for renderers, e.g. "#00F0FF". Ignored by queries.
    pub color: String,
}

impl Category {
    /// Build the reference an article stores for this category.
    pub fn to_ref(&self) -> CategoryRef {
        CategoryRef {
            slug: self.slug.clone(),
            name: self.name.clone(),
        }
    }
}

/// One row of the tag frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    /// Tag as authored
    pub name: String,

    /// Number of articles carrying the tag
    pub count: usize,
}
