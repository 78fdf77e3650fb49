//! Immutable article/category collection.
//!
//! A [`Dataset`] is built once at startup and never mutated afterwards, so any
//! number of readers can share it (typically behind an `Arc`) without locks.
//!
//! # Construction
//!
//! ```text
//! articles + categories
//!        │
//!        ├── collapse duplicate tags (any case) inside each article
//!        ├── reject duplicate article / category slugs
//!        ├── apply IntegrityPolicy to category references
//!        ├── sort into canonical order (date desc, slug asc)
//!        └── index slugs
//!        ▼
//!     Dataset
//! ```

use std::cmp::Ordering;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::model::{Article, Category};

/// What to do with articles whose category slug has no matching category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityPolicy {
    /// Refuse to build the dataset.
    #[default]
    Strict,
    /// Accept the article; the problem is still listed by
    /// [`Dataset::integrity_issues`].
    Lenient,
}

/// A data-authoring problem that does not prevent querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    UnknownCategory { article: String, category: String },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory { article, category } => {
                write!(f, "article `{article}` references unknown category `{category}`")
            }
        }
    }
}

/// Canonical article order: newest first, slug ascending among equal dates.
pub(crate) fn compare_by_date(a: &Article, b: &Article) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug))
}

/// Read-only blog content.
#[derive(Debug, Default)]
pub struct Dataset {
    /// Always in canonical order
    articles: Vec<Article>,
    /// Authoring order
    categories: Vec<Category>,
    article_index: FxHashMap<String, usize>,
    category_index: FxHashMap<String, usize>,
}

impl Dataset {
    /// Validate and freeze a collection.
    pub fn new(
        mut articles: Vec<Article>,
        categories: Vec<Category>,
        policy: IntegrityPolicy,
    ) -> Result<Self, DatasetError> {
        let mut category_index = FxHashMap::default();
        for (idx, category) in categories.iter().enumerate() {
            if category_index.insert(category.slug.clone(), idx).is_some() {
                return Err(DatasetError::DuplicateCategory(category.slug.clone()));
            }
        }

        for article in &mut articles {
            dedupe_tags(&mut article.tags);
        }

        if policy == IntegrityPolicy::Strict
            && let Some(article) = articles
                .iter()
                .find(|a| !category_index.contains_key(&a.category.slug))
        {
            return Err(DatasetError::UnknownCategory {
                article: article.slug.clone(),
                category: article.category.slug.clone(),
            });
        }

        articles.sort_by(compare_by_date);

        let mut article_index = FxHashMap::default();
        for (idx, article) in articles.iter().enumerate() {
            if article_index.insert(article.slug.clone(), idx).is_some() {
                return Err(DatasetError::DuplicateSlug(article.slug.clone()));
            }
        }

        Ok(Self {
            articles,
            categories,
            article_index,
            category_index,
        })
    }

    /// Articles, newest first.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Categories in authoring order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn article(&self, slug: &str) -> Option<&Article> {
        self.article_index.get(slug).map(|&idx| &self.articles[idx])
    }

    pub fn category(&self, slug: &str) -> Option<&Category> {
        self.category_index.get(slug).map(|&idx| &self.categories[idx])
    }

    /// List category references that point nowhere.
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        self.articles
            .iter()
            .filter(|a| !self.category_index.contains_key(&a.category.slug))
            .map(|a| IntegrityIssue::UnknownCategory {
                article: a.slug.clone(),
                category: a.category.slug.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Drop repeats of a tag in any case, keeping the first spelling.
fn dedupe_tags(tags: &mut Vec<String>) {
    let mut seen = FxHashSet::default();
    tags.retain(|tag| seen.insert(tag.to_lowercase()));
}
