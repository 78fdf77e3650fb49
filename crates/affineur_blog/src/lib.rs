//! Content query layer for the Digital Affineur blog.
//!
//! The blog is a small, fixed collection of articles and categories. It is
//! validated once into a [`Dataset`], wrapped in a [`ContentIndex`], and then
//! only read:
//!
//! | Query | Result |
//! |-------|--------|
//! | [`ContentIndex::all_articles`] | every article, newest first |
//! | [`ContentIndex::article_by_slug`] | one article or `None` |
//! | [`ContentIndex::articles_by_category`] | articles in a category |
//! | [`ContentIndex::articles_by_tag`] | articles carrying a tag (any case) |
//! | [`ContentIndex::category_by_slug`] | one category or `None` |
//! | [`ContentIndex::related_articles`] | articles ranked by shared category/tags |
//! | [`ContentIndex::featured_articles`] | articles flagged `featured` |
//! | [`ContentIndex::popular_articles`] | first N under a [`PopularityRanking`] |
//! | [`ContentIndex::all_tags`] | tag frequency table |
//! | [`ContentIndex::search_articles`] | substring search over title/description/tags |
//!
//! # Example
//!
//! ```ignore
//! let dataset = Dataset::new(articles, categories, IntegrityPolicy::Strict)?;
//! let index = ContentIndex::new(dataset)
//!     .with_popularity(PopularityKind::Curated.build(&curated_slugs));
//!
//! if let Some(article) = index.article_by_slug("ripening-ai") {
//!     let related = index.related_articles(&article.slug, 3);
//! }
//! ```

mod dataset;
mod error;
mod model;
pub mod popularity;
mod query;

#[cfg(test)]
mod testing;

pub use dataset::{Dataset, IntegrityIssue, IntegrityPolicy};
pub use error::DatasetError;
pub use model::{Article, Author, Category, CategoryRef, TagCount};
pub use popularity::{PopularityKind, PopularityRanking};
pub use query::{CATEGORY_WEIGHT, ContentIndex, TAG_WEIGHT};
