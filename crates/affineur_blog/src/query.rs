//! Read-only queries over a [`Dataset`].
//!
//! Every method is a pure function of the frozen dataset and its arguments:
//! lookups answer `None` when nothing matches, list queries answer an empty
//! `Vec`. Nothing here can fail.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::dataset::{Dataset, compare_by_date};
use crate::model::{Article, Category, TagCount};
use crate::popularity::{PopularityRanking, Recency};

/// Score for sharing the source article's category.
pub const CATEGORY_WEIGHT: u32 = 2;

/// Score for each tag shared with the source article.
pub const TAG_WEIGHT: u32 = 1;

/// Which field of an article a search query hit. Lower ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SearchHit {
    Title,
    Description,
    Tag,
}

/// Query layer over an immutable dataset.
pub struct ContentIndex {
    dataset: Dataset,
    popularity: Box<dyn PopularityRanking>,
}

impl ContentIndex {
    /// Index a dataset, ranking popular articles newest first.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            popularity: Box::new(Recency),
        }
    }

    /// Replace the popularity policy.
    pub fn with_popularity(mut self, popularity: Box<dyn PopularityRanking>) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// All articles, newest first.
    pub fn all_articles(&self) -> &[Article] {
        self.dataset.articles()
    }

    /// Exact, case-sensitive slug lookup.
    pub fn article_by_slug(&self, slug: &str) -> Option<&Article> {
        self.dataset.article(slug)
    }

    /// Articles filed under `category_slug`, newest first.
    pub fn articles_by_category(&self, category_slug: &str) -> Vec<&Article> {
        self.all_articles()
            .iter()
            .filter(|a| a.category.slug == category_slug)
            .collect()
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.dataset.category(slug)
    }

    pub fn categories(&self) -> &[Category] {
        self.dataset.categories()
    }

    /// Articles carrying `tag` (any case), newest first.
    pub fn articles_by_tag(&self, tag: &str) -> Vec<&Article> {
        self.all_articles()
            .iter()
            .filter(|a| a.has_tag(tag))
            .collect()
    }

    /// Up to `count` articles most similar to the one at `slug`.
    ///
    /// Every other article is a candidate. Candidates score
    /// [`CATEGORY_WEIGHT`] for sharing the category plus [`TAG_WEIGHT`] per
    /// shared tag, and are ordered by score, then newest first, then slug.
    /// An unknown `slug` yields no results.
    pub fn related_articles(&self, slug: &str, count: usize) -> Vec<&Article> {
        let Some(source) = self.article_by_slug(slug) else {
            return Vec::new();
        };
        let source_tags: FxHashSet<String> =
            source.tags.iter().map(|t| t.to_lowercase()).collect();

        let mut scored: Vec<(u32, &Article)> = self
            .all_articles()
            .iter()
            .filter(|a| a.slug != source.slug)
            .map(|a| (relatedness(source, &source_tags, a), a))
            .collect();

        scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| compare_by_date(a, b)));
        scored.into_iter().take(count).map(|(_, a)| a).collect()
    }

    /// Featured articles, newest first.
    pub fn featured_articles(&self) -> Vec<&Article> {
        self.all_articles().iter().filter(|a| a.featured).collect()
    }

    /// The first `count` articles under the popularity policy.
    pub fn popular_articles(&self, count: usize) -> Vec<&Article> {
        let mut articles: Vec<&Article> = self.all_articles().iter().collect();
        articles.sort_by(|a, b| self.popularity.compare(a, b));
        articles.truncate(count);
        articles
    }

    /// Tag frequency table: most used first, alphabetical among equals.
    ///
    /// Spellings differing only in case are one tag, shown as first seen in
    /// canonical order, so each count equals `articles_by_tag(name).len()`.
    pub fn all_tags(&self) -> Vec<TagCount> {
        let mut counts: FxHashMap<String, TagCount> = FxHashMap::default();
        for tag in self.all_articles().iter().flat_map(|a| &a.tags) {
            counts
                .entry(tag.to_lowercase())
                .or_insert_with(|| TagCount {
                    name: tag.clone(),
                    count: 0,
                })
                .count += 1;
        }

        let mut tags: Vec<TagCount> = counts.into_values().collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        tags
    }

    /// Case-insensitive substring search over title, description and tags.
    ///
    /// Title hits rank above description hits, which rank above tag hits;
    /// within a rank, newest first. The query is trimmed, and an empty query
    /// matches nothing. Minimum query length is the caller's business.
    pub fn search_articles(&self, query: &str) -> Vec<&Article> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(SearchHit, &Article)> = self
            .all_articles()
            .iter()
            .filter_map(|a| search_hit(a, &needle).map(|hit| (hit, a)))
            .collect();

        // stable sort keeps canonical order within a rank
        hits.sort_by_key(|&(hit, _)| hit);
        hits.into_iter().map(|(_, a)| a).collect()
    }
}

fn relatedness(source: &Article, source_tags: &FxHashSet<String>, candidate: &Article) -> u32 {
    let category = if candidate.category.slug == source.category.slug {
        CATEGORY_WEIGHT
    } else {
        0
    };

    let shared = candidate
        .tags
        .iter()
        .map(|t| t.to_lowercase())
        .collect::<FxHashSet<_>>()
        .intersection(source_tags)
        .count() as u32;

    category + shared * TAG_WEIGHT
}

/// Best field of `article` containing `needle` (already lowercased).
fn search_hit(article: &Article, needle: &str) -> Option<SearchHit> {
    if article.title.to_lowercase().contains(needle) {
        Some(SearchHit::Title)
    } else if article.description.to_lowercase().contains(needle) {
        Some(SearchHit::Description)
    } else if article
        .tags
        .iter()
        .any(|t| t.to_lowercase().contains(needle))
    {
        Some(SearchHit::Tag)
    } else {
        None
    }
}

impl std::fmt::Debug for ContentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentIndex")
            .field("articles", &self.dataset.len())
            .field("categories", &self.dataset.categories().len())
            .finish_non_exhaustive()
    }
}
