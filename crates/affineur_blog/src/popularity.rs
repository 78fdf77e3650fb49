//! Ordering strategies for the "popular" list.
//!
//! The site tracks no real popularity signal, so the order is a policy
//! injected into [`ContentIndex`](crate::ContentIndex). Swapping the policy
//! never changes the query contract: `popular_articles(n)` is always the
//! first `n` articles under the comparator.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::dataset::compare_by_date;
use crate::model::Article;

/// Comparator deciding which articles count as popular.
pub trait PopularityRanking: Send + Sync {
    /// `Ordering::Less` means `a` is more popular than `b`.
    fn compare(&self, a: &Article, b: &Article) -> Ordering;
}

/// Built-in strategies, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularityKind {
    #[default]
    Curated,
    Recency,
    FeaturedFirst,
}

impl PopularityKind {
    /// Instantiate the strategy. `curated` is only used by [`Self::Curated`].
    pub fn build(self, curated: &[String]) -> Box<dyn PopularityRanking> {
        match self {
            Self::Curated => Box::new(Curated::new(curated)),
            Self::Recency => Box::new(Recency),
            Self::FeaturedFirst => Box::new(FeaturedFirst),
        }
    }
}

/// Newest first.
#[derive(Debug, Default, Clone, Copy)]
pub struct Recency;

impl PopularityRanking for Recency {
    fn compare(&self, a: &Article, b: &Article) -> Ordering {
        compare_by_date(a, b)
    }
}

/// Featured articles ahead of the rest, newest first within each group.
#[derive(Debug, Default, Clone, Copy)]
pub struct FeaturedFirst;

impl PopularityRanking for FeaturedFirst {
    fn compare(&self, a: &Article, b: &Article) -> Ordering {
        b.featured
            .cmp(&a.featured)
            .then_with(|| compare_by_date(a, b))
    }
}

/// Editor-maintained list of slugs.
///
/// Listed articles come first in list order; the rest follow newest first.
/// Slugs that match no article are ignored.
#[derive(Debug, Default, Clone)]
pub struct Curated {
    positions: FxHashMap<String, usize>,
}

impl Curated {
    pub fn new<S: AsRef<str>>(slugs: &[S]) -> Self {
        let mut positions = FxHashMap::default();
        for (pos, slug) in slugs.iter().enumerate() {
            // first mention wins
            positions.entry(slug.as_ref().to_string()).or_insert(pos);
        }
        Self { positions }
    }

    fn position(&self, article: &Article) -> Option<usize> {
        self.positions.get(&article.slug).copied()
    }
}

impl PopularityRanking for Curated {
    fn compare(&self, a: &Article, b: &Article) -> Ordering {
        match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => pa.cmp(&pb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => compare_by_date(a, b),
        }
    }
}
