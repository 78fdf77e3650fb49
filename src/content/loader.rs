//! Load the content directory into a [`Dataset`].
//!
//! ```text
//! content/
//! ├── categories.toml     [[category]] tables
//! └── articles/
//!     ├── ripening-ai.md
//!     └── 2024/
//!         └── defects.md  (nested directories are walked)
//! ```

use affineur_blog::{Category, ContentIndex, Dataset};
use anyhow::{Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use super::error::ContentError;
use super::front_matter::parse_article;
use crate::{
    config::{ContentConfig, SiteConfig},
    log,
};

const ARTICLE_EXTENSION: &str = "md";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoriesFile {
    #[serde(default, rename = "category")]
    categories: Vec<Category>,
}

/// Read `categories.toml`.
pub fn load_categories(path: &Path) -> Result<Vec<Category>, ContentError> {
    let text = fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
    let file: CategoriesFile =
        toml::from_str(&text).map_err(|err| ContentError::Toml(path.to_path_buf(), err))?;
    Ok(file.categories)
}

/// Collect `*.md` files under `dir`, sorted by path.
fn collect_article_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == ARTICLE_EXTENSION))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// Load categories and articles, then validate them as a [`Dataset`].
///
/// When several files are broken, the first one by path is reported.
pub fn load_dataset(config: &ContentConfig) -> Result<Dataset> {
    let categories = load_categories(&config.categories_path())?;
    let lookup: FxHashMap<&str, &Category> =
        categories.iter().map(|c| (c.slug.as_str(), c)).collect();

    let files = collect_article_files(&config.articles_dir());
    let articles = files
        .par_iter()
        .map(|path| {
            let text =
                fs::read_to_string(path).map_err(|err| ContentError::Io(path.clone(), err))?;
            parse_article(path, &text, &lookup)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect::<Result<Vec<_>, ContentError>>()?;

    Dataset::new(articles, categories, config.integrity)
        .with_context(|| format!("invalid content in `{}`", config.dir.display()))
}

/// Load the dataset and wrap it with the configured popularity ranking.
///
/// Integrity issues stay on the dataset; callers decide how to report them.
pub fn build_index(config: &SiteConfig) -> Result<ContentIndex> {
    let dataset = load_dataset(&config.content)?;

    log!(
        "content";
        "loaded {} articles in {} categories",
        dataset.len(),
        dataset.categories().len()
    );

    let popularity = config.blog.popularity.build(&config.blog.popular);
    Ok(ContentIndex::new(dataset).with_popularity(popularity))
}

/// [`build_index`], logging each integrity issue as a warning.
pub fn load_index(config: &SiteConfig) -> Result<ContentIndex> {
    let index = build_index(config)?;
    for issue in index.dataset().integrity_issues() {
        log!("warn"; "{issue}");
    }
    Ok(index)
}
