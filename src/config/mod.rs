//! Site configuration management for `affineur.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[base]`    | Site metadata (title, description, url)         |
//! | `[content]` | Content paths and integrity policy              |
//! | `[blog]`    | Related/popular counts, search, popularity      |
//! | `[serve]`   | JSON API server (interface, port, workers)      |
//! | `[roi]`     | ROI calculator constants                        |
//! | `[contact]` | Lead recipient                                  |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Digital Affineur"
//! description = "Блог об ИИ в сыроделии"
//! url = "https://airipening.ru"
//!
//! [content]
//! dir = "content"
//! integrity = "strict"
//!
//! [blog]
//! popular = ["ripening-ai", "defects-top-5"]
//!
//! [serve]
//! port = 8080
//! ```

mod base;
mod blog;
mod contact;
mod content;
pub mod defaults;
mod error;
mod roi;
mod serve;

pub use blog::BlogConfig;
pub use contact::ContactConfig;
pub use content::ContentConfig;
pub use error::ConfigError;
pub use roi::RoiConfig;

use base::BaseConfig;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing affineur.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Absolute project root (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Content location
    #[serde(default)]
    pub content: ContentConfig,

    /// Blog query settings
    #[serde(default)]
    pub blog: BlogConfig,

    /// JSON API server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// ROI calculator
    #[serde(default)]
    pub roi: RoiConfig,

    /// Lead form
    #[serde(default)]
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML text read from `path`.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Toml(path.to_path_buf(), err))
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::parse(path, &content)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = Self::normalize_path(cli.root.as_deref().unwrap_or(Path::new("./")));

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        Self::update_option(&mut self.content.dir, cli.content.as_ref());
        self.content.dir = Self::normalize_path(&root.join(&self.content.dir));
        self.root = root;

        if let Commands::Serve { interface, port } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.blog.search_min_chars == 0 {
            bail!(ConfigError::Validation(
                "[blog.search_min_chars] must be at least 1".into()
            ));
        }

        if self.serve.workers == 0 {
            bail!(ConfigError::Validation(
                "[serve.workers] must be at least 1".into()
            ));
        }

        let roi = &self.roi;
        if roi.min_defect_rate > roi.max_defect_rate {
            bail!(ConfigError::Validation(
                "[roi.min_defect_rate] must not exceed [roi.max_defect_rate]".into()
            ));
        }
        if !(roi.min_defect_rate..=roi.max_defect_rate).contains(&roi.defect_rate) {
            bail!(ConfigError::Validation(format!(
                "[roi.defect_rate] must be within {}..={}",
                roi.min_defect_rate, roi.max_defect_rate
            )));
        }
        if roi.investment == 0 || roi.multiplier == 0 {
            bail!(ConfigError::Validation(
                "[roi.investment] and [roi.multiplier] must be positive".into()
            ));
        }

        if cli.needs_content() {
            let categories = self.content.categories_path();
            let articles = self.content.articles_dir();

            if !self.content.dir.is_dir() {
                bail!(ConfigError::Validation(format!(
                    "[content.dir] `{}` is not a directory",
                    self.content.dir.display()
                )));
            }
            if !categories.is_file() {
                bail!(ConfigError::Validation(format!(
                    "[content.categories] `{}` not found",
                    categories.display()
                )));
            }
            if !articles.is_dir() {
                bail!(ConfigError::Validation(format!(
                    "[content.articles] `{}` is not a directory",
                    articles.display()
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("affineur").chain(args.iter().copied()))
    }

    fn site_with_content() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content/articles")).unwrap();
        fs::write(dir.path().join("content/categories.toml"), "").unwrap();
        dir
    }

    #[test]
    fn test_parse() {
        let config_str = r#"
            [base]
            title = "Digital Affineur"
            description = "Блог"
        "#;
        let config = SiteConfig::parse(Path::new("affineur.toml"), config_str).unwrap();
        assert_eq!(config.base.title, "Digital Affineur");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = SiteConfig::parse(Path::new("affineur.toml"), "[base\ntitle = 1");
        assert!(matches!(result, Err(ConfigError::Toml(..))));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = SiteConfig::from_path(Path::new("/definitely/not/here/affineur.toml"));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let config = r#"
            [unknown_section]
            field = "value"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.base.title, "");
        assert_eq!(config.blog.related_count, 3);
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.roi.investment, 500_000);
    }

    #[test]
    fn test_update_with_cli_resolves_paths() {
        let dir = site_with_content();
        let root = dir.path().to_str().unwrap();

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", root, "articles"]));

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.root, root);
        assert_eq!(config.config_path, root.join("affineur.toml"));
        assert_eq!(config.content.dir, root.join("content"));
    }

    #[test]
    fn test_update_with_cli_content_override() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", root, "--content", "posts", "check"]));

        assert!(config.content.dir.ends_with("posts"));
    }

    #[test]
    fn test_update_with_cli_serve_overrides() {
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["serve", "--interface", "0.0.0.0", "--port", "3000"]));

        assert_eq!(config.serve.interface, "0.0.0.0");
        assert_eq!(config.serve.port, 3000);
    }

    #[test]
    fn test_validate_ok() {
        let dir = site_with_content();
        let args = cli(&["--root", dir.path().to_str().unwrap(), "articles"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(&args);
        assert!(config.validate(&args).is_ok());
    }

    #[test]
    fn test_validate_missing_content() {
        let dir = tempfile::tempdir().unwrap();
        let args = cli(&["--root", dir.path().to_str().unwrap(), "articles"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(&args);
        let err = config.validate(&args).unwrap_err().to_string();
        assert!(err.contains("[content.dir]"));
    }

    #[test]
    fn test_validate_roi_without_content() {
        let dir = tempfile::tempdir().unwrap();
        let args = cli(&["--root", dir.path().to_str().unwrap(), "roi"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(&args);
        assert!(config.validate(&args).is_ok());
    }

    #[test]
    fn test_validate_bad_url() {
        let args = cli(&["roi"]);
        let mut config = SiteConfig::default();
        config.base.url = Some("airipening.ru".into());

        let err = config.validate(&args).unwrap_err().to_string();
        assert!(err.contains("[base.url]"));
    }

    #[test]
    fn test_validate_defect_rate_range() {
        let args = cli(&["roi"]);
        let mut config = SiteConfig::default();
        config.roi.defect_rate = 70;

        let err = config.validate(&args).unwrap_err().to_string();
        assert!(err.contains("[roi.defect_rate]"));

        config.roi.defect_rate = 20;
        config.roi.min_defect_rate = 60;
        let err = config.validate(&args).unwrap_err().to_string();
        assert!(err.contains("[roi.min_defect_rate]"));
    }

    #[test]
    fn test_validate_zero_workers() {
        let args = cli(&["roi"]);
        let mut config = SiteConfig::default();
        config.serve.workers = 0;

        assert!(config.validate(&args).is_err());
    }

    #[test]
    fn test_full_config_all_sections() {
        let config = r#"
            [base]
            title = "Digital Affineur"
            description = "Блог об ИИ в сыроделии"
            url = "https://airipening.ru"
            language = "ru"

            [content]
            dir = "content"
            integrity = "lenient"

            [blog]
            related_count = 3
            popular_count = 4
            sidebar_tags = 10
            search_min_chars = 2
            popularity = "curated"
            popular = ["ripening-ai"]

            [serve]
            interface = "127.0.0.1"
            port = 3000
            workers = 2

            [roi]
            investment = 600000
            [roi.volume]
            medium = 300

            [contact]
            email = "sales@airipening.ru"
        "#;
        let config = SiteConfig::parse(Path::new("affineur.toml"), config).unwrap();

        assert_eq!(config.base.url.as_deref(), Some("https://airipening.ru"));
        assert_eq!(config.blog.popular, vec!["ripening-ai"]);
        assert_eq!(config.serve.workers, 2);
        assert_eq!(config.roi.investment, 600_000);
        assert_eq!(config.roi.volume.medium, 300);
        assert_eq!(config.contact.email, "sales@airipening.ru");
    }
}
