//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::roi::Volume;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Digital Affineur blog content engine
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root (directory holding the config file)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: affineur.toml)
    #[arg(short = 'C', long, default_value = "affineur.toml")]
    pub config: PathBuf,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List articles, newest first
    Articles {
        /// Only featured articles
        #[arg(short, long)]
        featured: bool,
    },

    /// Show one article by slug
    Article {
        slug: String,
    },

    /// List articles of a category
    Category {
        slug: String,
    },

    /// List articles carrying a tag (case-insensitive)
    Tag {
        tag: String,
    },

    /// Print the tag frequency table
    Tags {
        /// Show at most this many tags (default: [blog.sidebar_tags])
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show the whole table
        #[arg(short, long, conflicts_with = "limit")]
        all: bool,
    },

    /// Search titles, descriptions and tags
    Search {
        query: String,
    },

    /// Articles related to the given one
    Related {
        slug: String,

        /// How many to show (default: [blog.related_count])
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Most popular articles
    Popular {
        /// How many to show (default: [blog.popular_count])
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Load the content and report integrity problems
    Check,

    /// Estimate monthly savings and payback period
    Roi {
        #[arg(short, long, value_enum, default_value_t = Volume::Medium)]
        volume: Volume,

        /// Current defect rate, percent (default: [roi.defect_rate])
        #[arg(short, long)]
        defect_rate: Option<u32>,
    },

    /// Validate a demo request and print the submission payload
    Lead {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        email: String,

        /// Consent to personal data processing
        #[arg(long)]
        consent: bool,
    },

    /// Serve the content as a read-only JSON API
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Whether the command reads the blog content.
    pub const fn needs_content(&self) -> bool {
        !matches!(self.command, Commands::Roi { .. } | Commands::Lead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["affineur", "search", "сыр"]);
        assert!(matches!(cli.command, Commands::Search { ref query } if query == "сыр"));
        assert!(!cli.json);
        assert_eq!(cli.config, PathBuf::from("affineur.toml"));
    }

    #[test]
    fn test_json_flag_is_global() {
        let cli = Cli::parse_from(["affineur", "tags", "--json", "--limit", "5"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Tags { limit: Some(5), all: false }));
    }

    #[test]
    fn test_parse_roi_defaults() {
        let cli = Cli::parse_from(["affineur", "roi"]);
        match cli.command {
            Commands::Roi { volume, defect_rate } => {
                assert_eq!(volume, Volume::Medium);
                assert_eq!(defect_rate, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.needs_content());
    }

    #[test]
    fn test_parse_related_count() {
        let cli = Cli::parse_from(["affineur", "related", "ripening-ai", "-n", "2"]);
        assert!(matches!(
            cli.command,
            Commands::Related { ref slug, count: Some(2) } if slug == "ripening-ai"
        ));
        assert!(cli.needs_content());
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["affineur", "--root", "site", "serve", "--port", "3000"]);
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert!(matches!(cli.command, Commands::Serve { port: Some(3000), .. }));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_roi_help_mentions_monthly_savings() {
        use clap::CommandFactory;
        let cli = Cli::command();
        let roi = cli.find_subcommand("roi").unwrap();
        let about = roi.get_about().unwrap().to_string();
        assert!(about.contains("monthly"), "{about}");
    }
}
