//! Affineur - blog content engine for the Digital Affineur site.

mod cli;
mod config;
mod content;
mod lead;
mod logger;
mod output;
mod roi;
mod serve;
#[cfg(test)]
mod testing;

use affineur_blog::{ContentIndex, IntegrityPolicy};
use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::{ConfigError, SiteConfig};
use content::{build_index, load_index};
use lead::LeadForm;
use output::{CheckReport, OutputFormat};
use serve::serve_api;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let format = OutputFormat::from_json_flag(cli.json);

    match &cli.command {
        Commands::Roi {
            volume,
            defect_rate,
        } => {
            let rate = defect_rate.unwrap_or(config.roi.defect_rate);
            let estimate = roi::estimate(&config.roi, *volume, rate)?;
            print!("{}", output::render_roi(&estimate, format)?);
            Ok(())
        }
        Commands::Lead {
            name,
            phone,
            email,
            consent,
        } => submit_lead(&config, name, phone, email, *consent, format),
        Commands::Check => check(&config, format),
        Commands::Serve { .. } => serve_api(&config, load_index(&config)?),
        command => query(command, &config, &load_index(&config)?, format),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = SiteConfig::default();
    config.update_with_cli(cli);

    if config.config_path.exists() {
        let mut loaded = SiteConfig::from_path(&config.config_path)?;
        loaded.update_with_cli(cli);
        config = loaded;
    } else if cli.needs_content() {
        bail!(ConfigError::NotFound(config.config_path));
    }

    config.validate(cli)?;
    Ok(config)
}

/// Read-only content queries.
fn query(
    command: &Commands,
    config: &SiteConfig,
    index: &ContentIndex,
    format: OutputFormat,
) -> Result<()> {
    let out = match command {
        Commands::Articles { featured: true } => {
            output::render_articles(&index.featured_articles(), format)?
        }
        Commands::Articles { featured: false } => {
            let articles: Vec<_> = index.all_articles().iter().collect();
            output::render_articles(&articles, format)?
        }
        Commands::Article { slug } => {
            let Some(article) = index.article_by_slug(slug) else {
                bail!("article `{slug}` not found");
            };
            let mut out = output::render_article(article, format)?;
            if format == OutputFormat::Text
                && let Some(url) = config.base.article_url(slug)
            {
                out.push_str(&format!("\n{url}\n"));
            }
            out
        }
        Commands::Category { slug } => {
            let Some(category) = index.category_by_slug(slug) else {
                bail!("category `{slug}` not found");
            };
            output::render_category(category, &index.articles_by_category(slug), format)?
        }
        Commands::Tag { tag } => {
            let articles = index.articles_by_tag(tag);
            if articles.is_empty() {
                bail!("no articles tagged `{tag}`");
            }
            output::render_articles(&articles, format)?
        }
        Commands::Tags { limit, all } => {
            let mut tags = index.all_tags();
            if !all {
                tags.truncate(limit.unwrap_or(config.blog.sidebar_tags));
            }
            output::render_tags(&tags, format)?
        }
        Commands::Search { query } => {
            if !config.blog.is_searchable(query) {
                bail!(
                    "search query must be at least {} characters",
                    config.blog.search_min_chars
                );
            }
            output::render_articles(&index.search_articles(query), format)?
        }
        Commands::Related { slug, count } => {
            if index.article_by_slug(slug).is_none() {
                bail!("article `{slug}` not found");
            }
            let count = count.unwrap_or(config.blog.related_count);
            output::render_articles(&index.related_articles(slug, count), format)?
        }
        Commands::Popular { count } => {
            let count = count.unwrap_or(config.blog.popular_count);
            output::render_articles(&index.popular_articles(count), format)?
        }
        Commands::Roi { .. } | Commands::Lead { .. } | Commands::Check | Commands::Serve { .. } => {
            bail!("`{command:?}` is not a content query")
        }
    };

    print!("{out}");
    Ok(())
}

/// Load the content leniently and report every integrity problem once,
/// through the check report.
fn check(config: &SiteConfig, format: OutputFormat) -> Result<()> {
    let mut config = config.clone();
    config.content.integrity = IntegrityPolicy::Lenient;
    let index = build_index(&config)?;
    let report = build_check_report(&config, &index);

    print!("{}", output::render_check(&report, format)?);
    if !report.issues.is_empty() {
        bail!("{} integrity issue(s) found", report.issues.len());
    }
    log!("check"; "content is consistent");
    Ok(())
}

fn build_check_report(config: &SiteConfig, index: &ContentIndex) -> CheckReport {
    let mut issues: Vec<String> = index
        .dataset()
        .integrity_issues()
        .iter()
        .map(ToString::to_string)
        .collect();
    issues.extend(
        config
            .blog
            .popular
            .iter()
            .filter(|slug| index.article_by_slug(slug).is_none())
            .map(|slug| format!("[blog.popular] lists unknown article `{slug}`")),
    );

    CheckReport {
        articles: index.all_articles().len(),
        categories: index.categories().len(),
        tags: index.all_tags().len(),
        featured: index.featured_articles().len(),
        issues,
    }
}

fn submit_lead(
    config: &SiteConfig,
    name: &str,
    phone: &str,
    email: &str,
    consent: bool,
    format: OutputFormat,
) -> Result<()> {
    let form = LeadForm {
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        consent,
    };

    match form.into_submission(&config.contact) {
        Ok(submission) => {
            println!("{}", output::render_lead(&submission)?);
            Ok(())
        }
        Err(errors) => {
            print!("{}", output::render_lead_errors(&errors, format)?);
            Err(errors.into())
        }
    }
}
