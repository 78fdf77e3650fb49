//! Rendering of query results for the terminal and for JSON consumers.
//!
//! Every `render_*` function returns the full text so that the CLI prints it
//! in one go and the API server can reuse the JSON views.

use affineur_blog::{Article, Category, CategoryRef, TagCount};
use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

use crate::{
    lead::{LeadErrors, LeadSubmission},
    roi::{RoiEstimate, format_number, months_word},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Article as listed on cards: everything but the body.
#[derive(Debug, Serialize)]
pub struct ArticleSummary<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub date: NaiveDate,
    pub category: &'a CategoryRef,
    pub author: &'a str,
    pub tags: &'a [String],
    pub read_time: &'a str,
    pub featured: bool,
    pub icon: &'a str,
}

impl<'a> From<&'a Article> for ArticleSummary<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            id: &article.id,
            slug: &article.slug,
            title: &article.title,
            description: &article.description,
            date: article.date,
            category: &article.category,
            author: &article.author.name,
            tags: &article.tags,
            read_time: &article.read_time,
            featured: article.featured,
            icon: &article.icon,
        }
    }
}

pub fn summaries<'a>(articles: &[&'a Article]) -> Vec<ArticleSummary<'a>> {
    articles.iter().map(|&a| ArticleSummary::from(a)).collect()
}

/// Category page: the category itself and its articles.
#[derive(Debug, Serialize)]
pub struct CategoryPage<'a> {
    #[serde(flatten)]
    pub category: &'a Category,
    pub articles: Vec<ArticleSummary<'a>>,
}

/// Result of `affineur check`.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub articles: usize,
    pub categories: usize,
    pub tags: usize,
    pub featured: usize,
    pub issues: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FieldErrorView {
    field: &'static str,
    message: String,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn article_line(out: &mut String, article: &Article) {
    let tags: Vec<_> = article.tags.iter().map(|t| format!("#{t}")).collect();
    let featured = if article.featured { " ★" } else { "" };
    writeln!(
        out,
        "{}  {} {}{}  {}  {}",
        article.date.to_string().dimmed(),
        article.icon,
        article.title.bold(),
        featured,
        format!("({})", article.slug).cyan(),
        format!("[{}]", article.category.name).yellow(),
    )
    .ok();
    if !tags.is_empty() {
        writeln!(out, "            {}", tags.join(" ").dimmed()).ok();
    }
}

pub fn render_articles(articles: &[&Article], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&summaries(articles)),
        OutputFormat::Text => {
            let mut out = String::new();
            for article in articles {
                article_line(&mut out, article);
            }
            if articles.is_empty() {
                writeln!(out, "{}", "no articles".dimmed()).ok();
            }
            Ok(out)
        }
    }
}

pub fn render_article(article: &Article, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(article),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "{} {}", article.icon, article.title.bold()).ok();
            writeln!(out, "{}", article.description.italic()).ok();
            let author = match &article.author.role {
                Some(role) => format!("{}, {role}", article.author.name),
                None => article.author.name.clone(),
            };
            writeln!(
                out,
                "{} · {} · {} · {}",
                article.date,
                article.category.name,
                author,
                article.read_time
            )
            .ok();
            if !article.tags.is_empty() {
                writeln!(out, "{}", article.tags.join(", ").dimmed()).ok();
            }
            writeln!(out).ok();
            writeln!(out, "{}", article.content.trim_end()).ok();
            Ok(out)
        }
    }
}

pub fn render_category(
    category: &Category,
    articles: &[&Article],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&CategoryPage {
            category,
            articles: summaries(articles),
        }),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "{} {}", category.icon, category.name.bold()).ok();
            writeln!(out, "{}", category.description.italic()).ok();
            writeln!(out).ok();
            out.push_str(&render_articles(articles, format)?);
            Ok(out)
        }
    }
}

pub fn render_tags(tags: &[TagCount], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(tags),
        OutputFormat::Text => {
            let width = tags.iter().map(|t| t.count.to_string().len()).max().unwrap_or(1);
            let mut out = String::new();
            for tag in tags {
                writeln!(out, "{:>width$}  {}", tag.count, tag.name).ok();
            }
            Ok(out)
        }
    }
}

pub fn render_roi(roi: &RoiEstimate, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(roi),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(
                out,
                "Объём производства: {}, брак {}%",
                roi.volume.label(),
                roi.defect_rate
            )
            .ok();
            writeln!(
                out,
                "Ваша экономия: {} ₽/мес",
                format_number(roi.savings).bold()
            )
            .ok();
            writeln!(
                out,
                "Окупаемость: {} {}",
                roi.payback_months.to_string().bold(),
                months_word(roi.payback_months)
            )
            .ok();
            writeln!(out, "Экономия за год: {} ₽", format_number(roi.yearly_savings)).ok();
            Ok(out)
        }
    }
}

/// Valid leads are always printed as the JSON payload.
pub fn render_lead(submission: &LeadSubmission) -> Result<String> {
    to_json(submission)
}

pub fn render_lead_errors(errors: &LeadErrors, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let views: Vec<_> = errors
                .0
                .iter()
                .map(|e| FieldErrorView {
                    field: e.field(),
                    message: e.to_string(),
                })
                .collect();
            to_json(&serde_json::json!({ "errors": views }))
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for error in &errors.0 {
                writeln!(out, "{}: {}", error.field().red(), error).ok();
            }
            Ok(out)
        }
    }
}

pub fn render_check(report: &CheckReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(
                out,
                "{} articles ({} featured), {} categories, {} tags",
                report.articles, report.featured, report.categories, report.tags
            )
            .ok();
            for issue in &report.issues {
                writeln!(out, "{} {issue}", "!".red().bold()).ok();
            }
            Ok(out)
        }
    }
}
