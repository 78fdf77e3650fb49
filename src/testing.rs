//! Fixtures shared by the binary's unit tests.

use affineur_blog::{Article, Author, Category, CategoryRef};
use chrono::NaiveDate;

pub fn article(slug: &str, category: &str, date: &str, tags: &[&str], featured: bool) -> Article {
    Article {
        id: slug.to_string(),
        slug: slug.to_string(),
        title: format!("Title {slug}"),
        description: format!("Description {slug}"),
        content: String::new(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category: CategoryRef {
            slug: category.to_string(),
            name: category.to_string(),
        },
        author: Author {
            name: "Анна Петрова".to_string(),
            role: None,
        },
        tags: tags.iter().map(ToString::to_string).collect(),
        read_time: "5 мин".to_string(),
        featured,
        icon: "🧀".to_string(),
    }
}

pub fn category(slug: &str) -> Category {
    Category {
        slug: slug.to_string(),
        name: slug.to_string(),
        description: format!("About {slug}"),
        icon: "📁".to_string(),
        color: "#000000".to_string(),
    }
}
