//! Fixture builders shared by the unit tests.

use chrono::NaiveDate;

use crate::model::{Article, Author, Category, CategoryRef};

pub(crate) fn article(slug: &str, category: &str, date: &str, tags: &[&str]) -> Article {
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
            name: "Редакция".to_string(),
            role: None,
        },
        tags: tags.iter().map(|t| t.to_string()).collect(),
        read_time: "5 мин".to_string(),
        featured: false,
        icon: "🧀".to_string(),
    }
}

pub(crate) fn category(slug: &str) -> Category {
    Category {
        slug: slug.to_string(),
        name: slug.to_string(),
        description: String::new(),
        icon: "📂".to_string(),
        color: "#00F0FF".to_string(),
    }
}
