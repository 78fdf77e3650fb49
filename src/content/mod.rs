//! Blog content on disk: `categories.toml` plus markdown articles with TOML
//! front matter.

mod error;
mod front_matter;
mod loader;

pub use loader::{build_index, load_index};
