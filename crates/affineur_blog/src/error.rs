//! Dataset construction errors.

use thiserror::Error;

/// Errors raised while freezing a [`Dataset`](crate::Dataset).
///
/// Queries never fail; only construction can.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("duplicate article slug `{0}`")]
    DuplicateSlug(String),

    #[error("duplicate category slug `{0}`")]
    DuplicateCategory(String),

    #[error("article `{article}` references unknown category `{category}`")]
    UnknownCategory { article: String, category: String },
}
