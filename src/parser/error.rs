use thiserror::Error;

use super::fields::Field;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{field}: no element matches the row selector")]
    RowNotFound { field: Field },

    #[error("{field}: candidate {index} has no cell")]
    CellNotFound { field: Field, index: usize },

    #[error("{field}: descent step {step} did not resolve to an element")]
    PathBroken { field: Field, step: usize },

    #[error("{field}: attribute `{attr}` is missing")]
    AttributeMissing { field: Field, attr: &'static str },

    #[error("{field}: `{text}` is not a known rating")]
    UnknownRating { field: Field, text: String },

    #[error("breed page: no element for {0}")]
    PageElementMissing(&'static str),

    #[error("unreadable bar width `{0}`")]
    BadPercentage(String),

    #[error("unreadable life expectancy `{0}`")]
    BadLifeExpectancy(String),
}
