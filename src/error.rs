use thiserror::Error;

/// Message shown to the user when the keyword form is submitted without a title.
pub const MISSING_TITLE_MESSAGE: &str = "Please enter a title!";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeywordError {
    #[error("Please enter a title!")]
    MissingTitle,

    #[error("Keyword analysis failed: {message}")]
    Analysis { message: String },
}

pub type Result<T> = std::result::Result<T, KeywordError>;
