use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid date: {0}")]
    InvalidDate(#[from] jiff::Error),
}
