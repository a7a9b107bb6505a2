use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("csv error: {0}")]
    Csv(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
