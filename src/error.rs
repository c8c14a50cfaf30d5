use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Layout table is empty")]
    EmptyLayoutTable,

    #[error("Duplicate layout: {0}")]
    DuplicateLayout(String),

    #[error("Invalid layout '{language}': {reason}")]
    InvalidLayout { language: String, reason: String },

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    #[error("Failed to load config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Terminal too small (minimum 80x24)")]
    TerminalTooSmall,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
