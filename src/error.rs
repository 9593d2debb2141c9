// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("network error: {0}")]
    Net(#[from] reqwest::Error),

    #[error("HTTP error: {status} {url}")]
    Http { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown recommendation label: {0:?}")]
    InvalidLabel(String),

    #[error("csv error: {0}")]
    Csv(String),
}
