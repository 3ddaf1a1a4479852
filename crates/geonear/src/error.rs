use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeonearError {
    #[error("Geohash error: {0}")]
    Geohash(#[from] crate::geohash::GeohashError),
    #[error("Search error: {0}")]
    Search(#[from] crate::search::SearchError),
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GeonearError>;
