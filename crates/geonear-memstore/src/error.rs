use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemstoreError>;

#[derive(Error, Debug)]
pub enum MemstoreError {
    #[error("Geohash error: {0}")]
    Geohash(#[from] geonear::GeohashError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Extra fields must be a JSON object or null")]
    NonObjectFields,
}
