use async_trait::async_trait;
use thiserror::Error;

use crate::request::HttpError;

pub use unsplash::*;

pub mod unsplash;

/// Page size used when a caller doesn't ask for a specific amount
pub const DEFAULT_IMAGE_COUNT: usize = 10;

/// The largest page the upstream API will hand back in one request
pub const MAXIMUM_IMAGE_COUNT: usize = 30;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Error formatting URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0}")]
    Http(#[from] HttpError),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Http(HttpError::ReqwestError(err))
    }
}

/// A source of image urls for a text query.
///
/// An empty result is a successful search that found nothing, callers
/// have to tell that apart from an `Err`.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>, SearchError>;
}
