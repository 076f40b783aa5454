use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::Client;

use crate::config::Config;
use crate::image::FetchError;
use crate::search::{ImageSearch, SearchError};

pub mod images;
pub mod input;

/// Shared, read-only state every handler gets through an `Extension`
pub struct Context {
    pub config: Arc<Config>,
    pub client: Client,
    pub search: Arc<dyn ImageSearch>,
}

#[derive(Debug)]
pub enum AppError {
    /// A required field was missing or unusable
    Validation(String),
    /// The search worked but found nothing
    NotFound,
    DownloadFailed(FetchError),
    SearchFailed(SearchError),
}

impl From<FetchError> for AppError {
    fn from(inner: FetchError) -> Self {
        AppError::DownloadFailed(inner)
    }
}

impl From<SearchError> for AppError {
    fn from(inner: SearchError) -> Self {
        AppError::SearchFailed(inner)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (StatusCode::NOT_FOUND, "No images found.".to_owned()),
            AppError::DownloadFailed(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to download the image. Error: {}", err),
            ),
            AppError::SearchFailed(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error searching for images: {}", err),
            ),
        };
        (status, message).into_response()
    }
}
