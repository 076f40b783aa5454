use std::fmt;
use std::iter::FromIterator;

use log::error;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug)]
pub struct ResponseErrorContext {
    pub body: String,
    pub code: StatusCode,
}

impl fmt::Display for ResponseErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.body)
    }
}

/// Wrapper for providing actual useful information about
/// why responses failed since reqwest throws that information
/// away when it encounters errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("upstream responded with {0}")]
    FailStatus(ResponseErrorContext),
    #[error("unexpected response body {0}")]
    UnexpectedBody(ResponseErrorContext),
    #[error("{0}")]
    ReqwestError(#[from] reqwest::Error),
}

/// Turns non 2xx responses into an error that keeps the body around
pub async fn ensure_success(response: Response) -> Result<Response, HttpError> {
    let response_code = response.status();
    if response_code.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(HttpError::FailStatus(ResponseErrorContext {
        body,
        code: response_code,
    }))
}

pub async fn parse_successful_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, HttpError> {
    let response_code = response.status();
    let url = response.url().clone();
    let response_body = response.text().await?;
    if !response_code.is_success() {
        return Err(HttpError::FailStatus(ResponseErrorContext {
            body: response_body,
            code: response_code,
        }));
    }
    serde_json::from_str::<T>(&response_body).map_err(|error| {
        error!("Failed to parse response from {}: {}", url, error);
        HttpError::UnexpectedBody(ResponseErrorContext {
            body: response_body,
            code: response_code,
        })
    })
}

pub fn request_default_headers(user_agent: &str) -> HeaderMap {
    let value = HeaderValue::from_str(user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static("imgrelay"));
    HeaderMap::from_iter([(HeaderName::from_static("user-agent"), value)])
}

/// Shared client for every outgoing request the proxy makes
pub fn build_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .default_headers(request_default_headers(user_agent))
        .build()
}
