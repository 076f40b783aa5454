//! Turns the loosely shaped input of an incoming request into one typed
//! request object per operation.
//!
//! Fields can arrive in the query string or in a JSON body. For write-style
//! methods with a JSON content type a body field takes precedence and the
//! query string is the fallback; everything else only looks at the query
//! string.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method};
use serde_json::{Map, Value};

use crate::api::AppError;
use crate::search::{DEFAULT_IMAGE_COUNT, MAXIMUM_IMAGE_COUNT};

/// Request fields merged from the query string and the body
#[derive(Debug, Default)]
pub struct RawInput {
    query: HashMap<String, String>,
    body: Map<String, Value>,
}

impl RawInput {
    pub fn parse(
        method: &Method,
        headers: &HeaderMap,
        query: Option<&str>,
        body: &Bytes,
    ) -> Result<Self, AppError> {
        let query: HashMap<String, String> = query
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        let body = if is_write_method(method)
            && is_json(headers)
            && !body.iter().all(u8::is_ascii_whitespace)
        {
            match serde_json::from_slice::<Value>(body) {
                Ok(Value::Object(map)) => map,
                _ => {
                    return Err(AppError::Validation(
                        "Request body must be a JSON object.".to_owned(),
                    ))
                }
            }
        } else {
            Map::new()
        };
        Ok(RawInput { query, body })
    }

    /// Non-empty value of `key`, body first
    pub fn field(&self, key: &str) -> Option<String> {
        let present = |value: &String| !value.is_empty();
        self.body
            .get(key)
            .and_then(scalar_text)
            .filter(present)
            .or_else(|| self.query.get(key).cloned().filter(present))
    }
}

fn is_write_method(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// `application/json` or any `+json` media type, parameters ignored
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[derive(Debug, PartialEq)]
pub struct DownloadRequest {
    pub image_url: String,
    pub base_path: PathBuf,
    pub filename: String,
}

impl DownloadRequest {
    pub fn from_input(input: &RawInput, default_base: Option<&PathBuf>) -> Result<Self, AppError> {
        let (image_url, filename) = match (input.field("imageUrl"), input.field("filename")) {
            (Some(image_url), Some(filename)) => (image_url, filename),
            _ => {
                return Err(AppError::Validation(
                    "Missing imageUrl or filename.".to_owned(),
                ))
            }
        };
        if Path::new(&filename)
            .components()
            .any(|component| component == Component::ParentDir)
        {
            return Err(AppError::Validation(
                "filename must not leave basePath.".to_owned(),
            ));
        }
        let base_path = input
            .field("basePath")
            .map(PathBuf::from)
            .or_else(|| default_base.cloned())
            .ok_or_else(|| {
                AppError::Validation(
                    "Missing basePath and no default download directory is configured.".to_owned(),
                )
            })?;
        Ok(DownloadRequest {
            image_url,
            base_path,
            filename,
        })
    }
}

#[derive(Debug, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub image_count: usize,
}

impl SearchRequest {
    pub fn from_input(input: &RawInput) -> Result<Self, AppError> {
        let query = input
            .field("query")
            .ok_or_else(|| AppError::Validation("Search query is required.".to_owned()))?;
        Ok(SearchRequest {
            query,
            image_count: image_count(input.field("imageCount").as_deref()),
        })
    }
}

/// Reads the leading integer of `raw` the way a lenient form would, so
/// "5", "5.9" and "5px" all mean 5. Anything unusable is the default,
/// anything too large is the upstream maximum.
pub fn image_count(raw: Option<&str>) -> usize {
    let digits = raw
        .map(|raw| {
            let raw = raw.trim_start();
            let unsigned = raw.strip_prefix('+').unwrap_or(raw);
            unsigned
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
        })
        .unwrap_or_default();
    if digits.is_empty() {
        return DEFAULT_IMAGE_COUNT;
    }
    match digits.parse::<usize>() {
        Ok(0) => DEFAULT_IMAGE_COUNT,
        Ok(count) => count.min(MAXIMUM_IMAGE_COUNT),
        // only overflow is left once the digits are known to be non-empty
        Err(_) => MAXIMUM_IMAGE_COUNT,
    }
}
