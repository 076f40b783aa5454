use std::path::{Component, Path, PathBuf};

use futures::StreamExt;
use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::request::{ensure_success, HttpError};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid image url: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0} must not be empty")]
    EmptyPath(&'static str),
    #[error("filename {0:?} points outside of the base path")]
    OutsideBase(String),
    #[error("{0}")]
    Http(#[from] HttpError),
    #[error("could not write image: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(HttpError::ReqwestError(err))
    }
}

/// Where a download ends up, `filename` nested under `base_path`.
///
/// Root and drive prefixes of `filename` are dropped so an absolute name
/// still lands inside the base, `..` is refused.
pub fn destination(base_path: &Path, filename: &str) -> Result<PathBuf, FetchError> {
    let mut full_path = base_path.to_path_buf();
    let mut nested = false;
    for component in Path::new(filename).components() {
        match component {
            Component::Normal(part) => {
                full_path.push(part);
                nested = true;
            }
            Component::ParentDir => return Err(FetchError::OutsideBase(filename.to_owned())),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
        }
    }
    if !nested {
        return Err(FetchError::EmptyPath("filename"));
    }
    Ok(full_path)
}

/// Downloads `image_url` into `base_path/filename`, creating any missing
/// directories and replacing whatever was at that path before.
///
/// The body is streamed straight to disk. A failure halfway through leaves
/// the partially written file behind.
pub async fn fetch_and_save(
    client: &Client,
    image_url: &str,
    base_path: &Path,
    filename: &str,
) -> Result<PathBuf, FetchError> {
    let url = Url::parse(image_url)?;
    if base_path.as_os_str().is_empty() {
        return Err(FetchError::EmptyPath("basePath"));
    }
    let full_path = destination(base_path, filename)?;

    let response = ensure_success(client.get(url).send().await?).await?;

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let mut file = File::create(&full_path).await?;
    let mut body = response.bytes_stream();
    let mut written = 0usize;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        written += chunk.len();
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    debug!("Wrote {} bytes to {}", written, full_path.display());
    Ok(full_path)
}
