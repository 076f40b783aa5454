use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Extension, RawQuery};
use axum::http::{HeaderMap, Method};
use axum::Json;
use log::{error, info};

use crate::api::input::{DownloadRequest, RawInput, SearchRequest};
use crate::api::{AppError, Context};
use crate::image::fetch_and_save;

pub async fn download_image(
    Extension(state): Extension<Arc<Context>>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<String, AppError> {
    let input = RawInput::parse(&method, &headers, query.as_deref(), &body)?;
    let request = DownloadRequest::from_input(&input, state.config.base_path.as_ref())?;
    let path = fetch_and_save(
        &state.client,
        &request.image_url,
        &request.base_path,
        &request.filename,
    )
    .await
    .map_err(|err| {
        error!("Error downloading {}: {}", request.image_url, err);
        err
    })?;
    info!("Saved {} to {}", request.image_url, path.display());
    Ok(format!(
        "Image downloaded successfully at {}",
        path.display()
    ))
}

pub async fn search_images(
    Extension(state): Extension<Arc<Context>>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Json<Vec<String>>, AppError> {
    let input = RawInput::parse(&method, &headers, query.as_deref(), &body)?;
    let request = SearchRequest::from_input(&input)?;
    let urls = state
        .search
        .search(&request.query, request.image_count)
        .await
        .map_err(|err| {
            error!("Error searching for {:?}: {}", request.query, err);
            err
        })?;
    if urls.is_empty() {
        info!("No images found for {:?}", request.query);
        return Err(AppError::NotFound);
    }
    info!("Found {} images for {:?}", urls.len(), request.query);
    Ok(Json(urls))
}
