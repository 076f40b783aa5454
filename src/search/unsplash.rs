use async_trait::async_trait;
use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::request::parse_successful_response;

use super::{ImageSearch, SearchError};

#[derive(Debug, Deserialize)]
pub struct UnsplashUrls {
    pub regular: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashPhoto {
    pub urls: UnsplashUrls,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashSearchResponse {
    pub results: Vec<UnsplashPhoto>,
}

pub struct UnsplashSearch {
    pub client: Client,
    pub access_key: String,
    pub api_root: String,
}

impl UnsplashSearch {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            access_key: config.unsplash_access_key.clone(),
            api_root: config.unsplash_api_root.clone(),
        }
    }

    pub fn search_url(&self, query: &str, count: usize) -> Result<Url, SearchError> {
        let per_page = count.to_string();
        Ok(Url::parse_with_params(
            &format!("{}/search/photos", self.api_root),
            &[("page", "1"), ("query", query), ("per_page", &per_page)],
        )?)
    }
}

#[async_trait]
impl ImageSearch for UnsplashSearch {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>, SearchError> {
        let url = self.search_url(query, count)?;
        debug!("Searching unsplash for {:?} ({} results)", query, count);
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .send()
            .await?;
        let body = parse_successful_response::<UnsplashSearchResponse>(response).await?;
        Ok(body
            .results
            .into_iter()
            .take(count)
            .map(|photo| photo.urls.regular)
            .collect())
    }
}
