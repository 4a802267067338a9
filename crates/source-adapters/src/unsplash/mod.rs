//! Unsplash REST client implementing `PhotoSource`.
//!
//! The access key travels as the `client_id` query parameter, so request URLs
//! are never logged whole.

mod wire;

use std::time::Duration;

use async_trait::async_trait;
use domains::{DomainError, Orientation, Photo, PhotoSource, Result, SortOrder};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use self::wire::{into_photos, SearchResponse, WirePhoto};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct UnsplashSource {
    client: Client,
    base_url: Url,
    access_key: SecretString,
}

impl UnsplashSource {
    pub fn new(base_url: &str, access_key: SecretString) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::Configuration(format!("invalid base url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::Configuration(format!(
                "base url {base_url} cannot carry a path"
            )));
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("tomzora/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Configuration(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            access_key,
        })
    }

    /// `base_url` joined with `segments`, plus `client_id` and `params`.
    fn endpoint(&self, segments: &[&str], params: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", self.access_key.expose_secret());
            for (name, value) in params {
                query.append_pair(name, value);
            }
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str, url: Url) -> Result<T> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(route, status = status.as_u16(), "photo service rejected request");
            return Err(DomainError::from_status(status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| DomainError::Network(e.without_url().to_string()))?;
        debug!(route, bytes = body.len(), "photo service answered");
        serde_json::from_slice(&body)
            .map_err(|e| DomainError::MalformedResponse(format!("{route}: {e}")))
    }
}

/// Search only knows two rankings.
fn search_order(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Latest => "latest",
        SortOrder::Oldest | SortOrder::Popular => "relevant",
    }
}

fn paging(page: u32, per_page: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("per_page", per_page.to_string())]
}

#[async_trait]
impl PhotoSource for UnsplashSource {
    async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
        sort: SortOrder,
        orientation: Orientation,
        color: &str,
    ) -> Result<Vec<Photo>> {
        let mut params = vec![("query", query.to_string())];
        params.extend(paging(page, per_page));
        params.push(("order_by", search_order(sort).to_string()));
        if let Some(orientation) = orientation.as_param() {
            params.push(("orientation", orientation.to_string()));
        }
        if !color.is_empty() {
            params.push(("color", color.to_string()));
        }
        let url = self.endpoint(&["search", "photos"], &params);
        let body: SearchResponse = self.get_json("search", url).await?;
        into_photos(body.results)
    }

    async fn list_by_category(&self, slug: &str, page: u32, per_page: u32) -> Result<Vec<Photo>> {
        let mut params = paging(page, per_page);
        params.push(("order_by", SortOrder::Latest.as_str().to_string()));
        let url = self.endpoint(&["topics", slug, "photos"], &params);
        let body: Vec<WirePhoto> = self.get_json("topic", url).await?;
        into_photos(body)
    }

    async fn list_default(
        &self,
        page: u32,
        per_page: u32,
        sort: SortOrder,
        orientation: Orientation,
    ) -> Result<Vec<Photo>> {
        let mut params = paging(page, per_page);
        params.push(("order_by", sort.as_str().to_string()));
        if let Some(orientation) = orientation.as_param() {
            params.push(("orientation", orientation.to_string()));
        }
        let url = self.endpoint(&["photos"], &params);
        let body: Vec<WirePhoto> = self.get_json("listing", url).await?;
        into_photos(body)
    }

    async fn random(&self) -> Result<Photo> {
        let url = self.endpoint(&["photos", "random"], &[]);
        let body: WirePhoto = self.get_json("random", url).await?;
        Photo::try_from(body)
    }

    async fn track_download(&self, photo_id: &str) -> Result<serde_json::Value> {
        let url = self.endpoint(&["photos", photo_id, "download"], &[]);
        self.get_json("download", url).await
    }

    async fn get_details(&self, photo_id: &str) -> Result<Photo> {
        let url = self.endpoint(&["photos", photo_id], &[]);
        let body: WirePhoto = self.get_json("details", url).await?;
        Photo::try_from(body)
    }
}
