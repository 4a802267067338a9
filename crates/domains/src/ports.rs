//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired into the binary.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{Orientation, Photo, SortOrder};

/// Remote photo search/listing service.
///
/// Every call may fail with `Network`, `RateLimited`, `Api` or
/// `MalformedResponse`.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Keyword search. `sort` only affects ranking.
    async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
        sort: SortOrder,
        orientation: Orientation,
        color: &str,
    ) -> Result<Vec<Photo>>;

    /// Photos of a topic, always newest first.
    async fn list_by_category(&self, slug: &str, page: u32, per_page: u32) -> Result<Vec<Photo>>;

    /// The default editorial listing. There is no color filter here.
    async fn list_default(
        &self,
        page: u32,
        per_page: u32,
        sort: SortOrder,
        orientation: Orientation,
    ) -> Result<Vec<Photo>>;

    async fn random(&self) -> Result<Photo>;

    /// Notifies the service that a photo was downloaded. Callers treat the
    /// response as opaque.
    async fn track_download(&self, photo_id: &str) -> Result<serde_json::Value>;

    async fn get_details(&self, photo_id: &str) -> Result<Photo>;
}

/// String key-value store that outlives the session (favorites, history).
///
/// An absent key is `Ok(None)`, never an error.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
