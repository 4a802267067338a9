//! # Ledger
//!
//! Favorites, recently viewed and downloaded photos, persisted through a
//! [`LocalStore`] as JSON arrays (newest first).

use std::sync::Arc;

use domains::{DomainError, LedgerList, LocalStore, Photo, Result};
use tracing::warn;

pub const FAVORITES_KEY: &str = "codegallery_favorites";
pub const RECENT_VIEWS_KEY: &str = "codegallery_recent_views";
pub const DOWNLOADS_KEY: &str = "codegallery_downloads";

pub const MAX_RECENT_VIEWS: usize = 20;
pub const MAX_DOWNLOADS: usize = 50;

fn key_for(list: LedgerList) -> &'static str {
    match list {
        LedgerList::Favorites => FAVORITES_KEY,
        LedgerList::RecentViews => RECENT_VIEWS_KEY,
        LedgerList::Downloads => DOWNLOADS_KEY,
    }
}

fn cap_for(list: LedgerList) -> Option<usize> {
    match list {
        LedgerList::Favorites => None,
        LedgerList::RecentViews => Some(MAX_RECENT_VIEWS),
        LedgerList::Downloads => Some(MAX_DOWNLOADS),
    }
}

#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn LocalStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Reads a list. A missing key is an empty list; so is an unreadable
    /// value, which gets logged.
    pub fn list(&self, list: LedgerList) -> Vec<Photo> {
        let key = key_for(list);
        match self.store.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key, error = %e, "discarding unreadable ledger entry");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "ledger read failed");
                Vec::new()
            }
        }
    }

    pub fn favorites(&self) -> Vec<Photo> {
        self.list(LedgerList::Favorites)
    }

    pub fn recent_views(&self) -> Vec<Photo> {
        self.list(LedgerList::RecentViews)
    }

    pub fn downloads(&self) -> Vec<Photo> {
        self.list(LedgerList::Downloads)
    }

    pub fn is_favorited(&self, photo_id: &str) -> bool {
        self.favorites().iter().any(|p| p.id == photo_id)
    }

    /// Adds or removes `photo` from favorites and returns the new state.
    pub fn toggle_favorite(&self, photo: &Photo) -> Result<bool> {
        let mut favorites = self.favorites();
        let before = favorites.len();
        favorites.retain(|p| p.id != photo.id);
        let favorited = favorites.len() == before;
        if favorited {
            favorites.insert(0, photo.clone());
        }
        self.write(LedgerList::Favorites, &favorites)?;
        Ok(favorited)
    }

    pub fn add_recent_view(&self, photo: &Photo) -> Result<()> {
        self.push_front(LedgerList::RecentViews, photo)
    }

    pub fn add_download(&self, photo: &Photo) -> Result<()> {
        self.push_front(LedgerList::Downloads, photo)
    }

    /// Looks a photo up in favorites, then recent views, then downloads.
    pub fn find(&self, photo_id: &str) -> Option<Photo> {
        [
            LedgerList::Favorites,
            LedgerList::RecentViews,
            LedgerList::Downloads,
        ]
        .into_iter()
        .find_map(|list| self.list(list).into_iter().find(|p| p.id == photo_id))
    }

    pub fn clear(&self, list: LedgerList) -> Result<()> {
        self.store.remove(key_for(list))
    }

    fn push_front(&self, list: LedgerList, photo: &Photo) -> Result<()> {
        let mut photos = self.list(list);
        photos.retain(|p| p.id != photo.id);
        photos.insert(0, photo.clone());
        if let Some(cap) = cap_for(list) {
            photos.truncate(cap);
        }
        self.write(list, &photos)
    }

    fn write(&self, list: LedgerList, photos: &[Photo]) -> Result<()> {
        let raw = serde_json::to_string(photos)
            .map_err(|e| DomainError::Storage(format!("encode {}: {e}", key_for(list))))?;
        self.store.set(key_for(list), &raw)
    }
}
