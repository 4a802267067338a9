//! # Downloads
//!
//! Best-effort download tracking, then ledger bookkeeping, then the URL the
//! rendering surface should open.

use std::sync::Arc;

use domains::{DomainError, Photo, PhotoSource, Result};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ledger::Ledger;

pub struct PreparedDownload {
    pub url: String,
    /// Detached tracking call. Awaiting it is optional.
    pub tracking: JoinHandle<()>,
}

/// Fires the tracking call without waiting for it. Its outcome is only logged.
pub fn spawn_tracking(source: Arc<dyn PhotoSource>, photo_id: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        match source.track_download(&photo_id).await {
            Ok(_) => debug!(photo_id = %photo_id, "download tracked"),
            Err(e) => warn!(photo_id = %photo_id, error = %e, "download tracking failed"),
        }
    })
}

pub fn download_photo(
    source: Arc<dyn PhotoSource>,
    ledger: &Ledger,
    photo: &Photo,
) -> Result<PreparedDownload> {
    let tracking = spawn_tracking(source, photo.id.clone());

    if let Err(e) = ledger.add_download(photo) {
        warn!(photo_id = %photo.id, error = %e, "could not record download");
    }

    let url = photo.urls.full.trim();
    if url.is_empty() {
        return Err(DomainError::MissingDownloadUrl(photo.id.clone()));
    }

    Ok(PreparedDownload {
        url: url.to_string(),
        tracking,
    })
}
