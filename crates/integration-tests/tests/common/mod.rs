//! Shared fixtures: photo builders and a photo source whose answers the test
//! hands out one request at a time.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use domains::{
    Author, DomainError, GallerySnapshot, Orientation, Photo, PhotoSource, PhotoUrls, Result,
    SortOrder,
};
use services::{Command, GalleryService, Ledger, Update};
use storage_adapters::MemoryStore;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::timeout;

pub const WAIT: Duration = Duration::from_secs(2);

pub fn photo(id: &str) -> Photo {
    Photo {
        id: id.to_string(),
        urls: PhotoUrls {
            small: format!("https://images.example/{id}?w=400"),
            regular: format!("https://images.example/{id}?w=1080"),
            full: format!("https://images.example/{id}"),
        },
        description: Some(format!("photo {id}")),
        author: Author {
            name: "Noor".into(),
            profile_url: "https://unsplash.com/@noor".into(),
        },
        likes: 3,
        width: 1600,
        height: 900,
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        permalink: format!("https://unsplash.com/photos/{id}"),
        category: None,
    }
}

pub fn photos(prefix: &str, n: usize) -> Vec<Photo> {
    (0..n).map(|i| photo(&format!("{prefix}-{i}"))).collect()
}

/// What the service asked the source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search {
        query: String,
        page: u32,
        sort: SortOrder,
        orientation: Orientation,
        color: String,
    },
    Category {
        slug: String,
        page: u32,
    },
    Listing {
        page: u32,
        sort: SortOrder,
        orientation: Orientation,
    },
    Random,
    Details(String),
}

pub struct Pending {
    pub call: Call,
    reply: oneshot::Sender<Result<Vec<Photo>>>,
}

impl Pending {
    pub fn answer(self, outcome: Result<Vec<Photo>>) {
        let _ = self.reply.send(outcome);
    }
}

/// Every list/single call parks until the test answers the matching `Pending`.
/// Download tracking answers immediately and is only recorded.
pub struct GatedSource {
    requests: mpsc::UnboundedSender<Pending>,
    pub tracked: Mutex<Vec<String>>,
}

impl GatedSource {
    async fn ask(&self, call: Call) -> Result<Vec<Photo>> {
        let (reply, answer) = oneshot::channel();
        self.requests
            .send(Pending { call, reply })
            .map_err(|_| DomainError::Network("test dropped".into()))?;
        answer
            .await
            .map_err(|_| DomainError::Network("request abandoned".into()))?
    }

    async fn ask_one(&self, call: Call) -> Result<Photo> {
        let id = match &call {
            Call::Details(id) => id.clone(),
            _ => "random".to_string(),
        };
        self.ask(call)
            .await?
            .into_iter()
            .next()
            .ok_or(DomainError::NotFound(id))
    }
}

#[async_trait]
impl PhotoSource for GatedSource {
    async fn search(
        &self,
        query: &str,
        page: u32,
        _per_page: u32,
        sort: SortOrder,
        orientation: Orientation,
        color: &str,
    ) -> Result<Vec<Photo>> {
        self.ask(Call::Search {
            query: query.to_string(),
            page,
            sort,
            orientation,
            color: color.to_string(),
        })
        .await
    }

    async fn list_by_category(&self, slug: &str, page: u32, _per_page: u32) -> Result<Vec<Photo>> {
        self.ask(Call::Category {
            slug: slug.to_string(),
            page,
        })
        .await
    }

    async fn list_default(
        &self,
        page: u32,
        _per_page: u32,
        sort: SortOrder,
        orientation: Orientation,
    ) -> Result<Vec<Photo>> {
        self.ask(Call::Listing {
            page,
            sort,
            orientation,
        })
        .await
    }

    async fn random(&self) -> Result<Photo> {
        self.ask_one(Call::Random).await
    }

    async fn track_download(&self, photo_id: &str) -> Result<serde_json::Value> {
        self.tracked.lock().unwrap().push(photo_id.to_string());
        Ok(serde_json::json!({ "url": format!("https://dl.example/{photo_id}") }))
    }

    async fn get_details(&self, photo_id: &str) -> Result<Photo> {
        self.ask_one(Call::Details(photo_id.to_string())).await
    }
}

/// A running `GalleryService` over a `GatedSource` and an in-memory ledger.
pub struct Harness {
    pub commands: mpsc::Sender<Command>,
    pub updates: mpsc::UnboundedReceiver<Update>,
    pub requests: mpsc::UnboundedReceiver<Pending>,
    pub source: Arc<GatedSource>,
    pub ledger: Ledger,
    pub task: JoinHandle<()>,
}

impl Harness {
    pub fn start() -> Self {
        let (requests_tx, requests) = mpsc::unbounded_channel();
        let source = Arc::new(GatedSource {
            requests: requests_tx,
            tracked: Mutex::default(),
        });
        let ledger = Ledger::new(Arc::new(MemoryStore::new()));
        let (updates_tx, updates) = mpsc::unbounded_channel();
        let (commands, commands_rx) = mpsc::channel(16);
        let service = GalleryService::new(source.clone(), ledger.clone(), updates_tx);
        let task = tokio::spawn(service.run(commands_rx));
        Self {
            commands,
            updates,
            requests,
            source,
            ledger,
            task,
        }
    }

    pub async fn send(&self, command: Command) {
        self.commands.send(command).await.unwrap();
    }

    pub async fn next_request(&mut self) -> Pending {
        timeout(WAIT, self.requests.recv())
            .await
            .expect("no request issued")
            .expect("source dropped")
    }

    /// True if no request shows up within a short grace period.
    pub async fn no_request(&mut self) -> bool {
        timeout(Duration::from_millis(100), self.requests.recv())
            .await
            .is_err()
    }

    pub async fn next_update(&mut self) -> Update {
        timeout(WAIT, self.updates.recv())
            .await
            .expect("no update published")
            .expect("service stopped")
    }

    /// Skips non-gallery updates.
    pub async fn next_gallery(&mut self) -> GallerySnapshot {
        loop {
            if let Update::Gallery(snapshot) = self.next_update().await {
                return snapshot;
            }
        }
    }

    /// Drains updates up to and including the next settled gallery snapshot.
    pub async fn settled_gallery(&mut self) -> GallerySnapshot {
        loop {
            let snapshot = self.next_gallery().await;
            if !snapshot.is_loading {
                return snapshot;
            }
        }
    }

    /// Answers the initial default-listing request.
    pub async fn boot(&mut self, first_page: Vec<Photo>) -> GallerySnapshot {
        let pending = self.next_request().await;
        assert_eq!(
            pending.call,
            Call::Listing {
                page: 1,
                sort: SortOrder::Latest,
                orientation: Orientation::Any
            }
        );
        pending.answer(Ok(first_page));
        self.settled_gallery().await
    }

    pub async fn shutdown(self) {
        drop(self.commands);
        timeout(WAIT, self.task)
            .await
            .expect("service did not stop")
            .unwrap();
    }
}
