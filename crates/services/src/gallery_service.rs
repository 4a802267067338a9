//! # Gallery Service
//!
//! Command dispatcher around [`GalleryState`]. Commands are processed one at a
//! time; fetches run in spawned tasks and come back as completions on an
//! internal channel, so other commands are serviced while a fetch is pending.

use std::sync::Arc;

use domains::{
    DomainError, Filter, GallerySnapshot, LedgerList, Notification, Photo, PhotoSource,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::downloads;
use crate::gallery::{Completion, FetchTicket, GalleryState};
use crate::ledger::Ledger;

/// Everything a rendering surface can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank text behaves like `ClearSearch`
    Search(String),
    ClearSearch,
    SetCategory(String),
    ClearCategory,
    Home,
    SetFilter(Filter),
    LoadMore,
    Retry,
    ToggleFavorite(String),
    /// Opens a photo: records it as recently viewed
    View(String),
    Download(String),
    Random,
    Details(String),
    ShowLedger(LedgerList),
    ClearLedger(LedgerList),
}

/// Everything the service publishes back.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Gallery(GallerySnapshot),
    Notice(Notification),
    Photo(Photo),
    Favorite { photo_id: String, favorited: bool },
    DownloadReady { photo_id: String, url: String },
    Ledger { list: LedgerList, photos: Vec<Photo> },
}

enum Completed {
    Page(FetchTicket, domains::Result<Vec<Photo>>),
    Single(domains::Result<Photo>),
}

pub struct GalleryService {
    state: GalleryState,
    source: Arc<dyn PhotoSource>,
    ledger: Ledger,
    updates: mpsc::UnboundedSender<Update>,
    completed_tx: mpsc::UnboundedSender<Completed>,
    completed_rx: mpsc::UnboundedReceiver<Completed>,
}

impl GalleryService {
    pub fn new(
        source: Arc<dyn PhotoSource>,
        ledger: Ledger,
        updates: mpsc::UnboundedSender<Update>,
    ) -> Self {
        let (completed_tx, completed_rx) = mpsc::unbounded_channel();
        Self {
            state: GalleryState::new(),
            source,
            ledger,
            updates,
            completed_tx,
            completed_rx,
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    /// Loads the default listing, then serves commands until the sender side
    /// is dropped.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        info!("gallery service started");
        let ticket = self.state.start();
        self.dispatch(ticket);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some(done) = self.completed_rx.recv() => self.on_completed(done),
            }
        }
        info!("gallery service stopped");
    }

    pub fn handle(&mut self, command: Command) {
        debug!(?command, "command");
        match command {
            Command::Search(text) if text.trim().is_empty() => {
                let ticket = self.state.clear_query();
                self.dispatch(ticket);
            }
            Command::Search(text) => {
                let ticket = self.state.set_query(&text);
                self.dispatch(ticket);
            }
            Command::ClearSearch => {
                let ticket = self.state.clear_query();
                self.dispatch(ticket);
            }
            Command::SetCategory(slug) => {
                let ticket = self.state.set_category(&slug);
                self.dispatch(ticket);
            }
            Command::ClearCategory => {
                let ticket = self.state.clear_category();
                self.dispatch(ticket);
            }
            Command::Home => {
                let ticket = self.state.go_home();
                self.dispatch(ticket);
            }
            Command::SetFilter(filter) => {
                let ticket = self.state.set_filter(filter);
                self.dispatch(ticket);
            }
            Command::LoadMore => match self.state.load_more() {
                Some(ticket) => self.dispatch(ticket),
                None => debug!(
                    has_more = self.state.has_more(),
                    is_loading = self.state.is_loading(),
                    "load more ignored"
                ),
            },
            Command::Retry => match self.state.retry() {
                Some(ticket) => self.dispatch(ticket),
                None => debug!("retry ignored: loading or nothing failed"),
            },
            Command::ToggleFavorite(id) => self.toggle_favorite(&id),
            Command::View(id) => self.view(&id),
            Command::Download(id) => self.download(&id),
            Command::Random => self.spawn_single(None),
            Command::Details(id) => self.spawn_single(Some(id)),
            Command::ShowLedger(list) => {
                let photos = self.ledger.list(list);
                self.emit(Update::Ledger { list, photos });
            }
            Command::ClearLedger(list) => match self.ledger.clear(list) {
                Ok(()) => {
                    self.emit(Update::Ledger {
                        list,
                        photos: Vec::new(),
                    });
                    self.emit(Update::Notice(Notification::success(format!(
                        "{} cleared",
                        list.title()
                    ))));
                }
                Err(e) => self.notify_error(&e),
            },
        }
    }

    fn dispatch(&self, ticket: FetchTicket) {
        debug!(
            generation = ticket.generation,
            page = ticket.page,
            plan = ?ticket.plan,
            "fetch issued"
        );
        self.emit(Update::Gallery(self.state.snapshot()));

        let source = Arc::clone(&self.source);
        let done = self.completed_tx.clone();
        tokio::spawn(async move {
            let outcome = ticket.plan.execute(source.as_ref()).await;
            // The service may have shut down; nothing left to update then.
            let _ = done.send(Completed::Page(ticket, outcome));
        });
    }

    fn spawn_single(&self, photo_id: Option<String>) {
        let source = Arc::clone(&self.source);
        let done = self.completed_tx.clone();
        tokio::spawn(async move {
            let outcome = match photo_id {
                Some(id) => source.get_details(&id).await,
                None => source.random().await,
            };
            let _ = done.send(Completed::Single(outcome));
        });
    }

    fn on_completed(&mut self, done: Completed) {
        match done {
            Completed::Page(ticket, outcome) => self.apply(ticket, outcome),
            Completed::Single(Ok(photo)) => self.emit(Update::Photo(photo)),
            Completed::Single(Err(e)) => {
                error!(error = %e, "photo request failed");
                self.notify_error(&e);
            }
        }
    }

    /// Feeds a fetch outcome into the state machine and publishes the result.
    pub fn apply(&mut self, ticket: FetchTicket, outcome: domains::Result<Vec<Photo>>) {
        match self.state.complete(&ticket, outcome) {
            Completion::Applied { received } => {
                debug!(page = ticket.page, received, "page merged");
                self.emit(Update::Gallery(self.state.snapshot()));
            }
            Completion::Failed(e) => {
                error!(page = ticket.page, error = %e, "error loading photos");
                self.emit(Update::Gallery(self.state.snapshot()));
                self.notify_error(&e);
            }
            Completion::Stale => debug!(
                generation = ticket.generation,
                current = self.state.generation(),
                page = ticket.page,
                "dropping stale response"
            ),
        }
    }

    fn resolve(&self, photo_id: &str) -> domains::Result<Photo> {
        self.state
            .find(photo_id)
            .cloned()
            .or_else(|| self.ledger.find(photo_id))
            .ok_or_else(|| DomainError::NotFound(photo_id.to_string()))
    }

    fn toggle_favorite(&self, photo_id: &str) {
        let result = self
            .resolve(photo_id)
            .and_then(|photo| self.ledger.toggle_favorite(&photo));
        match result {
            Ok(favorited) => {
                self.emit(Update::Favorite {
                    photo_id: photo_id.to_string(),
                    favorited,
                });
                self.emit(Update::Notice(Notification::success(if favorited {
                    "Added to favorites"
                } else {
                    "Removed from favorites"
                })));
            }
            Err(e) => self.notify_error(&e),
        }
    }

    fn view(&self, photo_id: &str) {
        match self.resolve(photo_id) {
            Ok(photo) => {
                if let Err(e) = self.ledger.add_recent_view(&photo) {
                    warn!(photo_id, error = %e, "could not record recent view");
                }
                self.emit(Update::Photo(photo));
            }
            Err(e) => self.notify_error(&e),
        }
    }

    fn download(&self, photo_id: &str) {
        let result = self.resolve(photo_id).and_then(|photo| {
            downloads::download_photo(Arc::clone(&self.source), &self.ledger, &photo)
        });
        match result {
            Ok(prepared) => {
                self.emit(Update::DownloadReady {
                    photo_id: photo_id.to_string(),
                    url: prepared.url,
                });
                self.emit(Update::Notice(Notification::success(
                    "Photo downloaded successfully",
                )));
            }
            Err(e) => {
                error!(photo_id, error = %e, "error downloading photo");
                let message = if matches!(e, DomainError::NotFound(_)) {
                    e.user_message()
                } else {
                    "Failed to download photo".to_string()
                };
                self.emit(Update::Notice(Notification::error(e.kind(), message)));
            }
        }
    }

    fn notify_error(&self, e: &DomainError) {
        self.emit(Update::Notice(Notification::error(e.kind(), e.user_message())));
    }

    fn emit(&self, update: Update) {
        if self.updates.send(update).is_err() {
            debug!("no presentation attached; update dropped");
        }
    }
}
