//! # Gallery State
//!
//! The single owner of query and pagination state. Every command returns the
//! fetch it wants issued (if any) as a [`FetchTicket`]; the caller runs the
//! fetch and hands the outcome back through [`GalleryState::complete`].
//!
//! # Stale responses
//! Each ticket carries the generation it was issued under and the page it
//! asks for. Any query/filter/category reset bumps the generation, so an
//! outcome for a superseded request no longer matches and is dropped.

use domains::{
    DomainError, Filter, GallerySnapshot, Orientation, Photo, PhotoSource, QueryState,
    SortOrder, PAGE_SIZE,
};

/// Which service call a ticket resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    Category {
        slug: String,
        page: u32,
        per_page: u32,
    },
    Search {
        query: String,
        page: u32,
        per_page: u32,
        sort: SortOrder,
        orientation: Orientation,
        color: String,
    },
    Listing {
        page: u32,
        per_page: u32,
        sort: SortOrder,
        orientation: Orientation,
    },
}

impl FetchPlan {
    pub async fn execute(&self, source: &dyn PhotoSource) -> domains::Result<Vec<Photo>> {
        match self {
            FetchPlan::Category {
                slug,
                page,
                per_page,
            } => source.list_by_category(slug, *page, *per_page).await,
            FetchPlan::Search {
                query,
                page,
                per_page,
                sort,
                orientation,
                color,
            } => {
                source
                    .search(query, *page, *per_page, *sort, *orientation, color)
                    .await
            }
            FetchPlan::Listing {
                page,
                per_page,
                sort,
                orientation,
            } => source.list_default(*page, *per_page, *sort, *orientation).await,
        }
    }
}

/// A fetch the gallery is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub page: u32,
    pub plan: FetchPlan,
}

impl FetchTicket {
    /// Page 1 replaces the list, everything after appends.
    pub fn is_replace(&self) -> bool {
        self.page == 1
    }
}

/// What happened to a fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Photos were merged; `received` items arrived.
    Applied { received: usize },
    /// The fetch was rejected; state is untouched apart from `is_loading`.
    Failed(DomainError),
    /// The ticket was superseded; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
struct PageState {
    photos: Vec<Photo>,
    page: u32,
    is_loading: bool,
    has_more: bool,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            photos: Vec::new(),
            page: 1,
            is_loading: false,
            has_more: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    query: QueryState,
    pages: PageState,
    generation: u64,
    /// The last fetch for `pages.page` failed and has not been reissued.
    retry_pending: bool,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn photos(&self) -> &[Photo] {
        &self.pages.photos
    }

    pub fn page(&self) -> u32 {
        self.pages.page
    }

    pub fn is_loading(&self) -> bool {
        self.pages.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.pages.has_more
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn find(&self, photo_id: &str) -> Option<&Photo> {
        self.pages.photos.iter().find(|p| p.id == photo_id)
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            photos: self.pages.photos.clone(),
            is_loading: self.pages.is_loading,
            has_more: self.pages.has_more,
            page: self.pages.page,
            query: self.query.clone(),
        }
    }

    /// Initial load: whatever the current query selects, page 1.
    pub fn start(&mut self) -> FetchTicket {
        self.reset()
    }

    pub fn set_query(&mut self, text: &str) -> FetchTicket {
        self.query.query = text.trim().to_string();
        self.query.category = None;
        self.reset()
    }

    /// Drops the search text but keeps any selected category.
    pub fn clear_query(&mut self) -> FetchTicket {
        self.query.query.clear();
        self.reset()
    }

    /// A blank slug clears the category instead.
    pub fn set_category(&mut self, slug: &str) -> FetchTicket {
        let slug = slug.trim();
        if slug.is_empty() {
            return self.clear_category();
        }
        self.query.category = Some(slug.to_string());
        self.query.query.clear();
        self.reset()
    }

    pub fn clear_category(&mut self) -> FetchTicket {
        self.query.category = None;
        self.reset()
    }

    /// Back to the default listing; filters are kept.
    pub fn go_home(&mut self) -> FetchTicket {
        self.query.query.clear();
        self.query.category = None;
        self.reset()
    }

    pub fn set_filter(&mut self, filter: Filter) -> FetchTicket {
        match filter {
            Filter::Orientation(orientation) => self.query.orientation = orientation,
            Filter::Color(color) => self.query.color = color.trim().to_ascii_lowercase(),
            Filter::Sort(sort) => self.query.sort = sort,
        }
        self.reset()
    }

    /// Next page, or the same page again if its last fetch failed.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.pages.has_more || self.pages.is_loading {
            return None;
        }
        if !self.retry_pending {
            self.pages.page += 1;
        }
        Some(self.refresh())
    }

    /// Reissues the current page if its last fetch failed.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.pages.is_loading || !self.retry_pending {
            return None;
        }
        Some(self.refresh())
    }

    /// Merges a fetch outcome if `ticket` is still the current fetch.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: domains::Result<Vec<Photo>>,
    ) -> Completion {
        if !self.pages.is_loading
            || ticket.generation != self.generation
            || ticket.page != self.pages.page
        {
            return Completion::Stale;
        }

        self.pages.is_loading = false;
        match outcome {
            Ok(photos) => {
                let received = photos.len();
                self.pages.has_more = received == PAGE_SIZE as usize;
                if ticket.is_replace() {
                    self.pages.photos = photos;
                } else {
                    self.pages.photos.extend(photos);
                }
                self.retry_pending = false;
                Completion::Applied { received }
            }
            Err(err) => {
                self.retry_pending = true;
                Completion::Failed(err)
            }
        }
    }

    fn reset(&mut self) -> FetchTicket {
        self.generation += 1;
        self.pages.page = 1;
        self.retry_pending = false;
        self.refresh()
    }

    fn refresh(&mut self) -> FetchTicket {
        self.pages.is_loading = true;
        let page = self.pages.page;
        let per_page = PAGE_SIZE;

        // category > query > default listing
        let plan = if let Some(slug) = &self.query.category {
            FetchPlan::Category {
                slug: slug.clone(),
                page,
                per_page,
            }
        } else if !self.query.query.is_empty() {
            FetchPlan::Search {
                query: self.query.query.clone(),
                page,
                per_page,
                sort: self.query.sort,
                orientation: self.query.orientation,
                color: self.query.color.clone(),
            }
        } else {
            FetchPlan::Listing {
                page,
                per_page,
                sort: self.query.sort,
                orientation: self.query.orientation,
            }
        };

        FetchTicket {
            generation: self.generation,
            page,
            plan,
        }
    }
}
