//! # Domain Models
//!
//! These structs represent the photos the gallery shows and the query and
//! page state it keeps about them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ErrorKind;

/// Number of photos requested per page. A shorter page means the end was reached.
pub const PAGE_SIZE: u32 = 20;

/// A single photo as returned by the photo service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub urls: PhotoUrls,
    pub description: Option<String>,
    pub author: Author,
    pub likes: u32,
    pub width: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
    /// Public page of the photo on the service
    pub permalink: String,
    /// Title of the first tag, if the service returned any
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoUrls {
    pub small: String,
    pub regular: String,
    pub full: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub profile_url: String,
}

impl Photo {
    pub fn display_label(&self) -> &str {
        self.description.as_deref().unwrap_or("Photo")
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("Uncategorized")
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

/// Ranking requested from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Latest,
    Oldest,
    Popular,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Latest => "latest",
            SortOrder::Oldest => "oldest",
            SortOrder::Popular => "popular",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(SortOrder::Latest),
            "oldest" => Ok(SortOrder::Oldest),
            "popular" => Ok(SortOrder::Popular),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Orientation filter. `Any` is sent as "no filter".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    #[serde(rename = "")]
    Any,
    Landscape,
    Portrait,
    Squarish,
}

impl Orientation {
    /// Query parameter value, `None` for `Any`.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Orientation::Any => None,
            Orientation::Landscape => Some("landscape"),
            Orientation::Portrait => Some("portrait"),
            Orientation::Squarish => Some("squarish"),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param().unwrap_or("any"))
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" => Ok(Orientation::Any),
            "landscape" => Ok(Orientation::Landscape),
            "portrait" => Ok(Orientation::Portrait),
            "squarish" => Ok(Orientation::Squarish),
            other => Err(format!("unknown orientation '{other}'")),
        }
    }
}

/// One filter mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Orientation(Orientation),
    /// Empty string clears the color filter
    Color(String),
    Sort(SortOrder),
}

/// What the gallery is currently asking the service for.
///
/// At most one of `query` (non-empty) and `category` (`Some`) is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub query: String,
    pub category: Option<String>,
    pub sort: SortOrder,
    pub orientation: Orientation,
    pub color: String,
}

/// Immutable view of the gallery handed to the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySnapshot {
    pub photos: Vec<Photo>,
    pub is_loading: bool,
    pub has_more: bool,
    pub page: u32,
    pub query: QueryState,
}

impl GallerySnapshot {
    /// Nothing to show and nothing on the way.
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty() && !self.is_loading
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error(ErrorKind),
}

/// Transient, auto-dismissing message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    /// How long a rendering surface should keep the message visible.
    pub const LIFETIME: Duration = Duration::from_secs(3);

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error(kind),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NotificationKind::Error(_))
    }
}

/// The three persisted photo lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerList {
    Favorites,
    RecentViews,
    Downloads,
}

impl LedgerList {
    pub fn title(&self) -> &'static str {
        match self {
            LedgerList::Favorites => "Favorites",
            LedgerList::RecentViews => "Recent views",
            LedgerList::Downloads => "Downloads",
        }
    }
}
