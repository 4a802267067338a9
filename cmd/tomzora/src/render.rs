//! Plain-text rendering of service updates.

use std::fmt::Write;
use std::time::Instant;

use domains::{GallerySnapshot, Notification, Photo};
use services::Update;

/// Renders updates in arrival order. A notice identical to one still within
/// its `Notification::LIFETIME` is not printed again.
#[derive(Default)]
pub struct Printer {
    last_notice: Option<(Notification, Instant)>,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&mut self, update: &Update, now: Instant) -> Option<String> {
        if let Update::Notice(notice) = update {
            if let Some((last, shown)) = &self.last_notice {
                if last == notice && now.duration_since(*shown) < Notification::LIFETIME {
                    return None;
                }
            }
            self.last_notice = Some((notice.clone(), now));
        }
        Some(render(update))
    }
}

pub fn render(update: &Update) -> String {
    match update {
        Update::Gallery(snapshot) => gallery(snapshot),
        Update::Notice(notice) => {
            let tag = if notice.is_error() { "error" } else { "ok" };
            format!("[{tag}] {}", notice.message)
        }
        Update::Photo(photo) => details(photo),
        Update::Favorite {
            photo_id,
            favorited,
        } => {
            let mark = if *favorited { "*" } else { " " };
            format!("[{mark}] {photo_id}")
        }
        Update::DownloadReady { photo_id, url } => format!("download {photo_id}: {url}"),
        Update::Ledger { list, photos } => {
            let mut out = format!("{} ({})", list.title(), photos.len());
            for photo in photos {
                let _ = write!(out, "\n  {}", line(photo));
            }
            out
        }
    }
}

fn gallery(snapshot: &GallerySnapshot) -> String {
    let query = &snapshot.query;
    let mut heading = match (&query.category, query.query.as_str()) {
        (Some(slug), _) => format!("topic '{slug}'"),
        (None, "") => "latest photos".to_string(),
        (None, text) => format!("search '{text}'"),
    };
    let _ = write!(
        heading,
        " | sort {} | orientation {}",
        query.sort, query.orientation
    );
    if !query.color.is_empty() {
        let _ = write!(heading, " | color {}", query.color);
    }

    if snapshot.is_loading {
        return format!("{heading}\n  loading page {}...", snapshot.page);
    }
    if snapshot.is_empty() {
        return format!("{heading}\n  no photos found");
    }

    let mut out = heading;
    for photo in &snapshot.photos {
        let _ = write!(out, "\n  {}", line(photo));
    }
    let footer = if snapshot.has_more {
        "type 'more' for the next page"
    } else {
        "end of results"
    };
    let _ = write!(
        out,
        "\n  {} photos, page {} ({footer})",
        snapshot.photos.len(),
        snapshot.page
    );
    out
}

fn line(photo: &Photo) -> String {
    format!(
        "{:<12} {} by {} [{}] {} likes",
        photo.id,
        photo.display_label(),
        photo.author.name,
        photo.category_label(),
        photo.likes
    )
}

fn details(photo: &Photo) -> String {
    format!(
        "{}\n  by {} ({})\n  {}x{} ({:.2}:1), {} likes, {}\n  {}\n  {}",
        photo.display_label(),
        photo.author.name,
        photo.author.profile_url,
        photo.width,
        photo.height,
        photo.aspect_ratio(),
        photo.likes,
        photo.created_at.format("%Y-%m-%d"),
        photo.urls.regular,
        photo.permalink
    )
}
