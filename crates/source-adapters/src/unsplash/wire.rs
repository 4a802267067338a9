//! Unsplash JSON payloads, decoded as-is and then mapped onto the domain
//! `Photo`. Fields the gallery never reads are left out.

use chrono::{DateTime, Utc};
use domains::{Author, DomainError, Photo, PhotoUrls};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<WirePhoto>,
}

#[derive(Debug, Deserialize)]
pub struct WirePhoto {
    pub id: String,
    pub urls: WireUrls,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    pub user: WireUser,
    #[serde(default)]
    pub likes: u32,
    pub width: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
    pub links: WirePhotoLinks,
    #[serde(default)]
    pub tags: Option<Vec<WireTag>>,
}

#[derive(Debug, Deserialize)]
pub struct WireUrls {
    pub full: String,
    pub regular: String,
    pub small: String,
}

#[derive(Debug, Deserialize)]
pub struct WireUser {
    pub name: String,
    pub links: WireUserLinks,
}

#[derive(Debug, Deserialize)]
pub struct WireUserLinks {
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct WirePhotoLinks {
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct WireTag {
    pub title: String,
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

impl TryFrom<WirePhoto> for Photo {
    type Error = DomainError;

    fn try_from(wire: WirePhoto) -> Result<Self, Self::Error> {
        if wire.id.is_empty() {
            return Err(DomainError::MalformedResponse("photo without id".to_string()));
        }
        if wire.width == 0 || wire.height == 0 {
            return Err(DomainError::MalformedResponse(format!(
                "photo {} has a zero dimension",
                wire.id
            )));
        }

        let category = wire
            .tags
            .and_then(|tags| tags.into_iter().next())
            .and_then(|tag| non_blank(Some(tag.title)));

        Ok(Photo {
            description: non_blank(wire.alt_description).or_else(|| non_blank(wire.description)),
            urls: PhotoUrls {
                small: wire.urls.small,
                regular: wire.urls.regular,
                full: wire.urls.full,
            },
            author: Author {
                name: wire.user.name,
                profile_url: wire.user.links.html,
            },
            likes: wire.likes,
            width: wire.width,
            height: wire.height,
            created_at: wire.created_at,
            permalink: wire.links.html,
            category,
            id: wire.id,
        })
    }
}

/// Converts a page of wire photos; one bad entry rejects the whole page.
pub fn into_photos(wire: Vec<WirePhoto>) -> domains::Result<Vec<Photo>> {
    wire.into_iter().map(Photo::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": "LBI7cgq3pbM",
            "created_at": "2016-05-03T11:00:28-04:00",
            "width": 5245,
            "height": 3497,
            "color": "#60544D",
            "likes": 12,
            "description": "A man drinking a coffee.",
            "alt_description": null,
            "user": {
                "id": "pXhwzz1JtQU",
                "name": "Gilbert Kane",
                "links": { "html": "https://unsplash.com/@poorkane" }
            },
            "urls": {
                "raw": "https://images.unsplash.com/face-springmorning.jpg",
                "full": "https://images.unsplash.com/face-springmorning.jpg?q=75&fm=jpg",
                "regular": "https://images.unsplash.com/face-springmorning.jpg?w=1080",
                "small": "https://images.unsplash.com/face-springmorning.jpg?w=400",
                "thumb": "https://images.unsplash.com/face-springmorning.jpg?w=200"
            },
            "links": {
                "html": "https://unsplash.com/photos/LBI7cgq3pbM",
                "download_location": "https://api.unsplash.com/photos/LBI7cgq3pbM/download"
            },
            "tags": [{ "title": "coffee" }, { "title": "man" }]
        })
    }

    #[test]
    fn test_maps_unsplash_photo() {
        let wire: WirePhoto = serde_json::from_value(sample()).unwrap();
        let photo = Photo::try_from(wire).unwrap();
        assert_eq!(photo.id, "LBI7cgq3pbM");
        assert_eq!(photo.author.name, "Gilbert Kane");
        assert_eq!(photo.author.profile_url, "https://unsplash.com/@poorkane");
        assert_eq!(photo.description.as_deref(), Some("A man drinking a coffee."));
        assert_eq!(photo.category.as_deref(), Some("coffee"));
        assert_eq!(photo.created_at.to_rfc3339(), "2016-05-03T15:00:28+00:00");
        assert_eq!(photo.permalink, "https://unsplash.com/photos/LBI7cgq3pbM");
    }

    #[test]
    fn test_zero_dimension_is_malformed() {
        let mut value = sample();
        value["height"] = json!(0);
        let wire: WirePhoto = serde_json::from_value(value).unwrap();
        assert!(matches!(
            Photo::try_from(wire),
            Err(DomainError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_missing_tags_and_likes_default() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("tags");
        value.as_object_mut().unwrap().remove("likes");
        let photo = Photo::try_from(serde_json::from_value::<WirePhoto>(value).unwrap()).unwrap();
        assert_eq!(photo.likes, 0);
        assert_eq!(photo.category_label(), "Uncategorized");
    }
}
