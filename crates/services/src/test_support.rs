use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use domains::{Author, LocalStore, Photo, PhotoUrls};

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
            name: "Test Author".into(),
            profile_url: "https://unsplash.com/@test".into(),
        },
        likes: 3,
        width: 3000,
        height: 2000,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        permalink: format!("https://unsplash.com/photos/{id}"),
        category: None,
    }
}

pub fn photos(prefix: &str, count: usize) -> Vec<Photo> {
    (0..count).map(|i| photo(&format!("{prefix}-{i}"))).collect()
}

#[derive(Default)]
pub struct HashStore {
    entries: Mutex<HashMap<String, String>>,
}

impl LocalStore for HashStore {
    fn get(&self, key: &str) -> domains::Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> domains::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> domains::Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
