//! # storage-adapters
//!
//! `LocalStore` implementations: a JSON document on disk and an in-memory map.

#[cfg(feature = "store-file")]
pub mod file_store;
#[cfg(feature = "store-memory")]
pub mod memory_store;

#[cfg(feature = "store-file")]
pub use file_store::JsonFileStore;
#[cfg(feature = "store-memory")]
pub use memory_store::MemoryStore;

#[cfg(all(test, feature = "store-memory"))]
mod tests {
    use super::MemoryStore;
    use domains::Photo;
    use services::Ledger;
    use std::sync::Arc;

    fn photo(id: &str) -> Photo {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "urls": { "small": "s", "regular": "r", "full": "f" },
            "description": null,
            "author": { "name": "A", "profile_url": "https://unsplash.com/@a" },
            "likes": 1,
            "width": 10,
            "height": 10,
            "created_at": "2024-03-01T10:00:00Z",
            "permalink": "https://unsplash.com/photos/x"
        }))
        .unwrap()
    }

    #[test]
    fn test_ledger_over_memory_store() {
        let store = Arc::new(MemoryStore::new());
        let ledger = Ledger::new(store.clone());
        assert!(ledger.toggle_favorite(&photo("a")).unwrap());
        ledger.add_download(&photo("b")).unwrap();
        assert_eq!(store.len(), 2);
        assert!(ledger.is_favorited("a"));
    }
}
