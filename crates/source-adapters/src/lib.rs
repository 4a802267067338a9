//! # source-adapters
//!
//! `PhotoSource` implementations backed by remote photo services.

#[cfg(feature = "unsplash")]
pub mod unsplash;

#[cfg(feature = "unsplash")]
pub use unsplash::UnsplashSource;
