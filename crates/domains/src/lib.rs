//! # domains
//!
//! Photo model, query/page types, error taxonomy and the port traits the
//! gallery core talks through.

pub mod errors;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
