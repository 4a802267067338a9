//! # services
//!
//! Gallery state machine, its command dispatcher, and the favorites/history
//! ledger built on top of the domain ports.

pub mod downloads;
pub mod gallery;
pub mod gallery_service;
pub mod ledger;

#[cfg(test)]
mod test_support;

pub use gallery::{Completion, FetchPlan, FetchTicket, GalleryState};
pub use gallery_service::{Command, GalleryService, Update};
pub use ledger::Ledger;
