//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the tests: link creation, the
//! bookmarklet retry and the admin listing.

mod bookmarklet;
mod link_service;
mod listing;

pub use bookmarklet::run_bookmarklet;
pub use link_service::*;
pub use listing::{ListingResult, run_listing};
