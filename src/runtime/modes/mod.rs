//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - One-shot commands (`generate-config`, `languages`)

pub mod cli;
pub mod server;

pub use cli::{generate_config, list_languages};
pub use server::run_server;
