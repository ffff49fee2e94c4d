//! linkboard - admin listing and translation layer for a URL shortener
//!
//! # Architecture
//! - `filter`: request parameters → validated filter descriptor and clauses
//! - `storage`: SeaORM row store (count / query / insert)
//! - `services`: link creation, bookmarklet retry, listing
//! - `i18n`: gettext-style catalogs, locale tables, number/date formatting
//! - `api`: HTTP handlers
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod filter;
pub mod i18n;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
