//! Loyverse ETL library.
//!
//! Fetches every record of a Loyverse POS resource through the REST API,
//! validates and flattens each one, and loads the results into SQLite.
//!
//! # Pipeline
//!
//! 1. [`api::Loyverse`] holds one [`api::Endpoint`] per resource and pages
//!    through collections by following the response cursor.
//! 2. [`schemas`] decodes each raw JSON object and normalizes it into a
//!    flat, storage-ready record.
//! 3. [`db`] owns the table definitions and the transactional bulk insert.
//! 4. [`seeder::Seeder`] runs fetch, validate, and insert for each stored
//!    resource in order.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod db;
pub mod schemas;
pub mod seeder;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use api::{ApiError, Endpoint, Loyverse};
pub use config::{ConfigError, LoyverseConfig};
pub use seeder::{SeedError, SeedSummary, Seeder};
