//! Loyverse Core - Shared value types.
//!
//! This crate provides the value types used across the Loyverse ETL:
//! - `etl` - API client, record schemas, and the database seeder
//! - `cli` - Command-line entry point for seeding runs
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Validation that belongs to a single value (an email, a
//! non-negative amount, a currency code) lives here so every schema shares it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, amounts, currency codes, and enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
