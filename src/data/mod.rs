//! Game feed ingest and storage
//!
//! Loads the scraped result feed into an in-memory table and answers
//! game queries for the ranking and feature code.

pub mod store;

pub use store::GameStore;
