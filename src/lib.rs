//! ISBN lookup service
//!
//! Resolves ISBNs into simplified book records via the Open Library Books API.

pub mod app;
pub mod modules;

pub use modules::book::{BookLookup, BookRecord, HttpClient, LookupError};
