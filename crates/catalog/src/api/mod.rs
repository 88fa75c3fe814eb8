//! Open Library API client implementation.
//!
//! This module provides a client for the four Open Library endpoints the
//! dashboard reads: a user's reading-log shelf, work ratings, work detail
//! and author search.

pub mod client;
pub mod types;

pub use client::{FetchError, OpenLibraryClient};
pub use types::*;
