//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of
//! [`ItemRepository`](itemstore_core::storage::ItemRepository) that keeps
//! every item in a map wrapped in `Arc<RwLock<_>>`. It backs the tests and
//! `--storage memory` local runs where no table is available.
//!
//! # Example
//!
//! ```rust,ignore
//! use itemstore::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
