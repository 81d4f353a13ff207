//! Storage backend implementations.
//!
//! This module provides concrete implementations of the
//! [`ItemRepository`](itemstore_core::storage::ItemRepository) trait. The
//! backend is chosen at startup from [`Config::storage`](crate::config::Config).
//!
//! - `dynamodb` (default): AWS DynamoDB through `aws-sdk-dynamodb`
//! - `memory`: process-local map, for local runs and tests

pub mod dynamodb;
pub mod inmemory;

pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;
