//! Functional core for the itemstore Lambda function.
//!
//! Everything in this crate is pure: the trigger envelope, the schema-free
//! item type and the storage contract. I/O lives in the `itemstore` binary.

pub mod envelope;
pub mod item;
pub mod storage;
