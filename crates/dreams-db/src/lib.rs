//! # dreams-db
//!
//! Storage layer for the workspace document.
//!
//! ## Overview
//!
//! The whole workspace is one JSON document. Stores implement the
//! `DocumentStore` port from `dreams-core` and can only load or overwrite the
//! entire document:
//!
//! - [`JsonFileStore`] keeps it in a file on disk
//! - [`MemoryStore`] keeps it in process memory (tests, throwaway servers)
//!
//! A store by itself gives no isolation. [`Database`] wraps one and holds a
//! single async lock across every load-mutate-save cycle, so concurrent
//! requests and timer callbacks never overwrite each other's changes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dreams_db::{Database, MemoryStore};
//!
//! async fn example() -> Result<(), dreams_core::DomainError> {
//!     let db = Database::new(MemoryStore::new());
//!     let id = db.update(|doc| Ok::<_, dreams_core::DomainError>(doc.issue_message_id())).await?;
//!     Ok(())
//! }
//! ```

mod database;
pub mod store;

pub use database::{open_database, Database};
pub use store::{JsonFileStore, MemoryStore};
