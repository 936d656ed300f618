//! Storage traits (ports)

mod store;

pub use store::{DocumentStore, RepoResult};
