//! Document store implementations

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use dreams_core::DomainError;

/// Convert an I/O failure to DomainError
pub(crate) fn map_io_error(e: std::io::Error) -> DomainError {
    DomainError::StoreError(e.to_string())
}

/// Convert a (de)serialization failure to DomainError
pub(crate) fn map_json_error(e: serde_json::Error) -> DomainError {
    DomainError::StoreError(format!("malformed document: {e}"))
}
