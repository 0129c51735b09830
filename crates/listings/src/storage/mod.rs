//! Interchangeable persistence backends for the catalog and analytics repositories.

pub mod memory;
pub mod sqlite;

#[cfg(test)]
mod conformance;

use crate::analytics::AnalyticsRepository;
use crate::catalog::blog::BlogRepository;
use crate::catalog::inquiries::InquiryRepository;
use crate::catalog::properties::PropertyRepository;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored record is corrupt: {0}")]
    Corrupt(String),
}

/// Every repository the HTTP surface needs, implemented by one backend.
pub trait Storage:
    PropertyRepository + InquiryRepository + BlogRepository + AnalyticsRepository + 'static
{
}

impl<T> Storage for T where
    T: PropertyRepository + InquiryRepository + BlogRepository + AnalyticsRepository + 'static
{
}
