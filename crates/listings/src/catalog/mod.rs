//! Public catalog: listings, inquiries, and the blog, each with a repository seam, a service,
//! and an axum router.

pub mod blog;
pub mod error;
pub mod inquiries;
pub mod properties;
pub mod validation;

#[cfg(test)]
mod tests;

pub use error::CatalogError;
pub use validation::{FieldError, ValidationError};
