//! Listing catalog: domain model, the filter predicate pipeline, and its HTTP surface.

pub mod domain;
pub mod filter;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    ListingStatus, NewProperty, PriceType, Property, PropertyDraft, PropertyId, PropertyPatch,
};
pub use filter::{newest_first, Predicate, PropertyFilter};
pub use query::PropertyQuery;
pub use repository::PropertyRepository;
pub use router::property_router;
pub use service::PropertyService;
