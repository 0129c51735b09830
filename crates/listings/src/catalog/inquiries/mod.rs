//! Contact requests captured from listing pages and the general contact form.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Inquiry, InquiryDraft, InquiryId, NewInquiry};
pub use repository::InquiryRepository;
pub use router::inquiry_router;
pub use service::InquiryService;
