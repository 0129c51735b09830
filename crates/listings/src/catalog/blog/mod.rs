//! Market news and buyer guides.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{BlogPost, BlogPostDraft, BlogPostId, BlogPostPatch, NewBlogPost};
pub use repository::BlogRepository;
pub use router::blog_router;
pub use service::BlogService;
