//! Per-page, per-day visit counting.

pub mod counter;
pub mod domain;
pub mod repository;
pub mod router;

pub use counter::{track_visits, VisitCounter};
pub use domain::{latest_day_first, PageVisits};
pub use repository::AnalyticsRepository;
pub use router::analytics_router;
