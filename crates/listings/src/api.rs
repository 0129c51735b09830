//! Assembles the public JSON API over a single storage backend.

use std::sync::Arc;

use axum::{middleware, Router};

use crate::analytics::{analytics_router, track_visits, VisitCounter};
use crate::catalog::blog::{blog_router, BlogService};
use crate::catalog::inquiries::{inquiry_router, InquiryService};
use crate::catalog::properties::{property_router, PropertyService};
use crate::clock::Clock;
use crate::storage::Storage;

/// Catalog, inquiry, blog, and analytics routes sharing one store. Visits are not counted here.
pub fn api_routes<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Router
where
    S: Storage,
{
    let counter = Arc::new(VisitCounter::new(store.clone(), clock));

    Router::new()
        .merge(property_router(Arc::new(PropertyService::new(store.clone()))))
        .merge(inquiry_router(Arc::new(InquiryService::new(store.clone()))))
        .merge(blog_router(Arc::new(BlogService::new(store))))
        .merge(analytics_router(counter))
}

/// Counts a visit for every request reaching `router`, before its handler runs.
pub fn with_visit_tracking<S>(router: Router, store: Arc<S>, clock: Arc<dyn Clock>) -> Router
where
    S: Storage,
{
    let counter = Arc::new(VisitCounter::new(store, clock));
    router.layer(middleware::from_fn_with_state(counter, track_visits::<S>))
}

/// The full public API with visit tracking applied.
pub fn api_router<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Router
where
    S: Storage,
{
    with_visit_tracking(api_routes(store.clone(), clock.clone()), store, clock)
}
