use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::analytics::{AnalyticsRepository, PageVisits};
use crate::catalog::blog::{BlogPost, BlogPostDraft, BlogPostId, BlogPostPatch, BlogRepository, NewBlogPost};
use crate::catalog::inquiries::{Inquiry, InquiryDraft, InquiryRepository, NewInquiry};
use crate::catalog::properties::{
    NewProperty, PriceType, Property, PropertyDraft, PropertyFilter, PropertyId, PropertyPatch,
    PropertyRepository,
};
use crate::clock::SteppingClock;
use crate::storage::{MemoryStore, RepositoryError};

pub(super) fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_clock(Arc::new(SteppingClock::per_minute())))
}

pub(super) fn property_draft(title: &str, price_type: PriceType, price: i64) -> PropertyDraft {
    PropertyDraft {
        title: Some(title.to_string()),
        description: Some(format!("{title} close to shops and schools.")),
        price: Some(price),
        price_type: Some(price_type),
        property_type: Some("house".to_string()),
        county: Some("nairobi".to_string()),
        location: Some("Kilimani, Nairobi".to_string()),
        bedrooms: Some(3),
        bathrooms: Some(2),
        area: Some(1400),
        agent_name: Some("Grace Wanjiku".to_string()),
        ..PropertyDraft::default()
    }
}

pub(super) fn inquiry_draft(property_id: Option<PropertyId>) -> InquiryDraft {
    InquiryDraft {
        property_id,
        name: Some("Brian Kamau".to_string()),
        email: Some("brian@example.co.ke".to_string()),
        phone: Some("0712345678".to_string()),
        message: Some("Please share viewing times for this week.".to_string()),
    }
}

pub(super) fn post_draft(title: &str, published: bool) -> BlogPostDraft {
    BlogPostDraft {
        title: Some(title.to_string()),
        content: Some("Long-form market commentary.".to_string()),
        excerpt: Some("Short teaser.".to_string()),
        author: Some("Silai Properties Team".to_string()),
        published: Some(published),
    }
}

pub(super) fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("request builds")
}

pub(super) fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Every call fails as if the database were offline.
pub(super) struct UnavailableStore;

fn offline() -> RepositoryError {
    RepositoryError::Unavailable("database offline".to_string())
}

#[async_trait]
impl PropertyRepository for UnavailableStore {
    async fn list_properties(&self, _: &PropertyFilter) -> Result<Vec<Property>, RepositoryError> {
        Err(offline())
    }

    async fn get_property(&self, _: PropertyId) -> Result<Option<Property>, RepositoryError> {
        Err(offline())
    }

    async fn insert_property(&self, _: NewProperty) -> Result<Property, RepositoryError> {
        Err(offline())
    }

    async fn update_property(
        &self,
        _: PropertyId,
        _: PropertyPatch,
    ) -> Result<Option<Property>, RepositoryError> {
        Err(offline())
    }

    async fn delete_property(&self, _: PropertyId) -> Result<bool, RepositoryError> {
        Err(offline())
    }
}

#[async_trait]
impl InquiryRepository for UnavailableStore {
    async fn list_inquiries(&self, _: Option<PropertyId>) -> Result<Vec<Inquiry>, RepositoryError> {
        Err(offline())
    }

    async fn insert_inquiry(&self, _: NewInquiry) -> Result<Inquiry, RepositoryError> {
        Err(offline())
    }
}

#[async_trait]
impl BlogRepository for UnavailableStore {
    async fn list_posts(&self, _: Option<bool>) -> Result<Vec<BlogPost>, RepositoryError> {
        Err(offline())
    }

    async fn get_post(&self, _: BlogPostId) -> Result<Option<BlogPost>, RepositoryError> {
        Err(offline())
    }

    async fn insert_post(&self, _: NewBlogPost) -> Result<BlogPost, RepositoryError> {
        Err(offline())
    }

    async fn update_post(
        &self,
        _: BlogPostId,
        _: BlogPostPatch,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        Err(offline())
    }

    async fn delete_post(&self, _: BlogPostId) -> Result<bool, RepositoryError> {
        Err(offline())
    }
}

#[async_trait]
impl AnalyticsRepository for UnavailableStore {
    async fn record_visit(&self, _: &str, _: NaiveDate) -> Result<(), RepositoryError> {
        Err(offline())
    }

    async fn list_visits(&self, _: Option<NaiveDate>) -> Result<Vec<PageVisits>, RepositoryError> {
        Err(offline())
    }
}
