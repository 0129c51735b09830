use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::RepositoryError;
use crate::analytics::{latest_day_first, AnalyticsRepository, PageVisits};
use crate::catalog::blog::{BlogPost, BlogPostId, BlogPostPatch, BlogRepository, NewBlogPost};
use crate::catalog::inquiries::{Inquiry, InquiryId, InquiryRepository, NewInquiry};
use crate::catalog::properties::{
    newest_first, NewProperty, Property, PropertyFilter, PropertyId, PropertyPatch,
    PropertyRepository,
};
use crate::clock::{Clock, SystemClock};

#[derive(Debug, Default)]
struct MemoryState {
    properties: BTreeMap<PropertyId, Property>,
    inquiries: BTreeMap<InquiryId, Inquiry>,
    posts: BTreeMap<BlogPostId, BlogPost>,
    visits: HashMap<(String, NaiveDate), PageVisits>,
    last_property_id: i64,
    last_inquiry_id: i64,
    last_post_id: i64,
    last_visit_id: i64,
}

fn next_id(last: &mut i64) -> i64 {
    *last += 1;
    *last
}

/// Process-local store for development and tests. One lock guards every collection;
/// ids are never reused after a delete.
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            clock,
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyRepository for MemoryStore {
    async fn list_properties(
        &self,
        filter: &PropertyFilter,
    ) -> Result<Vec<Property>, RepositoryError> {
        let state = self.state()?;
        let mut matches: Vec<Property> = state
            .properties
            .values()
            .filter(|property| filter.matches(property))
            .cloned()
            .collect();
        matches.sort_by(newest_first);
        Ok(matches)
    }

    async fn get_property(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError> {
        Ok(self.state()?.properties.get(&id).cloned())
    }

    async fn insert_property(&self, property: NewProperty) -> Result<Property, RepositoryError> {
        let mut state = self.state()?;
        let id = PropertyId(next_id(&mut state.last_property_id));
        let property = Property::from_new(id, self.clock.now(), property);
        state.properties.insert(id, property.clone());
        Ok(property)
    }

    async fn update_property(
        &self,
        id: PropertyId,
        patch: PropertyPatch,
    ) -> Result<Option<Property>, RepositoryError> {
        let mut state = self.state()?;
        Ok(state.properties.get_mut(&id).map(|property| {
            patch.apply(property);
            property.clone()
        }))
    }

    async fn delete_property(&self, id: PropertyId) -> Result<bool, RepositoryError> {
        Ok(self.state()?.properties.remove(&id).is_some())
    }
}

#[async_trait]
impl InquiryRepository for MemoryStore {
    async fn list_inquiries(
        &self,
        property_id: Option<PropertyId>,
    ) -> Result<Vec<Inquiry>, RepositoryError> {
        let state = self.state()?;
        let mut inquiries: Vec<Inquiry> = state
            .inquiries
            .values()
            .filter(|inquiry| property_id.is_none() || inquiry.property_id == property_id)
            .cloned()
            .collect();
        inquiries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(inquiries)
    }

    async fn insert_inquiry(&self, inquiry: NewInquiry) -> Result<Inquiry, RepositoryError> {
        let mut state = self.state()?;
        let id = InquiryId(next_id(&mut state.last_inquiry_id));
        let inquiry = Inquiry::from_new(id, self.clock.now(), inquiry);
        state.inquiries.insert(id, inquiry.clone());
        Ok(inquiry)
    }
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn list_posts(&self, published: Option<bool>) -> Result<Vec<BlogPost>, RepositoryError> {
        let state = self.state()?;
        let mut posts: Vec<BlogPost> = state
            .posts
            .values()
            .filter(|post| published.map_or(true, |flag| post.published == flag))
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(posts)
    }

    async fn get_post(&self, id: BlogPostId) -> Result<Option<BlogPost>, RepositoryError> {
        Ok(self.state()?.posts.get(&id).cloned())
    }

    async fn insert_post(&self, post: NewBlogPost) -> Result<BlogPost, RepositoryError> {
        let mut state = self.state()?;
        let id = BlogPostId(next_id(&mut state.last_post_id));
        let post = BlogPost::from_new(id, self.clock.now(), post);
        state.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        id: BlogPostId,
        patch: BlogPostPatch,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        let mut state = self.state()?;
        Ok(state.posts.get_mut(&id).map(|post| {
            patch.apply(post);
            post.clone()
        }))
    }

    async fn delete_post(&self, id: BlogPostId) -> Result<bool, RepositoryError> {
        Ok(self.state()?.posts.remove(&id).is_some())
    }
}

#[async_trait]
impl AnalyticsRepository for MemoryStore {
    async fn record_visit(&self, page: &str, date: NaiveDate) -> Result<(), RepositoryError> {
        let mut state = self.state()?;
        let key = (page.to_string(), date);
        if let Some(existing) = state.visits.get_mut(&key) {
            existing.visitors += 1;
            return Ok(());
        }

        let id = next_id(&mut state.last_visit_id);
        state.visits.insert(
            key,
            PageVisits {
                id,
                page: page.to_string(),
                visitors: 1,
                date,
            },
        );
        Ok(())
    }

    async fn list_visits(&self, date: Option<NaiveDate>) -> Result<Vec<PageVisits>, RepositoryError> {
        let state = self.state()?;
        let mut visits: Vec<PageVisits> = state
            .visits
            .values()
            .filter(|record| date.map_or(true, |day| record.date == day))
            .cloned()
            .collect();
        visits.sort_by(latest_day_first);
        Ok(visits)
    }
}
