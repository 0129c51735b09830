//! Scenarios every backend must satisfy identically.

use std::sync::Arc;

use chrono::NaiveDate;

use super::{MemoryStore, SqliteStore, Storage};
use crate::analytics::AnalyticsRepository;
use crate::catalog::blog::{BlogPostPatch, BlogRepository, NewBlogPost};
use crate::catalog::inquiries::{InquiryRepository, NewInquiry};
use crate::catalog::properties::{
    ListingStatus, NewProperty, PriceType, PropertyFilter, PropertyId, PropertyPatch,
    PropertyRepository,
};
use crate::clock::{FixedClock, SteppingClock};

fn memory() -> MemoryStore {
    MemoryStore::with_clock(Arc::new(SteppingClock::per_minute()))
}

async fn sqlite() -> SqliteStore {
    SqliteStore::connect_with_clock("sqlite::memory:", Arc::new(SteppingClock::per_minute()))
        .await
        .expect("in-memory sqlite opens")
}

fn listing(title: &str, price_type: PriceType, price: i64, bedrooms: Option<u32>) -> NewProperty {
    NewProperty {
        title: title.to_string(),
        description: format!("{title} description"),
        price,
        price_type,
        property_type: "house".to_string(),
        county: "nairobi".to_string(),
        location: format!("{title}, Nairobi"),
        bedrooms,
        bathrooms: Some(1),
        area: None,
        amenities: vec!["Parking".to_string(), "Borehole".to_string()],
        images: Vec::new(),
        featured: price_type == PriceType::Sale,
        popular: false,
        new_listing: true,
        agent_name: "Sarah Mwangi".to_string(),
        agent_image: None,
        status: ListingStatus::Active,
    }
}

async fn filters_and_ordering<S: Storage>(store: S) {
    let t1 = store
        .insert_property(listing("Karen", PriceType::Sale, 12_500_000, Some(4)))
        .await
        .expect("insert");
    let t2 = store
        .insert_property(listing("Westlands", PriceType::Rent, 45_000, Some(2)))
        .await
        .expect("insert");
    let t3 = store
        .insert_property(listing("Runda", PriceType::Sale, 8_200_000, None))
        .await
        .expect("insert");

    let all = store
        .list_properties(&PropertyFilter::default())
        .await
        .expect("list");
    assert_eq!(all, vec![t3.clone(), t2.clone(), t1.clone()]);

    let expensive_sales = store
        .list_properties(&PropertyFilter {
            price_type: Some(PriceType::Sale),
            min_price: Some(10_000_000),
            ..PropertyFilter::default()
        })
        .await
        .expect("list");
    assert_eq!(expensive_sales, vec![t1.clone()]);

    let any_bedrooms = store
        .list_properties(&PropertyFilter {
            bedrooms: Some(0),
            ..PropertyFilter::default()
        })
        .await
        .expect("list");
    assert_eq!(any_bedrooms, vec![t2.clone(), t1.clone()]);

    let combined = store
        .list_properties(&PropertyFilter {
            county: Some("nairobi".to_string()),
            property_type: Some("house".to_string()),
            max_price: Some(10_000_000),
            bathrooms: Some(1),
            featured: Some(true),
            popular: Some(false),
            new_listing: Some(true),
            ..PropertyFilter::default()
        })
        .await
        .expect("list");
    assert_eq!(combined, vec![t3]);

    let none = store
        .list_properties(&PropertyFilter {
            county: Some("mombasa".to_string()),
            ..PropertyFilter::default()
        })
        .await
        .expect("list");
    assert!(none.is_empty());
}

fn mixed_listing(index: usize) -> NewProperty {
    let price_type = [PriceType::Sale, PriceType::Rent, PriceType::Lease][index % 3];
    let mut property = listing(
        &format!("Mixed {index}"),
        price_type,
        500_000 * (index as i64 + 1),
        [None, Some(0), Some(2), Some(4)][index % 4],
    );
    property.county = ["nairobi", "kiambu"][index % 2].to_string();
    property.property_type = ["house", "apartment"][(index / 3) % 2].to_string();
    property.bathrooms = [Some(1), None, Some(3)][(index / 2) % 3];
    property.featured = index % 5 < 2;
    property.popular = index % 3 == 1;
    property.new_listing = index % 4 != 3;
    property
}

const FILTER_FIELDS: usize = 10;

/// Filter with the fields selected by `mask` set to fixed values.
fn filter_for(mask: usize) -> PropertyFilter {
    let on = |bit: usize| mask & (1 << bit) != 0;
    PropertyFilter {
        price_type: on(0).then_some(PriceType::Sale),
        county: on(1).then(|| "nairobi".to_string()),
        property_type: on(2).then(|| "house".to_string()),
        min_price: on(3).then_some(2_000_000),
        max_price: on(4).then_some(5_000_000),
        bedrooms: on(5).then_some(2),
        bathrooms: on(6).then_some(1),
        featured: on(7).then_some(true),
        popular: on(8).then_some(false),
        new_listing: on(9).then_some(true),
    }
}

async fn every_filter_combination_is_a_conjunction<S: Storage>(store: S) {
    for index in 0..16 {
        store
            .insert_property(mixed_listing(index))
            .await
            .expect("insert");
    }
    let all = store
        .list_properties(&PropertyFilter::default())
        .await
        .expect("list");
    assert_eq!(all.len(), 16);

    let mut counts = vec![0; 1 << FILTER_FIELDS];
    for mask in 0..1 << FILTER_FIELDS {
        let filter = filter_for(mask);
        let listed = store.list_properties(&filter).await.expect("list");
        let expected: Vec<_> = all
            .iter()
            .filter(|property| filter.matches(property))
            .cloned()
            .collect();
        assert_eq!(listed, expected, "filter {filter:?}");
        counts[mask] = listed.len();
    }

    for mask in 0..1 << FILTER_FIELDS {
        for bit in 0..FILTER_FIELDS {
            let narrower = mask | (1 << bit);
            assert!(
                counts[narrower] <= counts[mask],
                "adding field {bit} to {:?} grew the result",
                filter_for(mask)
            );
        }
    }
}

async fn sale_and_price_floor_scenario<S: Storage>(store: S) {
    let a = store
        .insert_property(listing("A", PriceType::Sale, 5_000_000, Some(3)))
        .await
        .expect("insert");
    let b = store
        .insert_property(listing("B", PriceType::Rent, 20_000_000, Some(2)))
        .await
        .expect("insert");

    let sales_with_two_bedrooms = store
        .list_properties(&PropertyFilter {
            price_type: Some(PriceType::Sale),
            bedrooms: Some(2),
            ..PropertyFilter::default()
        })
        .await
        .expect("list");
    assert_eq!(sales_with_two_bedrooms, vec![a]);

    let above_ten_million = store
        .list_properties(&PropertyFilter {
            min_price: Some(10_000_000),
            ..PropertyFilter::default()
        })
        .await
        .expect("list");
    assert_eq!(above_ten_million, vec![b]);

    let day = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    for _ in 0..3 {
        store.record_visit("/", day).await.expect("record");
    }
    let visits = store.list_visits(Some(day)).await.expect("list");
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].page, "/");
    assert_eq!(visits[0].visitors, 3);
}

async fn equal_timestamps_keep_insertion_order<S: Storage>(store: S) {
    let first = store
        .insert_property(listing("First", PriceType::Sale, 1, Some(1)))
        .await
        .expect("insert");
    let second = store
        .insert_property(listing("Second", PriceType::Sale, 2, Some(1)))
        .await
        .expect("insert");

    let all = store
        .list_properties(&PropertyFilter::default())
        .await
        .expect("list");
    assert_eq!(all, vec![first, second]);
}

async fn crud_lifecycle<S: Storage>(store: S) {
    let created = store
        .insert_property(listing("Kileleshwa", PriceType::Lease, 150_000, Some(3)))
        .await
        .expect("insert");
    assert_eq!(
        store.get_property(created.id).await.expect("get"),
        Some(created.clone())
    );

    let updated = store
        .update_property(
            created.id,
            PropertyPatch {
                price: Some(140_000),
                bedrooms: Some(None),
                amenities: Some(vec!["Gym".to_string()]),
                status: Some(ListingStatus::Rented),
                ..PropertyPatch::default()
            },
        )
        .await
        .expect("update")
        .expect("listing exists");
    assert_eq!(updated.price, 140_000);
    assert_eq!(updated.bedrooms, None);
    assert_eq!(updated.amenities, vec!["Gym".to_string()]);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(
        store.get_property(created.id).await.expect("get"),
        Some(updated)
    );

    assert!(store
        .update_property(PropertyId(999), PropertyPatch::default())
        .await
        .expect("update")
        .is_none());

    assert!(store.delete_property(created.id).await.expect("delete"));
    assert!(!store.delete_property(created.id).await.expect("delete"));
    assert_eq!(store.get_property(created.id).await.expect("get"), None);

    let next = store
        .insert_property(listing("Lavington", PriceType::Sale, 1, None))
        .await
        .expect("insert");
    assert!(next.id.0 > created.id.0, "ids are never reused");
}

async fn inquiries_and_posts<S: Storage>(store: S) {
    let scoped = store
        .insert_inquiry(NewInquiry {
            property_id: Some(PropertyId(7)),
            name: "Amina Otieno".to_string(),
            email: "amina@example.co.ke".to_string(),
            phone: "0712345678".to_string(),
            message: "Is parking included?".to_string(),
        })
        .await
        .expect("insert");
    let general = store
        .insert_inquiry(NewInquiry {
            property_id: None,
            name: "Peter Njoroge".to_string(),
            email: "peter@example.com".to_string(),
            phone: "0723456789".to_string(),
            message: "Do you manage rentals in Kiambu?".to_string(),
        })
        .await
        .expect("insert");

    assert_eq!(
        store.list_inquiries(None).await.expect("list"),
        vec![general, scoped.clone()]
    );
    assert_eq!(
        store.list_inquiries(Some(PropertyId(7))).await.expect("list"),
        vec![scoped]
    );

    let post = store
        .insert_post(NewBlogPost {
            title: "Buyer's Guide".to_string(),
            content: "Start with a budget.".to_string(),
            excerpt: "Budget first.".to_string(),
            author: "Silai Properties Team".to_string(),
            published: false,
        })
        .await
        .expect("insert");
    assert!(store.list_posts(Some(true)).await.expect("list").is_empty());

    let published = store
        .update_post(
            post.id,
            BlogPostPatch {
                published: Some(true),
                ..BlogPostPatch::default()
            },
        )
        .await
        .expect("update")
        .expect("post exists");
    assert_eq!(
        store.list_posts(Some(true)).await.expect("list"),
        vec![published.clone()]
    );
    assert_eq!(store.get_post(post.id).await.expect("get"), Some(published));
    assert!(store.delete_post(post.id).await.expect("delete"));
    assert!(!store.delete_post(post.id).await.expect("delete"));
}

async fn visit_counting<S: Storage>(store: S) {
    let monday = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date");
    let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");

    for _ in 0..3 {
        store.record_visit("/properties", monday).await.expect("record");
    }
    store.record_visit("/", monday).await.expect("record");
    store.record_visit("/properties", tuesday).await.expect("record");

    let all = store.list_visits(None).await.expect("list");
    let summary: Vec<_> = all
        .iter()
        .map(|visit| (visit.page.as_str(), visit.visitors, visit.date))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("/properties", 1, tuesday),
            ("/properties", 3, monday),
            ("/", 1, monday),
        ]
    );

    let monday_only = store.list_visits(Some(monday)).await.expect("list");
    assert_eq!(monday_only.len(), 2);
}

#[tokio::test]
async fn memory_filters_and_ordering() {
    filters_and_ordering(memory()).await;
}

#[tokio::test]
async fn sqlite_filters_and_ordering() {
    filters_and_ordering(sqlite().await).await;
}

#[tokio::test]
async fn memory_every_filter_combination_is_a_conjunction() {
    every_filter_combination_is_a_conjunction(memory()).await;
}

#[tokio::test]
async fn sqlite_every_filter_combination_is_a_conjunction() {
    every_filter_combination_is_a_conjunction(sqlite().await).await;
}

#[tokio::test]
async fn memory_sale_and_price_floor_scenario() {
    sale_and_price_floor_scenario(memory()).await;
}

#[tokio::test]
async fn sqlite_sale_and_price_floor_scenario() {
    sale_and_price_floor_scenario(sqlite().await).await;
}

#[tokio::test]
async fn memory_equal_timestamps_keep_insertion_order() {
    let clock = Arc::new(FixedClock(chrono::Utc::now()));
    equal_timestamps_keep_insertion_order(MemoryStore::with_clock(clock)).await;
}

#[tokio::test]
async fn sqlite_equal_timestamps_keep_insertion_order() {
    let clock = Arc::new(FixedClock(chrono::Utc::now()));
    let store = SqliteStore::connect_with_clock("sqlite::memory:", clock)
        .await
        .expect("in-memory sqlite opens");
    equal_timestamps_keep_insertion_order(store).await;
}

#[tokio::test]
async fn memory_crud_lifecycle() {
    crud_lifecycle(memory()).await;
}

#[tokio::test]
async fn sqlite_crud_lifecycle() {
    crud_lifecycle(sqlite().await).await;
}

#[tokio::test]
async fn memory_inquiries_and_posts() {
    inquiries_and_posts(memory()).await;
}

#[tokio::test]
async fn sqlite_inquiries_and_posts() {
    inquiries_and_posts(sqlite().await).await;
}

#[tokio::test]
async fn memory_visit_counting() {
    visit_counting(memory()).await;
}

#[tokio::test]
async fn sqlite_visit_counting() {
    visit_counting(sqlite().await).await;
}

#[tokio::test]
async fn sqlite_migrate_is_idempotent() {
    let store = sqlite().await;
    store.migrate().await.expect("second migrate");
    store.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sqlite_file_store_serializes_concurrent_updates() {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("listings.db").display());
    let store = Arc::new(
        SqliteStore::connect_with_clock(&url, Arc::new(SteppingClock::per_minute()))
            .await
            .expect("file sqlite opens"),
    );
    let property = store
        .insert_property(listing("Kilimani", PriceType::Rent, 60_000, Some(2)))
        .await
        .expect("insert");
    let post = store
        .insert_post(NewBlogPost {
            title: "Rental Market".to_string(),
            content: "Demand keeps rising.".to_string(),
            excerpt: "Demand.".to_string(),
            author: "Silai Properties Team".to_string(),
            published: false,
        })
        .await
        .expect("insert");

    let (property_id, post_id) = (property.id, post.id);

    let mut tasks = Vec::new();
    for price in 0..64_i64 {
        let property_store = store.clone();
        tasks.push(tokio::spawn(async move {
            property_store
                .update_property(
                    property_id,
                    PropertyPatch {
                        price: Some(price),
                        ..PropertyPatch::default()
                    },
                )
                .await
                .map(|updated| updated.is_some())
        }));
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            store
                .update_post(
                    post_id,
                    BlogPostPatch {
                        published: Some(price % 2 == 0),
                        ..BlogPostPatch::default()
                    },
                )
                .await
                .map(|updated| updated.is_some())
        }));
    }
    for task in tasks {
        let updated = task.await.expect("task joins").expect("update succeeds");
        assert!(updated);
    }

    let stored = store
        .get_property(property.id)
        .await
        .expect("get")
        .expect("listing exists");
    assert!((0..64).contains(&stored.price));
    assert_eq!(stored.title, "Kilimani");
    assert_eq!(stored.bedrooms, Some(2));
    store.close().await;
}
