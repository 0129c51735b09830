//! Demo catalog for fresh installations.

use tracing::info;

use crate::catalog::blog::{BlogRepository, NewBlogPost};
use crate::catalog::properties::{
    ListingStatus, NewProperty, PriceType, PropertyFilter, PropertyRepository,
};
use crate::storage::RepositoryError;

/// Counts of records written by [`load_sample_catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub properties: usize,
    pub posts: usize,
}

/// Inserts the demo listings and posts. Returns `None` without writing when any listing exists.
pub async fn load_sample_catalog<S>(store: &S) -> Result<Option<SeedSummary>, RepositoryError>
where
    S: PropertyRepository + BlogRepository,
{
    let existing = store.list_properties(&PropertyFilter::default()).await?;
    if !existing.is_empty() {
        info!(
            existing = existing.len(),
            "catalog already populated; skipping sample data"
        );
        return Ok(None);
    }

    let properties = sample_properties();
    let posts = sample_posts();
    let summary = SeedSummary {
        properties: properties.len(),
        posts: posts.len(),
    };

    for property in properties {
        store.insert_property(property).await?;
    }
    for post in posts {
        store.insert_post(post).await?;
    }

    info!(
        properties = summary.properties,
        posts = summary.posts,
        "sample catalog loaded"
    );
    Ok(Some(summary))
}

pub fn sample_properties() -> Vec<NewProperty> {
    vec![
        NewProperty {
            title: "Luxury Family Villa".to_string(),
            description: "Four-bedroom villa with a private pool, landscaped garden, and modern \
                          finishes throughout. Quiet, secure neighbourhood close to top schools."
                .to_string(),
            price: 12_500_000,
            price_type: PriceType::Sale,
            property_type: "mansion".to_string(),
            county: "nairobi".to_string(),
            location: "Karen, Nairobi".to_string(),
            bedrooms: Some(4),
            bathrooms: Some(3),
            area: Some(2500),
            amenities: strings(&["Swimming Pool", "Garden", "Security", "Parking"]),
            images: strings(&["https://images.unsplash.com/photo-1518780664697-55e3ad937233?w=800&h=600&fit=crop"]),
            featured: true,
            popular: false,
            new_listing: false,
            agent_name: "Sarah Mwangi".to_string(),
            agent_image: Some(
                "https://images.unsplash.com/photo-1560250097-0b93528c311a?w=100&h=100&fit=crop"
                    .to_string(),
            ),
            status: ListingStatus::Active,
        },
        NewProperty {
            title: "Modern Apartment".to_string(),
            description: "Two-bedroom apartment with city views, a fitted kitchen, and access to \
                          the building gym. Walking distance to Westlands offices and malls."
                .to_string(),
            price: 45_000,
            price_type: PriceType::Rent,
            property_type: "apartment".to_string(),
            county: "nairobi".to_string(),
            location: "Westlands, Nairobi".to_string(),
            bedrooms: Some(2),
            bathrooms: Some(2),
            area: Some(1200),
            amenities: strings(&["Gym", "Parking", "Security", "Elevator"]),
            images: strings(&["https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=800&h=600&fit=crop"]),
            featured: true,
            popular: false,
            new_listing: true,
            agent_name: "Grace Wanjiku".to_string(),
            agent_image: Some(
                "https://images.unsplash.com/photo-1580489944761-15a19d654956?w=100&h=100&fit=crop"
                    .to_string(),
            ),
            status: ListingStatus::Active,
        },
        NewProperty {
            title: "Executive Townhouse".to_string(),
            description: "Three-bedroom townhouse in a gated community with a private garden and \
                          a modern kitchen."
                .to_string(),
            price: 8_200_000,
            price_type: PriceType::Sale,
            property_type: "townhouse".to_string(),
            county: "nairobi".to_string(),
            location: "Runda, Nairobi".to_string(),
            bedrooms: Some(3),
            bathrooms: Some(2),
            area: Some(1800),
            amenities: strings(&["Garden", "Parking", "Security", "Modern Kitchen"]),
            images: strings(&["https://images.unsplash.com/photo-1605146769289-440113cc3d00?w=800&h=600&fit=crop"]),
            featured: true,
            popular: true,
            new_listing: false,
            agent_name: "James Kiprotich".to_string(),
            agent_image: Some(
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop"
                    .to_string(),
            ),
            status: ListingStatus::Active,
        },
    ]
}

pub fn sample_posts() -> Vec<NewBlogPost> {
    vec![
        NewBlogPost {
            title: "Kenya Real Estate Market Trends".to_string(),
            content: "Demand for homes in Nairobi's satellite towns keeps rising as new road \
                      links shorten commutes..."
                .to_string(),
            excerpt: "Where prices are moving and which neighbourhoods are drawing buyers this year."
                .to_string(),
            author: "Silai Properties Team".to_string(),
            published: true,
        },
        NewBlogPost {
            title: "First-Time Buyer's Guide to Property Investment".to_string(),
            content: "Buying your first property starts with a realistic budget and a trusted \
                      agent..."
                .to_string(),
            excerpt: "Practical steps for first-time buyers in Kenya.".to_string(),
            author: "Sarah Mwangi".to_string(),
            published: true,
        },
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn loads_once_into_an_empty_store() {
        let store = MemoryStore::new();

        let summary = load_sample_catalog(&store)
            .await
            .expect("seeding succeeds")
            .expect("empty store is seeded");
        assert_eq!(summary, SeedSummary { properties: 3, posts: 2 });

        let second = load_sample_catalog(&store).await.expect("seeding succeeds");
        assert_eq!(second, None);

        let properties = store
            .list_properties(&PropertyFilter::default())
            .await
            .expect("list");
        assert_eq!(properties.len(), 3);
        assert_eq!(store.list_posts(Some(true)).await.expect("posts").len(), 2);
    }

    #[test]
    fn sample_listings_have_a_primary_image() {
        for property in sample_properties() {
            assert!(!property.images.is_empty(), "{} has no image", property.title);
        }
    }
}
