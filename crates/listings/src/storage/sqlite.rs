use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, QueryBuilder, Sqlite};
use tracing::info;

use super::RepositoryError;
use crate::analytics::{AnalyticsRepository, PageVisits};
use crate::catalog::blog::{BlogPost, BlogPostId, BlogPostPatch, BlogRepository, NewBlogPost};
use crate::catalog::inquiries::{Inquiry, InquiryId, InquiryRepository, NewInquiry};
use crate::catalog::properties::{
    NewProperty, Predicate, Property, PropertyFilter, PropertyId, PropertyPatch,
    PropertyRepository,
};
use crate::clock::{Clock, SystemClock};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS properties (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        price INTEGER NOT NULL,
        price_type TEXT NOT NULL,
        property_type TEXT NOT NULL,
        county TEXT NOT NULL,
        location TEXT NOT NULL,
        bedrooms INTEGER,
        bathrooms INTEGER,
        area INTEGER,
        amenities TEXT NOT NULL DEFAULT '[]',
        images TEXT NOT NULL DEFAULT '[]',
        featured INTEGER NOT NULL DEFAULT 0,
        popular INTEGER NOT NULL DEFAULT 0,
        new_listing INTEGER NOT NULL DEFAULT 1,
        agent_name TEXT NOT NULL,
        agent_image TEXT,
        status TEXT NOT NULL DEFAULT 'active',
        created_at TEXT NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS properties_created_at ON properties (created_at DESC, id)",
    r#"CREATE TABLE IF NOT EXISTS inquiries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        property_id INTEGER,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at TEXT NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS inquiries_property_id ON inquiries (property_id)",
    r#"CREATE TABLE IF NOT EXISTS blog_posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        excerpt TEXT NOT NULL,
        author TEXT NOT NULL,
        published INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS analytics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        page TEXT NOT NULL,
        visitors INTEGER NOT NULL DEFAULT 0,
        date TEXT NOT NULL,
        UNIQUE (page, date)
    )"#,
];

const PROPERTY_COLUMNS: &str = "id, title, description, price, price_type, property_type, \
     county, location, bedrooms, bathrooms, area, amenities, images, featured, popular, \
     new_listing, agent_name, agent_image, status, created_at";

const INQUIRY_COLUMNS: &str = "id, property_id, name, email, phone, message, created_at";

const POST_COLUMNS: &str = "id, title, content, excerpt, author, published, created_at";

/// SQLite-backed store. The schema is created on connect.
pub struct SqliteStore {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl SqliteStore {
    pub async fn connect(url: &str) -> Result<Self, RepositoryError> {
        Self::connect_with_clock(url, Arc::new(SystemClock)).await
    }

    pub async fn connect_with_clock(
        url: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        // Each connection to an in-memory database sees its own empty database.
        let (options, pool_options) = if url.contains(":memory:") || url.contains("mode=memory") {
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
            (options, pool_options)
        } else {
            let options = options.journal_mode(SqliteJournalMode::Wal);
            (options, SqlitePoolOptions::new().max_connections(5))
        };
        let pool = pool_options.connect_with(options).await?;

        let store = Self { pool, clock };
        store.migrate().await?;
        info!(url, "sqlite store ready");
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[derive(Debug, FromRow)]
struct PropertyRow {
    id: i64,
    title: String,
    description: String,
    price: i64,
    price_type: String,
    property_type: String,
    county: String,
    location: String,
    bedrooms: Option<i64>,
    bathrooms: Option<i64>,
    area: Option<i64>,
    amenities: Json<Vec<String>>,
    images: Json<Vec<String>>,
    featured: bool,
    popular: bool,
    new_listing: bool,
    agent_name: String,
    agent_image: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PropertyRow> for Property {
    type Error = RepositoryError;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        Ok(Property {
            id: PropertyId(row.id),
            title: row.title,
            description: row.description,
            price: row.price,
            price_type: row
                .price_type
                .parse()
                .map_err(|_| corrupt("properties.price_type", row.id, &row.price_type))?,
            property_type: row.property_type,
            county: row.county,
            location: row.location,
            bedrooms: count("properties.bedrooms", row.id, row.bedrooms)?,
            bathrooms: count("properties.bathrooms", row.id, row.bathrooms)?,
            area: count("properties.area", row.id, row.area)?,
            amenities: row.amenities.0,
            images: row.images.0,
            featured: row.featured,
            popular: row.popular,
            new_listing: row.new_listing,
            agent_name: row.agent_name,
            agent_image: row.agent_image,
            status: row
                .status
                .parse()
                .map_err(|_| corrupt("properties.status", row.id, &row.status))?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct InquiryRow {
    id: i64,
    property_id: Option<i64>,
    name: String,
    email: String,
    phone: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<InquiryRow> for Inquiry {
    fn from(row: InquiryRow) -> Self {
        Inquiry {
            id: InquiryId(row.id),
            property_id: row.property_id.map(PropertyId),
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    excerpt: String,
    author: String,
    published: bool,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for BlogPost {
    fn from(row: PostRow) -> Self {
        BlogPost {
            id: BlogPostId(row.id),
            title: row.title,
            content: row.content,
            excerpt: row.excerpt,
            author: row.author,
            published: row.published,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct VisitRow {
    id: i64,
    page: String,
    visitors: i64,
    date: NaiveDate,
}

impl TryFrom<VisitRow> for PageVisits {
    type Error = RepositoryError;

    fn try_from(row: VisitRow) -> Result<Self, Self::Error> {
        let visitors = u64::try_from(row.visitors)
            .map_err(|_| corrupt("analytics.visitors", row.id, &row.visitors.to_string()))?;
        Ok(PageVisits {
            id: row.id,
            page: row.page,
            visitors,
            date: row.date,
        })
    }
}

fn corrupt(column: &str, id: i64, value: &str) -> RepositoryError {
    RepositoryError::Corrupt(format!("{column} of row {id} holds '{value}'"))
}

fn count(column: &str, id: i64, value: Option<i64>) -> Result<Option<u32>, RepositoryError> {
    value
        .map(|raw| u32::try_from(raw).map_err(|_| corrupt(column, id, &raw.to_string())))
        .transpose()
}

fn push_predicate(builder: &mut QueryBuilder<'_, Sqlite>, predicate: &Predicate<'_>) {
    match *predicate {
        Predicate::PriceType(value) => {
            builder.push("price_type = ").push_bind(value.as_str());
        }
        Predicate::County(value) => {
            builder.push("county = ").push_bind(value.to_string());
        }
        Predicate::PropertyType(value) => {
            builder.push("property_type = ").push_bind(value.to_string());
        }
        Predicate::MinPrice(value) => {
            builder.push("price >= ").push_bind(value);
        }
        Predicate::MaxPrice(value) => {
            builder.push("price <= ").push_bind(value);
        }
        Predicate::MinBedrooms(value) => {
            builder
                .push("bedrooms IS NOT NULL AND bedrooms >= ")
                .push_bind(i64::from(value));
        }
        Predicate::MinBathrooms(value) => {
            builder
                .push("bathrooms IS NOT NULL AND bathrooms >= ")
                .push_bind(i64::from(value));
        }
        Predicate::Featured(value) => {
            builder.push("featured = ").push_bind(value);
        }
        Predicate::Popular(value) => {
            builder.push("popular = ").push_bind(value);
        }
        Predicate::NewListing(value) => {
            builder.push("new_listing = ").push_bind(value);
        }
    }
}

#[async_trait]
impl PropertyRepository for SqliteStore {
    async fn list_properties(
        &self,
        filter: &PropertyFilter,
    ) -> Result<Vec<Property>, RepositoryError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties"
        ));
        for (index, predicate) in filter.predicates().iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            push_predicate(&mut builder, predicate);
        }
        builder.push(" ORDER BY created_at DESC, id ASC");

        let rows: Vec<PropertyRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Property::try_from).collect()
    }

    async fn get_property(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError> {
        let row: Option<PropertyRow> = sqlx::query_as(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Property::try_from).transpose()
    }

    async fn insert_property(&self, property: NewProperty) -> Result<Property, RepositoryError> {
        let created_at = self.clock.now();
        let id = sqlx::query(
            r#"INSERT INTO properties (
                title, description, price, price_type, property_type, county, location,
                bedrooms, bathrooms, area, amenities, images, featured, popular, new_listing,
                agent_name, agent_image, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&property.title)
        .bind(&property.description)
        .bind(property.price)
        .bind(property.price_type.as_str())
        .bind(&property.property_type)
        .bind(&property.county)
        .bind(&property.location)
        .bind(property.bedrooms.map(i64::from))
        .bind(property.bathrooms.map(i64::from))
        .bind(property.area.map(i64::from))
        .bind(Json(&property.amenities))
        .bind(Json(&property.images))
        .bind(property.featured)
        .bind(property.popular)
        .bind(property.new_listing)
        .bind(&property.agent_name)
        .bind(&property.agent_image)
        .bind(property.status.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Property::from_new(PropertyId(id), created_at, property))
    }

    async fn update_property(
        &self,
        id: PropertyId,
        patch: PropertyPatch,
    ) -> Result<Option<Property>, RepositoryError> {
        let PropertyPatch {
            title,
            description,
            price,
            price_type,
            property_type,
            county,
            location,
            bedrooms,
            bathrooms,
            area,
            amenities,
            images,
            featured,
            popular,
            new_listing,
            agent_name,
            agent_image,
            status,
            ..
        } = patch;

        let row: Option<PropertyRow> = sqlx::query_as(&format!(
            r#"UPDATE properties SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                price = COALESCE(?, price),
                price_type = COALESCE(?, price_type),
                property_type = COALESCE(?, property_type),
                county = COALESCE(?, county),
                location = COALESCE(?, location),
                bedrooms = CASE WHEN ? THEN ? ELSE bedrooms END,
                bathrooms = CASE WHEN ? THEN ? ELSE bathrooms END,
                area = CASE WHEN ? THEN ? ELSE area END,
                amenities = COALESCE(?, amenities),
                images = COALESCE(?, images),
                featured = COALESCE(?, featured),
                popular = COALESCE(?, popular),
                new_listing = COALESCE(?, new_listing),
                agent_name = COALESCE(?, agent_name),
                agent_image = CASE WHEN ? THEN ? ELSE agent_image END,
                status = COALESCE(?, status)
            WHERE id = ?
            RETURNING {PROPERTY_COLUMNS}"#
        ))
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(price_type.map(|value| value.as_str()))
        .bind(property_type)
        .bind(county)
        .bind(location)
        .bind(bedrooms.is_some())
        .bind(bedrooms.flatten().map(i64::from))
        .bind(bathrooms.is_some())
        .bind(bathrooms.flatten().map(i64::from))
        .bind(area.is_some())
        .bind(area.flatten().map(i64::from))
        .bind(amenities.map(Json))
        .bind(images.map(Json))
        .bind(featured)
        .bind(popular)
        .bind(new_listing)
        .bind(agent_name)
        .bind(agent_image.is_some())
        .bind(agent_image.flatten())
        .bind(status.map(|value| value.as_str()))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Property::try_from).transpose()
    }

    async fn delete_property(&self, id: PropertyId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl InquiryRepository for SqliteStore {
    async fn list_inquiries(
        &self,
        property_id: Option<PropertyId>,
    ) -> Result<Vec<Inquiry>, RepositoryError> {
        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT {INQUIRY_COLUMNS} FROM inquiries"));
        if let Some(property_id) = property_id {
            builder.push(" WHERE property_id = ").push_bind(property_id.0);
        }
        builder.push(" ORDER BY created_at DESC, id ASC");

        let rows: Vec<InquiryRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Inquiry::from).collect())
    }

    async fn insert_inquiry(&self, inquiry: NewInquiry) -> Result<Inquiry, RepositoryError> {
        let created_at = self.clock.now();
        let id = sqlx::query(
            "INSERT INTO inquiries (property_id, name, email, phone, message, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(inquiry.property_id.map(|id| id.0))
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(&inquiry.message)
        .bind(created_at)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Inquiry::from_new(InquiryId(id), created_at, inquiry))
    }
}

#[async_trait]
impl BlogRepository for SqliteStore {
    async fn list_posts(&self, published: Option<bool>) -> Result<Vec<BlogPost>, RepositoryError> {
        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT {POST_COLUMNS} FROM blog_posts"));
        if let Some(published) = published {
            builder.push(" WHERE published = ").push_bind(published);
        }
        builder.push(" ORDER BY created_at DESC, id ASC");

        let rows: Vec<PostRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn get_post(&self, id: BlogPostId) -> Result<Option<BlogPost>, RepositoryError> {
        let row: Option<PostRow> =
            sqlx::query_as(&format!("SELECT {POST_COLUMNS} FROM blog_posts WHERE id = ?"))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(BlogPost::from))
    }

    async fn insert_post(&self, post: NewBlogPost) -> Result<BlogPost, RepositoryError> {
        let created_at = self.clock.now();
        let id = sqlx::query(
            "INSERT INTO blog_posts (title, content, excerpt, author, published, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.author)
        .bind(post.published)
        .bind(created_at)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(BlogPost::from_new(BlogPostId(id), created_at, post))
    }

    async fn update_post(
        &self,
        id: BlogPostId,
        patch: BlogPostPatch,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        let row: Option<PostRow> = sqlx::query_as(&format!(
            "UPDATE blog_posts SET title = COALESCE(?, title), content = COALESCE(?, content), \
             excerpt = COALESCE(?, excerpt), author = COALESCE(?, author), \
             published = COALESCE(?, published) \
             WHERE id = ? RETURNING {POST_COLUMNS}"
        ))
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.excerpt)
        .bind(patch.author)
        .bind(patch.published)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(BlogPost::from))
    }

    async fn delete_post(&self, id: BlogPostId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AnalyticsRepository for SqliteStore {
    async fn record_visit(&self, page: &str, date: NaiveDate) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO analytics (page, visitors, date) VALUES (?, 1, ?) \
             ON CONFLICT (page, date) DO UPDATE SET visitors = visitors + 1",
        )
        .bind(page)
        .bind(date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_visits(&self, date: Option<NaiveDate>) -> Result<Vec<PageVisits>, RepositoryError> {
        let mut builder =
            QueryBuilder::<Sqlite>::new("SELECT id, page, visitors, date FROM analytics");
        if let Some(date) = date {
            builder.push(" WHERE date = ").push_bind(date);
        }
        builder.push(" ORDER BY date DESC, id ASC");

        let rows: Vec<VisitRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(PageVisits::try_from).collect()
    }
}
