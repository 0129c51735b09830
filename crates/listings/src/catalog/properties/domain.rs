use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::validation::{double_option, non_null, ValidationError, Violations};

pub(crate) const ENTITY: &str = "property";

/// Identifier wrapper for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub i64);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How the advertised price is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Sale,
    Rent,
    Lease,
}

impl PriceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Rent => "rent",
            Self::Lease => "lease",
        }
    }
}

impl FromStr for PriceType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sale" => Ok(Self::Sale),
            "rent" => Ok(Self::Rent),
            "lease" => Ok(Self::Lease),
            other => Err(format!("'{other}' is not one of sale, rent, lease")),
        }
    }
}

/// Market status of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Sold,
    Rented,
    Pending,
}

impl ListingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Rented => "rented",
            Self::Pending => "pending",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            "rented" => Ok(Self::Rented),
            "pending" => Ok(Self::Pending),
            other => Err(format!("'{other}' is not one of active, sold, rented, pending")),
        }
    }
}

/// A stored listing. Prices are whole units of the smallest currency denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub price_type: PriceType,
    pub property_type: String,
    pub county: String,
    pub location: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<u32>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub featured: bool,
    pub popular: bool,
    pub new_listing: bool,
    pub agent_name: String,
    pub agent_image: Option<String>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn from_new(id: PropertyId, created_at: DateTime<Utc>, new: NewProperty) -> Self {
        let NewProperty {
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
        } = new;

        Self {
            id,
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
            created_at,
        }
    }

    /// The first image is the one shown on listing cards.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Case-insensitive substring match over title, description, and location.
    pub fn mentions(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        [&self.title, &self.description, &self.location]
            .into_iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}

/// Validated insert payload with defaults applied; id and createdAt are assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub price_type: PriceType,
    pub property_type: String,
    pub county: String,
    pub location: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<u32>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub featured: bool,
    pub popular: bool,
    pub new_listing: bool,
    pub agent_name: String,
    pub agent_image: Option<String>,
    pub status: ListingStatus,
}

/// Create request as received on the wire; every field optional so missing ones can be reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub price_type: Option<PriceType>,
    pub property_type: Option<String>,
    pub county: Option<String>,
    pub location: Option<String>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<u32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub popular: Option<bool>,
    pub new_listing: Option<bool>,
    pub agent_name: Option<String>,
    pub agent_image: Option<String>,
    pub status: Option<ListingStatus>,
}

impl PropertyDraft {
    pub fn validate(self) -> Result<NewProperty, ValidationError> {
        let mut violations = Violations::new(ENTITY);

        let title = violations.required_text("title", self.title);
        let description = violations.required_text("description", self.description);
        let price = violations.required("price", self.price);
        if matches!(price, Some(value) if value < 0) {
            violations.push("price", "must not be negative");
        }
        let price_type = violations.required("priceType", self.price_type);
        let property_type = violations.required_text("propertyType", self.property_type);
        let county = violations.required_text("county", self.county);
        let location = violations.required_text("location", self.location);
        if self.area == Some(0) {
            violations.push("area", "must be greater than zero");
        }
        let agent_name = violations.required_text("agentName", self.agent_name);

        violations.finish()?;

        match (
            title,
            description,
            price,
            price_type,
            property_type,
            county,
            location,
            agent_name,
        ) {
            (
                Some(title),
                Some(description),
                Some(price),
                Some(price_type),
                Some(property_type),
                Some(county),
                Some(location),
                Some(agent_name),
            ) => Ok(NewProperty {
                title,
                description,
                price,
                price_type,
                property_type,
                county,
                location,
                bedrooms: self.bedrooms,
                bathrooms: self.bathrooms,
                area: self.area,
                amenities: self.amenities.unwrap_or_default(),
                images: self.images.unwrap_or_default(),
                featured: self.featured.unwrap_or(false),
                popular: self.popular.unwrap_or(false),
                new_listing: self.new_listing.unwrap_or(true),
                agent_name,
                agent_image: self.agent_image,
                status: self.status.unwrap_or_default(),
            }),
            _ => Err(ValidationError::single(ENTITY, "body", "incomplete payload")),
        }
    }
}

/// Partial update. Omitted fields keep their stored value; `null` clears a nullable field.
/// Unknown keys (including `id` and `createdAt`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "PropertyPatchBody")]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub price_type: Option<PriceType>,
    pub property_type: Option<String>,
    pub county: Option<String>,
    pub location: Option<String>,
    pub bedrooms: Option<Option<u32>>,
    pub bathrooms: Option<Option<u32>>,
    pub area: Option<Option<u32>>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub popular: Option<bool>,
    pub new_listing: Option<bool>,
    pub agent_name: Option<String>,
    pub agent_image: Option<Option<String>>,
    pub status: Option<ListingStatus>,
    /// Required fields the payload set to `null`.
    pub(crate) nulls: Vec<&'static str>,
}

/// Wire shape of a patch: every field tells omitted apart from `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PropertyPatchBody {
    #[serde(deserialize_with = "double_option")]
    title: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    description: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    price: Option<Option<i64>>,
    #[serde(deserialize_with = "double_option")]
    price_type: Option<Option<PriceType>>,
    #[serde(deserialize_with = "double_option")]
    property_type: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    county: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    location: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    bedrooms: Option<Option<u32>>,
    #[serde(deserialize_with = "double_option")]
    bathrooms: Option<Option<u32>>,
    #[serde(deserialize_with = "double_option")]
    area: Option<Option<u32>>,
    #[serde(deserialize_with = "double_option")]
    amenities: Option<Option<Vec<String>>>,
    #[serde(deserialize_with = "double_option")]
    images: Option<Option<Vec<String>>>,
    #[serde(deserialize_with = "double_option")]
    featured: Option<Option<bool>>,
    #[serde(deserialize_with = "double_option")]
    popular: Option<Option<bool>>,
    #[serde(deserialize_with = "double_option")]
    new_listing: Option<Option<bool>>,
    #[serde(deserialize_with = "double_option")]
    agent_name: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    agent_image: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    status: Option<Option<ListingStatus>>,
}

impl From<PropertyPatchBody> for PropertyPatch {
    fn from(body: PropertyPatchBody) -> Self {
        let mut nulls = Vec::new();
        let title = non_null(&mut nulls, "title", body.title);
        let description = non_null(&mut nulls, "description", body.description);
        let price = non_null(&mut nulls, "price", body.price);
        let price_type = non_null(&mut nulls, "priceType", body.price_type);
        let property_type = non_null(&mut nulls, "propertyType", body.property_type);
        let county = non_null(&mut nulls, "county", body.county);
        let location = non_null(&mut nulls, "location", body.location);
        let amenities = non_null(&mut nulls, "amenities", body.amenities);
        let images = non_null(&mut nulls, "images", body.images);
        let featured = non_null(&mut nulls, "featured", body.featured);
        let popular = non_null(&mut nulls, "popular", body.popular);
        let new_listing = non_null(&mut nulls, "newListing", body.new_listing);
        let agent_name = non_null(&mut nulls, "agentName", body.agent_name);
        let status = non_null(&mut nulls, "status", body.status);

        Self {
            title,
            description,
            price,
            price_type,
            property_type,
            county,
            location,
            bedrooms: body.bedrooms,
            bathrooms: body.bathrooms,
            area: body.area,
            amenities,
            images,
            featured,
            popular,
            new_listing,
            agent_name,
            agent_image: body.agent_image,
            status,
            nulls,
        }
    }
}

impl PropertyPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new(ENTITY);
        violations.nulls(&self.nulls);
        violations.supplied_text("title", &self.title);
        violations.supplied_text("description", &self.description);
        if matches!(self.price, Some(value) if value < 0) {
            violations.push("price", "must not be negative");
        }
        violations.supplied_text("propertyType", &self.property_type);
        violations.supplied_text("county", &self.county);
        violations.supplied_text("location", &self.location);
        if self.area == Some(Some(0)) {
            violations.push("area", "must be greater than zero");
        }
        violations.supplied_text("agentName", &self.agent_name);
        violations.finish()
    }

    /// Shallow merge; `id` and `created_at` are never touched.
    pub fn apply(self, property: &mut Property) {
        let Self {
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
        } = self;

        if let Some(value) = title {
            property.title = value;
        }
        if let Some(value) = description {
            property.description = value;
        }
        if let Some(value) = price {
            property.price = value;
        }
        if let Some(value) = price_type {
            property.price_type = value;
        }
        if let Some(value) = property_type {
            property.property_type = value;
        }
        if let Some(value) = county {
            property.county = value;
        }
        if let Some(value) = location {
            property.location = value;
        }
        if let Some(value) = bedrooms {
            property.bedrooms = value;
        }
        if let Some(value) = bathrooms {
            property.bathrooms = value;
        }
        if let Some(value) = area {
            property.area = value;
        }
        if let Some(value) = amenities {
            property.amenities = value;
        }
        if let Some(value) = images {
            property.images = value;
        }
        if let Some(value) = featured {
            property.featured = value;
        }
        if let Some(value) = popular {
            property.popular = value;
        }
        if let Some(value) = new_listing {
            property.new_listing = value;
        }
        if let Some(value) = agent_name {
            property.agent_name = value;
        }
        if let Some(value) = agent_image {
            property.agent_image = value;
        }
        if let Some(value) = status {
            property.status = value;
        }
    }
}
