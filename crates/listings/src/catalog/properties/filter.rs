use std::cmp::Ordering;

use super::domain::{PriceType, Property};

/// Structural catalog filter. Every `None` field is unconstrained; set fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    pub price_type: Option<PriceType>,
    pub county: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub featured: Option<bool>,
    pub popular: Option<bool>,
    pub new_listing: Option<bool>,
}

/// One active constraint. Both storage backends interpret this list; neither composes its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
    PriceType(PriceType),
    County(&'a str),
    PropertyType(&'a str),
    MinPrice(i64),
    MaxPrice(i64),
    /// A listing without a bedroom count never satisfies a minimum, including zero.
    MinBedrooms(u32),
    /// Same null rule as `MinBedrooms`.
    MinBathrooms(u32),
    Featured(bool),
    Popular(bool),
    NewListing(bool),
}

impl Predicate<'_> {
    pub fn matches(&self, property: &Property) -> bool {
        match *self {
            Predicate::PriceType(value) => property.price_type == value,
            Predicate::County(value) => property.county == value,
            Predicate::PropertyType(value) => property.property_type == value,
            Predicate::MinPrice(value) => property.price >= value,
            Predicate::MaxPrice(value) => property.price <= value,
            Predicate::MinBedrooms(value) => property.bedrooms.is_some_and(|count| count >= value),
            Predicate::MinBathrooms(value) => {
                property.bathrooms.is_some_and(|count| count >= value)
            }
            Predicate::Featured(value) => property.featured == value,
            Predicate::Popular(value) => property.popular == value,
            Predicate::NewListing(value) => property.new_listing == value,
        }
    }
}

impl PropertyFilter {
    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    pub fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates = Vec::new();
        if let Some(value) = self.price_type {
            predicates.push(Predicate::PriceType(value));
        }
        if let Some(value) = self.county.as_deref() {
            predicates.push(Predicate::County(value));
        }
        if let Some(value) = self.property_type.as_deref() {
            predicates.push(Predicate::PropertyType(value));
        }
        if let Some(value) = self.min_price {
            predicates.push(Predicate::MinPrice(value));
        }
        if let Some(value) = self.max_price {
            predicates.push(Predicate::MaxPrice(value));
        }
        if let Some(value) = self.bedrooms {
            predicates.push(Predicate::MinBedrooms(value));
        }
        if let Some(value) = self.bathrooms {
            predicates.push(Predicate::MinBathrooms(value));
        }
        if let Some(value) = self.featured {
            predicates.push(Predicate::Featured(value));
        }
        if let Some(value) = self.popular {
            predicates.push(Predicate::Popular(value));
        }
        if let Some(value) = self.new_listing {
            predicates.push(Predicate::NewListing(value));
        }
        predicates
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.predicates()
            .iter()
            .all(|predicate| predicate.matches(property))
    }
}

/// Newest first; equal timestamps fall back to ascending id, i.e. insertion order.
pub fn newest_first(a: &Property, b: &Property) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}
