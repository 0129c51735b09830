use serde::Deserialize;

use super::domain::PriceType;
use super::filter::PropertyFilter;
use crate::catalog::validation::{ValidationError, Violations};

/// Raw query string for listing and search endpoints. Values stay strings until `filter`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuery {
    pub price_type: Option<String>,
    pub county: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub featured: Option<String>,
    pub popular: Option<String>,
    pub new_listing: Option<String>,
    pub keyword: Option<String>,
}

impl PropertyQuery {
    pub fn filter(&self) -> Result<PropertyFilter, ValidationError> {
        let mut violations = Violations::new("query");

        let price_type = violations.param::<PriceType>(
            "priceType",
            self.price_type.as_deref(),
            "one of sale, rent, lease",
        );
        let min_price = violations.param("minPrice", self.min_price.as_deref(), "an integer");
        let max_price = violations.param("maxPrice", self.max_price.as_deref(), "an integer");
        let bedrooms = violations.param(
            "bedrooms",
            self.bedrooms.as_deref(),
            "a non-negative integer",
        );
        let bathrooms = violations.param(
            "bathrooms",
            self.bathrooms.as_deref(),
            "a non-negative integer",
        );
        let featured = violations.flag("featured", self.featured.as_deref());
        let popular = violations.flag("popular", self.popular.as_deref());
        let new_listing = violations.flag("newListing", self.new_listing.as_deref());

        violations.finish()?;

        Ok(PropertyFilter {
            price_type,
            county: non_blank(&self.county),
            property_type: non_blank(&self.property_type),
            min_price,
            max_price,
            bedrooms,
            bathrooms,
            featured,
            popular,
            new_listing,
        })
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_unconstrained() {
        let query = PropertyQuery {
            county: Some(String::new()),
            min_price: Some(" ".to_string()),
            featured: Some(String::new()),
            ..PropertyQuery::default()
        };
        assert_eq!(query.filter().expect("parses"), PropertyFilter::default());
        assert_eq!(query.keyword(), None);
    }

    #[test]
    fn typed_values_are_parsed() {
        let query = PropertyQuery {
            price_type: Some("sale".to_string()),
            min_price: Some("0".to_string()),
            bedrooms: Some("3".to_string()),
            new_listing: Some("false".to_string()),
            keyword: Some(" Karen ".to_string()),
            ..PropertyQuery::default()
        };
        let filter = query.filter().expect("parses");
        assert_eq!(filter.price_type, Some(PriceType::Sale));
        assert_eq!(filter.min_price, Some(0));
        assert_eq!(filter.bedrooms, Some(3));
        assert_eq!(filter.new_listing, Some(false));
        assert_eq!(query.keyword(), Some("Karen"));
    }

    #[test]
    fn malformed_values_name_the_parameter() {
        let query = PropertyQuery {
            price_type: Some("auction".to_string()),
            max_price: Some("cheap".to_string()),
            bedrooms: Some("-1".to_string()),
            popular: Some("yes".to_string()),
            ..PropertyQuery::default()
        };
        let err = query.filter().expect_err("rejected");
        assert_eq!(
            err.fields(),
            vec!["priceType", "maxPrice", "bedrooms", "popular"]
        );
    }
}
