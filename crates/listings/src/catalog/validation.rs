use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Input rejected before any storage call; carries every violating field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub entity: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(entity: &'static str, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            entity,
            errors: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|error| error.field).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} data: {}", self.entity, self.fields().join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Collects field errors while a draft is being checked.
#[derive(Debug)]
pub(crate) struct Violations {
    entity: &'static str,
    errors: Vec<FieldError>,
}

impl Violations {
    pub(crate) fn new(entity: &'static str) -> Self {
        Self {
            entity,
            errors: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Required text: must be supplied and non-blank.
    pub(crate) fn required_text(
        &mut self,
        field: &'static str,
        value: Option<String>,
    ) -> Option<String> {
        match value {
            Some(text) if !text.trim().is_empty() => Some(text),
            Some(_) => {
                self.push(field, "must not be blank");
                None
            }
            None => {
                self.push(field, "is required");
                None
            }
        }
    }

    /// Required value of any other type.
    pub(crate) fn required<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, "is required");
        }
        value
    }

    /// Text that may be omitted, but not blanked, in a partial update.
    pub(crate) fn supplied_text(&mut self, field: &'static str, value: &Option<String>) {
        if matches!(value, Some(text) if text.trim().is_empty()) {
            self.push(field, "must not be blank");
        }
    }

    /// Required fields a partial update tried to clear.
    pub(crate) fn nulls(&mut self, fields: &[&'static str]) {
        for &field in fields {
            self.push(field, "must not be null");
        }
    }

    pub(crate) fn min_chars(&mut self, field: &'static str, value: &str, min: usize) {
        if value.trim().chars().count() < min {
            self.push(field, format!("must be at least {min} characters"));
        }
    }

    /// Query-string value parsed at the boundary; blank counts as absent.
    pub(crate) fn param<T: FromStr>(
        &mut self,
        field: &'static str,
        raw: Option<&str>,
        expected: &str,
    ) -> Option<T> {
        let raw = raw.map(str::trim).filter(|value| !value.is_empty())?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.push(field, format!("must be {expected} (found '{raw}')"));
                None
            }
        }
    }

    /// Only the literals `true` and `false` are accepted.
    pub(crate) fn flag(&mut self, field: &'static str, raw: Option<&str>) -> Option<bool> {
        self.param(field, raw, "true or false")
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                entity: self.entity,
                errors: self.errors,
            })
        }
    }
}

/// Distinguishes an omitted field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Unwraps a double option for a field that cannot be cleared, noting an explicit `null`.
pub(crate) fn non_null<T>(
    nulls: &mut Vec<&'static str>,
    field: &'static str,
    value: Option<Option<T>>,
) -> Option<T> {
    match value {
        Some(None) => {
            nulls.push(field);
            None
        }
        other => other.flatten(),
    }
}

/// Loose `local@domain.tld` shape check.
pub(crate) fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
