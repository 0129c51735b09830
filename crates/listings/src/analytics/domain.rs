use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Visit counter for one page on one calendar day. `(page, date)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageVisits {
    pub id: i64,
    pub page: String,
    pub visitors: u64,
    pub date: NaiveDate,
}

/// Recency order for listings: latest day first, then creation order.
pub fn latest_day_first(a: &PageVisits, b: &PageVisits) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id))
}
