use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use shared::{Coords, Tier, VisitListEntry};

use crate::backend::domain::rating::classify;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of trailing epoch-millisecond digits kept in a visit id
const ID_DIGITS: usize = 10;

/// Validated input for a new visit
#[derive(Debug, Clone, PartialEq)]
pub struct VisitDraft {
    pub coords: Coords,
    pub title: String,
    pub rating: i32,
    pub bathroom: String,
    pub feeding: String,
    pub changing: String,
    pub summary: String,
}

/// One recorded visit. Immutable once constructed.
///
/// The serialized form is the persisted shape: every field, derived ones
/// included, is written and read back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    id: String,
    coords: Coords,
    created_at: DateTime<Utc>,
    display_date: String,
    title: String,
    summary: String,
    rating: i32,
    bathroom: String,
    feeding: String,
    changing: String,
    tier: Tier,
}

impl VisitRecord {
    /// Create a visit stamped with the current time
    pub fn new(draft: VisitDraft) -> Self {
        Self::new_at(draft, Local::now())
    }

    /// Create a visit stamped with `now`
    pub fn new_at(draft: VisitDraft, now: DateTime<Local>) -> Self {
        Self {
            id: Self::generate_id(now.timestamp_millis()),
            coords: draft.coords,
            created_at: now.with_timezone(&Utc),
            display_date: Self::format_display_date(&now),
            tier: classify(draft.rating),
            title: draft.title,
            summary: draft.summary,
            rating: draft.rating,
            bathroom: draft.bathroom,
            feeding: draft.feeding,
            changing: draft.changing,
        }
    }

    /// Rebuild a record from persisted parts without recomputing anything
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_persisted(
        id: String,
        coords: Coords,
        created_at: DateTime<Utc>,
        display_date: String,
        title: String,
        summary: String,
        rating: i32,
        bathroom: String,
        feeding: String,
        changing: String,
        tier: Tier,
    ) -> Self {
        Self {
            id,
            coords,
            created_at,
            display_date,
            title,
            summary,
            rating,
            bathroom,
            feeding,
            changing,
            tier,
        }
    }

    /// Last ten digits of the epoch milliseconds, e.g. 1718000000123 -> "8000000123"
    pub fn generate_id(now_millis: i64) -> String {
        let digits = now_millis.to_string();
        let start = digits.len().saturating_sub(ID_DIGITS);
        digits[start..].to_string()
    }

    /// "March 14" style label
    pub fn format_display_date<D: Datelike>(date: &D) -> String {
        format!("{} {}", MONTHS[date.month0() as usize], date.day())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn display_date(&self) -> &str {
        &self.display_date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn bathroom(&self) -> &str {
        &self.bathroom
    }

    pub fn feeding(&self) -> &str {
        &self.feeding
    }

    pub fn changing(&self) -> &str {
        &self.changing
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Display-ready list entry for views
    pub fn to_list_entry(&self) -> VisitListEntry {
        VisitListEntry {
            id: self.id.clone(),
            css_class: self.tier.css_class(),
            heading: format!("{} on {}", self.title, self.display_date),
            rating_line: format!("Rating: {}", self.rating),
            bathroom_line: format!("Bathrooms: {}", self.bathroom),
            changing_line: format!("Changing Table: {}", self.changing),
            feeding_line: format!("Feeding Area: {}", self.feeding),
            summary_line: format!("Summary: {}", self.summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn park_draft(rating: i32) -> VisitDraft {
        VisitDraft {
            coords: Coords::new(51.5, -0.1),
            title: "Park".to_string(),
            rating,
            bathroom: "yes".to_string(),
            feeding: "no".to_string(),
            changing: "yes".to_string(),
            summary: "nice".to_string(),
        }
    }

    #[test]
    fn test_generate_id_keeps_last_ten_digits() {
        assert_eq!(VisitRecord::generate_id(1_718_000_000_123), "8000000123");
        assert_eq!(VisitRecord::generate_id(42), "42");
    }

    #[test]
    fn test_new_at_derives_fields_once() {
        let now = Local.with_ymd_and_hms(2025, 3, 14, 12, 30, 0).unwrap();
        let visit = VisitRecord::new_at(park_draft(9), now);

        assert_eq!(visit.id(), VisitRecord::generate_id(now.timestamp_millis()));
        assert_eq!(visit.display_date(), "March 14");
        assert_eq!(visit.created_at(), now.with_timezone(&Utc));
        assert_eq!(visit.tier(), Tier::Good);
        assert_eq!(visit.coords(), Coords::new(51.5, -0.1));
        assert_eq!(visit.title(), "Park");
        assert_eq!(visit.bathroom(), "yes");
        assert_eq!(visit.feeding(), "no");
        assert_eq!(visit.changing(), "yes");
        assert_eq!(visit.summary(), "nice");
    }

    #[test]
    fn test_tier_matches_classifier_for_every_rating() {
        let now = Local.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        for rating in -3..=14 {
            let visit = VisitRecord::new_at(park_draft(rating), now);
            assert_eq!(visit.tier(), classify(rating), "rating {}", rating);
        }
    }

    #[test]
    fn test_display_date_covers_all_months() {
        let first = Local.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let last = Local.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap();
        assert_eq!(VisitRecord::format_display_date(&first), "January 1");
        assert_eq!(VisitRecord::format_display_date(&last), "December 31");
    }

    #[test]
    fn test_serialized_shape_is_flat_camel_case() {
        let now = Local.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap();
        let visit = VisitRecord::new_at(park_draft(6), now);
        let value = serde_json::to_value(&visit).unwrap();

        assert_eq!(value["tier"], "average");
        assert_eq!(value["displayDate"], "June 10");
        assert_eq!(value["coords"], serde_json::json!([51.5, -0.1]));
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["rating"], 6);
    }

    #[test]
    fn test_list_entry_formatting() {
        let now = Local.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        let entry = VisitRecord::new_at(park_draft(3), now).to_list_entry();

        assert_eq!(entry.css_class, "visit--bad");
        assert_eq!(entry.heading, "Park on March 14");
        assert_eq!(entry.rating_line, "Rating: 3");
        assert_eq!(entry.changing_line, "Changing Table: yes");
    }
}
