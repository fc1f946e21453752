use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier;
use crate::domain::{Category, Identifiable, NamedEntity};

/// A single recorded expense.
///
/// Field names serialize as camelCase because the persisted document is
/// also the remote store's wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub profile_id: String,
    pub name: String,
    pub amount: f64,
    pub category: Category,
    #[serde(with = "flexible_date")]
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Creates an expense with a fresh id and a category classified
    /// from its name.
    pub fn new(
        profile_id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        let category = classifier::classify(&name);
        Self {
            id: Uuid::new_v4().to_string(),
            profile_id: profile_id.into(),
            name,
            amount,
            category,
            date,
        }
    }
}

impl Identifiable for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Expense {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Accepts the date spellings that have appeared across persisted
/// revisions: RFC 3339, naive datetimes, and bare `YYYY-MM-DD` days.
/// Always serializes as RFC 3339.
pub(crate) mod flexible_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unrecognized date `{raw}`")))
    }

    pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_expense_is_classified_from_its_name() {
        let expense = Expense::new("p1", "Swiggy dinner", 450.0, Utc::now());
        assert_eq!(expense.category, Category::Food);
        assert!(!expense.id.is_empty());
    }

    #[test]
    fn date_parses_every_known_spelling() {
        for raw in [
            "2024-05-01T10:30:00+05:30",
            "2024-05-01T10:30:00.123Z",
            "2024-05-01T10:30:00",
            "2024-05-01",
        ] {
            assert!(flexible_date::parse(raw).is_some(), "failed on `{raw}`");
        }
        assert!(flexible_date::parse("yesterday").is_none());
    }

    #[test]
    fn serialized_field_names_match_the_document_format() {
        let expense = Expense::new("p1", "petrol", 900.0, Utc::now());
        let value = serde_json::to_value(&expense).expect("serialize expense");
        assert!(value.get("profileId").is_some());
        assert!(value.get("profile_id").is_none());
    }

    #[test]
    fn date_roundtrips_through_json() {
        let expense = Expense::new("p1", "metro card", 300.0, Utc::now());
        let json = serde_json::to_string(&expense).expect("serialize expense");
        let back: Expense = serde_json::from_str(&json).expect("parse expense");
        assert_eq!(back.date, expense.date);
    }
}
