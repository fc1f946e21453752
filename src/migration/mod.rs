//! Normalization of persisted snapshots of unknown vintage.
//!
//! Decoding is tagged-variant: each known shape is attempted in turn,
//! newest first, and every legacy variant has its own upgrade into the
//! current shape. A document matching no variant is treated the same as
//! no data at all.

use serde::Deserialize;
use serde_json::Value;

use crate::classifier;
use crate::domain::expense::flexible_date;
use crate::domain::{AppSnapshot, Category, Expense, Profile};

/// The persisted shape a raw document decoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotShape {
    /// `{ profiles, expenses[].profileId }` — already current.
    Current,
    /// The profile collection still lives under the old `accounts`
    /// field name.
    RenamedCollection,
    /// `profiles` is current but expense rows carry the old `accountId`
    /// foreign key.
    RenamedForeignKey,
    /// A bare array of expense records with no profile relation at all,
    /// the very first persisted format.
    BareExpenses,
}

/// A snapshot brought to the current shape, tagged with its origin.
#[derive(Debug, Clone)]
pub struct NormalizedSnapshot {
    pub snapshot: AppSnapshot,
    pub shape: SnapshotShape,
}

impl NormalizedSnapshot {
    pub fn was_migrated(&self) -> bool {
        self.shape != SnapshotShape::Current
    }
}

/// Brings a raw persisted document to the current shape.
///
/// Returns `None` when no known shape decodes. Normalizing
/// already-current data is a no-op, so running the result through
/// `normalize` again yields equivalent data.
pub fn normalize(raw: &Value) -> Option<NormalizedSnapshot> {
    if let Ok(doc) = serde_json::from_value::<CurrentDoc>(raw.clone()) {
        return Some(NormalizedSnapshot {
            snapshot: doc.into_snapshot(),
            shape: SnapshotShape::Current,
        });
    }
    if let Ok(doc) = serde_json::from_value::<RenamedCollectionDoc>(raw.clone()) {
        if let Some(snapshot) = doc.upgrade() {
            return Some(NormalizedSnapshot {
                snapshot,
                shape: SnapshotShape::RenamedCollection,
            });
        }
    }
    if let Ok(doc) = serde_json::from_value::<RenamedForeignKeyDoc>(raw.clone()) {
        if let Some(snapshot) = doc.upgrade() {
            return Some(NormalizedSnapshot {
                snapshot,
                shape: SnapshotShape::RenamedForeignKey,
            });
        }
    }
    if let Ok(rows) = serde_json::from_value::<Vec<BareExpenseRow>>(raw.clone()) {
        if let Some(snapshot) = upgrade_bare(rows) {
            return Some(NormalizedSnapshot {
                snapshot,
                shape: SnapshotShape::BareExpenses,
            });
        }
    }
    None
}

/// Current shape. `profiles` is required here, unlike on
/// [`AppSnapshot`], so that renamed-collection documents fail this
/// decode and fall through to their own variant.
#[derive(Deserialize)]
struct CurrentDoc {
    profiles: Vec<Profile>,
    #[serde(default)]
    expenses: Vec<Expense>,
}

impl CurrentDoc {
    fn into_snapshot(self) -> AppSnapshot {
        AppSnapshot {
            profiles: self.profiles,
            expenses: self.expenses,
        }
    }
}

#[derive(Deserialize)]
struct RenamedCollectionDoc {
    accounts: Vec<Profile>,
    #[serde(default)]
    expenses: Vec<LegacyExpenseRow>,
}

impl RenamedCollectionDoc {
    fn upgrade(self) -> Option<AppSnapshot> {
        let expenses = upgrade_rows(self.expenses)?;
        Some(AppSnapshot {
            profiles: self.accounts,
            expenses,
        })
    }
}

#[derive(Deserialize)]
struct RenamedForeignKeyDoc {
    profiles: Vec<Profile>,
    #[serde(default)]
    expenses: Vec<LegacyExpenseRow>,
}

impl RenamedForeignKeyDoc {
    fn upgrade(self) -> Option<AppSnapshot> {
        let expenses = upgrade_rows(self.expenses)?;
        Some(AppSnapshot {
            profiles: self.profiles,
            expenses,
        })
    }
}

/// Expense row as written by older releases: the foreign key may use
/// either spelling, and `category` may be absent.
#[derive(Deserialize)]
struct LegacyExpenseRow {
    id: String,
    name: String,
    amount: f64,
    #[serde(default)]
    category: Option<Category>,
    date: String,
    #[serde(default, rename = "profileId")]
    profile_id: Option<String>,
    #[serde(default, rename = "accountId")]
    account_id: Option<String>,
}

impl LegacyExpenseRow {
    fn into_expense(self) -> Option<Expense> {
        let profile_id = self.profile_id.or(self.account_id)?;
        let date = flexible_date::parse(&self.date)?;
        let category = self
            .category
            .unwrap_or_else(|| classifier::classify(&self.name));
        Some(Expense {
            id: self.id,
            profile_id,
            name: self.name,
            amount: self.amount,
            category,
            date,
        })
    }
}

/// The very first persisted format: no profile relation at all.
#[derive(Deserialize)]
struct BareExpenseRow {
    id: String,
    name: String,
    amount: f64,
    #[serde(default)]
    category: Option<Category>,
    date: String,
}

fn upgrade_rows(rows: Vec<LegacyExpenseRow>) -> Option<Vec<Expense>> {
    rows.into_iter().map(LegacyExpenseRow::into_expense).collect()
}

fn upgrade_bare(rows: Vec<BareExpenseRow>) -> Option<AppSnapshot> {
    let default_profile = Profile::synthetic_default();
    let expenses: Option<Vec<Expense>> = rows
        .into_iter()
        .map(|row| {
            let date = flexible_date::parse(&row.date)?;
            let category = row
                .category
                .unwrap_or_else(|| classifier::classify(&row.name));
            Some(Expense {
                id: row.id,
                profile_id: default_profile.id.clone(),
                name: row.name,
                amount: row.amount,
                category,
                date,
            })
        })
        .collect();
    Some(AppSnapshot {
        profiles: vec![default_profile],
        expenses: expenses?,
    })
}
