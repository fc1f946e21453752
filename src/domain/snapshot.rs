//! The unit of persistence: every profile plus every expense.

use serde::{Deserialize, Serialize};

use crate::domain::profile::DEFAULT_PROFILE_NAME;
use crate::domain::{Expense, Profile};

/// Complete application state, read and written atomically as one
/// document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSnapshot {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl AppSnapshot {
    /// Starter state for a brand-new user: the default profile and no
    /// expenses.
    pub fn initial() -> Self {
        Self {
            profiles: vec![Profile::synthetic_default()],
            expenses: Vec::new(),
        }
    }

    /// Sorts expenses newest-first. Persisted and loaded snapshots keep
    /// this order, so consumers never re-sort.
    pub fn sort_expenses(&mut self) {
        self.expenses.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Whether this snapshot holds anything worth uploading: at least
    /// one expense, more than one profile, or a renamed sole profile.
    pub fn is_meaningful(&self) -> bool {
        !self.expenses.is_empty()
            || self.profiles.len() > 1
            || self
                .profiles
                .first()
                .map_or(false, |profile| profile.name != DEFAULT_PROFILE_NAME)
    }

    /// Whether this is still the untouched starter state.
    pub fn is_initial_default(&self) -> bool {
        self.expenses.is_empty()
            && self.profiles.len() == 1
            && self.profiles[0].is_synthetic_default()
    }

    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.id == id)
    }

    pub fn expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }
}
