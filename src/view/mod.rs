//! Pure, derived projections over a snapshot.
//!
//! Callers conventionally compose profile, then date, then category
//! (cheapest first); every ordering produces the same set, and each
//! step strictly narrows the previous one.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{AppSnapshot, Category, Expense};

/// Number of expenses revealed per "load more" step.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Profile scope for the expense list: everything, or one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileFilter {
    All,
    Only(String),
}

impl ProfileFilter {
    /// The concrete profile id, when one is selected. Mutations require
    /// this to be `Some`; the engine never accepts the `All` selector.
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            ProfileFilter::All => None,
            ProfileFilter::Only(id) => Some(id),
        }
    }
}

pub fn filter_by_profile<'a>(
    snapshot: &'a AppSnapshot,
    filter: &ProfileFilter,
) -> Vec<&'a Expense> {
    snapshot
        .expenses
        .iter()
        .filter(|expense| match filter {
            ProfileFilter::All => true,
            ProfileFilter::Only(id) => expense.profile_id == *id,
        })
        .collect()
}

/// Keeps expenses whose timestamp falls within `[start, end]`, both
/// bounds inclusive.
pub fn filter_by_date_range<'a>(
    expenses: &[&'a Expense],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<&'a Expense> {
    expenses
        .iter()
        .copied()
        .filter(|expense| expense.date >= start && expense.date <= end)
        .collect()
}

pub fn filter_by_category<'a>(
    expenses: &[&'a Expense],
    category: Option<Category>,
) -> Vec<&'a Expense> {
    match category {
        None => expenses.to_vec(),
        Some(wanted) => expenses
            .iter()
            .copied()
            .filter(|expense| expense.category == wanted)
            .collect(),
    }
}

pub fn sum_amounts(expenses: &[&Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Per-category totals; only categories that actually occur appear.
pub fn sum_by_category(expenses: &[&Expense]) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }
    totals
}

/// First `page_size * page_count` entries of an already-filtered,
/// already-sorted list. "Load more" bumps `page_count` by one; the full
/// list is always materialized, never window-fetched.
pub fn paginate<'a>(
    expenses: &[&'a Expense],
    page_size: usize,
    page_count: usize,
) -> Vec<&'a Expense> {
    expenses
        .iter()
        .copied()
        .take(page_size.saturating_mul(page_count))
        .collect()
}
