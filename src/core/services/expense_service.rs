//! Validated mutation helpers for the expense collection.

use chrono::{DateTime, Utc};

use crate::core::services::{find_by_id, ServiceError, ServiceResult};
use crate::domain::{AppSnapshot, Expense};

/// The only sanctioned way to alter the expense list; callers never
/// hand-splice `snapshot.expenses`.
pub struct ExpenseService;

impl ExpenseService {
    /// Builds a classified expense against an existing profile and
    /// prepends it to the snapshot.
    pub fn add(
        snapshot: &mut AppSnapshot,
        profile_id: &str,
        name: &str,
        amount: f64,
        date: DateTime<Utc>,
    ) -> ServiceResult<Expense> {
        if find_by_id(&snapshot.profiles, profile_id).is_none() {
            return Err(ServiceError::Invalid(format!(
                "profile `{profile_id}` does not exist"
            )));
        }
        let expense = Expense::new(profile_id, name, amount, date);
        snapshot.expenses.insert(0, expense.clone());
        Ok(expense)
    }

    /// Replaces the stored expense carrying the same id.
    pub fn update(snapshot: &mut AppSnapshot, updated: Expense) -> ServiceResult<()> {
        let slot = snapshot
            .expenses
            .iter_mut()
            .find(|expense| expense.id == updated.id)
            .ok_or_else(|| ServiceError::Invalid("Expense not found".into()))?;
        *slot = updated;
        Ok(())
    }

    /// Removes the expense identified by `id`, returning the removed
    /// instance.
    pub fn remove(snapshot: &mut AppSnapshot, id: &str) -> ServiceResult<Expense> {
        let index = snapshot
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or_else(|| ServiceError::Invalid("Expense not found".into()))?;
        Ok(snapshot.expenses.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn base_snapshot() -> AppSnapshot {
        AppSnapshot::initial()
    }

    #[test]
    fn add_classifies_and_prepends() {
        let mut snapshot = base_snapshot();
        let profile_id = snapshot.profiles[0].id.clone();
        ExpenseService::add(&mut snapshot, &profile_id, "petrol", 900.0, Utc::now())
            .expect("add expense");
        let added =
            ExpenseService::add(&mut snapshot, &profile_id, "Swiggy dinner", 450.0, Utc::now())
                .expect("add expense");
        assert_eq!(added.category, Category::Food);
        assert_eq!(snapshot.expenses[0].id, added.id);
        assert_eq!(snapshot.expenses.len(), 2);
    }

    #[test]
    fn add_rejects_unknown_profiles() {
        let mut snapshot = base_snapshot();
        let err = ExpenseService::add(&mut snapshot, "missing", "chai", 20.0, Utc::now())
            .expect_err("add must fail for unknown profile");
        assert!(
            matches!(err, ServiceError::Invalid(ref message) if message.contains("missing")),
            "unexpected error: {err:?}"
        );
        assert!(snapshot.expenses.is_empty());
    }

    #[test]
    fn update_fails_for_missing_expense() {
        let mut snapshot = base_snapshot();
        let profile_id = snapshot.profiles[0].id.clone();
        let ghost = Expense::new(&profile_id, "ghost", 1.0, Utc::now());
        let err = ExpenseService::update(&mut snapshot, ghost)
            .expect_err("update must fail for unknown id");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn remove_returns_deleted_expense() {
        let mut snapshot = base_snapshot();
        let profile_id = snapshot.profiles[0].id.clone();
        let expense = ExpenseService::add(&mut snapshot, &profile_id, "chai", 20.0, Utc::now())
            .expect("add expense");

        let removed = ExpenseService::remove(&mut snapshot, &expense.id).expect("remove expense");
        assert_eq!(removed.id, expense.id);
        assert!(snapshot.expense(&expense.id).is_none());
    }
}
