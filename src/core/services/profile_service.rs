//! Business logic helpers for managing profiles.

use crate::core::services::{find_by_id, ServiceError, ServiceResult};
use crate::domain::{AppSnapshot, Profile};

/// Provides validated CRUD helpers for profiles.
pub struct ProfileService;

impl ProfileService {
    /// Adds a new named profile and returns it.
    pub fn add(snapshot: &mut AppSnapshot, name: &str) -> ServiceResult<Profile> {
        Self::validate_name(snapshot, None, name)?;
        let profile = Profile::new(name);
        snapshot.profiles.push(profile.clone());
        Ok(profile)
    }

    /// Renames the profile identified by `id`.
    pub fn rename(snapshot: &mut AppSnapshot, id: &str, new_name: &str) -> ServiceResult<()> {
        Self::validate_name(snapshot, Some(id), new_name)?;
        let profile = snapshot
            .profiles
            .iter_mut()
            .find(|profile| profile.id == id)
            .ok_or_else(|| ServiceError::Invalid("Profile not found".into()))?;
        profile.name = new_name.to_string();
        Ok(())
    }

    /// Removes a profile, reassigning its expenses to `fallback_id`.
    ///
    /// The last remaining profile can never be removed, so no expense
    /// is ever left pointing at a missing profile. All checks run
    /// before any mutation; a rejected removal leaves the snapshot
    /// untouched.
    pub fn remove(
        snapshot: &mut AppSnapshot,
        id: &str,
        fallback_id: &str,
    ) -> ServiceResult<Profile> {
        if snapshot.profiles.len() <= 1 {
            return Err(ServiceError::Invalid(
                "Cannot delete the last profile".into(),
            ));
        }
        if id == fallback_id {
            return Err(ServiceError::Invalid(
                "Fallback profile must differ from the deleted profile".into(),
            ));
        }
        if find_by_id(&snapshot.profiles, fallback_id).is_none() {
            return Err(ServiceError::Invalid(format!(
                "profile `{fallback_id}` does not exist"
            )));
        }
        let index = snapshot
            .profiles
            .iter()
            .position(|profile| profile.id == id)
            .ok_or_else(|| ServiceError::Invalid("Profile not found".into()))?;
        for expense in &mut snapshot.expenses {
            if expense.profile_id == id {
                expense.profile_id = fallback_id.to_string();
            }
        }
        Ok(snapshot.profiles.remove(index))
    }

    fn validate_name(
        snapshot: &AppSnapshot,
        exclude: Option<&str>,
        candidate: &str,
    ) -> ServiceResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = snapshot.profiles.iter().any(|profile| {
            let name = profile.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| profile.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Profile `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::core::services::ExpenseService;

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let mut snapshot = AppSnapshot::initial();
        ProfileService::add(&mut snapshot, "Household").expect("add profile");
        let err = ProfileService::add(&mut snapshot, "  household ")
            .expect_err("duplicate must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn rename_may_keep_its_own_name() {
        let mut snapshot = AppSnapshot::initial();
        let profile = ProfileService::add(&mut snapshot, "Trip").expect("add profile");
        ProfileService::rename(&mut snapshot, &profile.id, "Trip").expect("rename to same name");
        ProfileService::rename(&mut snapshot, &profile.id, "Trip 2024").expect("rename");
        assert_eq!(snapshot.profile(&profile.id).unwrap().name, "Trip 2024");
    }

    #[test]
    fn removing_the_last_profile_is_rejected_unchanged() {
        let mut snapshot = AppSnapshot::initial();
        let only = snapshot.profiles[0].id.clone();
        let before = snapshot.clone();
        let err = ProfileService::remove(&mut snapshot, &only, &only)
            .expect_err("last profile must survive");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert_eq!(snapshot, before);
    }

    #[test]
    fn remove_reassigns_expenses_to_the_fallback() {
        let mut snapshot = AppSnapshot::initial();
        let keep = snapshot.profiles[0].id.clone();
        let doomed = ProfileService::add(&mut snapshot, "Old").expect("add profile");
        ExpenseService::add(&mut snapshot, &doomed.id, "petrol", 900.0, Utc::now())
            .expect("add expense");
        ExpenseService::add(&mut snapshot, &keep, "chai", 20.0, Utc::now()).expect("add expense");

        let removed =
            ProfileService::remove(&mut snapshot, &doomed.id, &keep).expect("remove profile");
        assert_eq!(removed.id, doomed.id);
        assert!(snapshot.profile(&doomed.id).is_none());
        assert_eq!(snapshot.expenses.len(), 2);
        assert!(snapshot
            .expenses
            .iter()
            .all(|expense| expense.profile_id == keep));
    }

    #[test]
    fn remove_rejects_a_missing_fallback() {
        let mut snapshot = AppSnapshot::initial();
        let doomed = ProfileService::add(&mut snapshot, "Old").expect("add profile");
        let err = ProfileService::remove(&mut snapshot, &doomed.id, "nope")
            .expect_err("fallback must exist");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(snapshot.profile(&doomed.id).is_some());
    }
}
