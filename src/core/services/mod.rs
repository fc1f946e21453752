pub mod expense_service;
pub mod profile_service;

pub use expense_service::ExpenseService;
pub use profile_service::ProfileService;

use crate::domain::Identifiable;
use crate::errors::SyncError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("{0}")]
    Invalid(String),
}

/// Finds an entity by id within a slice.
pub(crate) fn find_by_id<'a, T: Identifiable>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}
