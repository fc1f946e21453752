pub mod category;
pub mod expense;
pub mod profile;
pub mod snapshot;

pub use category::Category;
pub use expense::Expense;
pub use profile::Profile;
pub use snapshot::AppSnapshot;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}
