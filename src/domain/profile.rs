use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Identifiable, NamedEntity};

/// Reserved id prefix marking the auto-generated default profile.
pub const DEFAULT_PROFILE_PREFIX: &str = "default-profile";

/// Name given to the auto-generated default profile.
pub const DEFAULT_PROFILE_NAME: &str = "Personal";

/// A named bucket that expenses belong to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: String,
}

impl Profile {
    /// Creates a user profile with a fresh unique id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }

    /// The profile synthesized for brand-new data and legacy
    /// migrations.
    pub fn synthetic_default() -> Self {
        Self {
            id: format!("{}-1", DEFAULT_PROFILE_PREFIX),
            name: DEFAULT_PROFILE_NAME.into(),
        }
    }

    /// Whether this profile was auto-generated rather than created by
    /// the user.
    pub fn is_synthetic_default(&self) -> bool {
        self.id.starts_with(DEFAULT_PROFILE_PREFIX)
    }
}

impl Identifiable for Profile {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Profile {
    fn name(&self) -> &str {
        &self.name
    }
}
