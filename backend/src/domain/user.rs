//! User records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::resource::{RecordId, Resource, required_text};
use super::Error;

/// Message reported when a user has no usable name.
pub const USER_NAME_REQUIRED: &str = "Name is required";

/// A persisted user.
///
/// ## Invariants
/// - `name` is never blank.
/// - `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: RecordId,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
}

impl NewUser {
    /// Draft with a name and no e-mail address.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    /// Attach an e-mail address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Partial update for a user.
///
/// `None` leaves a column untouched. For `email`, `Some(None)` clears the
/// stored address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
}

impl UserChanges {
    /// True when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

impl Resource for User {
    type Draft = NewUser;
    type Changes = UserChanges;

    const LABEL: &'static str = "User";

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate_draft(draft: NewUser) -> Result<NewUser, Error> {
        let name =
            required_text(&draft.name).ok_or_else(|| Error::invalid_request(USER_NAME_REQUIRED))?;
        Ok(NewUser { name, ..draft })
    }

    fn validate_changes(changes: UserChanges) -> Result<UserChanges, Error> {
        let name = match changes.name {
            Some(name) => Some(
                required_text(&name)
                    .ok_or_else(|| Error::invalid_request("Name must not be empty"))?,
            ),
            None => None,
        };
        Ok(UserChanges { name, ..changes })
    }

    fn samples() -> Vec<NewUser> {
        vec![
            NewUser::named("John Doe").with_email("john@example.com"),
            NewUser::named("Jane Smith").with_email("jane@example.com"),
            NewUser::named("Bob Johnson").with_email("bob@example.com"),
        ]
    }
}
