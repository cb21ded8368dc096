use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::user::{NewUser, User};
use crate::storage::traits::HoldingsStore;

pub const USER_EXISTS_MESSAGE: &str = "User already exists";

/// Outcome of a registration attempt.
///
/// A duplicate email is not an error: the existing user is handed back with a
/// conflict message. Serializes to either the bare user or
/// `{"error": "User already exists", "user": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Registration {
    AlreadyExists { error: String, user: User },
    Created(User),
}

impl Registration {
    pub fn user(&self) -> &User {
        match self {
            Registration::Created(user) => user,
            Registration::AlreadyExists { user, .. } => user,
        }
    }

    pub fn into_user(self) -> User {
        match self {
            Registration::Created(user) => user,
            Registration::AlreadyExists { user, .. } => user,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Registration::Created(_))
    }
}

/// Registers users and looks them up by email.
///
/// **Login performs no credential check**: a known email is a successful login.
/// Only suitable behind a trusted front end.
pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        Self
    }

    /// Create a user unless the email is already registered.
    pub async fn register_user(
        &self,
        store: &dyn HoldingsStore,
        email: &str,
        password: &str,
    ) -> Result<Registration, CoreError> {
        if let Some(existing) = store.find_user_by_email(email).await? {
            tracing::info!(email, "Registration for existing user");
            return Ok(Registration::AlreadyExists {
                error: USER_EXISTS_MESSAGE.to_string(),
                user: existing,
            });
        }

        let user = store
            .insert_user(NewUser {
                email: email.to_string(),
                password_hash: Some(password.to_string()),
            })
            .await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(Registration::Created(user))
    }

    /// Look a user up by email. `None` means not found.
    pub async fn login_user(
        &self,
        store: &dyn HoldingsStore,
        email: &str,
    ) -> Result<Option<User>, CoreError> {
        store.find_user_by_email(email).await
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}
