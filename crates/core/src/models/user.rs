use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user, as stored in the `users` table.
///
/// Email is the natural key; uniqueness is enforced by the store.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned opaque identifier
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,

    pub email: String,

    /// Credential material exactly as supplied at registration.
    /// Not hashed and never verified by this crate.
    #[serde(default)]
    pub password_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// Keep credentials out of logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "<redacted>"),
            )
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Insert payload for the `users` table. The store assigns `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password_hash: Option<String>,
}
