//! Authenticated user identity.

use crate::Role;
use acadia_common_core::UserId;
use serde::{Deserialize, Serialize};

/// An already-authenticated user.
///
/// Owned by the external identity store and immutable for the
/// duration of a request; the engine never creates or alters users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Institutional role.
    pub role: Role,
    /// Full display name.
    pub name: String,
    /// Home department.
    pub department: String,
    /// Contact detail (email or phone).
    pub contact: String,
}

impl User {
    /// Create a user with the given identity fields.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        role: Role,
        name: impl Into<String>,
        department: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            role,
            name: name.into(),
            department: department.into(),
            contact: contact.into(),
        }
    }
}
