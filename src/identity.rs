// Signed-in user identity
//
// The account service owns the authoritative copy and publishes it through a
// watch channel. Everything else reads clones.

use serde::{Deserialize, Serialize};

/// Identity fields of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username: String,
    pub email: String,
}

impl UserIdentity {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Name shown next to the avatar ("User" when signed out or blank)
pub fn display_name(identity: Option<&UserIdentity>) -> &str {
    match identity {
        Some(id) if !id.username.is_empty() => id.username.as_str(),
        _ => "User",
    }
}

/// Avatar letter: first character of the username, uppercased, or 'U'
pub fn avatar_initial(identity: Option<&UserIdentity>) -> char {
    identity
        .and_then(|id| id.username.chars().next())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('U')
}
