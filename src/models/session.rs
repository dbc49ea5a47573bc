// src/models/session.rs
use serde::{Deserialize, Serialize};

/// The signed-in identity shown in the header.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// What the identity provider says happened to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Raw user object from `GET /auth/v1/user`.
#[derive(Deserialize, Debug, Clone)]
pub struct ProviderUser {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UserMetadata {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<ProviderUser> for Session {
    fn from(user: ProviderUser) -> Self {
        let display_name = user
            .user_metadata
            .full_name
            .or(user.user_metadata.name)
            .or(user.email)
            .unwrap_or_default();
        Session {
            id: user.id,
            display_name,
            avatar_url: user.user_metadata.avatar_url,
        }
    }
}
