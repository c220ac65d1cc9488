//! Session-related types for admin authentication.
//!
//! The admin panel has no user store of its own: identity and the bearer
//! token both come from the inventory backend at login and live in the
//! server-side session until logout or expiry.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::api::{ApiToken, ApiUser};

/// Session-stored admin identity, as reported by the backend at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Email the admin authenticated with.
    pub email: String,
    /// Display name reported by the backend.
    pub name: String,
}

impl From<ApiUser> for CurrentAdmin {
    fn from(user: ApiUser) -> Self {
        Self {
            email: user.email,
            name: user.name,
        }
    }
}

/// Session-stored bearer token.
///
/// Serializable mirror of [`ApiToken`]; the session store is server-side
/// `PostgreSQL`, never a cookie value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    access_token: String,
    expires_at: i64,
}

impl SessionToken {
    /// Capture a freshly issued token for session storage.
    #[must_use]
    pub fn from_token(token: &ApiToken) -> Self {
        use secrecy::ExposeSecret;
        Self {
            access_token: token.access_token.expose_secret().to_string(),
            expires_at: token.expires_at,
        }
    }

    /// Rebuild the typed token for an API client.
    #[must_use]
    pub fn into_token(self) -> ApiToken {
        ApiToken {
            access_token: SecretString::from(self.access_token),
            expires_at: self.expires_at,
        }
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for storing the backend bearer token.
    pub const API_TOKEN: &str = "api_token";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_roundtrip() {
        let token = ApiToken {
            access_token: SecretString::from("tok-123"),
            expires_at: 1_900_000_000,
        };

        let stored = SessionToken::from_token(&token);
        let json = serde_json::to_string(&stored).expect("serialize");
        let back: SessionToken = serde_json::from_str(&json).expect("deserialize");
        let rebuilt = back.into_token();

        use secrecy::ExposeSecret;
        assert_eq!(rebuilt.access_token.expose_secret(), "tok-123");
        assert_eq!(rebuilt.expires_at, 1_900_000_000);
    }
}
