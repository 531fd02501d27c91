//! Authenticated session

use serde::{Deserialize, Serialize};

/// Bearer token plus the display name shown in the navigation menu
///
/// There is no expiry: a session is either present or absent.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_name: String,
}

impl Session {
    pub fn new(token: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self { token: token.into(), user_name: user_name.into() }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_name", &self.user_name)
            .finish()
    }
}
