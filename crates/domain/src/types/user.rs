//! Back-office users: admins and sales representatives

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::impl_wire_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Rep,
}

impl_wire_enum!(UserRole {
    Admin => "admin",
    Rep => "rep",
});

/// Served by both `admin/users` (representatives) and `admin/admins`
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Only ever sent, never received; blank means "keep the current one"
    #[serde(default, skip_serializing_if = "is_blank")]
    pub password: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

impl User {
    pub fn role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(|raw| raw.parse().ok())
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("slug", &self.slug)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("role", &self.role)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}
