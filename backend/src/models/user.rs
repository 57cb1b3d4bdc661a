//! Models that represent users and their role metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;

use crate::types::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Database representation of a user account.
///
/// The access log only cares about the identity; the remaining fields are
/// carried for the admin user endpoints.
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,
    /// Login email address.
    pub email: String,
    /// Display name.
    pub nickname: String,
    /// Role describing the user's privileges.
    pub role: UserRole,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Default)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
/// Supported user roles stored in the database.
pub enum UserRole {
    /// Regular account.
    #[default]
    User,
    /// Account allowed to reach the `/admin` routes.
    Admin,
}

impl UserRole {
    /// Returns the canonical snake_case representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    /// Parses a role name, tolerating upper/mixed case input.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UserRole::parse(&s)
            .ok_or_else(|| serde::de::Error::unknown_variant(&s, &["user", "admin"]))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Public-facing representation of a user returned by the admin API.
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub nickname: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            role: user.role.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_user(role: UserRole) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(7),
            email: "admin@example.com".into(),
            nickname: "admin".into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn user_role_serde_accepts_and_emits_snake_case() {
        let u: UserRole = serde_json::from_str("\"user\"").unwrap();
        let a: UserRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(u, UserRole::User);
        assert_eq!(a, UserRole::Admin);

        let sa = serde_json::to_value(UserRole::Admin).unwrap();
        assert_eq!(sa, Value::String("admin".into()));
    }

    #[test]
    fn user_role_rejects_unknown_names() {
        assert!(UserRole::parse("owner").is_none());
        assert!(serde_json::from_str::<UserRole>("\"owner\"").is_err());
    }

    #[test]
    fn user_response_role_is_snake_case_string() {
        let resp: UserResponse = sample_user(UserRole::Admin).into();
        assert_eq!(resp.role, "admin");
        assert_eq!(resp.id, UserId::new(7));
    }
}
