//! # User records
//!
//! Three projections of a backend user:
//!
//! - [`AuthUser`]: the signed-in administrator, returned by `/auth/login` and
//!   `/auth/profile` and held by the session.
//! - [`AdminUser`]: a row of the `/admin/users` collection (clients), with the
//!   `blocked` flag the users page toggles.
//! - [`SearchCandidate`]: a row of `/admin/users/search`, offered by the client
//!   autocomplete. Never stored.

use serde::{Deserialize, Serialize};

use super::Entity;

/// The authenticated administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl AuthUser {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// A client account as listed on the users page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminUser {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub phone: Option<String>,
    pub role: Option<String>,
    pub blocked: bool,
    pub created_at: Option<String>,
}

impl AdminUser {
    /// Case-insensitive match on name or email, substring match on phone.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&q)
            || self.email.to_lowercase().contains(&q)
            || self.phone.as_deref().is_some_and(|p| p.contains(&q))
    }
}

impl Entity for AdminUser {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A client offered by the search box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "crate::de::opt_text")]
    pub phone: Option<String>,
}

impl Entity for SearchCandidate {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_user_defaults() {
        let user: AdminUser =
            serde_json::from_str(r#"{"id": 3, "name": "Ann", "email": "ann@x.io"}"#).unwrap();
        assert_eq!(user.id, "3");
        assert!(!user.blocked);
        assert!(user.phone.is_none());
    }

    #[test]
    fn test_matches() {
        let user = AdminUser {
            id: "1".into(),
            name: "Alice Johnson".into(),
            email: "alice@email.com".into(),
            phone: Some("555-0101".into()),
            ..Default::default()
        };
        assert!(user.matches("ALICE"));
        assert!(user.matches("email.com"));
        assert!(user.matches("0101"));
        assert!(user.matches("  "));
        assert!(!user.matches("bob"));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user: AuthUser =
            serde_json::from_str(r#"{"_id": "a1", "email": "root@x.io"}"#).unwrap();
        assert_eq!(user.display_name(), "root@x.io");
    }
}
