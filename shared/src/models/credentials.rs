//! Login Credentials Model

use serde::{Deserialize, Serialize};

/// The two fixed login roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Kitchen,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Kitchen => "kitchen",
        }
    }
}

/// Credential pair per role (singleton record)
///
/// Compared by plain equality at login. The `Default` impl is the fixed
/// fallback used whenever the record is absent from the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    pub admin_username: String,
    pub admin_password: String,
    pub kitchen_username: String,
    pub kitchen_password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            kitchen_username: "kitchen".to_string(),
            kitchen_password: "kitchen123".to_string(),
        }
    }
}

impl Credentials {
    /// Check a username/password pair against the stored entry for `role`
    pub fn matches(&self, role: Role, username: &str, password: &str) -> bool {
        match role {
            Role::Admin => self.admin_username == username && self.admin_password == password,
            Role::Kitchen => self.kitchen_username == username && self.kitchen_password == password,
        }
    }

    /// Apply an update: usernames are always overwritten, passwords only
    /// when a non-empty new value is supplied (blank means "keep current").
    pub fn apply(&self, update: CredentialsUpdate) -> Credentials {
        fn keep_or_replace(current: &str, new: Option<String>) -> String {
            match new {
                Some(p) if !p.is_empty() => p,
                _ => current.to_string(),
            }
        }

        Credentials {
            admin_username: update.admin_username,
            admin_password: keep_or_replace(&self.admin_password, update.admin_password),
            kitchen_username: update.kitchen_username,
            kitchen_password: keep_or_replace(&self.kitchen_password, update.kitchen_password),
        }
    }
}

/// Credential update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsUpdate {
    pub admin_username: String,
    #[serde(default)]
    pub admin_password: Option<String>,
    pub kitchen_username: String,
    #[serde(default)]
    pub kitchen_password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_checks_the_selected_role_only() {
        let creds = Credentials::default();
        assert!(creds.matches(Role::Admin, "admin", "admin123"));
        assert!(creds.matches(Role::Kitchen, "kitchen", "kitchen123"));
        // Valid admin pair does not open the kitchen role
        assert!(!creds.matches(Role::Kitchen, "admin", "admin123"));
        assert!(!creds.matches(Role::Admin, "admin", "wrong"));
    }

    #[test]
    fn test_apply_blank_password_keeps_current() {
        let creds = Credentials::default();
        let updated = creds.apply(CredentialsUpdate {
            admin_username: "chef".to_string(),
            admin_password: Some("s3cret".to_string()),
            kitchen_username: "kitchen".to_string(),
            kitchen_password: None,
        });
        assert_eq!(updated.admin_username, "chef");
        assert_eq!(updated.admin_password, "s3cret");
        assert_eq!(updated.kitchen_username, "kitchen");
        assert_eq!(updated.kitchen_password, "kitchen123");

        // Explicit empty string also keeps the current password
        let updated = updated.apply(CredentialsUpdate {
            admin_username: "chef".to_string(),
            admin_password: Some(String::new()),
            kitchen_username: "kitchen".to_string(),
            kitchen_password: Some(String::new()),
        });
        assert_eq!(updated.admin_password, "s3cret");
        assert_eq!(updated.kitchen_password, "kitchen123");
    }
}
