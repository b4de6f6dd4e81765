//! Logged-in user record.

use serde::{Deserialize, Serialize};

/// Local stand-in for a signed-in user, persisted as
/// `{ "name": "...", "email": "...", "isLoggedIn": true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStub {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub is_logged_in: bool,
}

impl UserStub {
    pub fn new(name: Option<String>, email: impl Into<String>) -> Self {
        Self {
            name,
            email: email.into(),
            is_logged_in: true,
        }
    }

    /// Name for greetings, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_without_name_omits_field() {
        let user = UserStub::new(None, "sam@example.com");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email": "sam@example.com", "isLoggedIn": true})
        );
        assert_eq!(user.display_name(), "sam@example.com");
    }

    #[test]
    fn test_parse_signup_record() {
        let user: UserStub =
            serde_json::from_str(r#"{"name":"Sam","email":"sam@example.com","isLoggedIn":true}"#)
                .unwrap();
        assert_eq!(user.display_name(), "Sam");
    }
}
