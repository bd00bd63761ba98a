use serde::{Deserialize, Serialize};

use super::lenient;

/// Role string the backend assigns to administrators.
pub const ADMIN_ROLE: &str = "admin";

fn default_role() -> String {
    "user".to_string()
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin-created account (admin console "add user" form)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminSignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// User information attached to a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    #[serde(alias = "_id", deserialize_with = "lenient::id_string")]
    pub id: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

impl UserInfo {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

/// Authentication response (login and token refresh)
///
/// Every field is optional: a refresh may return only a token, and a failed
/// login may return only `success: false` with a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_checks() {
        let admin: UserInfo =
            serde_json::from_str(r#"{"_id": 1, "email": "root@example.com", "role": "admin"}"#).unwrap();
        assert_eq!(admin.id, "1");
        assert!(admin.is_admin());
        assert!(admin.has_role("admin"));
        assert!(!admin.has_role("user"));

        let user: UserInfo = serde_json::from_str(r#"{"id": "u-9", "email": "a@example.com"}"#).unwrap();
        assert_eq!(user.role, "user");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_role_match_is_exact() {
        let user = UserInfo {
            id: "1".to_string(),
            email: "a@example.com".to_string(),
            role: "Admin".to_string(),
        };
        assert!(!user.is_admin());
    }

    #[test]
    fn test_auth_response_camel_case() {
        let json = r#"{"accessToken": "abc", "user": {"id": "1", "email": "a@example.com", "role": "user"}}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token.as_deref(), Some("abc"));
        assert!(response.success.is_none());

        let out = serde_json::to_value(&response).unwrap();
        assert!(out.get("accessToken").is_some());
        assert!(out.get("message").is_none());
    }

    #[test]
    fn test_admin_signup_skips_empty_fields() {
        let request = AdminSignupRequest {
            email: "new@example.com".to_string(),
            password: "secret".to_string(),
            full_name: Some("New Person".to_string()),
            role: None,
        };
        let out = serde_json::to_value(&request).unwrap();
        assert_eq!(out["fullName"], "New Person");
        assert!(out.get("role").is_none());
    }
}
