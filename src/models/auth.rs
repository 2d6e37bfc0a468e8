//! Authentication-related models

use serde::{Deserialize, Serialize};

/// Login form submitted by the browser, forwarded verbatim to the backend
///
/// Missing fields are omitted from the JSON body and left for the backend to reject.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct LoginForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Backend login response
///
/// Only `papel` is consumed; every other field is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub papel: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_without_papel() {
        let resp: LoginResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert!(resp.papel.is_none());
    }

    #[test]
    fn test_login_form_forwarded_as_json() {
        let form = LoginForm {
            username: Some("maria".to_string()),
            password: Some("s3nha".to_string()),
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value, serde_json::json!({"username": "maria", "password": "s3nha"}));
        assert!(!format!("{:?}", form).contains("s3nha"));
    }

    #[test]
    fn test_login_form_omits_missing_fields() {
        let form: LoginForm = serde_json::from_str(r#"{"username":"maria"}"#).unwrap();
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value, serde_json::json!({"username": "maria"}));
    }
}
