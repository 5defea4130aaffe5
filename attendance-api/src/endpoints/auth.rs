use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
    Driver,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Admin => f.write_str("admin"),
            Role::Driver => f.write_str("driver"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "admin" => Ok(Role::Admin),
            "driver" => Ok(Role::Driver),
            other => Err(format!("unknown role '{}': expected student, admin or driver", other)),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub id: &'a str,
    pub password: &'a str,
    pub role: Role,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    /// Everything else the backend sent back (user info, messages)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("extra", &self.extra)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginErrorBody {
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success(LoginResponse),
    Failed { status: StatusCode, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Driver.to_string(), "driver");
        assert_eq!(serde_json::to_value(Role::Student).unwrap(), json!("student"));
        assert!("conductor".parse::<Role>().is_err());
    }

    #[test]
    fn test_login_request_shape() {
        let body = LoginRequest {
            id: "s001",
            password: "pw",
            role: Role::Student,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "id": "s001", "password": "pw", "role": "student" })
        );
    }

    #[test]
    fn test_login_response_keeps_extra_fields() {
        let response: LoginResponse = serde_json::from_value(json!({
            "token": "xyz",
            "user": { "username": "s001", "role": "student" }
        }))
        .unwrap();

        assert_eq!(response.token.as_deref(), Some("xyz"));
        assert_eq!(response.extra["user"]["role"], "student");
        assert!(!format!("{:?}", response).contains("xyz"));
    }
}
