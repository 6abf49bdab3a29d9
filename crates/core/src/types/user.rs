//! Account and authentication types.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::id::UserId;

/// The authenticated account as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// The current authenticated identity plus its bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// `GET /auth` token-validation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCheck {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Login form data. The password never appears in logs or `Debug` output.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
}

/// Registration form data.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
}

/// `PUT /auth/update` profile changes; password is optional.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose_optional_password"
    )]
    pub password: Option<SecretString>,
}

fn expose_password<S>(password: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use secrecy::ExposeSecret;
    serializer.serialize_str(password.expose_secret())
}

#[allow(clippy::ref_option)]
fn expose_optional_password<S>(
    password: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use secrecy::ExposeSecret;
    match password {
        Some(secret) => serializer.serialize_some(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials {
            email: "ada@example.com".to_string(),
            password: SecretString::from("hunter2hunter2"),
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_credentials_serialize_exposes_password_for_the_wire() {
        let creds = Credentials {
            email: "ada@example.com".to_string(),
            password: SecretString::from("hunter2hunter2"),
        };
        let value = serde_json::to_value(&creds).unwrap();
        assert_eq!(value["password"], "hunter2hunter2");
    }

    #[test]
    fn test_token_check_tolerates_missing_user() {
        let check: TokenCheck = serde_json::from_str(r#"{"isValid": false}"#).unwrap();
        assert!(!check.is_valid);
        assert!(check.user.is_none());
    }
}
