use serde::{Deserialize, Serialize};

use super::{check_email, check_length, Validate};

fn check_user_fields(
    errors: &mut Vec<String>,
    username: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
) {
    check_length(errors, "username", username, 1, 25);
    check_length(errors, "password", password, 5, 20);
    check_length(errors, "firstName", first_name, 1, 30);
    check_length(errors, "lastName", last_name, 1, 30);
    check_email(errors, "email", email);
}

/// Body for `POST /auth/register` (self-registration; never admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserRegister {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Validate for UserRegister {
    fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        check_user_fields(
            &mut errors,
            &self.username,
            &self.password,
            &self.first_name,
            &self.last_name,
            &self.email,
        );
        errors
    }
}

/// Body for `POST /users` (admin-created accounts may set the admin
/// flag).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserNew {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl Validate for UserNew {
    fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        check_user_fields(
            &mut errors,
            &self.username,
            &self.password,
            &self.first_name,
            &self.last_name,
            &self.email,
        );
        errors
    }
}

/// Body for `PATCH /users/:username`. The username is not updatable and
/// neither is the admin flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Validate for UserUpdate {
    fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        if let Some(password) = &self.password {
            check_length(&mut errors, "password", password, 5, 20);
        }
        if let Some(first_name) = &self.first_name {
            check_length(&mut errors, "firstName", first_name, 1, 30);
        }
        if let Some(last_name) = &self.last_name {
            check_length(&mut errors, "lastName", last_name, 1, 30);
        }
        if let Some(email) = &self.email {
            check_email(&mut errors, "email", email);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::parse_payload;
    use serde_json::json;

    #[test]
    fn valid_registration_parses() {
        let data: UserRegister = parse_payload(json!({
            "username": "newuser",
            "password": "password",
            "firstName": "New",
            "lastName": "User",
            "email": "new@example.com",
        }))
        .unwrap();
        assert_eq!(data.username, "newuser");
    }

    #[test]
    fn registration_cannot_claim_admin() {
        let result: Result<UserRegister, _> = parse_payload(json!({
            "username": "sneaky",
            "password": "password",
            "firstName": "S",
            "lastName": "N",
            "email": "s@example.com",
            "isAdmin": true,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        let payload = UserRegister {
            username: "u1".to_string(),
            password: "abc".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@example.com".to_string(),
        };
        let errors = payload.validate();
        assert_eq!(errors, vec!["password must be between 5 and 20 characters"]);
    }

    #[test]
    fn update_rejects_username_changes() {
        let result: Result<UserUpdate, _> = parse_payload(json!({
            "username": "other",
        }));
        assert!(result.is_err());
    }
}
