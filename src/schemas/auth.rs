use serde::{Deserialize, Serialize};

use super::Validate;

/// Body for `POST /auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAuth {
    pub username: String,
    pub password: String,
}

impl Validate for UserAuth {
    fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        if self.username.is_empty() {
            errors.push("username is required".to_string());
        }
        if self.password.is_empty() {
            errors.push("password is required".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_credentials_report_both_fields() {
        let payload = UserAuth {
            username: String::new(),
            password: String::new(),
        };
        assert_eq!(payload.validate().len(), 2);
    }
}
