//! Per-endpoint request payload definitions. Each type mirrors one
//! endpoint's accepted body or query string; `validate` returns every
//! violation so the client sees the full list, not just the first.

pub mod auth;
pub mod company;
pub mod job;
pub mod user;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

pub use auth::UserAuth;
pub use company::{CompanyNew, CompanyUpdate};
pub use job::{JobNew, JobUpdate};
pub use user::{UserNew, UserRegister, UserUpdate};

pub trait Validate {
    /// Collect all violation messages; empty means valid.
    fn validate(&self) -> Vec<String>;
}

/// Deserialize and validate a request body, collapsing both failure
/// modes into a 400 carrying the message list.
pub fn parse_payload<T>(value: Value) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T =
        serde_json::from_value(value).map_err(|e| ApiError::validation(vec![e.to_string()]))?;

    let errors = parsed.validate();
    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(ApiError::validation(errors))
    }
}

pub(crate) fn check_length(
    errors: &mut Vec<String>,
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    if value.len() < min || value.len() > max {
        errors.push(format!(
            "{} must be between {} and {} characters",
            field, min, max
        ));
    }
}

pub(crate) fn check_url(errors: &mut Vec<String>, field: &str, value: &str) {
    if url::Url::parse(value).is_err() {
        errors.push(format!("{} must be a valid URL", field));
    }
}

pub(crate) fn check_email(errors: &mut Vec<String>, field: &str, value: &str) {
    let well_formed = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !well_formed {
        errors.push(format!("{} must be a valid email address", field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_check_accepts_plausible_addresses() {
        let mut errors = vec![];
        check_email(&mut errors, "email", "user@example.com");
        assert!(errors.is_empty());
    }

    #[test]
    fn email_check_rejects_malformed_addresses() {
        for bad in ["no-at-sign", "@example.com", "user@", "user@.com", "user@nodot"] {
            let mut errors = vec![];
            check_email(&mut errors, "email", bad);
            assert_eq!(errors.len(), 1, "expected rejection for {:?}", bad);
        }
    }
}
