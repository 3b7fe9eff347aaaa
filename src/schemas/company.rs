use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{check_length, check_url, Validate};
use crate::filter::CompanyFilter;

/// Body for `POST /companies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyNew {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_employees: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl Validate for CompanyNew {
    fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        check_length(&mut errors, "handle", &self.handle, 1, 25);
        if !self
            .handle
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            errors.push("handle must be a lowercase URL-safe slug".to_string());
        }
        check_length(&mut errors, "name", &self.name, 1, 100);
        if matches!(self.num_employees, Some(n) if n < 0) {
            errors.push("numEmployees must be greater than or equal to 0".to_string());
        }
        if let Some(url) = &self.logo_url {
            check_url(&mut errors, "logoUrl", url);
        }
        errors
    }
}

/// Body for `PATCH /companies/:handle`. The handle itself is not
/// updatable, so it is not a field here; supplying one fails
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_employees: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl Validate for CompanyUpdate {
    fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        if let Some(name) = &self.name {
            check_length(&mut errors, "name", name, 1, 100);
        }
        if matches!(self.num_employees, Some(n) if n < 0) {
            errors.push("numEmployees must be greater than or equal to 0".to_string());
        }
        if let Some(url) = &self.logo_url {
            check_url(&mut errors, "logoUrl", url);
        }
        errors
    }
}

/// Parse the `GET /companies` query string. Unknown parameters and
/// non-numeric bounds are reported by name; the min/max relationship is
/// the store's concern.
pub fn search_from_query(query: &HashMap<String, String>) -> Result<CompanyFilter, Vec<String>> {
    let mut errors = vec![];
    let mut filter = CompanyFilter::default();

    for (key, value) in query {
        match key.as_str() {
            "minEmployees" => match value.parse::<i32>() {
                Ok(n) => filter.min_employees = Some(n),
                Err(_) => errors.push("minEmployees must be an integer".to_string()),
            },
            "maxEmployees" => match value.parse::<i32>() {
                Ok(n) => filter.max_employees = Some(n),
                Err(_) => errors.push("maxEmployees must be an integer".to_string()),
            },
            "nameLike" => filter.name_like = Some(value.clone()),
            other => errors.push(format!("unexpected query parameter: {}", other)),
        }
    }

    if errors.is_empty() {
        Ok(filter)
    } else {
        Err(errors)
    }
}
