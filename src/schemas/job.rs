use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{check_length, Validate};
use crate::filter::JobFilter;

fn equity_in_range(equity: Option<Decimal>) -> bool {
    match equity {
        Some(e) => e >= Decimal::ZERO && e <= Decimal::ONE,
        None => true,
    }
}

/// Body for `POST /jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobNew {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl Validate for JobNew {
    fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        check_length(&mut errors, "title", &self.title, 1, 100);
        if matches!(self.salary, Some(s) if s < 0) {
            errors.push("salary must be greater than or equal to 0".to_string());
        }
        if !equity_in_range(self.equity) {
            errors.push("equity must be between 0 and 1".to_string());
        }
        if self.company_handle.is_empty() {
            errors.push("companyHandle is required".to_string());
        }
        errors
    }
}

/// Body for `PATCH /jobs/:id`. Neither the id nor the owning company is
/// updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<Decimal>,
}

impl Validate for JobUpdate {
    fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        if let Some(title) = &self.title {
            check_length(&mut errors, "title", title, 1, 100);
        }
        if matches!(self.salary, Some(s) if s < 0) {
            errors.push("salary must be greater than or equal to 0".to_string());
        }
        if !equity_in_range(self.equity) {
            errors.push("equity must be between 0 and 1".to_string());
        }
        errors
    }
}

/// Parse the `GET /jobs` query string.
pub fn search_from_query(query: &HashMap<String, String>) -> Result<JobFilter, Vec<String>> {
    let mut errors = vec![];
    let mut filter = JobFilter::default();

    for (key, value) in query {
        match key.as_str() {
            "title" => filter.title = Some(value.clone()),
            "minSalary" => match value.parse::<i32>() {
                Ok(n) => filter.min_salary = Some(n),
                Err(_) => errors.push("minSalary must be an integer".to_string()),
            },
            "hasEquity" => match value.parse::<bool>() {
                Ok(b) => filter.has_equity = Some(b),
                Err(_) => errors.push("hasEquity must be true or false".to_string()),
            },
            other => errors.push(format!("unexpected query parameter: {}", other)),
        }
    }

    if errors.is_empty() {
        Ok(filter)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::parse_payload;
    use serde_json::json;

    #[test]
    fn valid_job_parses() {
        let data: JobNew = parse_payload(json!({
            "title": "Engineer",
            "salary": 120000,
            "equity": 0.05,
            "companyHandle": "acme",
        }))
        .unwrap();
        assert_eq!(data.title, "Engineer");
        assert_eq!(data.equity, Some(Decimal::new(5, 2)));
    }

    #[test]
    fn equity_above_one_is_rejected() {
        let result: Result<JobNew, _> = parse_payload(json!({
            "title": "Engineer",
            "equity": 1.5,
            "companyHandle": "acme",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn update_rejects_company_handle_changes() {
        let result: Result<JobUpdate, _> = parse_payload(json!({
            "companyHandle": "other-co",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn search_parses_has_equity_flag() {
        let query = HashMap::from([
            ("hasEquity".to_string(), "true".to_string()),
            ("minSalary".to_string(), "50000".to_string()),
        ]);
        let filter = search_from_query(&query).unwrap();
        assert_eq!(filter.has_equity, Some(true));
        assert_eq!(filter.min_salary, Some(50000));
    }

    #[test]
    fn search_rejects_malformed_flag() {
        let query = HashMap::from([("hasEquity".to_string(), "maybe".to_string())]);
        assert!(search_from_query(&query).is_err());
    }
}
