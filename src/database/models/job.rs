use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// Ownership fraction in [0, 1]; NUMERIC in the store, so it
    /// serializes as a decimal string.
    pub equity: Option<Decimal>,
    pub company_handle: String,
}
