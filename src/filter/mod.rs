//! Dynamic SQL fragment construction for search filters and partial
//! updates. Every fragment uses numbered placeholders with a matching
//! parameter vector; identifiers are always quoted, values always bound.

pub mod company;
pub mod job;
pub mod update;

use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::FromRow;
use thiserror::Error;

pub use company::CompanyFilter;
pub use job::JobFilter;
pub use update::UpdateBuilder;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("No data to update")]
    EmptyUpdate,
}

/// A typed bind parameter for a generated SQL fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Bool(bool),
    Int(i64),
    Text(String),
    Decimal(Decimal),
    Null,
}

impl SqlParam {
    pub fn text(s: impl Into<String>) -> Self {
        SqlParam::Text(s.into())
    }
}

/// A SQL clause plus the parameters it binds, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<SqlParam>,
}

impl SqlFragment {
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }
}

/// Bind a fragment's parameters onto a typed query in order.
pub fn bind_params<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    params: &'q [SqlParam],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    for p in params {
        q = match p {
            SqlParam::Bool(b) => q.bind(*b),
            SqlParam::Int(i) => q.bind(*i),
            SqlParam::Text(s) => q.bind(s.as_str()),
            SqlParam::Decimal(d) => q.bind(*d),
            SqlParam::Null => q.bind(Option::<String>::None),
        };
    }
    q
}
