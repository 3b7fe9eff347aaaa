use sqlx::PgPool;

use crate::database::models::{Company, CompanyJob, CompanyWithJobs};
use crate::filter::{self, CompanyFilter, SqlParam, UpdateBuilder};
use crate::schemas::{CompanyNew, CompanyUpdate};

use super::ModelError;

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

pub struct CompanyStore {
    pool: PgPool,
}

impl CompanyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a company. Fails with Duplicate if the handle is taken;
    /// the duplicate check runs first so no write is attempted.
    pub async fn create(&self, data: &CompanyNew) -> Result<Company, ModelError> {
        let existing =
            sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
                .bind(&data.handle)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(ModelError::Duplicate(format!(
                "Duplicate company: {}",
                data.handle
            )));
        }

        let company = sqlx::query_as::<_, Company>(&format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            COMPANY_COLUMNS
        ))
        .bind(&data.handle)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.num_employees)
        .bind(data.logo_url.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    /// All companies matching the filter, ordered by name. Each present
    /// filter ANDs one predicate; an inverted employee range is a caller
    /// error.
    pub async fn find_all(&self, filter: &CompanyFilter) -> Result<Vec<Company>, ModelError> {
        if filter.has_inverted_range() {
            return Err(ModelError::BadRequest(
                "minEmployees cannot be greater than maxEmployees".to_string(),
            ));
        }

        let frag = filter.to_where_sql(1);
        let mut sql = format!("SELECT {} FROM companies", COMPANY_COLUMNS);
        if !frag.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&frag.clause);
        }
        sql.push_str(" ORDER BY name");

        let query = sqlx::query_as::<_, Company>(&sql);
        let companies = filter::bind_params(query, &frag.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    /// A single company with its jobs nested, ordered by job id.
    pub async fn get(&self, handle: &str) -> Result<CompanyWithJobs, ModelError> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies WHERE handle = $1",
            COMPANY_COLUMNS
        ))
        .bind(handle)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, CompanyJob>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(&self.pool)
        .await?;

        Ok(CompanyWithJobs { company, jobs })
    }

    /// Partial update: only supplied fields change.
    pub async fn update(&self, handle: &str, data: &CompanyUpdate) -> Result<Company, ModelError> {
        let mut builder = UpdateBuilder::new(1);
        builder
            .set("name", data.name.as_deref().map(SqlParam::text))
            .set("description", data.description.as_deref().map(SqlParam::text))
            .set(
                "num_employees",
                data.num_employees.map(|n| SqlParam::Int(n as i64)),
            )
            .set("logo_url", data.logo_url.as_deref().map(SqlParam::text));

        let handle_index = builder.next_param_index();
        let frag = builder.build()?;

        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            frag.clause, handle_index, COMPANY_COLUMNS
        );

        let query = sqlx::query_as::<_, Company>(&sql);
        filter::bind_params(query, &frag.params)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ModelError::NotFound(format!("No company: {}", handle)))
    }

    /// Delete by handle; dependent jobs go with it via the FK cascade.
    pub async fn remove(&self, handle: &str) -> Result<(), ModelError> {
        let deleted =
            sqlx::query_scalar::<_, String>("DELETE FROM companies WHERE handle = $1 RETURNING handle")
                .bind(handle)
                .fetch_optional(&self.pool)
                .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(ModelError::NotFound(format!("No company: {}", handle))),
        }
    }
}
