use sqlx::PgPool;

use crate::database::models::Job;
use crate::filter::{self, JobFilter, SqlParam, UpdateBuilder};
use crate::schemas::{JobNew, JobUpdate};

use super::ModelError;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

pub struct JobStore {
    pool: PgPool,
}

impl JobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a job under an existing company.
    pub async fn create(&self, data: &JobNew) -> Result<Job, ModelError> {
        let company =
            sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
                .bind(&data.company_handle)
                .fetch_optional(&self.pool)
                .await?;
        if company.is_none() {
            return Err(ModelError::NotFound(format!(
                "No company: {}",
                data.company_handle
            )));
        }

        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            JOB_COLUMNS
        ))
        .bind(&data.title)
        .bind(data.salary)
        .bind(data.equity)
        .bind(&data.company_handle)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    /// All jobs matching the filter, ordered by title.
    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<Job>, ModelError> {
        let frag = filter.to_where_sql(1);
        let mut sql = format!("SELECT {} FROM jobs", JOB_COLUMNS);
        if !frag.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&frag.clause);
        }
        sql.push_str(" ORDER BY title");

        let query = sqlx::query_as::<_, Job>(&sql);
        let jobs = filter::bind_params(query, &frag.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn get(&self, id: i32) -> Result<Job, ModelError> {
        sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ModelError::NotFound(format!("No job: {}", id)))
    }

    /// Partial update; the id and owning company never change.
    pub async fn update(&self, id: i32, data: &JobUpdate) -> Result<Job, ModelError> {
        let mut builder = UpdateBuilder::new(1);
        builder
            .set("title", data.title.as_deref().map(SqlParam::text))
            .set("salary", data.salary.map(|s| SqlParam::Int(s as i64)))
            .set("equity", data.equity.map(SqlParam::Decimal));

        let id_index = builder.next_param_index();
        let frag = builder.build()?;

        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            frag.clause, id_index, JOB_COLUMNS
        );

        let query = sqlx::query_as::<_, Job>(&sql);
        filter::bind_params(query, &frag.params)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ModelError::NotFound(format!("No job: {}", id)))
    }

    pub async fn remove(&self, id: i32) -> Result<(), ModelError> {
        let deleted = sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(ModelError::NotFound(format!("No job: {}", id))),
        }
    }
}
