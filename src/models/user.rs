use sqlx::{FromRow, PgPool};

use crate::auth::password;
use crate::database::models::{User, UserWithApplications};
use crate::filter::{self, SqlParam, UpdateBuilder};
use crate::schemas::{UserNew, UserRegister, UserUpdate};

use super::ModelError;

const USER_COLUMNS: &str = "username, first_name, last_name, email, is_admin";

/// Internal row including the password hash; never serialized out.
#[derive(Debug, FromRow)]
struct CredentialRow {
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    email: String,
    is_admin: bool,
}

impl From<CredentialRow> for User {
    fn from(row: CredentialRow) -> Self {
        User {
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            is_admin: row.is_admin,
        }
    }
}

pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Self-registration; the admin flag is always false here.
    pub async fn register(&self, data: &UserRegister) -> Result<User, ModelError> {
        self.insert(
            &data.username,
            &data.password,
            &data.first_name,
            &data.last_name,
            &data.email,
            false,
        )
        .await
    }

    /// Admin-created account; may carry the admin flag.
    pub async fn create(&self, data: &UserNew) -> Result<User, ModelError> {
        self.insert(
            &data.username,
            &data.password,
            &data.first_name,
            &data.last_name,
            &data.email,
            data.is_admin.unwrap_or(false),
        )
        .await
    }

    async fn insert(
        &self,
        username: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        is_admin: bool,
    ) -> Result<User, ModelError> {
        let existing =
            sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(ModelError::Duplicate(format!(
                "Duplicate username: {}",
                username
            )));
        }

        let hashed = password::hash(password.to_string()).await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(username)
        .bind(&hashed)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check credentials. Unknown usernames and wrong passwords fail the
    /// same way so callers cannot probe for accounts.
    pub async fn authenticate(&self, username: &str, pw: &str) -> Result<User, ModelError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT username, password, first_name, last_name, email, is_admin \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ModelError::InvalidCredentials)?;

        match password::verify(pw.to_string(), row.password.clone()).await {
            Ok(()) => Ok(row.into()),
            Err(password::PasswordError::InvalidPassword) => Err(ModelError::InvalidCredentials),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<User>, ModelError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY username",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// A single user with the ids of jobs they have applied to.
    pub async fn get(&self, username: &str) -> Result<UserWithApplications, ModelError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("No user: {}", username)))?;

        let applications = sqlx::query_scalar::<_, i32>(
            "SELECT job_id FROM applications WHERE username = $1 ORDER BY job_id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(UserWithApplications { user, applications })
    }

    /// Partial update; a supplied password is re-hashed before storage.
    pub async fn update(&self, username: &str, data: &UserUpdate) -> Result<User, ModelError> {
        let hashed = match &data.password {
            Some(pw) => Some(password::hash(pw.clone()).await?),
            None => None,
        };

        let mut builder = UpdateBuilder::new(1);
        builder
            .set("password", hashed.as_deref().map(SqlParam::text))
            .set("first_name", data.first_name.as_deref().map(SqlParam::text))
            .set("last_name", data.last_name.as_deref().map(SqlParam::text))
            .set("email", data.email.as_deref().map(SqlParam::text));

        let username_index = builder.next_param_index();
        let frag = builder.build()?;

        let sql = format!(
            "UPDATE users SET {} WHERE username = ${} RETURNING {}",
            frag.clause, username_index, USER_COLUMNS
        );

        let query = sqlx::query_as::<_, User>(&sql);
        filter::bind_params(query, &frag.params)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ModelError::NotFound(format!("No user: {}", username)))
    }

    pub async fn remove(&self, username: &str) -> Result<(), ModelError> {
        let deleted = sqlx::query_scalar::<_, String>(
            "DELETE FROM users WHERE username = $1 RETURNING username",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(ModelError::NotFound(format!("No user: {}", username))),
        }
    }

    /// Record an application linking a user to a job.
    pub async fn apply_to_job(&self, username: &str, job_id: i32) -> Result<(), ModelError> {
        let job = sqlx::query_scalar::<_, i32>("SELECT id FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        if job.is_none() {
            return Err(ModelError::NotFound(format!("No job: {}", job_id)));
        }

        let user = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        if user.is_none() {
            return Err(ModelError::NotFound(format!("No user: {}", username)));
        }

        let existing = sqlx::query_scalar::<_, i32>(
            "SELECT job_id FROM applications WHERE username = $1 AND job_id = $2",
        )
        .bind(username)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(ModelError::Duplicate(format!(
                "Already applied to job: {}",
                job_id
            )));
        }

        sqlx::query("INSERT INTO applications (username, job_id) VALUES ($1, $2)")
            .bind(username)
            .bind(job_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
