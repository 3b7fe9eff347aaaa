//! HTTP client for the Jobly API. One central `request` method attaches
//! the bearer token and normalizes every failure into a list of
//! messages; per-endpoint methods return only the relevant payload
//! subfield.

use reqwest::Method;
use serde_json::Value;

use crate::auth;
use crate::database::models::{Company, CompanyWithJobs, Job, User, UserWithApplications};
use crate::filter::{CompanyFilter, JobFilter};
use crate::schemas::{CompanyNew, CompanyUpdate, JobNew, JobUpdate, UserRegister, UserUpdate};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Authentication state for one client instance. Constructed per app
/// session and owned by the client; there is no process-wide token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear(&mut self) {
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Username claim from the stored token, if any.
    pub fn username(&self) -> Option<String> {
        self.token
            .as_deref()
            .and_then(|t| auth::decode_unverified(t).ok())
            .map(|claims| claims.username)
    }
}

/// Failure normalized into an array of messages, regardless of what the
/// server returned.
#[derive(Debug)]
pub struct ClientError {
    pub messages: Vec<String>,
    pub status: Option<u16>,
}

impl ClientError {
    fn transport(err: reqwest::Error) -> Self {
        Self {
            messages: vec![err.to_string()],
            status: None,
        }
    }

    fn unexpected(context: &str) -> Self {
        Self {
            messages: vec![format!("Unexpected response shape: {}", context)],
            status: None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for ClientError {}

/// Convert an error response body into the message list: the server's
/// `error.message` array, a one-element vector when it is a string, and
/// a status fallback when the body is unparseable.
pub fn normalize_error_body(status: u16, body: &Value) -> Vec<String> {
    match body.pointer("/error/message") {
        Some(Value::Array(messages)) => messages
            .iter()
            .map(|m| match m {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(message)) => vec![message.clone()],
        _ => vec![format!("Request failed with status {}", status)],
    }
}

pub struct JoblyClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl JoblyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_session(base_url, Session::new())
    }

    pub fn with_session(base_url: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Base URL from JOBLY_BASE_URL, falling back to localhost.
    pub fn from_env(session: Session) -> Self {
        let base_url =
            std::env::var("JOBLY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_session(base_url, session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Central request method: URL assembly, bearer-token attachment,
    /// and error normalization.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<Value, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut req = self.http.request(method, &url);

        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(ClientError::transport)?;
        let status = response.status();
        let text = response.text().await.map_err(ClientError::transport)?;
        let payload: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        if status.is_success() {
            Ok(payload)
        } else {
            Err(ClientError {
                messages: normalize_error_body(status.as_u16(), &payload),
                status: Some(status.as_u16()),
            })
        }
    }

    fn extract<T: serde::de::DeserializeOwned>(
        payload: Value,
        field: &str,
    ) -> Result<T, ClientError> {
        let inner = payload
            .get(field)
            .cloned()
            .ok_or_else(|| ClientError::unexpected(field))?;
        serde_json::from_value(inner).map_err(|_| ClientError::unexpected(field))
    }

    // ============================
    // Individual API routes
    // ============================

    /// Log in; the token is stored on this client's session.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String, ClientError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let payload = self
            .request(Method::POST, "auth/token", Some(&body), &[])
            .await?;
        let token: String = Self::extract(payload, "token")?;
        self.session.set_token(token.clone());
        Ok(token)
    }

    /// Register a new user; the token is stored on this client's
    /// session.
    pub async fn register(&mut self, data: &UserRegister) -> Result<String, ClientError> {
        let body = serde_json::to_value(data).map_err(|_| ClientError::unexpected("register"))?;
        let payload = self
            .request(Method::POST, "auth/register", Some(&body), &[])
            .await?;
        let token: String = Self::extract(payload, "token")?;
        self.session.set_token(token.clone());
        Ok(token)
    }

    /// Get details on a company by handle, with its jobs nested.
    pub async fn get_company(&self, handle: &str) -> Result<CompanyWithJobs, ClientError> {
        let payload = self
            .request(Method::GET, &format!("companies/{}", handle), None, &[])
            .await?;
        Self::extract(payload, "company")
    }

    /// List companies, with optional search filters.
    pub async fn get_companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>, ClientError> {
        let mut query = vec![];
        if let Some(min) = filter.min_employees {
            query.push(("minEmployees", min.to_string()));
        }
        if let Some(max) = filter.max_employees {
            query.push(("maxEmployees", max.to_string()));
        }
        if let Some(name) = &filter.name_like {
            query.push(("nameLike", name.clone()));
        }

        let payload = self.request(Method::GET, "companies", None, &query).await?;
        Self::extract(payload, "companies")
    }

    pub async fn create_company(&self, data: &CompanyNew) -> Result<Company, ClientError> {
        let body = serde_json::to_value(data).map_err(|_| ClientError::unexpected("company"))?;
        let payload = self
            .request(Method::POST, "companies", Some(&body), &[])
            .await?;
        Self::extract(payload, "company")
    }

    pub async fn update_company(
        &self,
        handle: &str,
        data: &CompanyUpdate,
    ) -> Result<Company, ClientError> {
        let body = serde_json::to_value(data).map_err(|_| ClientError::unexpected("company"))?;
        let payload = self
            .request(
                Method::PATCH,
                &format!("companies/{}", handle),
                Some(&body),
                &[],
            )
            .await?;
        Self::extract(payload, "company")
    }

    pub async fn delete_company(&self, handle: &str) -> Result<String, ClientError> {
        let payload = self
            .request(Method::DELETE, &format!("companies/{}", handle), None, &[])
            .await?;
        Self::extract(payload, "deleted")
    }

    /// List jobs, with optional search filters.
    pub async fn get_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, ClientError> {
        let mut query = vec![];
        if let Some(title) = &filter.title {
            query.push(("title", title.clone()));
        }
        if let Some(min) = filter.min_salary {
            query.push(("minSalary", min.to_string()));
        }
        if let Some(has_equity) = filter.has_equity {
            query.push(("hasEquity", has_equity.to_string()));
        }

        let payload = self.request(Method::GET, "jobs", None, &query).await?;
        Self::extract(payload, "jobs")
    }

    pub async fn get_job(&self, id: i32) -> Result<Job, ClientError> {
        let payload = self
            .request(Method::GET, &format!("jobs/{}", id), None, &[])
            .await?;
        Self::extract(payload, "job")
    }

    pub async fn create_job(&self, data: &JobNew) -> Result<Job, ClientError> {
        let body = serde_json::to_value(data).map_err(|_| ClientError::unexpected("job"))?;
        let payload = self.request(Method::POST, "jobs", Some(&body), &[]).await?;
        Self::extract(payload, "job")
    }

    pub async fn update_job(&self, id: i32, data: &JobUpdate) -> Result<Job, ClientError> {
        let body = serde_json::to_value(data).map_err(|_| ClientError::unexpected("job"))?;
        let payload = self
            .request(Method::PATCH, &format!("jobs/{}", id), Some(&body), &[])
            .await?;
        Self::extract(payload, "job")
    }

    /// Get details on a user by username.
    pub async fn get_user(&self, username: &str) -> Result<UserWithApplications, ClientError> {
        let payload = self
            .request(Method::GET, &format!("users/{}", username), None, &[])
            .await?;
        Self::extract(payload, "user")
    }

    /// Save profile updates for a user.
    pub async fn save_profile(
        &self,
        username: &str,
        data: &UserUpdate,
    ) -> Result<User, ClientError> {
        let body = serde_json::to_value(data).map_err(|_| ClientError::unexpected("user"))?;
        let payload = self
            .request(
                Method::PATCH,
                &format!("users/{}", username),
                Some(&body),
                &[],
            )
            .await?;
        Self::extract(payload, "user")
    }

    /// Apply a user to a job.
    pub async fn apply_to_job(&self, username: &str, job_id: i32) -> Result<i32, ClientError> {
        let payload = self
            .request(
                Method::POST,
                &format!("users/{}/jobs/{}", username, job_id),
                None,
                &[],
            )
            .await?;
        Self::extract(payload, "applied")
    }
}
