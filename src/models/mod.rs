//! Model layer: all SQL lives here. Stores translate rows into domain
//! objects and surface typed errors; handlers never touch the database
//! directly.

pub mod company;
pub mod job;
pub mod user;

use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::database::manager::DatabaseError;
use crate::filter::FilterError;

pub use company::CompanyStore;
pub use job::JobStore;
pub use user::UserStore;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid username/password")]
    InvalidCredentials,

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<FilterError> for ModelError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::EmptyUpdate => ModelError::BadRequest("No data to update".to_string()),
        }
    }
}
