use thiserror::Error;

use models::validation::ValidationErrors;

pub const EMPLOYEE_NOT_FOUND: &str = "Employee not found";
pub const WORK_LOG_NOT_FOUND: &str = "Work log not found";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", .0.message())]
    Validation(ValidationErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(message: &str) -> Self { Self::NotFound(message.to_string()) }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(errors) => Self::Validation(errors),
            models::errors::ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}
