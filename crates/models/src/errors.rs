use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {}", .0.message())]
    Validation(ValidationErrors),
    #[error("database error: {0}")]
    Db(String),
}

impl From<ValidationErrors> for ModelError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
