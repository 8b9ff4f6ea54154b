use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Errors that mean the session is gone and the user must log in again.
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_backend_message() {
        let error = AppError::Server {
            status: 404,
            message: "Patient not found".to_string(),
        };
        assert_eq!(error.to_string(), "Patient not found");
        assert!(!error.is_auth());
    }

    #[test]
    fn auth_errors_are_flagged() {
        assert!(AppError::Auth("Invalid credentials".to_string()).is_auth());
        assert!(!AppError::Network("connection refused".to_string()).is_auth());
    }
}
