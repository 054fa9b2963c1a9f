// errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request failed with status: {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("Unexpected payload shape: {0}")]
    ShapeError(String),
}

impl ApiError {
    /// Message shown in the error view when the catalog fetch fails.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NetworkError(_) => "Could not reach the podcast service.".to_string(),
            ApiError::BadStatus(status) => {
                format!("The podcast service answered with status {}.", status)
            }
            ApiError::ShapeError(detail) => {
                format!("The podcast service sent an unexpected response: {}.", detail)
            }
        }
    }
}
