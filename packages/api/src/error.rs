//! Errors raised by [`crate::ApiClient`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status (or `success: false`).
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Message to show the user: the backend's own text when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = ApiError::Status {
            status: 400,
            message: "Email already registered".into(),
        };
        assert_eq!(err.user_message("Failed"), "Email already registered");
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message("Login failed"), "Login failed");

        let blank = ApiError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(blank.user_message("Failed to delete user"), "Failed to delete user");
    }

    #[test]
    fn test_unauthorized() {
        let err = ApiError::Status {
            status: 401,
            message: "jwt expired".into(),
        };
        assert!(err.is_unauthorized());
        assert!(!ApiError::Decode("x".into()).is_unauthorized());
    }
}
