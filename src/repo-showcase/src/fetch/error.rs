//! Fetch error types.

use thiserror::Error;

/// HTTP status GitHub uses for an exhausted rate limit on unauthenticated calls.
const RATE_LIMIT_STATUS: u16 = 403;

/// Reasons the repository list could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API refused the request because the rate limit is exhausted.
    #[error("GitHub API rate limit exceeded{}", reset_suffix(.reset_at))]
    RateLimited { reset_at: Option<u64> },

    /// The API answered with a non-success status.
    #[error("GitHub API returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a usable response.
    #[error("Request failed: {message}")]
    Request { message: String },
}

impl FetchError {
    /// Classifies a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == RATE_LIMIT_STATUS {
            Self::RateLimited { reset_at: None }
        } else {
            Self::Status {
                status,
                message: message.into(),
            }
        }
    }

    /// Returns true for [`FetchError::RateLimited`].
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Translation key of the message shown to the user.
    #[must_use]
    pub fn message_key(&self) -> &'static str {
        if self.is_rate_limited() {
            "projects-error-limit"
        } else {
            "projects-error-fetch"
        }
    }
}

fn reset_suffix(reset_at: &Option<u64>) -> String {
    reset_at.map_or_else(String::new, |at| format!(", reset at {at}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_is_rate_limited() {
        let error = FetchError::from_status(403, "API rate limit exceeded");

        assert!(error.is_rate_limited());
        assert_eq!(error.message_key(), "projects-error-limit");
    }

    #[test]
    fn other_statuses_are_generic_failures() {
        for status in [404, 500, 502] {
            let error = FetchError::from_status(status, "nope");
            assert!(!error.is_rate_limited());
            assert_eq!(error.message_key(), "projects-error-fetch");
        }

        let error = FetchError::Request {
            message: "connection reset".to_string(),
        };
        assert_eq!(error.message_key(), "projects-error-fetch");
    }

    #[test]
    fn displays_reset_time_when_known() {
        let error = FetchError::RateLimited {
            reset_at: Some(1700000000),
        };
        assert_eq!(
            error.to_string(),
            "GitHub API rate limit exceeded, reset at 1700000000"
        );

        let error = FetchError::RateLimited { reset_at: None };
        assert_eq!(error.to_string(), "GitHub API rate limit exceeded");
    }
}
