use thiserror::Error;

/// Failure of a single gateway call.
///
/// Services never hand this to their callers: it is translated into a
/// localized message by [`crate::services::error_messages`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("no authenticated user")]
    Unauthorized,

    #[error("request failed with status {status}")]
    Http {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("request was not acknowledged by the server")]
    Rejected,
}

impl ApiError {
    /// Shorthand for an HTTP error without an application code
    pub fn status(status: u16) -> Self {
        ApiError::Http {
            status,
            code: None,
            message: None,
        }
    }

    /// Shorthand for an HTTP error carrying an application error code
    pub fn with_code(status: u16, code: &str) -> Self {
        ApiError::Http {
            status,
            code: Some(code.to_string()),
            message: None,
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Application error code, synthesized for the client-side failures
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized => Some("UNAUTHORIZED"),
            ApiError::Network(_) => Some("NETWORK_ERROR"),
            ApiError::Http { code, .. } => code.as_deref(),
            ApiError::Decode(_) | ApiError::Rejected => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_for_client_side_failures() {
        assert_eq!(ApiError::Unauthorized.code(), Some("UNAUTHORIZED"));
        assert_eq!(ApiError::Network("reset".into()).code(), Some("NETWORK_ERROR"));
        assert_eq!(ApiError::Rejected.code(), None);
        assert_eq!(ApiError::with_code(409, "PARTICIPANT_ALREADY_EXISTS").code(), Some("PARTICIPANT_ALREADY_EXISTS"));
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ApiError::status(404).http_status(), Some(404));
        assert_eq!(ApiError::Unauthorized.http_status(), Some(401));
        assert_eq!(ApiError::Decode("eof".into()).http_status(), None);
    }

    #[test]
    fn test_decode_error_from_serde() {
        let err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Decode(_)));
    }
}
