use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never completed: connection refused, DNS failure, timeout.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside the 2xx range.
    #[error("HTTP error {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        ApiError::HttpStatus {
            status: status.as_u16(),
            body: Self::truncate_body(body),
        }
    }

    /// Status code for `HttpStatus` errors, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_keeps_code_and_body() {
        let err = ApiError::from_status(reqwest::StatusCode::NOT_FOUND, "no such employee");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP error 404: no such employee");
    }

    #[test]
    fn test_from_status_truncates_long_bodies() {
        let body = "x".repeat(2000);
        match ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body) {
            ApiError::HttpStatus { status, body } => {
                assert_eq!(status, 500);
                assert!(body.starts_with(&"x".repeat(500)));
                assert!(body.ends_with("(truncated, 2000 total bytes)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let body = "é".repeat(400);
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.contains("truncated, 800 total bytes"));
    }

    #[test]
    fn test_invalid_response_has_no_status() {
        let err = ApiError::InvalidResponse("expected array".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }
}
