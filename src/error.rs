/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 14/10/26
 ******************************************************************************/
use reqwest::StatusCode;
use thiserror::Error;

/// Every way a call against the API can fail.
///
/// Nothing is retried and nothing is swallowed: each variant reaches the caller
/// exactly as it was produced.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Login was rejected, or the auth response had no `data.session.token`.
    #[error("authentication failed ({}): {body}", .status.map_or("no status".to_string(), |s| s.to_string()))]
    Authentication {
        status: Option<StatusCode>,
        body: String,
    },

    /// An authenticated call was attempted without a live session.
    #[error("not authenticated: call login first")]
    NotAuthenticated,

    /// Rejected before any network I/O.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("http error {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// DNS, TLS, connection and timeout failures.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("decode error ({reason}): {body}")]
    Decode { body: String, reason: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Authentication { status, .. } => *status,
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Raw response body carried by the error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            ClientError::Authentication { body, .. }
            | ClientError::Http { body, .. }
            | ClientError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    pub(crate) fn decode(body: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::Decode {
            body: body.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests_client_error {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_http_error_display() {
        let err = ClientError::Http {
            status: StatusCode::NOT_FOUND,
            body: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "http error 404 Not Found: missing");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.body(), Some("missing"));
    }

    #[test]
    fn test_authentication_error_without_status() {
        let err = ClientError::Authentication {
            status: None,
            body: "{}".to_string(),
        };
        assert_eq!(err.to_string(), "authentication failed (no status): {}");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_not_authenticated_has_no_body() {
        let err = ClientError::NotAuthenticated;
        assert!(err.body().is_none());
        assert!(err.status().is_none());
    }

    #[test]
    fn test_decode_helper() {
        let err = ClientError::decode("", "empty body");
        assert_eq!(err.to_string(), "decode error (empty body): ");
    }
}
