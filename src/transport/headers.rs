/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 14/10/26
 ******************************************************************************/

use crate::constants::{ACCEPT_JSON, CONTENT_TYPE_JSON, TOKEN_SCHEME};
use crate::error::ClientError;
use crate::session::session::Session;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::fmt;
use std::fmt::Display;
use tracing::debug;

/// Headers shared by every request.
///
/// The template itself never changes after construction. The header map for a
/// call is recomputed from it and whichever session is current at that moment,
/// so a concurrent login can never leave a request with half of a token.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    base: HeaderMap,
}

impl RequestTemplate {
    pub fn new() -> Self {
        let mut base = HeaderMap::new();
        base.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        base.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        Self { base }
    }

    /// Headers for one request.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if the token holds bytes that cannot appear in a header.
    pub fn headers_for(&self, session: Option<&Session>) -> Result<HeaderMap, ClientError> {
        let mut headers = self.base.clone();
        if let Some(session) = session {
            let mut value = HeaderValue::from_str(&authorization_value(session.token()))
                .map_err(|e| ClientError::InvalidRequest(format!("invalid session token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        debug!(
            "Request headers: {:?}",
            headers.keys().map(|k| k.as_str()).collect::<Vec<_>>()
        );
        Ok(headers)
    }
}

impl Default for RequestTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"content_type\":\"{}\",\"accept\":\"{}\"}}",
            CONTENT_TYPE_JSON, ACCEPT_JSON
        )
    }
}

pub(crate) fn authorization_value(token: &str) -> String {
    format!("{TOKEN_SCHEME}{token}")
}
