/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use chrono::{DateTime, Utc};
use std::fmt;

/// A server-issued token plus its optional expiry.
///
/// Sessions are immutable: a new login produces a new `Session` that replaces
/// the previous one as a whole.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Session that expires `life_time` seconds from `now`. A lifetime too
    /// large to represent leaves the session without an expiry.
    pub fn with_life_time(token: String, life_time: i64, now: DateTime<Utc>) -> Self {
        let expires_at = chrono::Duration::try_seconds(life_time)
            .and_then(|life_time| now.checked_add_signed(life_time));
        Self::new(token, expires_at)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"token\":\"[REDACTED]\",\"expires_at\":{}}}",
            self.expires_at
                .map_or("null".to_string(), |t| format!("\"{}\"", t.to_rfc3339()))
        )
    }
}
