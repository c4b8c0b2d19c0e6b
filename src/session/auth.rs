use crate::error::ClientError;
use crate::session::session::Session;
use crate::transport::model::{ApiResponse, ResponseBody};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

#[derive(Serialize)]
pub struct AuthRequest<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub data: AuthData,
}

#[derive(Debug, Deserialize)]
pub struct AuthData {
    pub session: SessionPayload,
}

#[derive(Debug, Deserialize)]
pub struct SessionPayload {
    pub token: String,
    /// Kept loose so an odd `life_time` only costs the expiry, never the token.
    #[serde(default)]
    pub life_time: Option<Value>,
}

/// Seconds the token stays valid. Accepts an integer, a whole float or a
/// numeric string; anything else reads as no lifetime.
pub fn life_time_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_seconds)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_seconds))
        }
        _ => None,
    }
}

fn whole_seconds(seconds: f64) -> Option<i64> {
    if seconds.is_finite() && seconds.fract() == 0.0 && seconds.abs() < i64::MAX as f64 {
        Some(seconds as i64)
    } else {
        None
    }
}

/// Turns the response of `POST /auth` into a session.
///
/// # Errors
///
/// `Authentication` carrying the status and raw body when the status is not
/// 2xx or when the body has no string `data.session.token`.
pub fn session_from_response(
    response: ApiResponse,
    now: DateTime<Utc>,
) -> Result<Session, ClientError> {
    let status = response.status;
    let raw = response.raw_body().to_string();

    if !status.is_success() {
        error!("Login rejected. Status: {}, Body: {}", status, raw);
        return Err(ClientError::Authentication {
            status: Some(status),
            body: raw,
        });
    }

    let parsed = match response.body {
        ResponseBody::Json(value) => serde_json::from_value::<AuthResponse>(value).ok(),
        ResponseBody::Raw(_) => None,
    };

    match parsed {
        Some(auth) if !auth.data.session.token.is_empty() => {
            let payload = auth.data.session;
            let session = match payload.life_time.as_ref().and_then(life_time_seconds) {
                Some(life_time) => Session::with_life_time(payload.token, life_time, now),
                None => Session::new(payload.token, None),
            };
            debug!("Session acquired, expires at {:?}", session.expires_at());
            Ok(session)
        }
        _ => {
            error!("Auth response has no data.session.token: {}", raw);
            Err(ClientError::Authentication {
                status: Some(status),
                body: raw,
            })
        }
    }
}
