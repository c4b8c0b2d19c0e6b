use crate::constants::{
    DEFAULT_BASE_PATH, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SCHEME, DEFAULT_TIMEOUT,
};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

#[derive(Debug, Deserialize, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub rest_api: RestApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub base_path: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
    /// Skips TLS certificate verification. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
}

impl RestApiConfig {
    /// `{scheme}://{host}:{port}{base_path}` with the base path carrying one
    /// leading slash and no trailing slash.
    pub fn base_url(&self) -> String {
        let base_path = self.base_path.trim_matches('/');
        if base_path.is_empty() {
            format!("{}://{}:{}", self.scheme, self.host, self.port)
        } else {
            format!("{}://{}:{}/{}", self.scheme, self.host, self.port, base_path)
        }
    }
}

impl Default for RestApiConfig {
    fn default() -> Self {
        RestApiConfig {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"login\":\"{}\",\"password\":\"[REDACTED]\"}}",
            self.login
        )
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"credentials\":{},\"rest_api\":{}}}",
            self.credentials, self.rest_api
        )
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{},\"accept_invalid_certs\":{}}}",
            self.base_url(),
            self.timeout,
            self.accept_invalid_certs
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            credentials: Credentials {
                login: get_env_or_default("MYZIMBRA_LOGIN", String::from("login")),
                password: get_env_or_default("MYZIMBRA_PASSWORD", String::from("password")),
            },
            rest_api: RestApiConfig {
                scheme: get_env_or_default("MYZIMBRA_SCHEME", DEFAULT_SCHEME.to_string()),
                host: get_env_or_default("MYZIMBRA_HOST", DEFAULT_HOST.to_string()),
                port: get_env_or_default("MYZIMBRA_PORT", DEFAULT_PORT),
                base_path: get_env_or_default("MYZIMBRA_BASE_PATH", DEFAULT_BASE_PATH.to_string()),
                timeout: get_env_or_default("MYZIMBRA_TIMEOUT", DEFAULT_TIMEOUT),
                accept_invalid_certs: get_env_or_default("MYZIMBRA_ACCEPT_INVALID_CERTS", false),
            },
        }
    }
}
