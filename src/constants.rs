/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_HOST: &str = "api.myzimbra.net";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_BASE_PATH: &str = "/api/v1";
/// Seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
pub(crate) const ACCEPT_JSON: &str = "application/json";
pub(crate) const TOKEN_SCHEME: &str = "Token token=";

pub(crate) const AUTH_PATH: &str = "/auth";
pub(crate) const ACCOUNTS_PATH: &str = "/accounts";
