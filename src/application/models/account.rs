/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::error::ClientError;
use serde_json::{json, Map, Value};
use std::fmt;

/// An account as the server describes it (`name`, `accountType`, `company`,
/// `displayName`, `id`, ...). Fields are passed through untouched.
pub type Account = Map<String, Value>;

/// Paging and sorting for `GET /accounts/{domain}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAccountsParams {
    pub domain: String,
    pub offset: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_ascending: bool,
}

impl ListAccountsParams {
    pub fn new(domain: &str, offset: u32, limit: u32, sort_by: &str, sort_ascending: bool) -> Self {
        Self {
            domain: domain.to_string(),
            offset,
            limit,
            sort_by: sort_by.to_string(),
            sort_ascending,
        }
    }

    /// # Errors
    ///
    /// `InvalidRequest` for an empty domain, a domain containing `/`, or a
    /// zero limit.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.domain.trim().is_empty() {
            return Err(ClientError::InvalidRequest("domain is empty".to_string()));
        }
        if self.domain.contains('/') {
            return Err(ClientError::InvalidRequest(format!(
                "domain must not contain '/': {}",
                self.domain
            )));
        }
        if self.limit == 0 {
            return Err(ClientError::InvalidRequest(
                "limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Query parameters; `sortascending` is sent as `1` or `0`.
    pub fn to_query(&self) -> Map<String, Value> {
        let mut query = Map::new();
        query.insert("offset".to_string(), json!(self.offset));
        query.insert("limit".to_string(), json!(self.limit));
        query.insert("sortby".to_string(), json!(self.sort_by));
        query.insert(
            "sortascending".to_string(),
            json!(u8::from(self.sort_ascending)),
        );
        query
    }
}

impl fmt::Display for ListAccountsParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"domain\":\"{}\",\"offset\":{},\"limit\":{},\"sortby\":\"{}\",\"sortascending\":{}}}",
            self.domain, self.offset, self.limit, self.sort_by, self.sort_ascending
        )
    }
}
