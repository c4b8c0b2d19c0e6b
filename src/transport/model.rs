use crate::error::ClientError;
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};

/// One request, built per call and consumed by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    /// Normalized path relative to the base path, always starting with `/`.
    pub path: String,
    /// Flattened into a sorted query string when the URL is built.
    pub query: Map<String, Value>,
    pub body: Option<Value>,
}

impl RequestSpec {
    /// Builds a request for `path`, enforcing a leading `/`.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the path is empty or only `/`.
    pub fn new(method: Method, path: &str) -> Result<Self, ClientError> {
        Ok(Self {
            method,
            path: normalize_path(path)?,
            query: Map::new(),
            body: None,
        })
    }

    pub fn with_query(mut self, query: Map<String, Value>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path plus flattened query string, e.g. `/accounts/x?limit=10&offset=0`.
    /// A query string already present in the path is kept and extended.
    pub fn path_and_query(&self) -> String {
        let query = super::query::flatten_query(&self.query);
        if query.is_empty() {
            return self.path.clone();
        }
        let separator = match self.path.find('?') {
            None => "?",
            Some(_) if self.path.ends_with('?') || self.path.ends_with('&') => "",
            Some(_) => "&",
        };
        format!("{}{}{}", self.path, separator, query)
    }
}

pub(crate) fn normalize_path(path: &str) -> Result<String, ClientError> {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Err(ClientError::InvalidRequest(
            "endpoint path is missing".to_string(),
        ));
    }
    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{trimmed}"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    /// Anything that did not parse as JSON, including an empty body.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
    raw: String,
}

impl ApiResponse {
    pub fn from_text(status: StatusCode, text: String) -> Self {
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => ResponseBody::Json(value),
            _ => ResponseBody::Raw(text.clone()),
        };
        Self {
            status,
            body,
            raw: text,
        }
    }

    /// The body as JSON.
    ///
    /// # Errors
    ///
    /// `Decode` when the body is empty or not valid JSON.
    pub fn into_json(self) -> Result<Value, ClientError> {
        match self.body {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Raw(text) if text.trim().is_empty() => {
                Err(ClientError::decode(text, "empty response body"))
            }
            ResponseBody::Raw(text) => Err(ClientError::decode(text, "response is not valid JSON")),
        }
    }

    /// The body exactly as the server sent it.
    pub fn raw_body(&self) -> &str {
        &self.raw
    }
}

/// Takes `data` out of a `{"data": ...}` envelope.
pub(crate) fn take_data(mut envelope: Value) -> Result<Value, ClientError> {
    match envelope.get_mut("data") {
        Some(data) => Ok(data.take()),
        None => Err(ClientError::decode(envelope.to_string(), "missing data")),
    }
}

/// Takes `data.<field>` out of a `{"data": {...}}` envelope.
pub(crate) fn take_data_field(envelope: Value, field: &str) -> Result<Value, ClientError> {
    let mut data = take_data(envelope)?;
    match data.get_mut(field) {
        Some(value) => Ok(value.take()),
        None => Err(ClientError::decode(
            data.to_string(),
            format!("missing data.{field}"),
        )),
    }
}
