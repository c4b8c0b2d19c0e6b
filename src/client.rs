/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::config::Config;
use crate::constants::AUTH_PATH;
use crate::error::ClientError;
use crate::session::auth::{session_from_response, AuthRequest};
use crate::session::session::Session;
use crate::transport::headers::RequestTemplate;
use crate::transport::http_client::{HttpTransport, ReqwestTransport};
use crate::transport::model::{ApiResponse, RequestSpec};
use chrono::Utc;
use parking_lot::RwLock;
use reqwest::Method;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Session-aware client for the MyZimbra REST API.
///
/// The only mutable state is the current session. It is held behind an `Arc`
/// and swapped as a whole on login, so concurrent calls on the same client see
/// either the old token or the new one.
pub struct MyZimbraClient<T: HttpTransport = ReqwestTransport> {
    config: Config,
    template: RequestTemplate,
    transport: T,
    session: RwLock<Option<Arc<Session>>>,
}

impl MyZimbraClient<ReqwestTransport> {
    /// Creates a client talking HTTP(S) to the configured host.
    ///
    /// # Errors
    ///
    /// `Transport` if the underlying HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(&config.rest_api)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> MyZimbraClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            config,
            template: RequestTemplate::new(),
            transport,
            session: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current session, unless none was acquired or it has expired.
    pub fn session(&self) -> Option<Arc<Session>> {
        let session = self.session.read().clone();
        match session {
            Some(session) if session.is_expired() => {
                debug!("Session expired at {:?}", session.expires_at());
                None
            }
            other => other,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Drops the current session locally. No request is sent.
    pub fn logout(&self) {
        *self.session.write() = None;
    }

    /// Logs in and stores the returned token as the active session.
    ///
    /// The previous session, if any, is left untouched when login fails.
    ///
    /// # Errors
    ///
    /// * `Authentication` - non-2xx status or no `data.session.token` in the body.
    /// * `Transport` - the request could not be completed.
    #[instrument(skip(self, password))]
    pub async fn login(&self, login: &str, password: &str) -> Result<Session, ClientError> {
        debug!("Authenticating user: {}", login);

        let body = serde_json::to_value(AuthRequest { login, password })
            .map_err(|e| ClientError::InvalidRequest(format!("failed to encode credentials: {e}")))?;
        let request = RequestSpec::new(Method::POST, AUTH_PATH)?.with_body(body);
        let headers = self.template.headers_for(None)?;

        let response = self.transport.execute(request, headers).await?;
        let session = session_from_response(response, Utc::now())?;

        *self.session.write() = Some(Arc::new(session.clone()));
        info!("Authentication successful");
        Ok(session)
    }

    /// Logs in with the credentials from the client's configuration.
    pub async fn login_with_config(&self) -> Result<Session, ClientError> {
        let login = self.config.credentials.login.clone();
        let password = self.config.credentials.password.clone();
        self.login(&login, &password).await
    }

    pub async fn get(
        &self,
        path: &str,
        query: Option<Map<String, Value>>,
    ) -> Result<ApiResponse, ClientError> {
        self.send(build_request(Method::GET, path, query, None)?).await
    }

    pub async fn post(
        &self,
        path: &str,
        query: Option<Map<String, Value>>,
        body: Option<Value>,
    ) -> Result<ApiResponse, ClientError> {
        self.send(build_request(Method::POST, path, query, body)?).await
    }

    pub async fn put(
        &self,
        path: &str,
        query: Option<Map<String, Value>>,
        body: Option<Value>,
    ) -> Result<ApiResponse, ClientError> {
        self.send(build_request(Method::PUT, path, query, body)?).await
    }

    pub async fn delete(
        &self,
        path: &str,
        query: Option<Map<String, Value>>,
    ) -> Result<ApiResponse, ClientError> {
        self.send(build_request(Method::DELETE, path, query, None)?).await
    }

    /// Sends `request`, attaching the current session when there is one.
    ///
    /// # Errors
    ///
    /// `Http` for any status outside 200-299, `Transport` when the exchange
    /// did not complete.
    pub async fn send(&self, request: RequestSpec) -> Result<ApiResponse, ClientError> {
        let session = self.session();
        self.dispatch(request, session.as_deref()).await
    }

    /// Like [`send`](Self::send), but fails with `NotAuthenticated` before any
    /// I/O when there is no live session.
    pub(crate) async fn send_authenticated(
        &self,
        request: RequestSpec,
    ) -> Result<ApiResponse, ClientError> {
        let session = self.require_session()?;
        self.dispatch(request, Some(&session)).await
    }

    pub(crate) fn require_session(&self) -> Result<Arc<Session>, ClientError> {
        self.session().ok_or(ClientError::NotAuthenticated)
    }

    async fn dispatch(
        &self,
        request: RequestSpec,
        session: Option<&Session>,
    ) -> Result<ApiResponse, ClientError> {
        let method = request.method.clone();
        let path = request.path_and_query();
        let headers = self.template.headers_for(session)?;

        let response = self.transport.execute(request, headers).await?;
        if response.status.is_success() {
            Ok(response)
        } else {
            error!(
                "API request failed. {} {} Status: {}, Body: {}",
                method,
                path,
                response.status,
                response.raw_body()
            );
            Err(ClientError::Http {
                status: response.status,
                body: response.raw_body().to_string(),
            })
        }
    }
}

fn build_request(
    method: Method,
    path: &str,
    query: Option<Map<String, Value>>,
    body: Option<Value>,
) -> Result<RequestSpec, ClientError> {
    let mut request = RequestSpec::new(method, path)?;
    if let Some(query) = query {
        request = request.with_query(query);
    }
    if let Some(body) = body {
        request = request.with_body(body);
    }
    Ok(request)
}

impl<T: HttpTransport> fmt::Debug for MyZimbraClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MyZimbraClient")
            .field("base_url", &self.config.rest_api.base_url())
            .field("session", &self.session.read())
            .finish()
    }
}

#[cfg(test)]
mod tests_client {
    use super::*;
    use crate::transport::http_client::MockHttpTransport;
    use pretty_assertions::assert_eq;
    use reqwest::header::AUTHORIZATION;
    use reqwest::StatusCode;
    use serde_json::json;

    fn ok_login() -> ApiResponse {
        ApiResponse::from_text(
            StatusCode::OK,
            r#"{"data":{"session":{"token":"abc","life_time":3600}}}"#.to_string(),
        )
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|request, headers| {
                request.method == Method::POST
                    && request.path == "/auth"
                    && request.body == Some(json!({"login": "u", "password": "p"}))
                    && headers.get(AUTHORIZATION).is_none()
            })
            .times(1)
            .returning(|_, _| Ok(ok_login()));

        let client = MyZimbraClient::with_transport(Config::default(), transport);
        let session = client.login("u", "p").await.unwrap();

        assert_eq!(session.token(), "abc");
        assert!(client.is_authenticated());
        assert_eq!(client.session().unwrap().token(), "abc");
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let mut transport = MockHttpTransport::new();
        let mut responses = vec![
            ApiResponse::from_text(StatusCode::UNAUTHORIZED, "nope".to_string()),
            ok_login(),
        ];
        transport
            .expect_execute()
            .times(2)
            .returning(move |_, _| Ok(responses.pop().unwrap()));

        let client = MyZimbraClient::with_transport(Config::default(), transport);
        client.login("u", "p").await.unwrap();

        let result = client.login("u", "wrong").await;
        assert!(matches!(result, Err(ClientError::Authentication { .. })));
        assert_eq!(client.session().unwrap().token(), "abc");
    }

    #[tokio::test]
    async fn test_authenticated_call_without_session_sends_nothing() {
        let mut transport = MockHttpTransport::new();
        transport.expect_execute().times(0);

        let client = MyZimbraClient::with_transport(Config::default(), transport);
        let request = RequestSpec::new(Method::GET, "/accounts/x").unwrap();
        let result = client.send_authenticated(request).await;

        assert!(matches!(result, Err(ClientError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_expired_session_counts_as_absent() {
        let mut transport = MockHttpTransport::new();
        transport.expect_execute().times(1).returning(|_, _| {
            Ok(ApiResponse::from_text(
                StatusCode::OK,
                r#"{"data":{"session":{"token":"abc","life_time":0}}}"#.to_string(),
            ))
        });

        let client = MyZimbraClient::with_transport(Config::default(), transport);
        client.login("u", "p").await.unwrap();

        assert!(!client.is_authenticated());
        assert!(matches!(
            client.require_session(),
            Err(ClientError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_, _| Ok(ok_login()));

        let client = MyZimbraClient::with_transport(Config::default(), transport);
        client.login("u", "p").await.unwrap();
        client.logout();

        assert!(client.session().is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let mut transport = MockHttpTransport::new();
        transport.expect_execute().times(1).returning(|_, _| {
            Ok(ApiResponse::from_text(
                StatusCode::INTERNAL_SERVER_ERROR,
                "boom".to_string(),
            ))
        });

        let client = MyZimbraClient::with_transport(Config::default(), transport);
        match client.delete("/accounts/1", None).await {
            Err(ClientError::Http { status, body }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("expected http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generic_verbs_reject_empty_path() {
        let mut transport = MockHttpTransport::new();
        transport.expect_execute().times(0);

        let client = MyZimbraClient::with_transport(Config::default(), transport);
        assert!(matches!(
            client.get("", None).await,
            Err(ClientError::InvalidRequest(_))
        ));
        assert!(matches!(
            client.put("/", None, Some(json!({}))).await,
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_put_attaches_session_and_body() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|request, _| request.path == "/auth")
            .times(1)
            .returning(|_, _| Ok(ok_login()));
        transport
            .expect_execute()
            .withf(|request, headers| {
                request.method == Method::PUT
                    && request.path == "/accounts/1"
                    && request.body == Some(json!({"displayName": "Jon"}))
                    && headers.get(AUTHORIZATION).map(|v| v == "Token token=abc") == Some(true)
            })
            .times(1)
            .returning(|_, _| {
                Ok(ApiResponse::from_text(StatusCode::OK, r#"{"data":{}}"#.to_string()))
            });

        let client = MyZimbraClient::with_transport(Config::default(), transport);
        client.login("u", "p").await.unwrap();
        let response = client
            .put("accounts/1", None, Some(json!({"displayName": "Jon"})))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
    }
}
