use crate::config::RestApiConfig;
use crate::error::ClientError;
use crate::transport::model::{ApiResponse, RequestSpec};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Performs exactly one round trip for a request.
///
/// Any status code comes back as an [`ApiResponse`]; classifying it is left to
/// the caller. Only failures to complete the exchange are errors here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(
        &self,
        request: RequestSpec,
        headers: HeaderMap,
    ) -> Result<ApiResponse, ClientError>;
}

/// Represents the HTTP transport talking to the MyZimbra API.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a new transport for the configured host.
    ///
    /// # Arguments
    ///
    /// * `config` - Scheme, host, port, base path, timeout and TLS settings.
    ///
    /// # Returns
    ///
    /// A Result containing the transport or a `Transport` error when the
    /// underlying client cannot be built.
    pub fn new(config: &RestApiConfig) -> Result<Self, ClientError> {
        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, request: &RequestSpec) -> String {
        format!("{}{}", self.base_url, request.path_and_query())
    }

    async fn read_response(response: Response) -> Result<ApiResponse, ClientError> {
        let status = response.status();
        let body_text = response.text().await?;

        debug!("Response Status: {}", status);
        debug!("Response Body: {}", body_text);

        Ok(ApiResponse::from_text(status, body_text))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request, headers), fields(method = %request.method, path = %request.path))]
    async fn execute(
        &self,
        request: RequestSpec,
        headers: HeaderMap,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.url_for(&request);
        debug!("Sending {} request to {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url).headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body).map_err(|e| {
                ClientError::InvalidRequest(format!("failed to serialize request body: {e}"))
            })?);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send {} request: {:?}", request.method, e);
                return Err(ClientError::Transport(e));
            }
        };

        Self::read_response(response).await
    }
}
