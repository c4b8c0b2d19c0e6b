use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::{
    application::models::account::{Account, ListAccountsParams},
    client::MyZimbraClient,
    constants::ACCOUNTS_PATH,
    error::ClientError,
    transport::{
        http_client::HttpTransport,
        model::{take_data, take_data_field, RequestSpec},
    },
};

/// Account management operations. Both require a live session.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Accounts of a domain, in the order the server returns them.
    async fn list_accounts(&self, params: &ListAccountsParams) -> Result<Vec<Account>, ClientError>;

    /// Creates an account from `attributes` and returns the server's copy,
    /// including its `id`.
    async fn create_account(&self, attributes: &Account) -> Result<Account, ClientError>;
}

#[async_trait]
impl<T: HttpTransport + 'static> AccountService for MyZimbraClient<T> {
    #[instrument(skip(self))]
    async fn list_accounts(&self, params: &ListAccountsParams) -> Result<Vec<Account>, ClientError> {
        self.require_session()?;
        params.validate()?;
        info!("Fetching accounts of {}", params.domain);

        let path = format!("{}/{}", ACCOUNTS_PATH, urlencoding::encode(&params.domain));
        let request = RequestSpec::new(Method::GET, &path)?.with_query(params.to_query());

        let response = self.send_authenticated(request).await?;
        let raw = response.raw_body().to_string();
        let accounts = take_data_field(response.into_json()?, "accounts")?;
        let accounts: Vec<Account> = serde_json::from_value(accounts)
            .map_err(|e| ClientError::decode(raw, format!("data.accounts: {e}")))?;

        debug!("Accounts fetched: {}", accounts.len());
        Ok(accounts)
    }

    #[instrument(skip(self, attributes))]
    async fn create_account(&self, attributes: &Account) -> Result<Account, ClientError> {
        self.require_session()?;
        if attributes.is_empty() {
            return Err(ClientError::InvalidRequest(
                "account attributes are empty".to_string(),
            ));
        }
        info!("Creating account {:?}", attributes.get("name"));

        let request = RequestSpec::new(Method::POST, ACCOUNTS_PATH)?
            .with_body(Value::Object(attributes.clone()));

        let response = self.send_authenticated(request).await?;
        let raw = response.raw_body().to_string();
        let data: Account = serde_json::from_value(take_data(response.into_json()?)?)
            .map_err(|e| ClientError::decode(raw, format!("data: {e}")))?;

        debug!("Account created: {:?}", data.get("id"));
        Ok(data)
    }
}
