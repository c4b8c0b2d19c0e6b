/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 14/10/26
 ******************************************************************************/
use anyhow::{Context, Result};
use myzimbra_client::application::models::account::ListAccountsParams;
use myzimbra_client::application::services::account_service::AccountService;
use myzimbra_client::client::MyZimbraClient;
use myzimbra_client::config::Config;
use myzimbra_client::utils::logger::setup_logger;
use serde_json::json;
use tracing::{error, info};

// Credentials come from MYZIMBRA_LOGIN / MYZIMBRA_PASSWORD.
#[tokio::main]
async fn main() -> Result<()> {
    setup_logger();

    let config = Config::new();
    info!("Configuration: {}", config);

    let client = MyZimbraClient::new(config).context("Failed to build client")?;

    if let Err(e) = client.login_with_config().await {
        error!("Login failed: {}", e);
        return Err(e.into());
    }

    let params = ListAccountsParams::new("domain.com", 0, 10, "name", true);
    let accounts = client
        .list_accounts(&params)
        .await
        .context("Failed to list accounts")?;
    for account in &accounts {
        if let Some(name) = account.get("name").and_then(|n| n.as_str()) {
            println!("{}", name);
        }
    }

    let attributes = json!({
        "name": "jon.snow@domain.com",
        "password": "myzimbra!",
        "accountType": "UPRO",
        "company": "CLOUD-TEMPLE",
        "description": "Nouveau compte de test",
        "displayName": "Jon SNOW",
        "mobile": "0666066606"
    });
    let attributes = attributes
        .as_object()
        .context("account attributes must be an object")?;

    let account = client
        .create_account(attributes)
        .await
        .context("Failed to create account")?;
    if let Some(id) = account.get("id") {
        println!("{}", id);
    }

    Ok(())
}
