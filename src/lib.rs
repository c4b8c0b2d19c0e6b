/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Client for the MyZimbra account-management REST API.
//!
//! ```no_run
//! use myzimbra_client::application::services::account_service::AccountService;
//! use myzimbra_client::application::models::account::ListAccountsParams;
//! use myzimbra_client::client::MyZimbraClient;
//! use myzimbra_client::config::Config;
//!
//! # async fn run() -> Result<(), myzimbra_client::error::ClientError> {
//! let client = MyZimbraClient::new(Config::new())?;
//! client.login("login", "password").await?;
//! let _accounts = client
//!     .list_accounts(&ListAccountsParams::new("domain.com", 0, 10, "name", true))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;

pub mod constants;

pub mod error;

pub mod application;

pub mod client;

pub mod session;

pub mod transport;

pub mod utils;
