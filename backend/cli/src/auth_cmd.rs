//! Account commands against the remote Notin API.

use anyhow::bail;
use clap::Subcommand;
use tracing::info;

use notin_api::{ApiClient, LoginRequest, RegisterRequest, TokenStore};
use notin_logging::redact_token;

use crate::config::Config;

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Create a new account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Repeat of the password; defaults to the password itself.
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Log in and store the access token locally.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the authenticated user.
    Me,
    /// Log out and forget the stored token.
    Logout,
}

/// Client carrying the stored token, if one is present and unexpired.
pub(crate) fn authenticated_client(config: &Config, store: &TokenStore) -> ApiClient {
    let mut client = ApiClient::new(&config.api_url);
    client.set_token(store.load());
    client
}

pub async fn run(config: &Config, command: AuthCommand) -> anyhow::Result<()> {
    let store = TokenStore::default_location();
    match command {
        AuthCommand::Register {
            email,
            username,
            password,
            confirm_password,
        } => {
            let client = ApiClient::new(&config.api_url);
            let user = client
                .register(&RegisterRequest {
                    email,
                    username,
                    confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                    password,
                })
                .await?;
            println!("registered {} <{}>", user.username, user.email);
        }
        AuthCommand::Login { email, password } => {
            let mut client = ApiClient::new(&config.api_url);
            client.login(&LoginRequest { email, password }).await?;
            match client.token() {
                Some(token) => {
                    store.save(token)?;
                    info!(token = %redact_token(token), "logged in, token stored");
                    println!("logged in");
                }
                None => bail!("login succeeded but the server set no access token"),
            }
        }
        AuthCommand::Me => {
            let client = authenticated_client(config, &store);
            if client.token().is_none() {
                bail!("not logged in; run `notin auth login` first");
            }
            let user = client.current_user().await?;
            println!("{} <{}>", user.username, user.email);
        }
        AuthCommand::Logout => {
            let mut client = authenticated_client(config, &store);
            // The local token is forgotten even if the server call fails.
            let result = client.logout().await;
            store.clear();
            result?;
            println!("logged out");
        }
    }
    Ok(())
}
