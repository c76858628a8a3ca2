//! Web server for Tradepost.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use super::handlers::AppState;
use super::router::create_router;
use crate::auth::{AuthService, TokenService};
use crate::config::Config;
use crate::db::UserRepository;
use crate::records::DocumentStore;
use crate::{Database, Result, TradepostError};

/// HTTP server wiring the auth service and document store into a router.
pub struct WebServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
    tokens: Arc<TokenService>,
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server from configuration and an open database.
    pub fn new(config: &Config, db: &Database) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| TradepostError::Config(format!("invalid server address: {e}")))?;

        let directory = UserRepository::new(db.pool().clone());
        let auth = AuthService::new(directory, TokenService::from_config(&config.auth)?);
        let docs = DocumentStore::new(db.pool().clone());

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(auth, docs)),
            tokens: Arc::new(TokenService::from_config(&config.auth)?),
            cors_origins: config.server.cors_origins.clone(),
        })
    }

    /// Run the server until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let router = create_router(self.app_state, self.tokens, &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        info!("Web API listening on {}", self.addr);

        axum::serve(listener, router)
            .await
            .map_err(TradepostError::Io)?;

        Ok(())
    }
}
