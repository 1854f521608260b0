// ABOUTME: Shared server resources and the HTTP serve loop
// ABOUTME: Aggregates database, auth, and prediction client behind one Arc for handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server assembly: shared resources and the listener loop.
//!
//! Each request is handled independently; the only shared state is this
//! immutable resource bundle (database pool, auth manager, prediction
//! client, config) behind an `Arc`.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::prediction::PredictionClient;
use crate::routes;
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Dependencies shared by all request handlers
pub struct ServerResources {
    /// User and profile storage
    pub database: Database,
    /// JWT issuance and verification
    pub auth_manager: AuthManager,
    /// External prediction service client
    pub prediction: PredictionClient,
    /// Loaded configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the server's shared dependencies
    #[must_use]
    pub const fn new(
        database: Database,
        auth_manager: AuthManager,
        prediction: PredictionClient,
        config: ServerConfig,
    ) -> Self {
        Self {
            database,
            auth_manager,
            prediction,
            config,
        }
    }
}

/// Bind the configured port and serve requests until shutdown.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server loop fails.
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let address = format!("0.0.0.0:{}", resources.config.http_port);
    let app = routes::router(resources);

    let listener = TcpListener::bind(&address).await?;
    info!("server listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            stream.recv().await;
            info!("received terminate signal, shutting down");
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
