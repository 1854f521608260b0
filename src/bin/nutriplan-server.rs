// ABOUTME: Server binary for the NutriPlan diet-recommendation API
// ABOUTME: Loads configuration, initializes logging and storage, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # NutriPlan API Server Binary
//!
//! Starts the NutriPlan REST API with user authentication, profile storage,
//! and the prediction-service proxy.

use anyhow::Result;
use clap::Parser;
use nutriplan_server::{
    auth::AuthManager, config::ServerConfig, database::Database, logging,
    prediction::PredictionClient, server::ServerResources,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "nutriplan-server")]
#[command(about = "NutriPlan API - health profiles and diet recommendations")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    logging::init_from_env()?;

    info!("starting NutriPlan API server");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("database ready at {}", config.database_url);

    let auth_manager = AuthManager::new(&config.auth.jwt_secret, config.auth.token_expiry_hours);
    let prediction = PredictionClient::new(config.prediction.clone())?;

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        prediction,
        config,
    ));

    nutriplan_server::server::serve(resources).await
}
