mod api_doc;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod secrets;
mod state;
mod store;
mod upstream;

use std::env;
use std::sync::Arc;

use anyhow::Context;
use config::Config;
use state::AppState;
use tracing_subscriber::EnvFilter;
use upstream::{GraphSource, Neo4jGraph, PostgresUsers, UserSource};

/// `RUST_LOG` wins, then `LOG_LEVEL`, then the config default
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| {
            env::var("LOG_LEVEL")
                .ok()
                .and_then(|level| EnvFilter::try_new(level.to_lowercase()).ok())
        })
        .unwrap_or_else(|| EnvFilter::new(config::DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connect once at startup; a failure is logged and the endpoint reports it later
async fn connect_users(config: &Config) -> Option<Arc<dyn UserSource>> {
    let db = config.database.as_ref()?;
    match PostgresUsers::connect(db, &config.secrets.database_password).await {
        Ok(users) => Some(Arc::new(users)),
        Err(e) => {
            tracing::warn!("Postgres unavailable, continuing without it: {:#}", e);
            None
        }
    }
}

fn connect_graph(config: &Config) -> Option<Arc<dyn GraphSource>> {
    let graph = config.graph.as_ref()?;
    match Neo4jGraph::new(graph) {
        Ok(graph) => Some(Arc::new(graph)),
        Err(e) => {
            tracing::warn!("Neo4j unavailable, continuing without it: {:#}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!("item-store starting");

    let config = Config::from_env()?;
    config.log_startup();

    let users = connect_users(&config).await;
    let graph = connect_graph(&config);

    let addr = format!("{}:{}", config.service_host, config.service_port);

    let mut state = AppState::new(config);
    state.users = users;
    state.graph = graph;

    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
