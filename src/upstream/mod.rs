//! Pass-through clients for the external relational and graph stores
//!
//! Handlers only see the traits, so the stores can be swapped for fakes in tests.

pub mod neo4j;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

pub use neo4j::Neo4jGraph;
pub use postgres::PostgresUsers;

/// Source of user rows from the relational store
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Every row of the users table, each rendered as a JSON object
    async fn list_users(&self) -> Result<Vec<JsonValue>>;
}

/// Source of nodes from the graph store
#[async_trait]
pub trait GraphSource: Send + Sync {
    async fn list_nodes(&self) -> Result<Vec<JsonValue>>;
}
