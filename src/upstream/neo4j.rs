use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;

use super::GraphSource;
use crate::config::GraphConfig;

const LIST_NODES_CYPHER: &str = "MATCH (n) RETURN n LIMIT 25";

#[derive(Serialize)]
struct TxRequest<'a> {
    statements: Vec<Statement<'a>>,
}

#[derive(Serialize)]
struct Statement<'a> {
    statement: &'a str,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    #[serde(default)]
    row: Vec<JsonValue>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// Graph source speaking the Neo4j HTTP transaction API
#[derive(Clone)]
pub struct Neo4jGraph {
    http: reqwest::Client,
    commit_url: String,
    user: String,
    password: String,
}

impl Neo4jGraph {
    pub fn new(config: &GraphConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build Neo4j HTTP client")?;

        let commit_url = format!(
            "{}/db/{}/tx/commit",
            config.uri.trim_end_matches('/'),
            config.database
        );
        tracing::info!("Neo4j transactions will be sent to {}", commit_url);

        Ok(Self {
            http,
            commit_url,
            user: config.user.clone(),
            password: config.password.clone(),
        })
    }
}

#[async_trait]
impl GraphSource for Neo4jGraph {
    async fn list_nodes(&self) -> Result<Vec<JsonValue>> {
        let request = TxRequest {
            statements: vec![Statement {
                statement: LIST_NODES_CYPHER,
            }],
        };

        let response = self
            .http
            .post(&self.commit_url)
            .basic_auth(&self.user, Some(&self.password))
            .json(&request)
            .send()
            .await
            .context("Failed to reach Neo4j")?
            .error_for_status()
            .context("Neo4j rejected the request")?
            .json::<TxResponse>()
            .await
            .context("Failed to decode Neo4j response")?;

        let nodes = nodes_from_response(response)?;
        tracing::debug!("Fetched {} graph nodes", nodes.len());
        Ok(nodes)
    }
}

/// Flatten the first column of every returned row, surfacing Cypher errors
fn nodes_from_response(response: TxResponse) -> Result<Vec<JsonValue>> {
    if let Some(err) = response.errors.first() {
        return Err(anyhow!("Neo4j error {}: {}", err.code, err.message));
    }

    Ok(response
        .results
        .into_iter()
        .flat_map(|result| result.data)
        .filter_map(|row| row.row.into_iter().next())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nodes_from_response() {
        let response: TxResponse = serde_json::from_value(json!({
            "results": [{
                "columns": ["n"],
                "data": [
                    {"row": [{"name": "alice"}], "meta": [{"id": 1}]},
                    {"row": [{"name": "bob"}], "meta": [{"id": 2}]}
                ]
            }],
            "errors": []
        }))
        .unwrap();

        let nodes = nodes_from_response(response).unwrap();
        assert_eq!(nodes, vec![json!({"name": "alice"}), json!({"name": "bob"})]);
    }

    #[test]
    fn test_nodes_from_empty_response() {
        let response: TxResponse =
            serde_json::from_value(json!({"results": [{"columns": ["n"], "data": []}], "errors": []}))
                .unwrap();
        assert!(nodes_from_response(response).unwrap().is_empty());
    }

    #[test]
    fn test_cypher_error_is_surfaced() {
        let response: TxResponse = serde_json::from_value(json!({
            "results": [],
            "errors": [{
                "code": "Neo.ClientError.Security.Unauthorized",
                "message": "The client is unauthorized"
            }]
        }))
        .unwrap();

        let error = nodes_from_response(response).unwrap_err().to_string();
        assert!(error.contains("Unauthorized"));
    }

    #[test]
    fn test_commit_url_strips_trailing_slash() {
        let graph = Neo4jGraph::new(&GraphConfig {
            uri: "http://localhost:7474/".to_string(),
            user: "neo4j".to_string(),
            password: "pw".to_string(),
            database: "neo4j".to_string(),
        })
        .unwrap();
        assert_eq!(graph.commit_url, "http://localhost:7474/db/neo4j/tx/commit");
    }
}
