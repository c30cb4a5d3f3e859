use std::env;
use std::path::PathBuf;
use anyhow::{Context, Result};

use crate::secrets::{DEFAULT_SECRETS_DIR, SECRET_NOT_SET, SecretResolver, Secrets};

/// Log filter used when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Connection settings for the relational (Postgres) store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
}

/// Connection settings for the graph (Neo4j HTTP API) store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    pub api_version: String,
    pub debug: bool,
    pub service_host: String,
    pub service_port: u16,
    pub secrets_dir: PathBuf,
    pub secrets: Secrets,
    pub database: Option<DatabaseConfig>,
    pub graph: Option<GraphConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment = var_or("ENVIRONMENT", "development");
        let log_level = var_or("LOG_LEVEL", DEFAULT_LOG_LEVEL);
        let cors_origins = parse_origins(&var_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS));
        let api_version = var_or("API_VERSION", "1.0.0");
        let debug = parse_flag(&var_or("DEBUG", "false"));

        let service_port = var_or("SERVICE_PORT", "8000")
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;
        let service_host = var_or("SERVICE_HOST", "0.0.0.0");

        let secrets_dir = PathBuf::from(var_or("SECRETS_DIR", DEFAULT_SECRETS_DIR));
        let resolver = SecretResolver::new(&secrets_dir);
        let secrets = Secrets {
            api_token: resolver.resolve("api-token", &var_or("API_TOKEN", SECRET_NOT_SET)),
            database_password: resolver
                .resolve("database-password", &var_or("DATABASE_PASSWORD", SECRET_NOT_SET)),
            jwt_secret: resolver.resolve("jwt-secret", &var_or("JWT_SECRET", SECRET_NOT_SET)),
        };

        let database = match lookup("POSTGRES_HOST") {
            Some(host) => Some(DatabaseConfig {
                host,
                port: var_or("POSTGRES_PORT", "5432")
                    .parse::<u16>()
                    .context("POSTGRES_PORT must be a valid port number (0-65535)")?,
                database: var_or("POSTGRES_DB", "app"),
                user: var_or("POSTGRES_USER", "postgres"),
            }),
            None => None,
        };

        let graph = lookup("NEO4J_URI").map(|uri| GraphConfig {
            uri,
            user: var_or("NEO4J_USER", "neo4j"),
            password: var_or("NEO4J_PASSWORD", ""),
            database: var_or("NEO4J_DATABASE", "neo4j"),
        });

        Ok(Config {
            environment,
            log_level,
            cors_origins,
            api_version,
            debug,
            service_host,
            service_port,
            secrets_dir,
            secrets,
            database,
            graph,
        })
    }

    /// The secrets endpoint is only routed for debug, non-production deployments
    pub fn expose_secrets(&self) -> bool {
        self.debug && !self.environment.eq_ignore_ascii_case("production")
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.environment);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  CORS origins: {}", self.cors_origins.join(", "));
        tracing::info!("  API version: {}", self.api_version);
        tracing::info!("  Debug: {}", self.debug);
        tracing::info!("  Secrets directory: {}", self.secrets_dir.display());
        match &self.database {
            Some(db) => tracing::info!("  Postgres: {}@{}:{}/{}", db.user, db.host, db.port, db.database),
            None => tracing::info!("  Postgres: disabled"),
        }
        match &self.graph {
            Some(graph) => tracing::info!("  Neo4j: {} (database {})", graph.uri, graph.database),
            None => tracing::info!("  Neo4j: disabled"),
        }
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);

        if self.expose_secrets() {
            tracing::warn!("DEBUG is enabled: resolved secret values follow, do not run this in production");
            tracing::warn!("  API token: {}", self.secrets.api_token);
            tracing::warn!("  Database password: {}", self.secrets.database_password);
            tracing::warn!("  JWT secret: {}", self.secrets.jwt_secret);
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_with_defaults() {
        let config = config_from(&[("SECRETS_DIR", "/nonexistent-secrets")]).unwrap();

        assert_eq!(config.environment, "development");
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5173".to_string(), "http://localhost:3000".to_string()]
        );
        assert_eq!(config.api_version, "1.0.0");
        assert!(!config.debug);
        assert_eq!(config.service_port, 8000);
        assert_eq!(config.service_host, "0.0.0.0");
        assert_eq!(config.secrets.api_token, SECRET_NOT_SET);
        assert_eq!(config.secrets.database_password, SECRET_NOT_SET);
        assert_eq!(config.secrets.jwt_secret, SECRET_NOT_SET);
        assert_eq!(config.database, None);
        assert_eq!(config.graph, None);
    }

    #[test]
    fn test_config_with_all_vars() {
        let config = config_from(&[
            ("ENVIRONMENT", "staging"),
            ("LOG_LEVEL", "debug"),
            ("CORS_ORIGINS", "https://a.example.com, https://b.example.com,,"),
            ("API_VERSION", "2.1.0"),
            ("DEBUG", "TRUE"),
            ("SERVICE_PORT", "9090"),
            ("SERVICE_HOST", "127.0.0.1"),
            ("SECRETS_DIR", "/nonexistent-secrets"),
            ("API_TOKEN", "env-token"),
            ("DATABASE_PASSWORD", "env-pw"),
            ("JWT_SECRET", "env-jwt"),
            ("POSTGRES_HOST", "db.internal"),
            ("POSTGRES_DB", "items"),
            ("NEO4J_URI", "http://graph.internal:7474"),
            ("NEO4J_PASSWORD", "graph-pw"),
        ])
        .unwrap();

        assert_eq!(config.environment, "staging");
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example.com".to_string(), "https://b.example.com".to_string()]
        );
        assert_eq!(config.api_version, "2.1.0");
        assert!(config.debug);
        assert_eq!(config.service_port, 9090);
        assert_eq!(config.service_host, "127.0.0.1");
        assert_eq!(config.secrets.api_token, "env-token");
        assert_eq!(config.secrets.database_password, "env-pw");
        assert_eq!(config.secrets.jwt_secret, "env-jwt");
        assert_eq!(
            config.database,
            Some(DatabaseConfig {
                host: "db.internal".to_string(),
                port: 5432,
                database: "items".to_string(),
                user: "postgres".to_string(),
            })
        );
        let graph = config.graph.unwrap();
        assert_eq!(graph.uri, "http://graph.internal:7474");
        assert_eq!(graph.user, "neo4j");
        assert_eq!(graph.password, "graph-pw");
        assert_eq!(graph.database, "neo4j");
    }

    #[test]
    fn test_debug_flag_parsing() {
        for (raw, expected) in [("true", true), ("True", true), ("false", false), ("1", false), ("yes", false)] {
            let config = config_from(&[("DEBUG", raw), ("SECRETS_DIR", "/nonexistent-secrets")]).unwrap();
            assert_eq!(config.debug, expected, "DEBUG={}", raw);
        }
    }

    #[test]
    fn test_mounted_secret_overrides_env() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("jwt-secret"), "mounted-jwt\n").unwrap();
        let dir_str = dir.path().to_str().unwrap();

        let config = config_from(&[
            ("SECRETS_DIR", dir_str),
            ("JWT_SECRET", "env-jwt"),
            ("API_TOKEN", "env-token"),
        ])
        .unwrap();

        assert_eq!(config.secrets.jwt_secret, "mounted-jwt");
        assert_eq!(config.secrets.api_token, "env-token");
        assert_eq!(config.secrets.database_password, SECRET_NOT_SET);
    }

    #[test]
    fn test_invalid_port() {
        let result = config_from(&[("SERVICE_PORT", "not-a-number")]);
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains("SERVICE_PORT"));
    }

    #[test]
    fn test_port_out_of_range() {
        let result = config_from(&[("SERVICE_PORT", "99999")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_postgres_port() {
        let result = config_from(&[("POSTGRES_HOST", "db"), ("POSTGRES_PORT", "x")]);
        assert!(result.unwrap_err().to_string().contains("POSTGRES_PORT"));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn startup_log(config: &Config) -> String {
        let captured = CapturedLog::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || config.log_startup());
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_startup_log_hides_secrets_in_production() {
        let config = config_from(&[
            ("DEBUG", "true"),
            ("ENVIRONMENT", "production"),
            ("SECRETS_DIR", "/nonexistent-secrets"),
            ("API_TOKEN", "prod-token-value"),
        ])
        .unwrap();

        let log = startup_log(&config);
        assert!(log.contains("Environment: production"));
        assert!(!log.contains("prod-token-value"));
    }

    #[test]
    fn test_startup_log_dumps_secrets_in_debug_development() {
        let config = config_from(&[
            ("DEBUG", "true"),
            ("SECRETS_DIR", "/nonexistent-secrets"),
            ("API_TOKEN", "dev-token-value"),
        ])
        .unwrap();

        assert!(startup_log(&config).contains("dev-token-value"));
    }

    #[test]
    fn test_expose_secrets_gate() {
        let dev_debug = config_from(&[("DEBUG", "true")]).unwrap();
        assert!(dev_debug.expose_secrets());

        let prod_debug = config_from(&[("DEBUG", "true"), ("ENVIRONMENT", "Production")]).unwrap();
        assert!(!prod_debug.expose_secrets());

        let dev_quiet = config_from(&[]).unwrap();
        assert!(!dev_quiet.expose_secrets());
    }
}
