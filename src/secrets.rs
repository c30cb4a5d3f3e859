use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default directory where secret files are mounted
pub const DEFAULT_SECRETS_DIR: &str = "/etc/secrets";

/// Value returned for a secret that is neither mounted nor set in the environment
pub const SECRET_NOT_SET: &str = "not-set";

/// Resolves secret values from a directory of mounted files, one file per secret.
#[derive(Debug, Clone)]
pub struct SecretResolver {
    dir: PathBuf,
}

impl SecretResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read the secret file `<dir>/<name>`, falling back to `fallback`
    ///
    /// The file content is trimmed. A missing, unreadable or empty file is
    /// logged as a warning and never fails the caller.
    pub fn resolve(&self, name: &str, fallback: &str) -> String {
        let path = self.dir.join(name);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let value = content.trim();
                if value.is_empty() {
                    tracing::warn!(secret = name, path = %path.display(), "secret file is empty, using fallback");
                    fallback.to_string()
                } else {
                    tracing::debug!(secret = name, "secret loaded from mounted file");
                    value.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(
                    secret = name,
                    path = %path.display(),
                    error = %e,
                    "secret file unavailable, using fallback"
                );
                fallback.to_string()
            }
        }
    }
}

/// Resolved secret values
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pub api_token: String,
    pub database_password: String,
    pub jwt_secret: String,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("api_token", &"<redacted>")
            .field("database_password", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}
