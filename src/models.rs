use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// A stored item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub is_available: bool,
}

/// Partial item payload accepted by create and update
///
/// Every field is optional. A field that is missing, `null` or of the wrong
/// JSON type deserializes to `None`; callers decide what `None` means
/// (defaults on create, the previous value on update).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, utoipa::ToSchema)]
pub struct ItemPatch {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_available: Option<bool>,
}

impl ItemPatch {
    /// Build a new item, filling absent fields with defaults
    pub fn into_item(self, id: u64) -> Item {
        Item {
            id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: self.price.unwrap_or(0.0),
            is_available: self.is_available.unwrap_or(true),
        }
    }

    /// Apply the supplied fields on top of an existing item, keeping its id
    pub fn apply_to(self, existing: &Item) -> Item {
        Item {
            id: existing.id,
            name: self.name.unwrap_or_else(|| existing.name.clone()),
            description: self.description.unwrap_or_else(|| existing.description.clone()),
            price: self.price.unwrap_or(existing.price),
            is_available: self.is_available.unwrap_or(existing.is_available),
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Response type for the root endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

/// Response type carrying a single human readable message
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Public view of the resolved configuration
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConfigResponse {
    pub environment: String,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    pub api_version: String,
    pub debug: bool,
}

/// Resolved secret values, only served by debug deployments
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SecretsResponse {
    pub api_token: String,
    pub database_password: String,
    pub jwt_secret: String,
}
