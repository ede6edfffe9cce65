//! Wire types for the Raggadon REST API.
//!
//! The server omits or nulls fields freely, so every response type defaults
//! missing numbers to zero and missing strings to empty or `None`.

use serde::{Deserialize, Deserializer, Serialize};

/// Author of a saved memory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /save`.
#[derive(Debug, Clone, Serialize)]
pub struct SaveRequest<'a> {
    pub project: &'a str,
    pub role: Role,
    pub content: &'a str,
}

/// Response of `POST /save`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaveReceipt {
    #[serde(deserialize_with = "nullable")]
    pub success: bool,
    #[serde(deserialize_with = "nullable")]
    pub tokens_used: u64,
    #[serde(deserialize_with = "nullable")]
    pub monthly_project_usage: u64,
    #[serde(deserialize_with = "nullable")]
    pub estimated_cost_usd: f64,
    pub detail: Option<String>,
}

/// One hit from `GET /search`, in server ranking order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "nullable")]
    pub content: String,
    #[serde(deserialize_with = "nullable")]
    pub role: String,
    /// Higher is more similar. No range is guaranteed.
    #[serde(deserialize_with = "nullable")]
    pub similarity: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchResponse {
    #[serde(deserialize_with = "nullable")]
    pub results: Vec<SearchResult>,
}

/// Response of `GET /project/{project}/stats`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectStats {
    #[serde(deserialize_with = "nullable")]
    pub total_memories: u64,
    #[serde(deserialize_with = "nullable")]
    pub monthly_tokens: u64,
    #[serde(deserialize_with = "nullable")]
    pub estimated_monthly_cost_usd: f64,
    pub model: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub cost_per_1k_tokens: f64,
    pub first_activity: Option<String>,
    pub last_activity: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub recent_activities: Vec<Activity>,
}

impl ProjectStats {
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or("unknown")
    }
}

/// A single usage record (a save or a search) and its token cost.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(rename = "type", alias = "usage_type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub tokens: u64,
}

/// FastAPI error envelope. `detail` is a string for handled errors and a list
/// for validation failures.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Treat an explicit JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
