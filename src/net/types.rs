//! JSON shapes returned by the dish endpoints.
//!
//! DESIGN
//! ======
//! The server serializes model fields loosely: IDs and prices may arrive as
//! numbers or strings, and optional relations as `null`. Fields that only
//! feed form inputs are normalized to strings here so the form code never
//! branches on JSON types.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Envelope shared by every dish endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub dish: Option<Dish>,
}

/// A dish as needed to pre-fill the edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Dish {
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub restaurant_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub price: String,
}

/// Accept a string, number, or `null` and render it as a string
/// (`null` becomes empty).
fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("expected string or number, got {other}"))),
    }
}
