pub mod attendance;
pub mod auth;
pub mod students;

use crate::error::ApiError;
use crate::request::RequestOptions;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;

/// A typed backend route decoded through `Client::fetch`
pub trait Endpoint {
    type Response: DeserializeOwned;

    fn path(&self) -> Cow<'_, str>;

    fn options(&self) -> Result<RequestOptions, ApiError> {
        Ok(RequestOptions::default())
    }
}

/// Accepts `true`/`false` as well as the `0`/`1` integers SQLite hands back
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Null(()),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
        Flag::Null(()) => false,
    })
}

/// Any non-numeric or negative value reads as zero
pub(crate) fn count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    })
}
