use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// The JSON body of one queued send request.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EmailRequest {
    #[serde(rename = "Email")]
    pub recipient: String,
    pub event_type: String,
    pub language: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub placeholders: HashMap<String, String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}
