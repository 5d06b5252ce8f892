use querybind::Record;
use serde::{Deserialize, Serialize};

/// Record the CLI binds query strings onto.
#[derive(Debug, Clone, PartialEq, Record, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    #[param(rename = "q")]
    pub query: String,
    pub page: Option<u32>,
    pub per_page: Option<u16>,
    pub tags: Vec<String>,
    pub exact: Option<bool>,
    #[serde(skip_deserializing)]
    served_by: String,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: None,
            per_page: None,
            tags: Vec::new(),
            exact: None,
            served_by: "querybind".to_string(),
        }
    }
}

impl SearchRequest {
    pub fn served_by(&self) -> &str {
        &self.served_by
    }
}
