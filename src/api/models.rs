use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct KeywordRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordResponse {
    pub keywords: Vec<String>,
    pub processing_time_ms: u128,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
