//! Framework-agnostic HTTP envelope, shaped like a cloud-function event.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An incoming invocation: the method and the raw body, nothing else.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            http_method: method.into(),
            body,
        }
    }

    pub fn post(body: impl Into<String>) -> Self {
        Self::new("POST", Some(body.into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl HttpResponse {
    /// `200` with an empty body and the full CORS preflight header set.
    pub fn preflight() -> Self {
        let headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Methods".to_string(),
                "POST, OPTIONS".to_string(),
            ),
            (
                "Access-Control-Allow-Headers".to_string(),
                "Content-Type".to_string(),
            ),
            ("Access-Control-Max-Age".to_string(), "86400".to_string()),
        ]);
        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    /// JSON response. `serde_json` writes UTF-8 as-is, so Cyrillic stays readable.
    pub fn json(status_code: u16, body: &impl Serialize) -> Self {
        let body = serde_json::to_string(body)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string());
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, &serde_json::json!({ "error": message }))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
