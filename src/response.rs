use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::{PushError, PushResult};

/// Outcome of a single successful push-API call
///
/// Non-2xx answers never reach this type; they fail earlier as
/// [`PushError::Api`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Standard Push Kit response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushResponse {
    pub code: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(rename = "requestId", default)]
    pub request_id: Option<String>,
}

impl PushResponse {
    /// Push Kit reports success with code `80000000`
    pub fn is_accepted(&self) -> bool {
        self.code == "80000000"
    }
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body into any type
    pub fn json<T: DeserializeOwned>(&self) -> PushResult<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| PushError::serialization("failed to parse push API response body", e))
    }

    /// Body as untyped JSON
    pub fn value(&self) -> PushResult<serde_json::Value> {
        self.json()
    }

    /// Body as the vendor's `{code, msg, requestId}` envelope
    pub fn push_response(&self) -> PushResult<PushResponse> {
        self.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_response_parsing() {
        let response = ApiResponse::new(
            200,
            r#"{"code":"80000000","msg":"Success","requestId":"157440955549500001002006"}"#,
        );

        assert!(response.is_success());
        let parsed = response.push_response().unwrap();
        assert!(parsed.is_accepted());
        assert_eq!(parsed.msg.as_deref(), Some("Success"));
        assert_eq!(parsed.request_id.as_deref(), Some("157440955549500001002006"));
    }

    #[test]
    fn test_partial_acceptance_code() {
        let response = ApiResponse::new(200, r#"{"code":"80100000","msg":"Some tokens failed"}"#);
        let parsed = response.push_response().unwrap();
        assert!(!parsed.is_accepted());
        assert!(parsed.request_id.is_none());
    }

    #[test]
    fn test_value_access() {
        let response = ApiResponse::new(200, r#"{"topics":[{"name":"news"}]}"#);
        let value = response.value().unwrap();
        assert_eq!(value["topics"][0]["name"], "news");
    }

    #[test]
    fn test_non_json_body_is_serialization_error() {
        let response = ApiResponse::new(200, "OK");
        let err = response.value().unwrap_err();
        assert_eq!(err.category(), "serialization");
    }
}
