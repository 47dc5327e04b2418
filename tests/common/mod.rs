//! Common test utilities and helpers
//!
//! Builds clients wired to an `httpmock` server that plays both the OAuth
//! host and the push API host.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use httpmock::prelude::*;
use httpmock::Mock;
use huawei_push::{ClientConfig, Clock, Credentials, PushClient};
use std::sync::{Arc, Mutex};

pub const CLIENT_ID: &str = "10086";
pub const CLIENT_SECRET: &str = "app-secret";
pub const TOKEN_PATH: &str = "/oauth2/v3/token";
pub const SUCCESS_BODY: &str =
    r#"{"code":"80000000","msg":"Success","requestId":"157440955549500001002006"}"#;

/// Clock that only moves when told to
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new() -> Self {
        let start = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Self(Mutex::new(start))
    }

    pub fn advance(&self, secs: i64) {
        *self.0.lock().unwrap() += Duration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Config pointing both endpoints at the mock server
pub fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(Credentials::new(CLIENT_ID, CLIENT_SECRET).unwrap())
        .with_oauth_url(&server.base_url())
        .unwrap()
        .with_push_api_url(&server.base_url())
        .unwrap()
        .with_timeout_secs(5)
        .unwrap()
}

pub fn client_for(server: &MockServer) -> PushClient {
    PushClient::new(test_config(server)).unwrap()
}

pub fn client_with_clock(server: &MockServer) -> (Arc<ManualClock>, PushClient) {
    let clock = Arc::new(ManualClock::new());
    let client = PushClient::with_clock(test_config(server), clock.clone()).unwrap();
    (clock, client)
}

/// OAuth endpoint answering with `token` valid for `expires_in` seconds
pub fn mock_oauth<'a>(server: &'a MockServer, token: &str, expires_in: i64) -> Mock<'a> {
    let body = serde_json::json!({
        "access_token": token,
        "expires_in": expires_in,
        "token_type": "Bearer",
    });

    server.mock(|when, then| {
        when.method(POST).path(TOKEN_PATH);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

/// Push API endpoint `/v1/{CLIENT_ID}/{action}` returning the standard success body
pub fn mock_push_ok<'a>(server: &'a MockServer, action: &str) -> Mock<'a> {
    let path = format!("/v1/{CLIENT_ID}/{action}");
    server.mock(|when, then| {
        when.method(POST).path(path);
        then.status(200)
            .header("content-type", "application/json")
            .body(SUCCESS_BODY);
    })
}
