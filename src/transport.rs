//! HTTP adapters for the OAuth server and the push API
//!
//! One blocking `reqwest` client is shared by both adapters. Any non-2xx
//! answer is turned into an error carrying the status and the body text.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use url::Url;

use crate::config::{ClientConfig, Credentials};
use crate::errors::{PushError, PushResult};
use crate::response::ApiResponse;
use crate::token::TokenResponse;

pub const TOKEN_PATH: &str = "/oauth2/v3/token";
const CONTENT_FORM: &str = "application/x-www-form-urlencoded";
const CONTENT_JSON: &str = "application/json";

pub struct Transport {
    client: Client,
    oauth_url: Url,
    push_api_url: Url,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> PushResult<Self> {
        let mut builder = Client::builder().timeout(config.timeout());

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|e| PushError::config_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            oauth_url: config.oauth_url.clone(),
            push_api_url: config.push_api_url.clone(),
        })
    }

    /// Exchange client credentials for an access token
    pub fn request_token(&self, credentials: &Credentials) -> PushResult<TokenResponse> {
        let url = endpoint(&self.oauth_url, TOKEN_PATH)?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_FORM));

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id()),
            ("client_secret", credentials.client_secret()),
        ];

        tracing::debug!(url = %url, "Requesting access token");
        let response = self
            .client
            .post(url.clone())
            .headers(headers)
            .form(&form)
            .send()
            .map_err(|e| PushError::transport("POST", url.as_str(), e))?;

        let status = response.status().as_u16();
        let body = read_body(response, &url)?;

        if !(200..300).contains(&status) {
            tracing::debug!(status, "Token request rejected");
            return Err(PushError::authentication_status(status, body));
        }

        serde_json::from_str(&body).map_err(|e| {
            PushError::authentication(format!("malformed token response: {e}"))
        })
    }

    /// POST a JSON body to the push API with a bearer token
    pub fn post_json<B>(&self, path: &str, access_token: &str, body: &B) -> PushResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = endpoint(&self.push_api_url, path)?;
        let headers = bearer_headers(access_token)?;
        let payload = serde_json::to_vec(body)
            .map_err(|e| PushError::serialization("failed to encode request body", e))?;

        tracing::debug!(url = %url, bytes = payload.len(), "Sending push API request");
        let response = self
            .client
            .post(url.clone())
            .headers(headers)
            .body(payload)
            .send()
            .map_err(|e| PushError::transport("POST", url.as_str(), e))?;

        let status = response.status().as_u16();
        let body = read_body(response, &url)?;

        if !(200..300).contains(&status) {
            tracing::debug!(status, url = %url, "Push API request failed");
            return Err(PushError::api(status, body));
        }

        Ok(ApiResponse::new(status, body))
    }
}

/// Append `path` below whatever path `base` already carries
fn endpoint(base: &Url, path: &str) -> PushResult<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let prefix = format!("{}/", base.path());
        base.set_path(&prefix);
    }
    Ok(base.join(path.trim_start_matches('/'))?)
}

fn bearer_headers(access_token: &str) -> PushResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_JSON));
    let auth_value = HeaderValue::from_str(&format!("Bearer {access_token}"))
        .map_err(|_| PushError::authentication("access token is not a valid header value"))?;
    headers.insert(AUTHORIZATION, auth_value);
    Ok(headers)
}

fn read_body(response: Response, url: &Url) -> PushResult<String> {
    response
        .text()
        .map_err(|e| PushError::transport("POST", url.as_str(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_headers() {
        let headers = bearer_headers("abc.def").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc.def");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_bearer_headers_rejects_control_chars() {
        let err = bearer_headers("bad\ntoken").unwrap_err();
        assert_eq!(err.category(), "auth");
    }

    #[test]
    fn test_endpoint_on_bare_host() {
        let base = Url::parse("https://push-api.cloud.huawei.com").unwrap();
        let url = endpoint(&base, "/v1/10086/messages:send").unwrap();
        assert_eq!(url.as_str(), "https://push-api.cloud.huawei.com/v1/10086/messages:send");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        for raw in ["https://gw.example.com/huawei", "https://gw.example.com/huawei/"] {
            let base = Url::parse(raw).unwrap();

            let url = endpoint(&base, "/v1/10086/messages:send").unwrap();
            assert_eq!(url.as_str(), "https://gw.example.com/huawei/v1/10086/messages:send");

            let url = endpoint(&base, TOKEN_PATH).unwrap();
            assert_eq!(url.as_str(), "https://gw.example.com/huawei/oauth2/v3/token");
        }
    }
}
